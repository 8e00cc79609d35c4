#![forbid(unsafe_code)]

pub mod error;
pub mod log;

pub use error::{LogError, LogErrorKind};
pub use log::{ProgramState, WorkoutLog};
