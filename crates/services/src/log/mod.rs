mod queries;
mod service;
mod state;

// Public API of the workout log subsystem.
pub use crate::error::{LogError, LogErrorKind};
pub use service::WorkoutLog;
pub use state::ProgramState;
