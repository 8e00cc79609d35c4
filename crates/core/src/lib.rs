#![forbid(unsafe_code)]

pub mod model;
pub mod progress;
pub mod time;

pub use progress::{DailyVolume, daily_volume, daily_volume_from_records};
pub use time::Clock;
