pub mod config;
pub mod errors;
pub mod types;

pub use errors::DashError;
pub use types::{LogRecord, LogsResponse};
