//! Stock workers that do not own state

mod filter;
mod logging;

pub use filter::FilterWorker;
pub use logging::LoggingWorker;
