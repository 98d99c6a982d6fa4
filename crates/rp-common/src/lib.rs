//! Rampart shared runtime helpers.

pub mod logging;

pub use logging::{init_logging_with, startup_logging, LogFormat};
