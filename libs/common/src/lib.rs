//! Shared configuration, logging and error handling for pocketcalc

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::config::{load_config, load_config_with, AppConfig};
    pub use crate::error::{Error, Result};
    pub use crate::logging::{init_logging, LogConfig, LogFormat};
}
