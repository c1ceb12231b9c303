//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Read sink credentials and listen port from the environment
//! - Validate configuration legality
//! - Generate `RelayConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//!
//! let config = ConfigLoader::load_from_env().unwrap();
//! println!("Port: {}", config.port);
//! ```

mod parser;
mod validator;

pub use contracts::RelayConfig;

use contracts::RelayError;

/// Configuration loader
///
/// Provides static methods to load configuration from the process
/// environment or from an arbitrary lookup function (for tests).
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment
    ///
    /// # Errors
    /// - Unparseable `PORT` or webhook URL
    /// - Half-configured Telegram credentials
    pub fn load_from_env() -> Result<RelayConfig, RelayError> {
        Self::load_from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key lookup function
    ///
    /// Tests use this seam so they never touch the process environment.
    ///
    /// # Errors
    /// Same as [`Self::load_from_env`].
    pub fn load_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<RelayConfig, RelayError> {
        let config = parser::parse(&lookup)?;
        validator::validate(&config)?;
        Ok(config)
    }
}
