//! Loading [`FormatOptions`] from TOML.
//!
//! Missing keys take their defaults, so a file only needs to name what it changes:
//!
//! ```toml
//! show_plus_minus = true
//! scale = "auto_si_prefix"
//! significant_digits = { fixed = 4 }
//! confidence_level = 0.01
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::options::FormatOptions;
use std::fs;
use std::path::Path;

impl FormatOptions {
    /// Parses options from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for invalid TOML or unknown values, and the errors of [`FormatOptions::validate`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let options: FormatOptions =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as [`FormatOptions::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        log::debug!("loading format options from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Renders the options as TOML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
