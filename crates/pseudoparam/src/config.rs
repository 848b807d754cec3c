//! pass options
//!
//! Options are usually read from the service description:
//!
//! ```yaml
//! custom:
//!   pseudoParameters:
//!     skipRegionReplace: false
//!     allowReferences: false
//! ```
//!
//! Missing keys fall back to their defaults. `debug` and `color` are normally decided by
//! the caller (command line flags), but may be given here as well.
use crate::value::Value;

/// Where options live inside a service description
pub const OPTIONS_PATH: &str = "custom.pseudoParameters";

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Do not promote literal region names (`eu-west-1`) to the region token
    pub skip_region_replace: bool,
    /// Match any `#{...}` token instead of only `#{AWS::...}`
    pub allow_references: bool,
    /// Report every replaced token
    pub debug: bool,
    /// Colorize diagnostics
    pub color: bool,
    /// Nodes nested deeper than this are left untouched
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            skip_region_replace: true,
            allow_references: true,
            debug: false,
            color: true,
            max_depth: 512,
        }
    }
}

impl Options {
    /// Read options from `custom.pseudoParameters`
    ///
    /// A service description without that section yields [Options::default].
    pub fn from_service_description(service: &Value) -> Result<Self, OptionsError> {
        let Some(section) = service.get_path(OPTIONS_PATH) else {
            tracing::debug!(path = OPTIONS_PATH, "no options found, using defaults");
            return Ok(Self::default());
        };

        let json = serde_json::to_value(section)?;
        let options: Self = serde_json::from_value(json)?;
        tracing::debug!(?options, "options loaded");

        Ok(options)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("Invalid options in custom.pseudoParameters")]
    Invalid(#[from] serde_json::Error),
}
