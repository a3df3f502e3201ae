//! Engine options

use serde::{Deserialize, Serialize};

/// Tunables for decoding and validation.
///
/// Deserialisable from any supported config format; missing keys take
/// their defaults.
///
/// ```
/// use febe_schema::Options;
///
/// let options: Options = toml::from_str("reject_unknown_fields = false").unwrap();
/// assert!(!options.reject_unknown_fields);
/// assert!(Options::default().reject_unknown_fields);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Report input keys the schema does not declare as `UnknownField`
    pub reject_unknown_fields: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            reject_unknown_fields: true,
        }
    }
}
