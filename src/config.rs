//! Extraction options: shot pattern strictness and version capture mode.

use crate::error::ConfigError;
use crate::recognizer::PatternRecognizer;
use serde::{Deserialize, Serialize};

/// Three or more underscore-joined alphanumeric segments.
pub const DEFAULT_SHOT_PATTERN: &str = r"[A-Za-z0-9]+(?:_[A-Za-z0-9]+){2,}";

/// Any number of segments, so `SHOT001_v1` yields shot `SHOT001`.
pub const PERMISSIVE_SHOT_PATTERN: &str = r"[A-Za-z0-9]+(?:_[A-Za-z0-9]+)*";

/// Exactly three segments; anything between them and the version marker
/// is captured as a service suffix.
pub const EXACTLY_THREE_SHOT_PATTERN: &str = r"[A-Za-z0-9]+_[A-Za-z0-9]+_[A-Za-z0-9]+";

/// How the version marker and digits of a token are turned into record fields.
///
/// The mode also decides marker case, independent of the shot pattern:
/// `SH010_020_030_V3` is a token under `Verbatim` but not under `Strict`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionCapture {
    /// `version_name` is the trailing text as written (`v002`, `version2`,
    /// `V3`); no numeric version.
    #[default]
    Verbatim,
    /// Lowercase `v`/`version` only; `version_name` is normalized to
    /// `v<digits>` and the digits are parsed into `version`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Regex for the shot identifier, without anchors or version suffix
    pub shot_pattern: String,
    pub version_capture: VersionCapture,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            shot_pattern: DEFAULT_SHOT_PATTERN.to_string(),
            version_capture: VersionCapture::Verbatim,
        }
    }
}

impl ExtractOptions {
    /// Accept shot names with fewer than three segments.
    pub fn permissive() -> Self {
        Self {
            shot_pattern: PERMISSIVE_SHOT_PATTERN.to_string(),
            ..Self::default()
        }
    }

    /// Exactly three segments, with service suffixes split off.
    pub fn exactly_three() -> Self {
        Self {
            shot_pattern: EXACTLY_THREE_SHOT_PATTERN.to_string(),
            ..Self::default()
        }
    }

    pub fn with_version_capture(mut self, version_capture: VersionCapture) -> Self {
        self.version_capture = version_capture;
        self
    }

    /// Check that the shot pattern compiles into a recognizer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PatternRecognizer::new(self).map(|_| ())
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(ExtractOptions::default().validate().is_ok());
        assert!(ExtractOptions::permissive().validate().is_ok());
        assert!(ExtractOptions::exactly_three().validate().is_ok());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let options = ExtractOptions {
            shot_pattern: "[A-Z".to_string(),
            ..ExtractOptions::default()
        };
        let err = options.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShotPattern { .. }));
        assert!(err.to_string().contains("[A-Z"));
    }

    #[test]
    fn toml_round_trip() {
        let options = ExtractOptions::permissive().with_version_capture(VersionCapture::Strict);
        let toml_str = options.to_toml().unwrap();
        assert!(toml_str.contains("version_capture = \"strict\""));
        assert_eq!(ExtractOptions::from_toml(&toml_str).unwrap(), options);
    }

    #[test]
    fn toml_missing_fields_use_defaults() {
        let options = ExtractOptions::from_toml("version_capture = \"strict\"\n").unwrap();
        assert_eq!(options.shot_pattern, DEFAULT_SHOT_PATTERN);
        assert_eq!(options.version_capture, VersionCapture::Strict);
    }

    #[test]
    fn toml_rejects_unknown_capture_mode() {
        let err = ExtractOptions::from_toml("version_capture = \"loose\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
