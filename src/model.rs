//! Output records — format-agnostic.

use serde::{Deserialize, Serialize};

/// One shot's review feedback, sealed once a note has been found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRecord {
    /// Shot identifier without service suffix or version, e.g. `SH020_080_222`
    pub shot_name: String,
    /// Version suffix (`v002`, `version2`, `comp_v001`); empty when the
    /// token carried no version marker
    pub version_name: String,
    /// Numeric version, only populated under strict version capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub note: String,
    /// Extracted paths mentioning the shot, in discovery order
    pub attachment: Vec<String>,
}
