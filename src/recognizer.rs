//! Shot token recognition.
//!
//! A token is a shot identifier, an optional service suffix and a version
//! marker, optionally wrapped in backticks:
//!
//! ```text
//! `SH020_080_222_v002`          shot SH020_080_222, version v002
//! SHT010_101_123_comp_v001      shot SHT010_101_123, service comp (exactly-three pattern)
//! `ANM003_070_112_01`           shot ANM003_070_112_01, no version
//! ```
//!
//! The versioned form is tried first. A token without a version marker has
//! to open the line, either backticked (after an optional `-` bullet) or bare
//! and followed by `:`, `-->` or the end of the line. It must also contain an
//! underscore and must not end in something version-like. Identifiers in
//! running prose (`key_light_rig is too hot`) never open a record.

use crate::config::{ExtractOptions, VersionCapture};
use crate::error::ConfigError;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

// A bare identifier ending like a version is a versioned token the shot
// pattern rejected, not an unversioned one
static RE_VERSION_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_(?:version|v)\d+$").unwrap());

/// Finds the shot token on a single line.
pub trait ShotRecognizer: Send + Sync {
    fn recognize(&self, line: &str) -> Option<ShotToken>;
}

/// Structured pieces of a recognized token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotToken {
    pub shot_name: String,
    /// Segments between the shot name and the version marker, without the
    /// leading underscore
    pub service: Option<String>,
    /// `v` or `version`, as written
    pub marker: Option<String>,
    pub digits: Option<String>,
    /// Byte range of the token within the line, backticks included
    pub span: Range<usize>,
}

impl ShotToken {
    pub fn version_name(&self, mode: VersionCapture) -> String {
        let (Some(marker), Some(digits)) = (&self.marker, &self.digits) else {
            return String::new();
        };
        let suffix = match mode {
            VersionCapture::Verbatim => format!("{marker}{digits}"),
            VersionCapture::Strict => format!("v{digits}"),
        };
        match &self.service {
            Some(service) => format!("{service}_{suffix}"),
            None => suffix,
        }
    }

    /// Numeric version under strict capture. Digits that overflow `u32`
    /// yield `None`.
    pub fn version(&self, mode: VersionCapture) -> Option<u32> {
        match mode {
            VersionCapture::Strict => self.digits.as_deref()?.parse().ok(),
            VersionCapture::Verbatim => None,
        }
    }
}

/// Regex-backed recognizer built from [`ExtractOptions`].
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    versioned: Regex,
    backticked: Regex,
    leading: Regex,
}

impl PatternRecognizer {
    pub fn new(options: &ExtractOptions) -> Result<Self, ConfigError> {
        let shot = &options.shot_pattern;
        let marker = match options.version_capture {
            VersionCapture::Verbatim => "(?i:version|v)",
            VersionCapture::Strict => "version|v",
        };
        let versioned = format!(
            r"`?\b(?P<shot>(?:{shot}))(?:_(?P<service>[A-Za-z0-9]+(?:_[A-Za-z0-9]+)*?))?_(?P<marker>{marker})(?P<digits>\d+)\b`?"
        );
        let backticked = format!(r"^(?:-+\s*)?`(?P<shot>(?:{shot}))`");
        let leading = format!(r"^(?P<shot>(?:{shot}))(?:$|\s*:|\s*-->)");

        Ok(Self {
            versioned: compile(&versioned, shot)?,
            backticked: compile(&backticked, shot)?,
            leading: compile(&leading, shot)?,
        })
    }

    fn unversioned(&self, line: &str) -> Option<ShotToken> {
        if let Some(caps) = self.backticked.captures(line) {
            let whole = caps.get(0)?;
            return bare_token(&caps, whole.start()..whole.end());
        }
        let caps = self.leading.captures(line)?;
        let shot = caps.name("shot")?;
        bare_token(&caps, 0..shot.end())
    }
}

impl ShotRecognizer for PatternRecognizer {
    fn recognize(&self, line: &str) -> Option<ShotToken> {
        for caps in self.versioned.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            if embedded_in_path(line, whole.range()) {
                continue;
            }
            let Some(shot) = caps.name("shot").filter(|m| !m.is_empty()) else {
                continue;
            };
            return Some(ShotToken {
                shot_name: shot.as_str().to_string(),
                service: caps.name("service").map(|m| m.as_str().to_string()),
                marker: caps.name("marker").map(|m| m.as_str().to_string()),
                digits: caps.name("digits").map(|m| m.as_str().to_string()),
                span: whole.range(),
            });
        }
        self.unversioned(line)
    }
}

fn compile(source: &str, shot_pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(source).map_err(|source| ConfigError::InvalidShotPattern {
        pattern: shot_pattern.to_string(),
        source,
    })
}

fn bare_token(caps: &Captures, span: Range<usize>) -> Option<ShotToken> {
    let shot = caps.name("shot")?.as_str();
    if !shot.contains('_') || RE_VERSION_TAIL.is_match(shot) {
        return None;
    }
    Some(ShotToken {
        shot_name: shot.to_string(),
        service: None,
        marker: None,
        digits: None,
        span,
    })
}

/// True when the match sits inside a path or file name, e.g.
/// `/shots/SH010_020_030_v001/comp.exr` or `SH010_020_030_v001.mov`.
fn embedded_in_path(line: &str, span: Range<usize>) -> bool {
    let before = line[..span.start].chars().next_back();
    let mut after = line[span.end..].chars();
    let next = after.next();
    matches!(before, Some('/' | '\\' | '.'))
        || matches!(next, Some('/' | '\\'))
        || (next == Some('.') && after.next().is_some_and(|c| c.is_ascii_alphanumeric()))
}
