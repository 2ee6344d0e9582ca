//! vfx-feedback — pull per-shot review records out of free-text feedback.
//!
//! Review notes arrive as emails and chat logs that mention shots
//! (`SH020_080_222_v002`), reviewer comments and annotation paths in
//! whatever shape the author felt like typing. Extraction runs in two passes:
//!
//! 1. **Paths** — every filesystem-looking path in the message is collected
//!    up front ([`paths::extract_paths`]).
//! 2. **Aggregate** — a line-by-line state machine opens a record per shot
//!    token, captures the note that follows and attaches every path whose
//!    text mentions the shot ([`aggregate`]).
//!
//! ```
//! let message = "`SH010_040_111_v001` - needs more brightness\n\
//!                - /anno/SH010_040_111_v001_file.0001.png\n";
//! let records = vfx_feedback::extract(message);
//! assert_eq!(records[0].shot_name, "SH010_040_111");
//! assert_eq!(records[0].note, "needs more brightness");
//! assert_eq!(records[0].attachment, ["/anno/SH010_040_111_v001_file.0001.png"]);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod recognizer;


pub use config::{ExtractOptions, VersionCapture};
pub use error::ConfigError;
pub use model::ShotRecord;
pub use recognizer::{PatternRecognizer, ShotRecognizer, ShotToken};

use aggregate::Context;
use std::sync::LazyLock;

static DEFAULT_EXTRACTOR: LazyLock<Extractor> = LazyLock::new(|| {
    Extractor::new(&ExtractOptions::default()).expect("default shot pattern compiles")
});

/// A configured extraction pipeline. Patterns are compiled once in
/// [`Extractor::new`] and reused for every message.
pub struct Extractor {
    recognizer: Box<dyn ShotRecognizer>,
    version_capture: VersionCapture,
}

impl Extractor {
    pub fn new(options: &ExtractOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            recognizer: Box::new(PatternRecognizer::new(options)?),
            version_capture: options.version_capture,
        })
    }

    /// Build an extractor around a custom token recognizer.
    pub fn with_recognizer(
        recognizer: impl ShotRecognizer + 'static,
        version_capture: VersionCapture,
    ) -> Self {
        Self {
            recognizer: Box::new(recognizer),
            version_capture,
        }
    }

    /// Extract the sealed shot records from `message`, in token order.
    pub fn extract(&self, message: &str) -> Vec<ShotRecord> {
        let paths = paths::extract_paths(message);
        let ctx = Context {
            recognizer: self.recognizer.as_ref(),
            paths: &paths,
            version_capture: self.version_capture,
        };
        aggregate::aggregate(message, &ctx)
    }
}

/// Extract records using [`ExtractOptions::default`].
pub fn extract(message: &str) -> Vec<ShotRecord> {
    DEFAULT_EXTRACTOR.extract(message)
}

/// Extract records with caller-supplied options. Fails only when the
/// configured shot pattern does not compile.
pub fn extract_with(message: &str, options: &ExtractOptions) -> Result<Vec<ShotRecord>, ConfigError> {
    Ok(Extractor::new(options)?.extract(message))
}
