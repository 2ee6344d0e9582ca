//! JSON renderer — the record list as a pretty-printed array.

use crate::render::Renderer;
use anyhow::{Context, Result};
use vfx_feedback::ShotRecord;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, records: &[ShotRecord]) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(records).context("failed to serialize records")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
