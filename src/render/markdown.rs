//! GitHub-flavored markdown renderer.
//!
//! An index of shots followed by one section per record with its note and
//! attachment list.

use crate::render::Renderer;
use anyhow::Result;
use vfx_feedback::ShotRecord;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, records: &[ShotRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok("_No shot feedback found._\n".to_string());
        }

        let mut output = String::from("## Index\n\n");
        for record in records {
            let title = heading(record);
            output.push_str(&format!("* [{}](#{})\n", title, github_slug(&title)));
        }
        output.push('\n');

        for record in records {
            output.push_str(&render_record(record));
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn heading(record: &ShotRecord) -> String {
    if record.version_name.is_empty() {
        record.shot_name.clone()
    } else {
        format!("{} {}", record.shot_name, record.version_name)
    }
}

fn render_record(record: &ShotRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", heading(record)));
    lines.push(record.note.clone());

    if !record.attachment.is_empty() {
        lines.push(String::new());
        lines.push("#### Attachments\n".to_string());
        for path in &record.attachment {
            lines.push(format!("* `{}`", path));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// GitHub heading anchor: lowercase, drop everything but alphanumerics,
/// spaces and hyphens (underscores included), spaces become hyphens.
fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
