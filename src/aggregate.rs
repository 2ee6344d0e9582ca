//! Line-by-line aggregation of shot tokens, notes and attachments.
//!
//! The walk is a fold: [`step`] takes the accumulator and one line and
//! returns the next accumulator. At most one record is in progress; a new
//! shot token seals it, as does the end of the message. Records that never
//! acquired a note are dropped.

use crate::config::VersionCapture;
use crate::model::ShotRecord;
use crate::recognizer::{ShotRecognizer, ShotToken};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Same-line note forms after a token, in priority order
static NOTE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^\s*:\s*(.*)$").unwrap(),
        Regex::new(r"^\s*-->\s*(.*)$").unwrap(),
        Regex::new(r"^\s*-+\s*(.*)$").unwrap(),
        Regex::new(r"^\s+(.*)$").unwrap(),
    ]
});

/// Read-only collaborators for the fold.
pub struct Context<'a> {
    pub recognizer: &'a dyn ShotRecognizer,
    /// Output of [`crate::paths::extract_paths`] over the whole message
    pub paths: &'a [String],
    pub version_capture: VersionCapture,
}

/// Where the current record is in collecting its note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// No note text seen yet
    Pending,
    /// Following lines continue the note
    Open,
    /// A blank line ended the note
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InProgress {
    pub shot_name: String,
    pub version_name: String,
    pub version: Option<u32>,
    pub note: String,
    pub note_state: NoteState,
    pub attachment: Vec<String>,
}

impl InProgress {
    fn open(token: &ShotToken, mode: VersionCapture) -> Self {
        Self {
            shot_name: token.shot_name.clone(),
            version_name: token.version_name(mode),
            version: token.version(mode),
            note: String::new(),
            note_state: NoteState::Pending,
            attachment: Vec::new(),
        }
    }

    fn push_note(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.note.is_empty() {
            self.note.push(' ');
        }
        self.note.push_str(text);
        self.note_state = NoteState::Open;
    }

    fn refresh_attachments(&mut self, paths: &[String]) {
        let needle = self.shot_name.to_lowercase();
        self.attachment = paths
            .iter()
            .filter(|p| p.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }

    fn seal(self) -> Option<ShotRecord> {
        if self.note.is_empty() {
            debug!(shot = %self.shot_name, "dropping shot without a note");
            return None;
        }
        debug!(
            shot = %self.shot_name,
            attachments = self.attachment.len(),
            "sealed record"
        );
        Some(ShotRecord {
            shot_name: self.shot_name,
            version_name: self.version_name,
            version: self.version,
            note: self.note,
            attachment: self.attachment,
        })
    }
}

/// Fold accumulator: sealed records plus the record in progress.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub sealed: Vec<ShotRecord>,
    pub current: Option<InProgress>,
}

impl Aggregation {
    fn seal_current(&mut self) {
        if let Some(record) = self.current.take().and_then(InProgress::seal) {
            self.sealed.push(record);
        }
    }

    /// Seal the last record and return everything collected.
    pub fn finish(mut self) -> Vec<ShotRecord> {
        self.seal_current();
        self.sealed
    }
}

/// Run the whole fold over `message`.
pub fn aggregate(message: &str, ctx: &Context) -> Vec<ShotRecord> {
    message
        .lines()
        .fold(Aggregation::default(), |acc, line| step(acc, line, ctx))
        .finish()
}

/// Advance the state machine by one line.
pub fn step(mut acc: Aggregation, line: &str, ctx: &Context) -> Aggregation {
    let line = line.trim();

    if line.is_empty() {
        if let Some(current) = acc.current.as_mut() {
            if current.note_state == NoteState::Open {
                current.note_state = NoteState::Closed;
            }
        }
        return acc;
    }

    if let Some(token) = ctx.recognizer.recognize(line) {
        acc.seal_current();
        let mut current = InProgress::open(&token, ctx.version_capture);
        debug!(shot = %current.shot_name, version = %current.version_name, "opened record");
        current.push_note(&inline_note(line.get(token.span.end..).unwrap_or("")));
        acc.current = Some(current);
    } else if let Some(current) = acc.current.as_mut() {
        let is_note_text = !is_attachment_line(line, ctx.paths) && !is_label(line);
        if is_note_text && current.note_state != NoteState::Closed {
            current.push_note(strip_bullet(line));
        }
    }

    if let Some(current) = acc.current.as_mut() {
        current.refresh_attachments(ctx.paths);
    }
    acc
}

/// Note text written on the token's own line, e.g. `: too dark`,
/// `--> too dark`, `- too dark` or ` too dark`.
fn inline_note(rest: &str) -> String {
    let rest = rest.trim_start_matches('`');
    NOTE_PATTERNS
        .iter()
        .filter_map(|re| re.captures(rest))
        .filter_map(|caps| caps.get(1))
        .map(|m| strip_bullet(m.as_str()))
        .find(|note| !note.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn strip_bullet(text: &str) -> &str {
    text.trim().trim_start_matches('-').trim()
}

fn is_attachment_line(line: &str, paths: &[String]) -> bool {
    paths.iter().any(|p| line.contains(p.as_str()))
}

/// Bare section headings such as `Attachments:` or `Review notes:`. Longer
/// lines ending in `:` are sentences and count as note text.
fn is_label(line: &str) -> bool {
    line.ends_with(':') && strip_bullet(line).split_whitespace().count() <= 2
}
