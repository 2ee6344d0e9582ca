//! File path extraction over the raw message text.
//!
//! A path starts at a drive prefix (`C:/`, `D:\`) or at a `/` that is not
//! followed by whitespace, and runs to the next `:` or newline. One match
//! may hold several paths joined by `,` or ` and `.

use regex::Regex;
use std::sync::LazyLock;

static RE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]:[\\/][^:\n]*|/[^:\s][^:\n]*").unwrap());

static RE_JOINER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",| and ").unwrap());

// ':' survives so drive prefixes stay intact
static RE_NON_PATH_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9:/\\._-]").unwrap());

/// Extract cleaned paths in order of appearance. Duplicates are kept.
pub fn extract_paths(text: &str) -> Vec<String> {
    let paths: Vec<String> = RE_PATH
        .find_iter(text)
        .flat_map(|m| RE_JOINER.split(m.as_str()))
        .map(clean_path)
        .filter(|p| !p.is_empty() && p != "/")
        .collect();
    tracing::trace!(count = paths.len(), "extracted paths");
    paths
}

/// Strip trailing `)`/`.` and drop characters that cannot be part of a path.
fn clean_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches(&[')', '.'][..]);
    RE_NON_PATH_CHAR.replace_all(trimmed, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_minutes() {
        let note = r#"
    Meeting minutes 06-26-2023
    Participants: John, Lisa, Daniel
    .
    Action items:
    - John: Update progress on project A
    (see file at: C:/Users/John/Documents/projectA_update.txt)
    - Lisa: Review budget proposal and provide feedback
    (proposal file: /home/lisa/documents/budget_proposal.pdf)
    - Daniel: Organize project files
    (see folder at D:/Projects/project_B)
    .
    Miscellaneous notes:
    There are some images to be reviewed at
    /home/daniel/images/review/
    Reminder to look at the old project files at E:/Archives/OldProjects/
"#;
        assert_eq!(
            extract_paths(note),
            [
                "C:/Users/John/Documents/projectA_update.txt",
                "/home/lisa/documents/budget_proposal.pdf",
                "D:/Projects/project_B",
                "/home/daniel/images/review/",
                "E:/Archives/OldProjects/",
            ]
        );
    }

    #[test]
    fn splits_joined_paths_in_order() {
        let text = "- /anno/a.0001.png and /anno/a.0017.png.\n- /x/one.exr, /x/two.exr\n";
        assert_eq!(
            extract_paths(text),
            ["/anno/a.0001.png", "/anno/a.0017.png", "/x/one.exr", "/x/two.exr"]
        );
    }

    #[test]
    fn keeps_duplicates() {
        let text = "see /a/b.mov\nagain /a/b.mov\n";
        assert_eq!(extract_paths(text), ["/a/b.mov", "/a/b.mov"]);
    }

    #[test]
    fn windows_backslash_paths() {
        let text = r"render at X:\shows\sh010\comp.exr.";
        assert_eq!(extract_paths(text), [r"X:\shows\sh010\comp.exr"]);
    }

    #[test]
    fn slash_before_whitespace_is_not_a_path() {
        assert!(extract_paths("either / or\nand / nothing").is_empty());
    }

    #[test]
    fn stops_at_colon() {
        assert_eq!(extract_paths("/tmp/review: see notes"), ["/tmp/review"]);
    }

    #[test]
    fn trailing_punctuation_after_space() {
        assert_eq!(extract_paths("(file /a/b.png) "), ["/a/b.png"]);
    }
}
