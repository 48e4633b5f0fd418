//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Rendering is pure: [`render`] turns a [`CommandOutput`] into text and
//! the front-ends decide where it goes. Printing helpers respect the quiet
//! flag, except for errors which are always shown.

use std::fmt::Display;

use crate::core::config::HashStyle;
use crate::core::types::Oid;
use crate::git::{CommitInfo, FileStatus, StatusReport};
use crate::module::CommandOutput;

/// `log` date layout, e.g. `Mon Jan 2 15:04:05 2006`.
pub const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - confirmations suppressed
    Quiet,
    /// Normal mode - standard output
    Normal,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (always shown on stdout).
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a hash according to the configured style.
pub fn format_hash(oid: &Oid, style: HashStyle) -> &str {
    match style {
        HashStyle::Full => oid.as_str(),
        HashStyle::Short => oid.short(Oid::SHORT_LEN),
    }
}

/// Render a command's result as plain text without a trailing newline.
pub fn render(output: &CommandOutput, style: HashStyle) -> String {
    match output {
        CommandOutput::Initialized { git_dir } => {
            format!("Initialized empty Git repository in {}", git_dir.display())
        }
        CommandOutput::Status(report) => render_status(report),
        CommandOutput::Added { path } => format!("Added files: {}", path),
        CommandOutput::Committed { oid, message } => {
            let summary = message.lines().next().unwrap_or("").trim_end();
            format!("Committed {}: {}", format_hash(oid, style), summary)
        }
        CommandOutput::Log(commits) => render_log(commits, style),
    }
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} {}", self.staged, self.unstaged, self.path)
    }
}

/// Render a status report.
///
/// ```text
/// On branch main
/// Changes:
///   A  notes.md
///   ?? draft.md
/// ```
pub fn render_status(report: &StatusReport) -> String {
    let mut lines = Vec::new();

    match &report.branch {
        Some(branch) => lines.push(format!("On branch {}", branch)),
        None => lines.push("Not currently on any branch.".to_string()),
    }

    if report.is_clean() {
        lines.push("nothing to commit, working tree clean".to_string());
    } else {
        lines.push("Changes:".to_string());
        lines.push(format_list(&report.entries, "  "));
    }

    lines.join("\n")
}

/// Render history, newest first.
///
/// ```text
/// Commit History:
/// 1a2b3c4 Add reading notes
/// Author: Memex User <user@memex.local>
/// Date: Mon Jan 2 15:04:05 2006
/// ```
///
/// Message bodies follow the summary, indented by four spaces. Entries are
/// separated by a blank line.
pub fn render_log(commits: &[CommitInfo], style: HashStyle) -> String {
    let entries: Vec<String> = commits
        .iter()
        .map(|commit| render_commit(commit, style))
        .collect();

    if entries.is_empty() {
        return "Commit History:".to_string();
    }

    format!("Commit History:\n{}", entries.join("\n\n"))
}

fn render_commit(commit: &CommitInfo, style: HashStyle) -> String {
    let mut lines = vec![format!(
        "{} {}",
        format_hash(&commit.oid, style),
        commit.summary.trim_end()
    )];

    let body = commit
        .message
        .trim_end()
        .split_once('\n')
        .map(|(_, rest)| rest.trim_matches('\n'))
        .unwrap_or("");
    for line in body.lines() {
        lines.push(format!("    {}", line).trim_end().to_string());
    }

    lines.push(format!(
        "Author: {} <{}>",
        commit.author_name, commit.author_email
    ));
    lines.push(format!("Date: {}", commit.author_time.format(DATE_FORMAT)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::StatusCode;
    use chrono::{FixedOffset, TimeZone};
    use std::path::PathBuf;

    const HEX: &str = "1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d";

    fn commit(message: &str) -> CommitInfo {
        let offset = FixedOffset::east_opt(0).unwrap();
        CommitInfo {
            oid: Oid::new(HEX).unwrap(),
            summary: message.lines().next().unwrap_or("").to_string(),
            message: message.to_string(),
            author_name: "Memex User".into(),
            author_email: "user@memex.local".into(),
            author_time: offset.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
        }
    }

    mod status {
        use super::*;

        #[test]
        fn clean_tree() {
            let report = StatusReport {
                branch: Some("main".into()),
                entries: vec![],
            };
            assert_eq!(
                render_status(&report),
                "On branch main\nnothing to commit, working tree clean"
            );
        }

        #[test]
        fn changed_paths_use_two_letter_codes() {
            let report = StatusReport {
                branch: Some("main".into()),
                entries: vec![
                    FileStatus {
                        path: "a.md".into(),
                        staged: StatusCode::Added,
                        unstaged: StatusCode::Unmodified,
                    },
                    FileStatus {
                        path: "b.md".into(),
                        staged: StatusCode::Untracked,
                        unstaged: StatusCode::Untracked,
                    },
                ],
            };
            assert_eq!(
                render_status(&report),
                "On branch main\nChanges:\n  A  a.md\n  ?? b.md"
            );
        }

        #[test]
        fn detached_head() {
            let report = StatusReport::default();
            assert!(render_status(&report).starts_with("Not currently on any branch."));
        }
    }

    mod log {
        use super::*;

        #[test]
        fn short_hash_layout() {
            let text = render_log(&[commit("Add notes\n")], HashStyle::Short);
            assert_eq!(
                text,
                "Commit History:\n\
                 1a2b3c4 Add notes\n\
                 Author: Memex User <user@memex.local>\n\
                 Date: Mon Jan 2 15:04:05 2006"
            );
        }

        #[test]
        fn full_hash_layout() {
            let text = render_log(&[commit("Add notes")], HashStyle::Full);
            assert!(text.contains(&format!("{} Add notes", HEX)));
        }

        #[test]
        fn body_is_indented() {
            let text = render_log(&[commit("Title\n\nFirst line\nSecond")], HashStyle::Short);
            assert!(text.contains("1a2b3c4 Title\n    First line\n    Second\nAuthor:"));
        }

        #[test]
        fn entries_separated_by_blank_line() {
            let text = render_log(&[commit("one"), commit("two")], HashStyle::Short);
            assert!(text.contains("2006\n\n1a2b3c4 two"));
        }
    }

    mod confirmations {
        use super::*;

        #[test]
        fn committed_uses_summary_and_style() {
            let output = CommandOutput::Committed {
                oid: Oid::new(HEX).unwrap(),
                message: "Title\n\nbody".into(),
            };
            assert_eq!(render(&output, HashStyle::Short), "Committed 1a2b3c4: Title");
        }

        #[test]
        fn initialized_names_git_dir() {
            let output = CommandOutput::Initialized {
                git_dir: PathBuf::from("/srv/memex/.git"),
            };
            assert_eq!(
                render(&output, HashStyle::Full),
                "Initialized empty Git repository in /srv/memex/.git"
            );
        }

        #[test]
        fn added_echoes_path() {
            let output = CommandOutput::Added { path: ".".into() };
            assert_eq!(render(&output, HashStyle::Full), "Added files: .");
        }
    }

    #[test]
    fn format_list_prefixes_each_item() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
    }
}
