mod types;
pub use types::*;

use crate::script::{Command, CommandVisitor};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use tracing::debug;

/// Groups the commands of a script into [`Hunk`]s.
///
/// Changes separated by at most `2 * context` kept elements share a hunk.
pub struct HunkBuilder<T> {
    context: usize,
    old_line: usize,
    new_line: usize,
    current: Option<Hunk<T>>,
    // kept elements since the last change of `current`
    trailing: Vec<T>,
    // kept elements preceding the next hunk, at most `context` of them
    leading: VecDeque<T>,
    hunks: Vec<Hunk<T>>,
}

impl<T: Clone> HunkBuilder<T> {
    pub fn new(config: &HunkConfig) -> Self {
        HunkBuilder {
            context: config.context,
            old_line: 0,
            new_line: 0,
            current: None,
            trailing: vec![],
            leading: VecDeque::new(),
            hunks: vec![],
        }
    }

    fn change(&mut self, command: Command<T>) {
        let inserted = matches!(command, Command::Insert(_));
        match self.current {
            Some(ref mut c) => {
                c.changes.extend(self.trailing.drain(..).map(Command::Keep));
                c.changes.push(command);
            }
            None => {
                let old_start = self.old_line - self.leading.len();
                let new_start = self.new_line - self.leading.len();
                let mut changes: Vec<Command<T>> =
                    self.leading.drain(..).map(Command::Keep).collect();
                changes.push(command);
                self.current = Some(Hunk {
                    old_start,
                    new_start,
                    changes,
                });
            }
        }

        if inserted {
            self.new_line += 1;
        } else {
            self.old_line += 1;
        }
    }

    fn close(&mut self) {
        if let Some(mut hunk) = self.current.take() {
            let keep = self.context.min(self.trailing.len());
            hunk.changes
                .extend(self.trailing.drain(..keep).map(Command::Keep));
            debug!(
                old_start = hunk.old_start,
                new_start = hunk.new_start,
                changes = hunk.changes.len(),
                "hunk closed"
            );
            self.hunks.push(hunk);
        }
        let skip = self.trailing.len().saturating_sub(self.context);
        self.leading.extend(self.trailing.drain(..).skip(skip));
    }

    pub fn finish(mut self) -> Vec<Hunk<T>> {
        self.close();
        self.hunks
    }
}

impl<T: Clone> CommandVisitor<T> for HunkBuilder<T> {
    type Error = Infallible;

    fn visit_insert(&mut self, element: &T) -> Result<(), Infallible> {
        self.change(Command::Insert(element.clone()));
        Ok(())
    }

    fn visit_delete(&mut self, element: &T) -> Result<(), Infallible> {
        self.change(Command::Delete(element.clone()));
        Ok(())
    }

    fn visit_keep(&mut self, element: &T) -> Result<(), Infallible> {
        if self.current.is_some() {
            self.trailing.push(element.clone());
            if self.trailing.len() > 2 * self.context {
                self.close();
            }
        } else {
            self.leading.push_back(element.clone());
            while self.leading.len() > self.context {
                self.leading.pop_front();
            }
        }
        self.old_line += 1;
        self.new_line += 1;
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Keep(el) => write!(f, " {}", el),
            Command::Insert(el) => write!(f, "+{}", el),
            Command::Delete(el) => write!(f, "-{}", el),
        }
    }
}

/// Renders the hunk in unified diff format, with 1-based line numbers.
impl<T: fmt::Display> fmt::Display for Hunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start + 1,
            self.old_len(),
            self.new_start + 1,
            self.new_len()
        )?;
        for change in &self.changes {
            write!(f, "\n{}", change)?;
        }
        Ok(())
    }
}

/// Renders hunks as a unified diff with `---`/`+++` file headers.
///
/// Returns an empty string when there are no hunks.
///
/// # Examples
///
/// ```
/// use editscript::{diff_lines, unified_diff, HunkConfig};
///
/// let script = diff_lines("a\nb\nc", "a\nx\nc");
/// let patch = unified_diff(&script.hunks(&HunkConfig::default()), None, None);
/// assert_eq!(patch, "--- old\n+++ new\n@@ -1,3 +1,3 @@\n a\n+x\n-b\n c\n");
/// ```
pub fn unified_diff<T: fmt::Display>(
    hunks: &[Hunk<T>],
    old_name: Option<&str>,
    new_name: Option<&str>,
) -> String {
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "--- {}\n+++ {}\n",
        old_name.unwrap_or("old"),
        new_name.unwrap_or("new")
    );
    for hunk in hunks {
        out.push_str(&hunk.to_string());
        out.push('\n');
    }
    out
}
