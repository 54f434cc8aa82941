use crate::script::Command;

/// A group of changes with the `Keep` elements surrounding them.
/// `old_start` and `new_start` are 0-based positions of the first command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    pub old_start: usize,
    pub new_start: usize,
    pub changes: Vec<Command<T>>,
}

impl<T> Hunk<T> {
    /// Number of left elements covered by this hunk.
    pub fn old_len(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| !matches!(c, Command::Insert(_)))
            .count()
    }

    /// Number of right elements covered by this hunk.
    pub fn new_len(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| !matches!(c, Command::Delete(_)))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkConfig {
    /// How many unchanged elements to show around each change.
    pub context: usize,
}

impl Default for HunkConfig {
    fn default() -> Self {
        HunkConfig { context: 3 }
    }
}

impl HunkConfig {
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }
}
