mod types;
pub use types::*;

use crate::error::ApplyError;
use crate::hunks::{Hunk, HunkBuilder, HunkConfig};
use std::convert::Infallible;

/// An ordered record of [`Command`]s transforming a left sequence into a right one.
///
/// The script keeps two running counters while commands are appended:
/// the number of `Keep` commands (the LCS length) and the number of
/// `Insert` and `Delete` commands (the modifications).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript<T> {
    commands: Vec<Command<T>>,
    lcs_length: usize,
    modifications: usize,
}

impl<T> Default for EditScript<T> {
    fn default() -> Self {
        EditScript {
            commands: Vec::new(),
            lcs_length: 0,
            modifications: 0,
        }
    }
}

impl<T> EditScript<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, command: Command<T>) {
        if command.is_keep() {
            self.lcs_length += 1;
        } else {
            self.modifications += 1;
        }
        self.commands.push(command);
    }

    /// Length of the longest common subsequence, i.e. the number of `Keep` commands.
    pub fn lcs_length(&self) -> usize {
        self.lcs_length
    }

    /// Number of `Insert` and `Delete` commands.
    pub fn modifications(&self) -> usize {
        self.modifications
    }

    pub fn commands(&self) -> &[Command<T>] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command<T>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_commands(self) -> Vec<Command<T>> {
        self.commands
    }

    /// Replays the commands, in the order they were appended, through `visitor`.
    ///
    /// Stops at the first error returned by the visitor and hands it back unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use editscript::{diff_chars, ScriptExecutor};
    ///
    /// let script = diff_chars("kitten", "sitting");
    /// let mut executor = ScriptExecutor::new();
    /// script.visit(&mut executor).unwrap();
    /// assert_eq!(executor.into_output().into_iter().collect::<String>(), "sitting");
    /// ```
    pub fn visit<V: CommandVisitor<T> + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        for command in &self.commands {
            command.accept(visitor)?;
        }
        Ok(())
    }

    /// Rebuilds the right sequence by keeping `Keep` and `Insert` elements.
    pub fn execute(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut executor = ScriptExecutor::with_capacity(self.len() - self.deletions());
        match self.visit(&mut executor) {
            Ok(()) => executor.into_output(),
            Err(never) => match never {},
        }
    }

    /// Replays the script against `left`, checking every `Keep` and `Delete`
    /// against the element it consumes.
    pub fn apply(&self, left: &[T]) -> Result<Vec<T>, ApplyError>
    where
        T: PartialEq + Clone,
    {
        let expected = self.lcs_length + self.deletions();
        if expected != left.len() {
            return Err(ApplyError::LengthMismatch {
                expected,
                actual: left.len(),
            });
        }

        let mut result = Vec::with_capacity(self.len() - self.deletions());
        let mut index = 0;
        for command in &self.commands {
            match command {
                Command::Insert(el) => result.push(el.clone()),
                Command::Keep(el) | Command::Delete(el) => {
                    let current = &left[index];
                    if current != el {
                        return Err(ApplyError::Mismatch { index });
                    }
                    if command.is_keep() {
                        result.push(current.clone());
                    }
                    index += 1;
                }
            }
        }
        Ok(result)
    }

    /// Groups the changes of this script into hunks surrounded by context.
    pub fn hunks(&self, config: &HunkConfig) -> Vec<Hunk<T>>
    where
        T: Clone,
    {
        let mut builder = HunkBuilder::new(config);
        match self.visit(&mut builder) {
            Ok(()) => builder.finish(),
            Err(never) => match never {},
        }
    }

    fn deletions(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Delete(_)))
            .count()
    }
}

impl<'a, T> IntoIterator for &'a EditScript<T> {
    type Item = &'a Command<T>;
    type IntoIter = std::slice::Iter<'a, Command<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// The reference execution visitor: appends `Insert` and `Keep` elements
/// to its output and ignores `Delete`.
#[derive(Debug, Clone)]
pub struct ScriptExecutor<T> {
    output: Vec<T>,
}

impl<T> Default for ScriptExecutor<T> {
    fn default() -> Self {
        ScriptExecutor { output: Vec::new() }
    }
}

impl<T> ScriptExecutor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ScriptExecutor {
            output: Vec::with_capacity(capacity),
        }
    }

    pub fn output(&self) -> &[T] {
        &self.output
    }

    pub fn into_output(self) -> Vec<T> {
        self.output
    }
}

impl<T: Clone> CommandVisitor<T> for ScriptExecutor<T> {
    type Error = Infallible;

    fn visit_insert(&mut self, element: &T) -> Result<(), Infallible> {
        self.output.push(element.clone());
        Ok(())
    }

    fn visit_delete(&mut self, _: &T) -> Result<(), Infallible> {
        Ok(())
    }

    fn visit_keep(&mut self, element: &T) -> Result<(), Infallible> {
        self.output.push(element.clone());
        Ok(())
    }
}
