use crate::script::{CommandVisitor, EditScript};
use std::convert::Infallible;
use tracing::debug;

/// Receives the replacement blocks found by a [`ReplacementsFinder`].
pub trait ReplacementsHandler<T> {
    type Error;

    /// Called once per block: `skipped` elements were kept since the previous
    /// block, then the `from` elements of the left sequence were replaced by
    /// the `to` elements of the right sequence.
    fn handle_replacement(&mut self, skipped: usize, from: &[T], to: &[T]) -> Result<(), Self::Error>;
}

impl<T, F> ReplacementsHandler<T> for F
where
    F: FnMut(usize, &[T], &[T]),
{
    type Error = Infallible;

    fn handle_replacement(&mut self, skipped: usize, from: &[T], to: &[T]) -> Result<(), Infallible> {
        self(skipped, from, to);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Accumulating,
}

/// A [`CommandVisitor`] coalescing runs of `Delete` and `Insert` commands into
/// replacement blocks, separated by the number of kept elements.
///
/// Blocks are reported when a `Keep` follows pending changes. Whatever is
/// pending when the traversal ends is only reported by [`finish`](Self::finish),
/// which [`visit_script`](Self::visit_script) calls for you.
///
/// # Examples
///
/// ```
/// use editscript::{diff_chars, ReplacementsFinder};
///
/// let mut blocks = vec![];
/// let script = diff_chars("branco", "blanco");
/// ReplacementsFinder::new(|skipped: usize, from: &[char], to: &[char]| {
///     blocks.push((skipped, from.to_vec(), to.to_vec()));
/// })
/// .visit_script(&script)
/// .unwrap();
///
/// assert_eq!(blocks, vec![(1, vec!['r'], vec!['l']), (4, vec![], vec![])]);
/// ```
pub struct ReplacementsFinder<T, H> {
    handler: H,
    state: State,
    skipped: usize,
    from: Vec<T>,
    to: Vec<T>,
}

impl<T: Clone, H: ReplacementsHandler<T>> ReplacementsFinder<T, H> {
    pub fn new(handler: H) -> Self {
        ReplacementsFinder {
            handler,
            state: State::Idle,
            skipped: 0,
            from: vec![],
            to: vec![],
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Reports the trailing block, if anything is pending, and resets the finder.
    pub fn finish(&mut self) -> Result<(), H::Error> {
        if self.state == State::Accumulating || self.skipped != 0 {
            self.flush()?;
        }
        self.skipped = 0;
        Ok(())
    }

    /// Visits `script`, reports the trailing block and hands the handler back.
    pub fn visit_script(mut self, script: &EditScript<T>) -> Result<H, H::Error> {
        script.visit(&mut self)?;
        self.finish()?;
        Ok(self.handler)
    }

    fn flush(&mut self) -> Result<(), H::Error> {
        debug!(
            skipped = self.skipped,
            from = self.from.len(),
            to = self.to.len(),
            "replacement"
        );
        let result = self
            .handler
            .handle_replacement(self.skipped, &self.from, &self.to);
        self.from.clear();
        self.to.clear();
        self.skipped = 0;
        self.state = State::Idle;
        result
    }
}

impl<T: Clone, H: ReplacementsHandler<T>> CommandVisitor<T> for ReplacementsFinder<T, H> {
    type Error = H::Error;

    fn visit_insert(&mut self, element: &T) -> Result<(), H::Error> {
        self.state = State::Accumulating;
        self.to.push(element.clone());
        Ok(())
    }

    fn visit_delete(&mut self, element: &T) -> Result<(), H::Error> {
        self.state = State::Accumulating;
        self.from.push(element.clone());
        Ok(())
    }

    fn visit_keep(&mut self, _: &T) -> Result<(), H::Error> {
        if self.state == State::Accumulating {
            self.flush()?;
        }
        self.skipped += 1;
        Ok(())
    }
}
