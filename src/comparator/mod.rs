use crate::script::{Command, EditScript};
use tracing::{debug, trace};

/// A run of equal elements on one diagonal of the edit graph.
/// `start` and `end` index the left sequence, `diag` is left index minus right index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snake {
    start: usize,
    end: usize,
    diag: isize,
}

impl Snake {
    fn right_start(&self) -> usize {
        (self.start as isize - self.diag) as usize
    }

    fn right_end(&self) -> usize {
        (self.end as isize - self.diag) as usize
    }

    // an empty snake sitting on the first or last corner cannot split the range
    fn is_corner(&self, start1: usize, end1: usize, start2: usize, end2: usize) -> bool {
        (self.start == end1 && self.diag == end1 as isize - end2 as isize)
            || (self.end == start1 && self.diag == start1 as isize - start2 as isize)
    }
}

/// Working arrays of furthest reaching paths, indexed by diagonal plus an offset.
/// Sized once per comparison and shared by every recursive step.
struct Context {
    forward: Vec<isize>,
    backward: Vec<isize>,
}

impl Context {
    fn new(size: usize) -> Self {
        Context {
            forward: vec![0; size],
            backward: vec![0; size],
        }
    }
}

/// Computes the shortest edit script between two sequences using
/// Myers' O(ND) algorithm with the linear space middle snake refinement.
///
/// # Examples
///
/// ```
/// use editscript::{Command, SequenceComparator};
///
/// let old = vec![1, 2, 3];
/// let new = vec![1, 3, 4];
/// let script = SequenceComparator::new(&old, &new).script();
/// assert_eq!(script.lcs_length(), 2);
/// assert_eq!(script.modifications(), 2);
/// assert_eq!(script.commands(), &[
///     Command::Keep(1),
///     Command::Delete(2),
///     Command::Keep(3),
///     Command::Insert(4),
/// ]);
/// ```
pub struct SequenceComparator<'a, T, F = fn(&T, &T) -> bool> {
    left: &'a [T],
    right: &'a [T],
    eq: F,
}

impl<'a, T: PartialEq> SequenceComparator<'a, T> {
    pub fn new(left: &'a [T], right: &'a [T]) -> Self {
        SequenceComparator {
            left,
            right,
            eq: <T as PartialEq>::eq,
        }
    }
}

impl<'a, T, F> SequenceComparator<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Creates a comparator deciding element equality with `eq`.
    ///
    /// `eq` receives a left element first and a right element second.
    pub fn with_eq(left: &'a [T], right: &'a [T], eq: F) -> Self {
        SequenceComparator { left, right, eq }
    }

    pub fn left(&self) -> &'a [T] {
        self.left
    }

    pub fn right(&self) -> &'a [T] {
        self.right
    }

    /// Builds the edit script turning `left` into `right`.
    ///
    /// The result is deterministic: the same inputs always yield the same script.
    pub fn script(&self) -> EditScript<T>
    where
        T: Clone,
    {
        let mut ctx = Context::new(self.left.len() + self.right.len() + 2);
        let mut script = EditScript::new();
        self.build_script(
            &mut ctx,
            0,
            self.left.len(),
            0,
            self.right.len(),
            &mut script,
        );
        debug!(
            left = self.left.len(),
            right = self.right.len(),
            lcs_length = script.lcs_length(),
            modifications = script.modifications(),
            "edit script built"
        );
        script
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        (self.eq)(&self.left[i], &self.right[j])
    }

    fn build_script(
        &self,
        ctx: &mut Context,
        start1: usize,
        end1: usize,
        start2: usize,
        end2: usize,
        script: &mut EditScript<T>,
    ) where
        T: Clone,
    {
        match self.middle_snake(ctx, start1, end1, start2, end2) {
            Some(snake) if !snake.is_corner(start1, end1, start2, end2) => {
                trace!(
                    start = snake.start,
                    end = snake.end,
                    diag = snake.diag,
                    "middle snake"
                );
                self.build_script(ctx, start1, snake.start, start2, snake.right_start(), script);
                for el in &self.left[snake.start..snake.end] {
                    script.append(Command::Keep(el.clone()));
                }
                self.build_script(ctx, snake.end, end1, snake.right_end(), end2, script);
            }
            _ => self.walk(start1, end1, start2, end2, script),
        }
    }

    /// Emits the commands for a range the middle snake cannot split further,
    /// walking both sides from the front.
    fn walk(&self, start1: usize, end1: usize, start2: usize, end2: usize, script: &mut EditScript<T>)
    where
        T: Clone,
    {
        trace!(start1, end1, start2, end2, "terminal walk");
        let prefer_delete = end1 - start1 > end2 - start2;
        let mut i = start1;
        let mut j = start2;
        while i < end1 || j < end2 {
            if i < end1 && j < end2 && self.equal(i, j) {
                script.append(Command::Keep(self.left[i].clone()));
                i += 1;
                j += 1;
            } else if j == end2 || (i < end1 && prefer_delete) {
                script.append(Command::Delete(self.left[i].clone()));
                i += 1;
            } else {
                script.append(Command::Insert(self.right[j].clone()));
                j += 1;
            }
        }
    }

    /// Finds the middle snake of `left[start1..end1]` against `right[start2..end2]`
    /// by extending forward and backward D-paths until they overlap.
    ///
    /// Returns `None` when either range is empty.
    fn middle_snake(
        &self,
        ctx: &mut Context,
        start1: usize,
        end1: usize,
        start2: usize,
        end2: usize,
    ) -> Option<Snake> {
        let m = end1 - start1;
        let n = end2 - start2;
        if m == 0 || n == 0 {
            return None;
        }

        let (s1, e1) = (start1 as isize, end1 as isize);
        let (s2, e2) = (start2 as isize, end2 as isize);
        let delta = m as isize - n as isize;
        let sum = m + n;
        let offset = (if sum % 2 == 0 { sum } else { sum + 1 }) as isize / 2;
        let Context { forward, backward } = ctx;
        forward[(1 + offset) as usize] = s1;
        backward[(1 + offset) as usize] = e1 + 1;

        for d in 0..=offset {
            let mut k = -d;
            while k <= d {
                let i = (k + offset) as usize;
                if k == -d || (k != d && forward[i - 1] < forward[i + 1]) {
                    forward[i] = forward[i + 1];
                } else {
                    forward[i] = forward[i - 1] + 1;
                }

                let mut x = forward[i];
                let mut y = x - s1 + s2 - k;
                while x < e1 && y < e2 && self.equal(x as usize, y as usize) {
                    x += 1;
                    y += 1;
                    forward[i] = x;
                }

                if delta % 2 != 0 && delta - d <= k && k <= delta + d {
                    let start = backward[(k + offset - delta) as usize];
                    if start <= forward[i] {
                        return Some(self.build_snake(start, k + s1 - s2, end1, end2));
                    }
                }
                k += 2;
            }

            let mut k = delta - d;
            while k <= delta + d {
                let i = (k + offset - delta) as usize;
                if k == delta - d || (k != delta + d && backward[i + 1] <= backward[i - 1]) {
                    backward[i] = backward[i + 1] - 1;
                } else {
                    backward[i] = backward[i - 1];
                }

                let mut x = backward[i] - 1;
                let mut y = x - s1 + s2 - k;
                while x >= s1 && y >= s2 && self.equal(x as usize, y as usize) {
                    backward[i] = x;
                    x -= 1;
                    y -= 1;
                }

                if delta % 2 == 0 && -d <= k && k <= d && backward[i] <= forward[(k + offset) as usize] {
                    return Some(self.build_snake(backward[i], k + s1 - s2, end1, end2));
                }
                k += 2;
            }
        }

        unreachable!("middle snake search exhausted d = {} without overlap", offset)
    }

    fn build_snake(&self, start: isize, diag: isize, end1: usize, end2: usize) -> Snake {
        let start = start as usize;
        let mut end = start;
        while end < end1 {
            let j = end as isize - diag;
            if j >= end2 as isize || !self.equal(end, j as usize) {
                break;
            }
            end += 1;
        }
        Snake { start, end, diag }
    }
}

/// Diffs two strings character by character.
///
/// ```
/// use editscript::diff_chars;
///
/// let script = diff_chars("bottle", "noodle");
/// assert_eq!(script.lcs_length(), 3);
/// assert_eq!(script.modifications(), 6);
/// ```
pub fn diff_chars(left: &str, right: &str) -> EditScript<char> {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    SequenceComparator::new(&left, &right).script()
}

/// Diffs two texts line by line, splitting on `'\n'` only.
pub fn diff_lines<'a>(old: &'a str, new: &'a str) -> EditScript<&'a str> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    SequenceComparator::new(&old_lines, &new_lines).script()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn diff<T: PartialEq + Clone>(old: &[T], new: &[T]) -> EditScript<T> {
        SequenceComparator::new(old, new).script()
    }

    fn count<T>(script: &EditScript<T>, f: fn(&Command<T>) -> bool) -> usize {
        script.iter().filter(|c| f(c)).count()
    }

    // quadratic reference for the LCS length
    fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
        let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                table[i][j] = if a[i] == b[j] {
                    table[i + 1][j + 1] + 1
                } else {
                    table[i + 1][j].max(table[i][j + 1])
                };
            }
        }
        table[0][0]
    }

    proptest! {
        #[test]
        fn test_length_invariant(old: Vec<u8>, new: Vec<u8>) {
            let result = diff(&old, &new);
            let deletes = count(&result, |c| matches!(c, Command::Delete(_)));
            let keeps = count(&result, |c| matches!(c, Command::Keep(_)));
            let inserts = count(&result, |c| matches!(c, Command::Insert(_)));
            prop_assert_eq!(old.len(), deletes + keeps);
            prop_assert_eq!(new.len(), inserts + keeps);
            prop_assert_eq!(result.lcs_length(), keeps);
            prop_assert_eq!(result.modifications(), deletes + inserts);
        }

        #[test]
        fn test_minimal(
            old in prop::collection::vec(0u8..4, 0..40),
            new in prop::collection::vec(0u8..4, 0..40),
        ) {
            let result = diff(&old, &new);
            let lcs = lcs_length(&old, &new);
            prop_assert_eq!(result.lcs_length(), lcs);
            prop_assert_eq!(result.modifications(), old.len() + new.len() - 2 * lcs);
        }

        #[test]
        fn test_execute_rebuilds_new(
            old in prop::collection::vec(0u8..6, 0..60),
            new in prop::collection::vec(0u8..6, 0..60),
        ) {
            let result = diff(&old, &new);
            prop_assert_eq!(&result.execute(), &new);
            prop_assert_eq!(result.apply(&old), Ok(new));
        }

        #[test]
        fn test_payload_origin(
            old in prop::collection::vec(0u8..3, 0..30),
            new in prop::collection::vec(0u8..3, 0..30),
        ) {
            let result = diff(&old, &new);
            let from_old: Vec<u8> = result.iter()
                .filter(|c| !matches!(c, Command::Insert(_)))
                .map(|c| *c.element())
                .collect();
            prop_assert_eq!(from_old, old);
        }

        #[test]
        fn test_idempotency(els: Vec<u8>) {
            let result = diff(&els, &els);
            let expected: Vec<Command<u8>> = els.iter().map(|e| Command::Keep(*e)).collect();
            prop_assert_eq!(result.commands(), expected.as_slice());
            prop_assert_eq!(result.modifications(), 0);
        }

        #[test]
        fn test_new_empty(els: Vec<u8>) {
            let result = diff(&els, &[]);
            let expected: Vec<Command<u8>> = els.iter().map(|e| Command::Delete(*e)).collect();
            prop_assert_eq!(result.commands(), expected.as_slice());
        }

        #[test]
        fn test_old_empty(els: Vec<u8>) {
            let result = diff(&[], &els);
            let expected: Vec<Command<u8>> = els.iter().map(|e| Command::Insert(*e)).collect();
            prop_assert_eq!(result.commands(), expected.as_slice());
        }

        #[test]
        fn test_symmetry(old: Vec<u8>, new: Vec<u8>) {
            let result = diff(&old, &new);
            let result_2 = diff(&new, &old);
            prop_assert_eq!(result.lcs_length(), result_2.lcs_length());
            prop_assert_eq!(
                count(&result, |c| matches!(c, Command::Insert(_))),
                count(&result_2, |c| matches!(c, Command::Delete(_)))
            );
            prop_assert_eq!(
                count(&result, |c| matches!(c, Command::Delete(_))),
                count(&result_2, |c| matches!(c, Command::Insert(_)))
            );
        }

        #[test]
        fn test_deterministic(
            old in prop::collection::vec(0u8..3, 0..30),
            new in prop::collection::vec(0u8..3, 0..30),
        ) {
            let comparator = SequenceComparator::new(&old, &new);
            prop_assert_eq!(comparator.script(), comparator.script());
        }
    }

    #[test]
    fn test_simple_diff() {
        let old = vec!["a", "b", "c"];
        let new = vec!["a", "x", "c"];
        let result = diff(&old, &new);
        assert_eq!(
            result.commands(),
            [
                Command::Keep("a"),
                Command::Insert("x"),
                Command::Delete("b"),
                Command::Keep("c")
            ]
        );
    }

    #[test]
    fn test_single_element_different() {
        let result = diff(&["a"], &["b"]);
        assert_eq!(
            result.commands(),
            [Command::Insert("b"), Command::Delete("a")]
        );
    }

    #[test]
    fn test_append_at_end() {
        let result = diff(&["a"], &["a", "b"]);
        assert_eq!(result.commands(), [Command::Keep("a"), Command::Insert("b")]);
    }

    #[test]
    fn test_disjoint_longer_left() {
        let result = diff_chars("aa", "C");
        assert_eq!(
            result.commands(),
            [
                Command::Insert('C'),
                Command::Delete('a'),
                Command::Delete('a')
            ]
        );
        assert_eq!(result.modifications(), 3);
        assert_eq!(result.lcs_length(), 0);
    }

    #[test]
    fn test_bottle_noodle() {
        let result = diff_chars("bottle", "noodle");
        assert_eq!(result.modifications(), 6);
        assert_eq!(result.lcs_length(), 3);
    }

    #[test]
    fn test_both_empty() {
        let result = diff_chars("", "");
        assert!(result.is_empty());
        assert_eq!(result.modifications(), 0);
        assert_eq!(result.lcs_length(), 0);
    }

    #[test]
    fn test_glop() {
        let result = diff_chars("glop glop", "pas glop pas glop");
        assert_eq!(result.modifications(), 8);
        assert_eq!(result.lcs_length(), 9);
        assert_eq!(
            result.execute().into_iter().collect::<String>(),
            "pas glop pas glop"
        );
    }

    #[test]
    fn test_custom_equality_keeps_left_payload() {
        let old: Vec<char> = "HeLLo".chars().collect();
        let new: Vec<char> = "hello".chars().collect();
        let script =
            SequenceComparator::with_eq(&old, &new, |a: &char, b: &char| a.eq_ignore_ascii_case(b))
                .script();
        assert_eq!(script.modifications(), 0);
        assert_eq!(script.execute(), old);
    }

    #[test]
    fn test_comparator_is_reusable() {
        let old = vec![1, 2, 3, 4, 5];
        let new = vec![5, 4, 3, 2, 1];
        let comparator = SequenceComparator::new(&old, &new);
        let first = comparator.script();
        let second = comparator.script();
        assert_eq!(first, second);
        assert_eq!(first.lcs_length(), 1);
    }

    #[test]
    fn test_diff_lines() {
        let result = diff_lines("hello\nworld\nfoo", "hello\nrust\nfoo");
        assert_eq!(
            result.commands(),
            [
                Command::Keep("hello"),
                Command::Insert("rust"),
                Command::Delete("world"),
                Command::Keep("foo"),
            ]
        );
    }
}
