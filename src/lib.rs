//! Shortest edit scripts between sequences.
//!
//! [`SequenceComparator`] runs Myers' O(ND) algorithm over two slices and
//! produces an [`EditScript`]: an ordered list of `Insert`, `Delete` and `Keep`
//! [`Command`]s. A script is consumed through a [`CommandVisitor`], either
//! directly, through the [`ReplacementsFinder`] which coalesces adjacent
//! changes into replacement blocks, or through the [`HunkBuilder`] which
//! groups changes with surrounding context.
//!
//! ```
//! use editscript::SequenceComparator;
//!
//! let old: Vec<char> = "glop glop".chars().collect();
//! let new: Vec<char> = "pas glop pas glop".chars().collect();
//! let script = SequenceComparator::new(&old, &new).script();
//!
//! assert_eq!(script.lcs_length(), 9);
//! assert_eq!(script.modifications(), 8);
//! assert_eq!(script.execute(), new);
//! ```

pub mod comparator;
pub mod error;
pub mod hunks;
pub mod replacements;
pub mod script;

pub use comparator::{diff_chars, diff_lines, SequenceComparator};
pub use error::ApplyError;
pub use hunks::{unified_diff, Hunk, HunkBuilder, HunkConfig};
pub use replacements::{ReplacementsFinder, ReplacementsHandler};
pub use script::{Command, CommandVisitor, EditScript, ScriptExecutor};
