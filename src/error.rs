#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("element at index {index} does not match the script")]
    Mismatch { index: usize },
    #[error("script consumes {expected} elements but the sequence has {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
