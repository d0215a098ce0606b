use thiserror::Error;

/// A caller flag that has no counterpart in the native enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("transpose kind {0} is outside 0..=2")]
    Transpose(i32),
}
