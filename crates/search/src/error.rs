use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectionError>;

/// Why an ordinal could not be resolved against a result list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Nothing to select from: the list is empty")]
    EmptyList,

    #[error("Invalid index number {ordinal}: valid range is 0..{len}")]
    OutOfRange { ordinal: i64, len: usize },

    #[error("Invalid input {input:?}: expected a numerical index")]
    NotAnInteger { input: String },
}
