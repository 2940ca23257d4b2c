pub mod compare_backend;
pub mod diff_backend;

pub use compare_backend::CompareBackend;
pub use diff_backend::{
    CompareError, DiffProvider, LineDiffProvider, char_diff, has_meaningful_changes,
};
