use crate::backend::diff_backend::CompareError;
use crate::render::DiffOp;

/// Response messages from background operations
pub enum ResponseMessage {
    /// Result of the compare request issued with sequence number `seq`
    DiffComputed {
        seq: u64,
        result: Result<Vec<DiffOp>, CompareError>,
    },
}
