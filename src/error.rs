use thiserror::Error;

/// Rejected initial capacity passed to a map constructor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// A zero request is refused at construction instead of being
    /// normalized to 3; `resize_table` on a chaining map ignores 0 too.
    #[error("capacity must be at least 1")]
    Zero,
    #[error("requested capacity {requested} exceeds the maximum of {max}")]
    TooLarge { requested: usize, max: usize },
}

/// Shared constructor precondition for both map variants.
pub(crate) fn check_capacity(requested: usize) -> Result<(), CapacityError> {
    if requested == 0 {
        return Err(CapacityError::Zero);
    }
    if requested > crate::prime::MAX_CAPACITY {
        return Err(CapacityError::TooLarge {
            requested,
            max: crate::prime::MAX_CAPACITY,
        });
    }
    Ok(())
}
