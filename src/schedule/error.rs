use thiserror::Error;

use crate::interval::IntervalSetError;

/// Errors raised while applying a [`Mutation`](super::mutation::Mutation) to
/// a [`Schedule`](super::Schedule).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error(transparent)]
    IntervalSet(#[from] IntervalSetError),
}
