//! Error types for the scheduling engine.

use thiserror::Error;

use crate::catalog::ItemId;
use crate::scheduler::storage::StoreError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Item not found in catalog: {0}")]
    NotFound(ItemId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
