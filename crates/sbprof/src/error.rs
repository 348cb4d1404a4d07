use thiserror::Error;

/// Host-harness errors.
///
/// The pass and the collectors themselves have no recoverable errors;
/// their preconditions are framework contracts and violations assert.
/// These variants cover the executor and the report/CLI surface.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("read of unbound temporary t{0}")]
    UnboundTemp(u32),
    #[error("no block at pc {0:#x}")]
    NoBlock(u64),
    #[error("block budget exhausted after {0} blocks")]
    BlockBudget(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
