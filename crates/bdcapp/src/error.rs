use thiserror::Error;

#[derive(Error, Debug)]
pub enum BdcError {
    #[error("Store already has a root node")]
    AlreadyInitialized,

    #[error("Unknown parent: {0}")]
    UnknownParent(u64),

    #[error("Node {0} already has a parent")]
    Linkage(u64),

    #[error("Node not found: {0}")]
    NodeNotFound(u64),

    /// The cache is in a state `save` cannot commit. Not recoverable.
    #[error("Cache consistency violation: {0}")]
    Consistency(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BdcError>;
