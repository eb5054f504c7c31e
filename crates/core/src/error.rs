use crate::types::{AccountId, Amount};

/// Failures reported by the execution environment's primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("transfer failure: {0}")]
    Transfer(String),
    #[error("corrupted state: {0}")]
    Corrupted(String),
}

/// Every reason a contract call can abort.
///
/// Any of these reverts the whole invocation; nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("attach more than {required} to register a new payer (attached {attached})")]
    InsufficientDeposit { attached: Amount, required: Amount },
    #[error("{caller} is not allowed to call this method")]
    Unauthorized { caller: AccountId },
    #[error("environment fault: {0}")]
    EnvironmentFault(#[from] EnvironmentError),
    #[error("contract is not initialized")]
    NotInitialized,
    #[error("contract is already initialized")]
    AlreadyInitialized,
    #[error("amount overflow")]
    AmountOverflow,
    #[error("method {method} does not accept attached value")]
    NotPayable { method: &'static str },
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}
