//! Boundary with the execution environment.
//!
//! The ledger never reads ambient globals: caller identity and attached value
//! arrive in a [`CallContext`], and storage and transfers go through the
//! [`Environment`] trait so the engine runs unchanged against a real chain
//! host or the in-memory [`MemoryHost`](crate::host::MemoryHost).

use crate::error::EnvironmentError;
use crate::types::{AccountId, Amount};

/// Per-invocation facts supplied by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Identity that initiated the call.
    pub caller: AccountId,
    /// Value attached to the call, in the smallest unit.
    pub attached_deposit: Amount,
    /// The contract's own account. Privileged methods only accept calls
    /// from this identity.
    pub current_account: AccountId,
}

impl CallContext {
    pub fn new(caller: AccountId, attached_deposit: Amount, current_account: AccountId) -> Self {
        Self {
            caller,
            attached_deposit,
            current_account,
        }
    }

    /// Whether the call was made by the contract account itself.
    pub fn is_privileged(&self) -> bool {
        self.caller == self.current_account
    }
}

/// Primitives the ledger consumes from its host.
///
/// Hosts are expected to execute each invocation atomically: if the call
/// returns an error, every write and transfer issued during it is discarded.
pub trait Environment {
    fn storage_read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EnvironmentError>;

    fn storage_write(&mut self, key: &[u8], value: &[u8]) -> Result<(), EnvironmentError>;

    /// Schedule an unconditional transfer. Settlement is not observed.
    fn issue_transfer(
        &mut self,
        destination: &AccountId,
        amount: Amount,
    ) -> Result<(), EnvironmentError>;

    /// Append a diagnostic line to the call's log output.
    fn log(&mut self, message: &str);
}

/// Read a UTF-8 value, treating invalid bytes as corruption.
pub(crate) fn read_string<E: Environment + ?Sized>(
    env: &E,
    key: &[u8],
) -> Result<Option<String>, EnvironmentError> {
    env.storage_read(key)?
        .map(|bytes| {
            String::from_utf8(bytes).map_err(|e| {
                EnvironmentError::Corrupted(format!(
                    "non UTF-8 value under {}: {e}",
                    String::from_utf8_lossy(key)
                ))
            })
        })
        .transpose()
}

/// Read a decimal-encoded integer.
pub(crate) fn read_decimal<E: Environment + ?Sized, T: std::str::FromStr>(
    env: &E,
    key: &[u8],
) -> Result<Option<T>, EnvironmentError>
where
    T::Err: std::fmt::Display,
{
    read_string(env, key)?
        .map(|s| {
            s.parse::<T>().map_err(|e| {
                EnvironmentError::Corrupted(format!(
                    "bad number under {}: {e}",
                    String::from_utf8_lossy(key)
                ))
            })
        })
        .transpose()
}
