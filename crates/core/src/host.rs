//! In-memory execution environment.
//!
//! Used by the test suite and the `payments` simulator. Each [`MemoryHost::invoke`]
//! snapshots the host state and restores it if the call fails, giving the
//! same all-or-nothing semantics a chain runtime provides.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::contract::PaymentsContract;
use crate::env::{CallContext, Environment};
use crate::error::{EnvironmentError, LedgerError};
use crate::types::{AccountId, Amount};

/// A transfer instruction issued by the contract.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub destination: AccountId,
    pub amount: Amount,
}

#[derive(Debug, Clone, Default)]
struct HostState {
    storage: BTreeMap<Vec<u8>, Vec<u8>>,
    transfers: Vec<Transfer>,
    logs: Vec<String>,
}

#[derive(Debug)]
pub struct MemoryHost {
    contract_account: AccountId,
    state: HostState,
    /// When set, every transfer fails with [`EnvironmentError::Transfer`].
    pub fail_transfers: bool,
}

impl MemoryHost {
    pub fn new(contract_account: impl Into<AccountId>) -> Self {
        Self {
            contract_account: contract_account.into(),
            state: HostState::default(),
            fail_transfers: false,
        }
    }

    pub fn contract_account(&self) -> &AccountId {
        &self.contract_account
    }

    /// Build the context for a call from `caller` with `attached` value.
    pub fn context(&self, caller: impl Into<AccountId>, attached: Amount) -> CallContext {
        CallContext::new(caller.into(), attached, self.contract_account.clone())
    }

    /// Run `f` as one atomic invocation.
    pub fn invoke<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let snapshot = self.state.clone();
        let result = f(self);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Call failed, reverting host state");
            self.state = snapshot;
        }
        result
    }

    /// Dispatch `method` on `contract` as one atomic invocation.
    pub fn call(
        &mut self,
        contract: &PaymentsContract,
        ctx: &CallContext,
        method: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, LedgerError> {
        self.invoke(|host| contract.call(host, ctx, method, args))
    }

    /// Transfers issued by successful calls, oldest first.
    pub fn transfers(&self) -> &[Transfer] {
        &self.state.transfers
    }

    /// Sum of every transfer sent to `destination`.
    pub fn total_transferred_to(&self, destination: &AccountId) -> u128 {
        self.state
            .transfers
            .iter()
            .filter(|t| &t.destination == destination)
            .map(|t| t.amount.get())
            .sum()
    }

    pub fn logs(&self) -> &[String] {
        &self.state.logs
    }

    /// Number of raw storage keys written so far.
    pub fn storage_entries(&self) -> usize {
        self.state.storage.len()
    }
}

impl Environment for MemoryHost {
    fn storage_read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EnvironmentError> {
        Ok(self.state.storage.get(key).cloned())
    }

    fn storage_write(&mut self, key: &[u8], value: &[u8]) -> Result<(), EnvironmentError> {
        self.state.storage.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn issue_transfer(
        &mut self,
        destination: &AccountId,
        amount: Amount,
    ) -> Result<(), EnvironmentError> {
        if self.fail_transfers {
            return Err(EnvironmentError::Transfer(format!(
                "transfer of {amount} to {destination} rejected"
            )));
        }
        self.state.transfers.push(Transfer {
            destination: destination.clone(),
            amount,
        });
        Ok(())
    }

    fn log(&mut self, message: &str) {
        self.state.logs.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_reverts_on_error() {
        let mut host = MemoryHost::new("payments.testnet");
        host.storage_write(b"kept", b"1").unwrap();

        let result: Result<(), LedgerError> = host.invoke(|h| {
            h.storage_write(b"dropped", b"2")?;
            h.issue_transfer(&"bob".into(), Amount::new(5))?;
            h.log("never seen");
            Err(LedgerError::NotInitialized)
        });

        assert!(result.is_err());
        assert_eq!(host.storage_read(b"kept").unwrap(), Some(b"1".to_vec()));
        assert_eq!(host.storage_read(b"dropped").unwrap(), None);
        assert!(host.transfers().is_empty());
        assert!(host.logs().is_empty());
    }

    #[test]
    fn test_invoke_keeps_effects_on_success() {
        let mut host = MemoryHost::new("payments.testnet");
        host.invoke(|h| {
            h.issue_transfer(&"bob".into(), Amount::new(5))?;
            Ok(())
        })
        .unwrap();
        assert_eq!(host.total_transferred_to(&"bob".into()), 5);
    }

    #[test]
    fn test_failing_transfers() {
        let mut host = MemoryHost::new("payments.testnet");
        host.fail_transfers = true;
        let err = host
            .issue_transfer(&"bob".into(), Amount::new(1))
            .unwrap_err();
        assert!(matches!(err, EnvironmentError::Transfer(_)));
    }
}
