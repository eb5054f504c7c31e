//! Insertion-ordered payer ledger on top of the environment's key-value storage.
//!
//! Layout under a prefix `p`:
//!
//! ```text
//! p:len            number of payers (decimal)
//! p:key:{index}    account id at insertion index
//! p:val:{account}  cumulative amount (decimal)
//! ```
//!
//! Keys are only ever appended, so an index never changes owner and
//! pagination order is the order of first donation.

use crate::env::{self, Environment};
use crate::error::{EnvironmentError, LedgerError};
use crate::types::{AccountId, Amount};

#[derive(Debug, Clone)]
pub struct LedgerStore {
    prefix: String,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new("payments")
    }
}

impl LedgerStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn len_key(&self) -> Vec<u8> {
        format!("{}:len", self.prefix).into_bytes()
    }

    fn index_key(&self, index: u32) -> Vec<u8> {
        format!("{}:key:{index}", self.prefix).into_bytes()
    }

    fn value_key(&self, account: &AccountId) -> Vec<u8> {
        format!("{}:val:{account}", self.prefix).into_bytes()
    }

    pub fn get<E: Environment + ?Sized>(
        &self,
        env: &E,
        account: &AccountId,
    ) -> Result<Option<Amount>, EnvironmentError> {
        env::read_decimal::<E, Amount>(env, &self.value_key(account))
    }

    pub fn len<E: Environment + ?Sized>(&self, env: &E) -> Result<u32, EnvironmentError> {
        Ok(env::read_decimal::<E, u32>(env, &self.len_key())?.unwrap_or(0))
    }

    pub fn is_empty<E: Environment + ?Sized>(&self, env: &E) -> Result<bool, EnvironmentError> {
        Ok(self.len(env)? == 0)
    }

    /// Account registered at `index`, or `None` past the end.
    pub fn key_at<E: Environment + ?Sized>(
        &self,
        env: &E,
        index: u32,
    ) -> Result<Option<AccountId>, EnvironmentError> {
        if index >= self.len(env)? {
            return Ok(None);
        }
        match env::read_string(env, &self.index_key(index))? {
            Some(id) => Ok(Some(AccountId::new(id))),
            None => Err(EnvironmentError::Corrupted(format!(
                "{}: missing key for index {index}",
                self.prefix
            ))),
        }
    }

    /// Record `amount` as the payer's cumulative total.
    ///
    /// A payer seen for the first time is appended at the end of the order.
    /// Zero is never stored: every key present holds a positive amount.
    pub fn insert<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        account: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidArguments(format!(
                "refusing to store a zero balance for {account}"
            )));
        }
        if self.get(&*env, account)?.is_none() {
            let len = self.len(&*env)?;
            let next = len.checked_add(1).ok_or(LedgerError::AmountOverflow)?;
            env.storage_write(&self.index_key(len), account.as_str().as_bytes())?;
            env.storage_write(&self.len_key(), next.to_string().as_bytes())?;
        }
        env.storage_write(&self.value_key(account), amount.to_string().as_bytes())?;
        Ok(())
    }
}
