//! The single payout destination.

use crate::env::{self, CallContext, Environment};
use crate::error::LedgerError;
use crate::types::AccountId;

const BENEFICIARY_KEY: &[u8] = b"beneficiary";

#[derive(Debug, Clone, Default)]
pub struct BeneficiaryRegistry;

impl BeneficiaryRegistry {
    /// Set the first beneficiary. Only succeeds once.
    pub fn init<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        beneficiary: &AccountId,
    ) -> Result<(), LedgerError> {
        if self.is_initialized(&*env)? {
            return Err(LedgerError::AlreadyInitialized);
        }
        env.storage_write(BENEFICIARY_KEY, beneficiary.as_str().as_bytes())?;
        tracing::info!(%beneficiary, "Payments ledger initialized");
        Ok(())
    }

    pub fn is_initialized<E: Environment + ?Sized>(&self, env: &E) -> Result<bool, LedgerError> {
        Ok(env.storage_read(BENEFICIARY_KEY)?.is_some())
    }

    pub fn get<E: Environment + ?Sized>(&self, env: &E) -> Result<AccountId, LedgerError> {
        env::read_string(env, BENEFICIARY_KEY)?
            .map(AccountId::new)
            .ok_or(LedgerError::NotInitialized)
    }

    /// Replace the beneficiary. The new identity is not validated; an
    /// unknown account surfaces when the environment settles a transfer.
    pub fn change<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        ctx: &CallContext,
        beneficiary: &AccountId,
    ) -> Result<(), LedgerError> {
        if !ctx.is_privileged() {
            return Err(LedgerError::Unauthorized {
                caller: ctx.caller.clone(),
            });
        }
        let previous = self.get(&*env)?;
        env.storage_write(BENEFICIARY_KEY, beneficiary.as_str().as_bytes())?;
        tracing::info!(%previous, %beneficiary, "Beneficiary changed");
        Ok(())
    }
}
