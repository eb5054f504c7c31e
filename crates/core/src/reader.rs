//! Read-only queries over the payer ledger and beneficiary.

use crate::env::Environment;
use crate::error::LedgerError;
use crate::registry::BeneficiaryRegistry;
use crate::store::LedgerStore;
use crate::types::{AccountId, Amount, PayerRecord};

#[derive(Debug, Clone)]
pub struct LedgerReader {
    store: LedgerStore,
    registry: BeneficiaryRegistry,
    default_limit: u32,
}

impl LedgerReader {
    pub fn new(store: LedgerStore, registry: BeneficiaryRegistry, default_limit: u32) -> Self {
        Self {
            store,
            registry,
            default_limit,
        }
    }

    pub fn get_beneficiary<E: Environment + ?Sized>(&self, env: &E) -> Result<AccountId, LedgerError> {
        self.registry.get(env)
    }

    pub fn number_of_payers<E: Environment + ?Sized>(&self, env: &E) -> Result<u32, LedgerError> {
        Ok(self.store.len(env)?)
    }

    /// Up to `limit` records starting at `from_index`, in first-donation order.
    ///
    /// A start at or past the end yields an empty page.
    pub fn get_payments<E: Environment + ?Sized>(
        &self,
        env: &E,
        from_index: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<PayerRecord>, LedgerError> {
        let from = from_index.unwrap_or(0);
        let limit = limit.unwrap_or(self.default_limit);
        let end = from.saturating_add(limit).min(self.store.len(env)?);

        let mut page = Vec::with_capacity(end.saturating_sub(from) as usize);
        for index in from..end {
            let Some(account_id) = self.store.key_at(env, index)? else {
                break;
            };
            page.push(self.get_payment_for_account(env, &account_id)?);
        }
        Ok(page)
    }

    /// The payer's record; an unknown account reports a total of zero.
    pub fn get_payment_for_account<E: Environment + ?Sized>(
        &self,
        env: &E,
        account_id: &AccountId,
    ) -> Result<PayerRecord, LedgerError> {
        let total = self.store.get(env, account_id)?.unwrap_or(Amount::ZERO);
        Ok(PayerRecord::new(account_id.clone(), total))
    }
}
