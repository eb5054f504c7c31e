//! Donation accounting.
//!
//! A donation records the payer's *gross* deposit in the ledger but forwards
//! only the *net* amount: on a payer's first donation the storage fee is
//! withheld to pay for the new ledger entry. The recorded total therefore
//! exceeds what the beneficiary received by exactly one storage fee per payer.

use crate::env::{CallContext, Environment};
use crate::error::LedgerError;
use crate::registry::BeneficiaryRegistry;
use crate::store::LedgerStore;
use crate::types::{AccountId, Amount};

/// Outcome of applying one deposit to a payer's running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// New cumulative (gross) total for the payer.
    pub paid_so_far: Amount,
    /// Amount to forward to the beneficiary.
    pub to_transfer: Amount,
    /// Whether this deposit registered the payer.
    pub first_contact: bool,
}

/// Apply `deposit` on top of `paid_so_far` with the given storage fee.
///
/// A payer with nothing recorded must attach strictly more than the fee.
pub fn settle(
    paid_so_far: Amount,
    deposit: Amount,
    storage_fee: Amount,
) -> Result<Settlement, LedgerError> {
    let first_contact = paid_so_far.is_zero();
    let to_transfer = if first_contact {
        if deposit <= storage_fee {
            return Err(LedgerError::InsufficientDeposit {
                attached: deposit,
                required: storage_fee,
            });
        }
        deposit.checked_sub(storage_fee)?
    } else {
        deposit
    };

    Ok(Settlement {
        paid_so_far: paid_so_far.checked_add(deposit)?,
        to_transfer,
        first_contact,
    })
}

#[derive(Debug, Clone)]
pub struct AccountingEngine {
    store: LedgerStore,
    registry: BeneficiaryRegistry,
    storage_fee: Amount,
}

impl AccountingEngine {
    pub fn new(store: LedgerStore, registry: BeneficiaryRegistry, storage_fee: Amount) -> Self {
        Self {
            store,
            registry,
            storage_fee,
        }
    }

    pub fn storage_fee(&self) -> Amount {
        self.storage_fee
    }

    /// Accept the attached deposit from the caller.
    ///
    /// The ledger is written before the transfer is issued. Returns the
    /// payer's new cumulative total.
    pub fn donate<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        ctx: &CallContext,
    ) -> Result<Amount, LedgerError> {
        let payer: &AccountId = &ctx.caller;
        let deposit = ctx.attached_deposit;

        let beneficiary = self.registry.get(&*env)?;
        let paid_so_far = self.store.get(&*env, payer)?.unwrap_or(Amount::ZERO);
        let settlement = settle(paid_so_far, deposit, self.storage_fee)?;

        self.store.insert(env, payer, settlement.paid_so_far)?;

        env.log(&format!(
            "{payer} donated {deposit}, total paid {}",
            settlement.paid_so_far
        ));
        tracing::info!(
            %payer,
            %deposit,
            total = %settlement.paid_so_far,
            to_transfer = %settlement.to_transfer,
            first_contact = settlement.first_contact,
            "Donation recorded"
        );

        if !settlement.to_transfer.is_zero() {
            env.issue_transfer(&beneficiary, settlement.to_transfer)?;
        }

        Ok(settlement.paid_so_far)
    }
}
