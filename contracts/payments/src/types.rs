use soroban_sdk::{contracttype, Address};

/// Storage keys for the contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Address allowed to change the beneficiary (persistent storage).
    Admin,
    /// Current payout destination (persistent storage).
    Beneficiary,
    /// Token accepted for donations (persistent storage).
    TokenAddress,
    /// Number of distinct payers (persistent storage).
    PayerCount,
    /// Payer registered at an insertion index (persistent storage).
    PayerAt(u32),
    /// Cumulative gross amount paid by a payer (persistent storage).
    Payment(Address),
}

/// Cumulative amount paid by one account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentRecord {
    pub account_id: Address,
    pub total_amount: i128,
}
