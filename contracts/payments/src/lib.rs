#![no_std]

mod storage;
mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Vec};
pub use types::PaymentRecord;

/// Withheld from a payer's first donation to cover its ledger entries
/// (0.1 XLM in stroops).
pub const STORAGE_FEE: i128 = 1_000_000;

/// Page size used by `get_payments` when no limit is given.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

#[contract]
pub struct PaymentsContract;

#[contractimpl]
impl PaymentsContract {
    /// Initialize the contract with an admin, the first beneficiary and the
    /// token donations are paid in.
    pub fn __constructor(env: Env, admin: Address, beneficiary: Address, token: Address) {
        storage::set_admin(&env, &admin);
        storage::set_beneficiary(&env, &beneficiary);
        storage::set_token(&env, &token);
    }

    /// Donate `amount` and forward it to the beneficiary.
    ///
    /// The full amount is added to the payer's total. On the payer's first
    /// donation the storage fee stays with the contract and only the rest is
    /// forwarded. Returns the payer's new total.
    pub fn donate(env: Env, payer: Address, amount: i128) -> i128 {
        payer.require_auth();
        assert!(amount > 0, "amount must be positive");

        let paid_so_far = storage::get_payment(&env, &payer);
        let mut to_transfer = amount;
        if paid_so_far == 0 {
            assert!(amount > STORAGE_FEE, "insufficient deposit");
            to_transfer -= STORAGE_FEE;
        }
        let paid_so_far = paid_so_far
            .checked_add(amount)
            .expect("amount overflow");

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        let this = env.current_contract_address();
        token_client.transfer(&payer, &this, &amount);

        storage::set_payment(&env, &payer, paid_so_far);
        log!(&env, "donation recorded", payer, amount, paid_so_far);
        env.events()
            .publish((symbol_short!("DONATE"), payer.clone()), (amount, paid_so_far));

        token_client.transfer(&this, &storage::get_beneficiary(&env), &to_transfer);

        paid_so_far
    }

    /// Replace the beneficiary. Admin-only.
    pub fn change_beneficiary(env: Env, caller: Address, beneficiary: Address) {
        caller.require_auth();
        let admin = storage::get_admin(&env);
        assert!(caller == admin, "only admin can change beneficiary");
        storage::set_beneficiary(&env, &beneficiary);
    }

    pub fn get_beneficiary(env: Env) -> Address {
        storage::get_beneficiary(&env)
    }

    pub fn number_of_payers(env: Env) -> u32 {
        storage::payer_count(&env)
    }

    /// Up to `limit` records (default 50) from `from_index` (default 0), in
    /// the order payers first donated. Empty past the end.
    pub fn get_payments(
        env: Env,
        from_index: Option<u32>,
        limit: Option<u32>,
    ) -> Vec<PaymentRecord> {
        let from = from_index.unwrap_or(0);
        let end = from
            .saturating_add(limit.unwrap_or(DEFAULT_PAGE_LIMIT))
            .min(storage::payer_count(&env));

        let mut results = Vec::new(&env);
        for index in from..end {
            let account_id = storage::payer_at(&env, index);
            let total_amount = storage::get_payment(&env, &account_id);
            results.push_back(PaymentRecord {
                account_id,
                total_amount,
            });
        }
        results
    }

    /// The account's record; zero if it never donated.
    pub fn get_payment_for_account(env: Env, account_id: Address) -> PaymentRecord {
        let total_amount = storage::get_payment(&env, &account_id);
        PaymentRecord {
            account_id,
            total_amount,
        }
    }
}
