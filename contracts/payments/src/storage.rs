use soroban_sdk::{Address, Env};

use crate::types::DataKey;

/// Bump amount for persistent storage entries (roughly 30 days in ledgers).
const LEDGER_BUMP: u32 = 518_400;
/// Threshold for bumping (roughly 15 days).
const LEDGER_THRESHOLD: u32 = 259_200;

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
}

// =============================================================================
// Admin
// =============================================================================

pub fn get_admin(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("admin not set")
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
    bump(env, &DataKey::Admin);
}

// =============================================================================
// Beneficiary
// =============================================================================

pub fn get_beneficiary(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Beneficiary)
        .expect("beneficiary not set")
}

pub fn set_beneficiary(env: &Env, beneficiary: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Beneficiary, beneficiary);
    bump(env, &DataKey::Beneficiary);
}

// =============================================================================
// Token Address
// =============================================================================

pub fn get_token(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::TokenAddress)
        .expect("token address not set")
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::TokenAddress, token);
    bump(env, &DataKey::TokenAddress);
}

// =============================================================================
// Payer ledger
// =============================================================================

pub fn payer_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::PayerCount)
        .unwrap_or(0)
}

pub fn payer_at(env: &Env, index: u32) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::PayerAt(index))
        .expect("payer index out of sync")
}

/// Cumulative amount for `payer`, zero if it never donated.
pub fn get_payment(env: &Env, payer: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Payment(payer.clone()))
        .unwrap_or(0)
}

/// Store the payer's new total, appending it to the index on first sight.
pub fn set_payment(env: &Env, payer: &Address, total: i128) {
    let key = DataKey::Payment(payer.clone());
    if !env.storage().persistent().has(&key) {
        let count = payer_count(env);
        let index_key = DataKey::PayerAt(count);
        env.storage().persistent().set(&index_key, payer);
        bump(env, &index_key);
        env.storage()
            .persistent()
            .set(&DataKey::PayerCount, &(count + 1));
        bump(env, &DataKey::PayerCount);
    }
    env.storage().persistent().set(&key, &total);
    bump(env, &key);
}
