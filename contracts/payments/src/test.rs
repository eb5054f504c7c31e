use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use crate::{PaymentsContract, PaymentsContractClient, STORAGE_FEE};

struct Setup {
    env: Env,
    client: PaymentsContractClient<'static>,
    admin: Address,
    beneficiary: Address,
    token_address: Address,
    token_admin_client: StellarAssetClient<'static>,
}

/// Set up the test environment with a token, admin, beneficiary and the
/// PaymentsContract.
fn setup_env() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let beneficiary = Address::generate(&env);

    // SAC token stands in for native XLM
    let token_admin = Address::generate(&env);
    let token_contract = env.register_stellar_asset_contract_v2(token_admin.clone());
    let token_address = token_contract.address();
    let token_admin_client = StellarAssetClient::new(&env, &token_address);

    let contract_id = env.register(PaymentsContract, (&admin, &beneficiary, &token_address));
    let client = PaymentsContractClient::new(&env, &contract_id);

    Setup {
        env,
        client,
        admin,
        beneficiary,
        token_address,
        token_admin_client,
    }
}

fn funded_payer(s: &Setup, balance: i128) -> Address {
    let payer = Address::generate(&s.env);
    s.token_admin_client.mint(&payer, &balance);
    payer
}

fn token_balance(s: &Setup, account: &Address) -> i128 {
    TokenClient::new(&s.env, &s.token_address).balance(account)
}

// =============================================================================
// Constructor
// =============================================================================

#[test]
fn test_constructor_sets_beneficiary() {
    let s = setup_env();
    assert_eq!(s.client.get_beneficiary(), s.beneficiary);
    assert_eq!(s.client.number_of_payers(), 0);
}

// =============================================================================
// Donate
// =============================================================================

#[test]
fn test_first_donation_withholds_storage_fee() {
    let s = setup_env();
    let payer = funded_payer(&s, 10_000_000);

    let total = s.client.donate(&payer, &3_000_000);

    assert_eq!(total, 3_000_000);
    assert_eq!(token_balance(&s, &payer), 7_000_000);
    assert_eq!(token_balance(&s, &s.beneficiary), 3_000_000 - STORAGE_FEE);
    // Fee stays with the contract
    assert_eq!(token_balance(&s, &s.client.address), STORAGE_FEE);
}

#[test]
fn test_repeat_donations_forward_everything() {
    let s = setup_env();
    let payer = funded_payer(&s, 10_000_000);

    s.client.donate(&payer, &2_000_000);
    s.client.donate(&payer, &500);
    let total = s.client.donate(&payer, &1);

    // Gross total recorded, fee deducted from the transfers only once
    assert_eq!(total, 2_000_501);
    assert_eq!(
        s.client.get_payment_for_account(&payer).total_amount,
        2_000_501
    );
    assert_eq!(
        token_balance(&s, &s.beneficiary),
        2_000_501 - STORAGE_FEE
    );
    assert_eq!(s.client.number_of_payers(), 1);
}

#[test]
#[should_panic(expected = "insufficient deposit")]
fn test_first_donation_must_exceed_fee() {
    let s = setup_env();
    let payer = funded_payer(&s, 10_000_000);
    s.client.donate(&payer, &STORAGE_FEE);
}

#[test]
fn test_rejected_first_donation_leaves_no_trace() {
    let s = setup_env();
    let payer = funded_payer(&s, 10_000_000);

    assert!(s.client.try_donate(&payer, &(STORAGE_FEE - 1)).is_err());

    assert_eq!(s.client.number_of_payers(), 0);
    assert_eq!(s.client.get_payment_for_account(&payer).total_amount, 0);
    assert_eq!(token_balance(&s, &payer), 10_000_000);
    assert_eq!(token_balance(&s, &s.beneficiary), 0);
}

#[test]
#[should_panic(expected = "amount must be positive")]
fn test_donate_requires_positive_amount() {
    let s = setup_env();
    let payer = funded_payer(&s, 10_000_000);
    s.client.donate(&payer, &0);
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_get_payments_in_first_donation_order() {
    let s = setup_env();
    let carol = funded_payer(&s, 10_000_000);
    let alice = funded_payer(&s, 10_000_000);
    let bob = funded_payer(&s, 10_000_000);

    s.client.donate(&carol, &2_000_000);
    s.client.donate(&alice, &2_000_000);
    s.client.donate(&bob, &2_000_000);
    s.client.donate(&carol, &7);

    let page = s.client.get_payments(&None, &None);
    assert_eq!(page.len(), 3);
    assert_eq!(page.get_unchecked(0).account_id, carol);
    assert_eq!(page.get_unchecked(0).total_amount, 2_000_007);
    assert_eq!(page.get_unchecked(1).account_id, alice);
    assert_eq!(page.get_unchecked(2).account_id, bob);

    let window = s.client.get_payments(&Some(1), &Some(1));
    assert_eq!(window.len(), 1);
    assert_eq!(window.get_unchecked(0).account_id, alice);

    assert_eq!(s.client.get_payments(&Some(5), &Some(10)).len(), 0);
}

#[test]
fn test_unknown_account_reports_zero() {
    let s = setup_env();
    let stranger = Address::generate(&s.env);
    let record = s.client.get_payment_for_account(&stranger);
    assert_eq!(record.account_id, stranger);
    assert_eq!(record.total_amount, 0);
}

// =============================================================================
// Change Beneficiary
// =============================================================================

#[test]
fn test_admin_changes_beneficiary() {
    let s = setup_env();
    let payer = funded_payer(&s, 10_000_000);
    s.client.donate(&payer, &2_000_000);

    let shelter = Address::generate(&s.env);
    s.client.change_beneficiary(&s.admin, &shelter);
    assert_eq!(s.client.get_beneficiary(), shelter);

    s.client.donate(&payer, &400);
    assert_eq!(token_balance(&s, &shelter), 400);
    assert_eq!(token_balance(&s, &s.beneficiary), 2_000_000 - STORAGE_FEE);
}

#[test]
#[should_panic(expected = "only admin can change beneficiary")]
fn test_non_admin_cannot_change_beneficiary() {
    let s = setup_env();
    let not_admin = Address::generate(&s.env);
    s.client.change_beneficiary(&not_admin, &not_admin);
}

#[test]
fn test_failed_change_keeps_beneficiary() {
    let s = setup_env();
    let not_admin = Address::generate(&s.env);
    assert!(s
        .client
        .try_change_beneficiary(&not_admin, &not_admin)
        .is_err());

    let payer = funded_payer(&s, 10_000_000);
    s.client.donate(&payer, &2_000_000);
    assert_eq!(token_balance(&s, &s.beneficiary), 2_000_000 - STORAGE_FEE);
    assert_eq!(token_balance(&s, &not_admin), 0);
}
