//! Account identities, amounts and the payer record exposed to clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LedgerError;

/// Opaque account identifier as supplied by the execution environment.
///
/// No syntax is enforced here; whether an account exists is decided by the
/// environment when a transfer is settled.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Value in the chain's smallest unit.
///
/// Serialized as a decimal string so clients without 128-bit integers can
/// read it losslessly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Amount) -> Result<Amount, LedgerError> {
        self.0
            .checked_add(rhs.0)
            .map(Amount)
            .ok_or(LedgerError::AmountOverflow)
    }

    pub fn checked_sub(self, rhs: Amount) -> Result<Amount, LedgerError> {
        self.0
            .checked_sub(rhs.0)
            .map(Amount)
            .ok_or(LedgerError::AmountOverflow)
    }
}

impl From<u128> for Amount {
    fn from(v: u128) -> Self {
        Self(v)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u128>().map(Amount)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Cumulative gross amount recorded against one payer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PayerRecord {
    pub account_id: AccountId,
    pub total_amount: Amount,
}

impl PayerRecord {
    pub fn new(account_id: AccountId, total_amount: Amount) -> Self {
        Self {
            account_id,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_serializes_as_decimal_string() {
        let amount = Amount::new(u128::MAX);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));

        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert!(serde_json::from_str::<Amount>("\"12a\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"-1\"").is_err());
    }

    #[test]
    fn test_amount_checked_add_overflow() {
        let max = Amount::new(u128::MAX);
        assert!(matches!(
            max.checked_add(Amount::new(1)),
            Err(LedgerError::AmountOverflow)
        ));
        assert_eq!(
            Amount::new(2).checked_add(Amount::new(3)).unwrap(),
            Amount::new(5)
        );
    }

    #[test]
    fn test_payer_record_json_shape() {
        let record = PayerRecord::new("alice.testnet".into(), Amount::new(42));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "account_id": "alice.testnet", "total_amount": "42" })
        );
    }
}
