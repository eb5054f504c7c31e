//! Method dispatch for the payments contract.
//!
//! Every exposed method is listed in [`Operation`] together with its
//! [`Capabilities`]. [`PaymentsContract::call`] enforces those capabilities
//! for all methods in one place before decoding arguments, so the engine,
//! registry and reader never see an attached deposit they did not ask for or
//! an unprivileged caller on an admin path.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LedgerConfig;
use crate::engine::AccountingEngine;
use crate::env::{CallContext, Environment};
use crate::error::{EnvironmentError, LedgerError};
use crate::reader::LedgerReader;
use crate::registry::BeneficiaryRegistry;
use crate::store::LedgerStore;
use crate::types::AccountId;

/// What a method is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Writes contract state.
    pub mutating: bool,
    /// Accepts an attached deposit.
    pub payable: bool,
    /// Callable only by the contract account.
    pub privileged: bool,
}

impl Capabilities {
    pub const VIEW: Self = Self {
        mutating: false,
        payable: false,
        privileged: false,
    };
    pub const CALL: Self = Self {
        mutating: true,
        payable: false,
        privileged: false,
    };
    pub const PAYABLE: Self = Self {
        mutating: true,
        payable: true,
        privileged: false,
    };
    pub const PRIVATE: Self = Self {
        mutating: true,
        payable: false,
        privileged: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Init,
    Donate,
    ChangeBeneficiary,
    GetBeneficiary,
    NumberOfPayers,
    GetPayments,
    GetPaymentForAccount,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Init,
        Operation::Donate,
        Operation::ChangeBeneficiary,
        Operation::GetBeneficiary,
        Operation::NumberOfPayers,
        Operation::GetPayments,
        Operation::GetPaymentForAccount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Donate => "donate",
            Operation::ChangeBeneficiary => "change_beneficiary",
            Operation::GetBeneficiary => "get_beneficiary",
            Operation::NumberOfPayers => "number_of_payers",
            Operation::GetPayments => "get_payments",
            Operation::GetPaymentForAccount => "get_payment_for_account",
        }
    }

    pub fn capabilities(self) -> Capabilities {
        match self {
            Operation::Init => Capabilities::CALL,
            Operation::Donate => Capabilities::PAYABLE,
            Operation::ChangeBeneficiary => Capabilities::PRIVATE,
            Operation::GetBeneficiary
            | Operation::NumberOfPayers
            | Operation::GetPayments
            | Operation::GetPaymentForAccount => Capabilities::VIEW,
        }
    }

    /// Resolve a method name. `get_payer` is the legacy name of
    /// `get_beneficiary` and is still accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "get_payer" {
            return Some(Operation::GetBeneficiary);
        }
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

#[derive(Deserialize)]
struct BeneficiaryArgs {
    #[serde(alias = "recipient")]
    beneficiary: AccountId,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PaymentsArgs {
    from_index: Option<u32>,
    limit: Option<u32>,
}

#[derive(Deserialize)]
struct AccountArgs {
    account_id: AccountId,
}

#[derive(Debug, Clone)]
pub struct PaymentsContract {
    config: LedgerConfig,
    registry: BeneficiaryRegistry,
    engine: AccountingEngine,
    reader: LedgerReader,
}

impl Default for PaymentsContract {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl PaymentsContract {
    pub fn new(config: LedgerConfig) -> Self {
        let store = LedgerStore::default();
        let registry = BeneficiaryRegistry;
        Self {
            engine: AccountingEngine::new(store.clone(), registry.clone(), config.storage_fee),
            reader: LedgerReader::new(store, registry.clone(), config.default_page_limit),
            registry,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn engine(&self) -> &AccountingEngine {
        &self.engine
    }

    pub fn reader(&self) -> &LedgerReader {
        &self.reader
    }

    /// Execute `method` with JSON `args` (`null` is read as `{}`).
    ///
    /// The host must discard all effects of the call if this returns an error.
    pub fn call<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        ctx: &CallContext,
        method: &str,
        args: &Value,
    ) -> Result<Value, LedgerError> {
        let op = Operation::from_name(method)
            .ok_or_else(|| LedgerError::UnknownMethod(method.to_string()))?;
        check_capabilities(op, ctx)?;

        if op != Operation::Init && !self.registry.is_initialized(&*env)? {
            return Err(LedgerError::NotInitialized);
        }

        tracing::debug!(method = op.name(), caller = %ctx.caller, "Dispatching call");

        match op {
            Operation::Init => {
                let args: BeneficiaryArgs = decode(args)?;
                self.registry.init(env, &args.beneficiary)?;
                Ok(Value::Null)
            }
            Operation::Donate => {
                let total = self.engine.donate(env, ctx)?;
                Ok(Value::String(total.to_string()))
            }
            Operation::ChangeBeneficiary => {
                let args: BeneficiaryArgs = decode(args)?;
                self.registry.change(env, ctx, &args.beneficiary)?;
                Ok(Value::Null)
            }
            Operation::GetBeneficiary => encode(&self.reader.get_beneficiary(&*env)?),
            Operation::NumberOfPayers => encode(&self.reader.number_of_payers(&*env)?),
            Operation::GetPayments => {
                let args: PaymentsArgs = decode(args)?;
                encode(&self.reader.get_payments(&*env, args.from_index, args.limit)?)
            }
            Operation::GetPaymentForAccount => {
                let args: AccountArgs = decode(args)?;
                encode(&self.reader.get_payment_for_account(&*env, &args.account_id)?)
            }
        }
    }
}

fn check_capabilities(op: Operation, ctx: &CallContext) -> Result<(), LedgerError> {
    let caps = op.capabilities();
    if !caps.payable && !ctx.attached_deposit.is_zero() {
        return Err(LedgerError::NotPayable { method: op.name() });
    }
    if caps.privileged && !ctx.is_privileged() {
        return Err(LedgerError::Unauthorized {
            caller: ctx.caller.clone(),
        });
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(args: &Value) -> Result<T, LedgerError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args.clone()
    };
    serde_json::from_value(args).map_err(|e| LedgerError::InvalidArguments(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Result<Value, LedgerError> {
    serde_json::to_value(value)
        .map_err(|e| EnvironmentError::Corrupted(format!("encode result: {e}")).into())
}
