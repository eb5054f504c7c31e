//! Pass-through donation ledger.
//!
//! Payers attach value to `donate`; the contract records each payer's
//! cumulative gross total and forwards the deposit to a configurable
//! beneficiary, withholding a one-time storage fee on the payer's first
//! donation. The execution environment (storage, transfers, caller identity)
//! is abstracted behind [`Environment`] and [`CallContext`], and all exposed
//! methods are routed through [`PaymentsContract::call`].

pub mod config;
pub mod contract;
pub mod engine;
pub mod env;
pub mod error;
pub mod host;
pub mod reader;
pub mod registry;
pub mod store;
pub mod types;

pub use config::LedgerConfig;
pub use contract::{Capabilities, Operation, PaymentsContract};
pub use engine::{settle, AccountingEngine, Settlement};
pub use env::{CallContext, Environment};
pub use error::{EnvironmentError, LedgerError};
pub use host::{MemoryHost, Transfer};
pub use reader::LedgerReader;
pub use registry::BeneficiaryRegistry;
pub use store::LedgerStore;
pub use types::{AccountId, Amount, PayerRecord};
