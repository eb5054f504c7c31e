//! `payments` — replay contract calls against an in-memory host.
//!
//! ```text
//! payments run calls.json --config payments.toml
//! payments config
//! ```
//!
//! A call script is a JSON array of
//! `{ "caller": "...", "method": "...", "args": {...}, "attached": "123" }`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use payments_core::{Amount, LedgerConfig, MemoryHost, PaymentsContract, Transfer};

#[derive(Parser)]
#[command(version, about = "Donation ledger simulator")]
struct Cli {
    /// TOML config file; PAYMENTS_* environment variables override it.
    #[arg(long, env = "PAYMENTS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a call script and print every result and the issued transfers.
    Run {
        script: PathBuf,
        /// Account the contract is deployed under (the privileged caller).
        #[arg(long, default_value = "payments.local")]
        contract_account: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Deserialize)]
struct ScriptCall {
    caller: String,
    method: String,
    #[serde(default)]
    args: Value,
    #[serde(default)]
    attached: Amount,
}

#[derive(Serialize)]
struct CallOutcome<'a> {
    index: usize,
    caller: &'a str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Summary<'a> {
    calls: usize,
    failed: usize,
    transfers: &'a [Transfer],
    logs: &'a [String],
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LedgerConfig::from_env(),
    };

    match cli.cmd {
        Commands::Run {
            script,
            contract_account,
        } => run(config, &script, contract_account),
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn run(config: LedgerConfig, script: &Path, contract_account: String) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("reading call script {}", script.display()))?;
    let calls: Vec<ScriptCall> = serde_json::from_str(&raw).context("parsing call script")?;

    let contract = PaymentsContract::new(config);
    let mut host = MemoryHost::new(contract_account);
    let mut failed = 0;

    for (index, call) in calls.iter().enumerate() {
        let ctx = host.context(call.caller.as_str(), call.attached);
        let outcome = match host.call(&contract, &ctx, &call.method, &call.args) {
            Ok(result) => CallOutcome {
                index,
                caller: &call.caller,
                method: &call.method,
                result: Some(result),
                error: None,
            },
            Err(e) => {
                failed += 1;
                tracing::warn!(index, method = %call.method, error = %e, "Call reverted");
                CallOutcome {
                    index,
                    caller: &call.caller,
                    method: &call.method,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        };
        println!("{}", serde_json::to_string(&outcome)?);
    }

    let summary = Summary {
        calls: calls.len(),
        failed,
        transfers: host.transfers(),
        logs: host.logs(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(feature = "trace")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(not(feature = "trace"))]
fn init_tracing() {}
