//! mw-cli: offline tooling for the minimal wallet.
//!
//! Derives wallet addresses, builds signed external messages against a
//! given seqno, and decodes messages back into their actions. Nothing is
//! sent to a ledger; built messages are printed as bag-of-cells hex.

mod offline;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mw_telemetry::{init_telemetry, TelemetryConfig};
use mw_wallet::{
    decode_action_chain, decode_internal_message, parse_wallet_data, wallet_code, wallet_data,
    wallet_state_init, AccountState, Action, OutAction, TransferIntent, WalletApi, WalletConfig,
    WalletService,
};
use serde_json::{json, Value};
use shared_crypto::Ed25519KeyPair;
use shared_types::{from_boc_hex, to_boc, Address, CellExt, ExternalMessage};
use tracing::debug;

use offline::OfflineGateway;

/// mw-cli: minimal wallet tooling
#[derive(Parser, Debug)]
#[command(name = "mw-cli")]
#[command(about = "Derive addresses, build and inspect minimal wallet messages")]
struct Args {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the wallet address and init for a public key
    Address {
        /// Hex-encoded 32-byte Ed25519 public key
        #[arg(long)]
        public_key: String,

        /// Workchain id (defaults to MW_WORKCHAIN or 0)
        #[arg(long, allow_hyphen_values = true)]
        workchain: Option<i32>,
    },

    /// Print the hash of the wallet program image
    CodeHash,

    /// Build a signed transfer message without submitting it
    Transfer {
        /// Hex-encoded 32-byte seed or 64-byte seed+public key
        #[arg(long)]
        secret_key: String,

        /// Current seqno of the deployed wallet; omit for a deploying message
        #[arg(long)]
        seqno: Option<u16>,

        /// Recipient as `workchain:hex`, repeatable
        #[arg(long = "to", required = true)]
        recipients: Vec<Address>,

        /// Amount per recipient in the smallest unit, repeatable
        #[arg(long = "amount", required = true)]
        amounts: Vec<u128>,

        /// Workchain id (defaults to MW_WORKCHAIN or 0)
        #[arg(long, allow_hyphen_values = true)]
        workchain: Option<i32>,
    },

    /// Decode a bag-of-cells external message
    Inspect {
        /// Hex-encoded bag of cells
        boc: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::for_service("mw-cli");
    telemetry.log_level = if args.verbose { "debug" } else { "warn" }.to_string();
    let _guard = init_telemetry(telemetry).context("initializing logging")?;

    let output = match args.command {
        Command::Address {
            public_key,
            workchain,
        } => address(&public_key, config(workchain))?,
        Command::CodeHash => {
            let code = wallet_code()?;
            json!({ "code_hash": code.hash_hex() })
        }
        Command::Transfer {
            secret_key,
            seqno,
            recipients,
            amounts,
            workchain,
        } => transfer(&secret_key, seqno, recipients, amounts, config(workchain)).await?,
        Command::Inspect { boc } => inspect(&boc)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn config(workchain: Option<i32>) -> WalletConfig {
    let config = WalletConfig::from_env();
    match workchain {
        Some(workchain) => config.with_workchain(workchain),
        None => config,
    }
}

fn decode_key<const N: usize>(text: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(text.trim()).context("key is not valid hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected {N} key bytes, got {len}"))
}

fn keypair(secret: &str) -> Result<Ed25519KeyPair> {
    let bytes = hex::decode(secret.trim()).context("secret key is not valid hex")?;
    match bytes.len() {
        32 => Ok(Ed25519KeyPair::from_seed(decode_key(secret)?)),
        64 => Ok(Ed25519KeyPair::from_secret_key(&bytes)?),
        other => bail!("secret key must be 32 or 64 bytes, got {other}"),
    }
}

fn address(public_key: &str, config: WalletConfig) -> Result<Value> {
    let key: [u8; 32] = decode_key(public_key)?;
    let init = wallet_state_init(&key)?;
    let address = init.address(config.workchain)?;
    Ok(json!({
        "address": address.to_string(),
        "state_init": hex::encode_upper(to_boc(&init.to_cell()?)?),
    }))
}

async fn transfer(
    secret: &str,
    seqno: Option<u16>,
    recipients: Vec<Address>,
    amounts: Vec<u128>,
    config: WalletConfig,
) -> Result<Value> {
    if recipients.len() != amounts.len() {
        bail!(
            "{} recipients but {} amounts",
            recipients.len(),
            amounts.len()
        );
    }
    let keypair = keypair(secret)?;
    let public_key = *keypair.public_key().as_bytes();

    let state = match seqno {
        Some(seqno) => AccountState::active(
            wallet_code()?,
            Arc::new(wallet_data(&public_key, seqno)?),
        ),
        None => AccountState::uninitialized(),
    };
    let wallet =
        WalletService::from_public_key(OfflineGateway::new(state), &public_key, config)?;
    debug!(address = %wallet.address(), "Building offline transfer");

    let actions: Vec<Action> = recipients
        .into_iter()
        .zip(amounts)
        .map(|(recipient, value)| Action::Transfer(TransferIntent::new(recipient, value)))
        .collect();
    let prepared = wallet.prepare(&keypair, &actions).await?;

    Ok(json!({
        "address": wallet.address().to_string(),
        "seqno": prepared.envelope.seqno,
        "hash": hex::encode(prepared.envelope.signed_hash()),
        "boc": hex::encode_upper(prepared.to_boc()?),
    }))
}

fn inspect(boc: &str) -> Result<Value> {
    let root = from_boc_hex(boc)?;
    let message = ExternalMessage::parse(&root)?;

    let mut envelope = message.body.parser();
    let signature = envelope.load_bytes(64).context("body has no signature")?;
    let inner = envelope
        .next_reference()
        .context("body has no inner message")?;

    let mut parser = inner.parser();
    let chain = parser.next_reference()?;
    let next = parse_wallet_data(&parser.next_reference()?)?;
    let quoted = parse_wallet_data(&Arc::new(parser.load_remaining()?))?;

    let actions: Vec<Value> = decode_action_chain(&chain)?
        .into_iter()
        .map(|action| -> Result<Value> {
            match action {
                OutAction::SendMessage { mode, message } => {
                    let intent = decode_internal_message(&message)?;
                    Ok(json!({
                        "type": "transfer",
                        "mode": mode,
                        "recipient": intent.recipient.to_string(),
                        "value": intent.value.to_string(),
                        "has_init": intent.init.is_some(),
                        "body_hash": intent.body.map(|b| b.hash_hex()),
                    }))
                }
                OutAction::SetCode { code } => Ok(json!({
                    "type": "set_code",
                    "code_hash": code.hash_hex(),
                })),
            }
        })
        .collect::<Result<_>>()?;

    Ok(json!({
        "dest": message.dest.to_string(),
        "deploys": message.init.is_some(),
        "signature": hex::encode(signature),
        "signed_hash": inner.hash_hex(),
        "public_key": hex::encode(next.public_key),
        "current_seqno": quoted.seqno,
        "next_seqno": next.seqno,
        "actions": actions,
    }))
}
