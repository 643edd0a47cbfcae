use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use solana_sdk::signature::{Keypair, Signer};
use staking_client_cli::cli::print_idl;
use staking_client_cli::config::{Cli, ClientConfig, Command};
use staking_client_cli::rpc::RpcChainClient;
use staking_client_cli::tx::{dry_run_payer, prepare_initialize, print_dry_run, run_initialize};
use staking_client_core::idl::AnchorIdl;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("Running client...");
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
    println!("Success");
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config;
    let idl = AnchorIdl::load(&config.idl)?;

    match cli.command.unwrap_or(Command::Initialize) {
        Command::Idl => {
            print_idl(&idl);
            Ok(())
        }
        Command::Initialize => initialize(&config, idl).await,
    }
}

/// Create a staking account. Submission failures are reported but do not
/// fail the run; setup failures do.
async fn initialize(config: &ClientConfig, idl: AnchorIdl) -> Result<()> {
    let staking_account = Keypair::new();
    println!("Staking Account PublicKey: {}", staking_account.pubkey());

    if config.dry_run {
        let payer = dry_run_payer(config);
        let prepared = prepare_initialize(&idl, config, &payer, &staking_account.pubkey())?;
        print_dry_run(&prepared);
        return Ok(());
    }

    let payer = config.load_wallet()?;
    let client = RpcChainClient::new(&config.url, config.commitment.into()).with_idl(idl.clone());
    info!(url = %client.url(), "connecting");

    run_initialize(&client, &idl, config, &payer, &staking_account)
        .await
        .context("failed to build initialize instruction")?;
    Ok(())
}
