//! GYL network parameter inspector
//!
//! Builds and verifies the configured network profile, then prints it.
//! Exits non-zero when the network identity cannot be confirmed.

use anyhow::{Context, Result};
use clap::Parser;
use gyl_params::config::Config;
use gyl_params::params::{NetworkId, NetworkParameters};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gyl-params", about = "Print the verified network parameter profile")]
struct Cli {
    /// Network to load (overrides GYL_NETWORK)
    #[arg(long)]
    network: Option<NetworkId>,

    /// Default log level (overrides GYL_LOG_LEVEL; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the profile as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Loaded configuration for network: {}", config.network);

    let spec = config.profile_spec()?;
    let params = NetworkParameters::from_spec(spec)
        .context("network identity could not be verified")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&params.summary())?);
    } else {
        print_profile(&params);
    }

    Ok(())
}

fn print_profile(params: &NetworkParameters) {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              GYL NETWORK PARAMETER PROFILE               ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let genesis = params.genesis_block();
    println!("Genesis Block:");
    println!("  Hash:        {}", genesis.hash());
    println!("  Timestamp:   {}", genesis.header.time);
    println!("  Difficulty:  0x{:08x}", genesis.header.difficulty_target);
    println!();

    println!("Network:");
    println!("  Id:          {} ({})", params.id(), params.payment_protocol_id());
    println!("  Magic:       0x{:08x}", params.packet_magic());
    println!("  Port:        {}", params.port());
    println!();

    println!("Encoding:");
    println!("  Address:     {}", params.address_header());
    println!("  P2SH:        {}", params.p2sh_header());
    println!("  Private key: {}", params.dumped_private_key_header());
    println!("  BIP32 pub:   0x{:08x}", params.bip32_header_pub());
    println!("  BIP32 priv:  0x{:08x}", params.bip32_header_priv());
    println!();

    println!("Consensus:");
    println!("  Max target:  {}", params.max_target());
    println!(
        "  Retarget:    every {} blocks / {} s ({} s per block)",
        params.interval(),
        params.target_timespan(),
        params.expected_block_spacing()
    );
    println!(
        "  Majority:    {} / {} of {}",
        params.majority_enforce_block_upgrade(),
        params.majority_reject_block_outdated(),
        params.majority_window()
    );
    println!("  Halving:     every {} blocks", params.subsidy_decrease_block_count());
    println!("  Maturity:    {} blocks", params.spendable_coinbase_depth());
    println!();

    println!("Checkpoints:");
    for (height, hash) in params.checkpoints() {
        println!("  {:>8}  {}", height, hash);
    }
    println!();

    println!("Seeds:");
    for target in gyl_params::p2p::dns_seed_targets(params.dns_seeds(), params.port()) {
        println!("  dns   {}", target);
    }
    for seed in params.http_seeds() {
        println!("  http  {} ({})", seed.uri, seed.auth_key_hex());
    }
    for addr in gyl_params::p2p::addr_seed_addresses(params.addr_seeds(), params.port()) {
        println!("  addr  {}", addr);
    }
}
