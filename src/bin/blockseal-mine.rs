#![forbid(unsafe_code)]
//! Assemble and seal a single block from one transaction given on the command line.

use blockseal::blockchain::{Block, BlockContext};
use blockseal::config::{load_config, load_config_from};
use blockseal::events::init_tracing;
use blockseal::miner::SealingMode;
use blockseal::transaction::Transaction;
use clap::Parser;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Owner of the transaction
    #[arg(long)]
    owner: String,
    /// Receiver; without it a coinbase is created instead of a payload
    #[arg(long)]
    receiver: Option<String>,
    /// Amount in bitcoin
    #[arg(long)]
    amount: f64,
    /// Block index
    #[arg(long, default_value_t = 1)]
    index: u32,
    /// Hash of the previous block
    #[arg(long, default_value = "0")]
    previous_hash: String,
    /// Sealing mode (strict or relaxed); overrides the configuration file
    #[arg(long)]
    mode: Option<SealingMode>,
    /// Configuration file
    #[arg(long)]
    config: Option<String>,
    /// Print the block as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    init_tracing(&config.logging.level);

    let mut ctx = BlockContext::from_config(&config);
    if let Some(mode) = cli.mode {
        ctx = ctx.with_mode(mode);
    }

    let (coinbases, payloads) = match cli.receiver {
        Some(receiver) => (None, Some(vec![Transaction::payload(cli.owner, receiver, cli.amount)])),
        None => (Some(vec![Transaction::coinbase(cli.owner, cli.amount)]), None),
    };

    let start_time = Instant::now();
    let block = Block::new(cli.index, cli.previous_hash, coinbases, payloads, &ctx)?;
    let elapsed = start_time.elapsed();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&block)?);
        return Ok(());
    }

    println!("Block #{} sealed in {:.3} seconds ({} mode)", block.index(), elapsed.as_secs_f64(), ctx.mode());
    println!("Hash:          {}", block.hash());
    println!("Previous hash: {}", block.previous_hash());
    println!("Merkle root:   {}", block.merkle_root());
    println!("Nonce:         {}", block.nonce());
    println!("Created:       {}", block.creation_time());

    println!("\nTransactions:\n");
    match block.coinbases() {
        Some(coinbases) => {
            for (i, tx) in coinbases.iter().enumerate() {
                println!("[Coinbase#{}]", i);
                print_transaction(tx);
            }
        }
        None => println!("No coinbases found.\n"),
    }
    match block.payloads() {
        Some(payloads) => {
            for (i, tx) in payloads.iter().enumerate() {
                println!("[Payload#{}]", i);
                print_transaction(tx);
            }
        }
        None => println!("No payloads found."),
    }
    println!("\nEnd of transactions for block with hash: {}", block.hash());

    Ok(())
}

fn print_transaction(tx: &Transaction) {
    println!("Owner: {}", tx.owner());
    if let Some(receiver) = tx.receiver() {
        println!("Receiver: {}", receiver);
    }
    println!("Amount in Satoshi: {}", tx.satoshi_amount());
    println!("Amount in Bitcoin: {}", tx.bitcoin_representation());
    println!("Creation: {}", tx.timestamp().to_rfc3339());
    println!("====");
}
