//! Explore - query chain state with archive fallback
//!
//! Covers: balance, storage, code, block transactions, view-method calls
//!
//! Run:
//!   cargo run --example explore -- balance 0x28c6c06298d514db089934071355e5743bf21d60 12000000
//!   cargo run --example explore -- storage 0x95ad...c4ce 0 latest
//!   cargo run --example explore -- code 0x95ad...c4ce
//!   cargo run --example explore -- block 12000000 --full
//!   cargo run --example explore -- methods
//!   cargo run --example explore -- call balanceOf 0x28c6...1d60 --block 12000000
//!
//! Required environment variables:
//!   ETH_FULL_NODE_URL=https://...
//!   ETH_ARCHIVE_NODE_URL=https://...
//!
//! For `methods` and `call`:
//!   ETH_CONTRACT_ADDRESS=0x...
//!   ETH_CONTRACT_ABI=path/to/abi.json
//!
//! Set RUST_LOG=archive_kit=debug to see fallback decisions.

use archive_kit::*;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: explore <balance|storage|code|block|methods|call> [args...]";

/// Parse an optional block argument, defaulting to the current block.
async fn block_arg(explorer: &Explorer, arg: Option<&String>) -> Result<BlockReference, Error> {
    match arg {
        Some(s) => Ok(s.parse()?),
        None => Ok(BlockReference::Number(explorer.current_block().await?)),
    }
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, Error> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| Error::Config(format!("missing <{name}>\n{USAGE}")))
}

fn print_methods(catalog: &MethodCatalog) {
    println!("View methods:");
    for (i, method) in catalog.iter().enumerate() {
        let inputs: Vec<String> = method
            .inputs
            .iter()
            .map(|input| format!("{} {} = {}", input.ty, input.name, input.placeholder()))
            .collect();
        println!("  [{i}] {}({})", method.name, inputs.join(", "));
    }
}

/// Split `call` arguments into positional values and an optional `--block`.
fn split_call_args(args: &[String]) -> (Vec<serde_json::Value>, Option<&String>) {
    let mut values = Vec::new();
    let mut block = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--block" {
            block = iter.next();
        } else {
            values.push(serde_json::Value::String(arg.clone()));
        }
    }
    (values, block)
}

async fn run(explorer: &Explorer, args: &[String]) -> Result<(), Error> {
    let command = args.first().map(String::as_str).unwrap_or("help");

    match command {
        "balance" => {
            let address: Address = required(args, 1, "address")?.parse()?;
            let block = block_arg(explorer, args.get(2)).await?;
            explorer.eth_balance(&address, &block).await?;
        }
        "storage" => {
            let address: Address = required(args, 1, "address")?.parse()?;
            let position: U256 = required(args, 2, "position")?.parse()?;
            let block = block_arg(explorer, args.get(3)).await?;
            explorer.storage_at(&address, &position, &block).await?;
        }
        "code" => {
            let address: Address = required(args, 1, "address")?.parse()?;
            let block = block_arg(explorer, args.get(2)).await?;
            explorer.code_at(&address, &block).await?;
        }
        "block" => {
            let block = block_arg(explorer, args.get(1).filter(|a| *a != "--full")).await?;
            let full = args.iter().any(|a| a == "--full");
            explorer.block_transactions(&block, full).await?;
        }
        "methods" => {
            let catalog = explorer.catalog().ok_or(Error::NoContract)?;
            print_methods(catalog);
        }
        "call" => {
            let method = required(args, 1, "method")?;
            let (values, block) = split_call_args(&args[2..]);
            let block = block_arg(explorer, block).await?;
            if values.is_empty() {
                explorer.call_method(method, &block).await?;
            } else {
                explorer.call_method_with_args(method, &values, &block).await?;
            }
        }
        _ => println!("{USAGE}"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let explorer = Explorer::from_env()?;

    run(&explorer, &args).await?;
    Ok(())
}
