use clap::Parser;
use log::{error, info};

use sgt_verifier::common::{setup_logging, LoggingFormat};
use sgt_verifier::rpc::RpcClient;
use sgt_verifier::verifier::check::check_wallet;

/// SGT verifier: proves soulbound token identity ownership from chain state
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Wallet address to check, as base58 text
    wallet: String,

    /// URL of the RPC server
    #[arg(short, long, default_value = "https://api.mainnet-beta.solana.com")]
    rpc_url: String,

    /// Logging format
    #[arg(short, long, default_value_t = LoggingFormat::Standard)]
    logging_format: LoggingFormat,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(args.logging_format);

    let rpc_client = RpcClient::new(args.rpc_url);
    match check_wallet(&rpc_client, &args.wallet).await {
        Ok(result) => {
            if result.has_identity {
                info!(
                    "Wallet {} holds a verified identity (serial {:?})",
                    args.wallet, result.serial
                );
            } else {
                info!("Wallet {} holds no verified identity", args.wallet);
            }
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Err(e) => {
            error!("Verification failed: {}", e);
            std::process::exit(1);
        }
    }
}
