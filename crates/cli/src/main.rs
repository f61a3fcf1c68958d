use clap::Parser;
use erc20_activity_scanner::{scan, AddressMetric, RpcSource, ScanConfig, BLOCK_WINDOW_LEN};
use tracing_subscriber::EnvFilter;

/// The arguments for the command.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// How many of the most active addresses to print.
    #[clap(long, default_value_t = 5)]
    top: usize,

    /// Node provider host, overriding `ETH_PROVIDER_HOST`.
    #[clap(long)]
    provider_host: Option<String>,

    /// Print the ranking as JSON.
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();

    // Setup logging.
    setup_logger();

    // Parse the command line arguments.
    let args = Args::parse();

    let mut config = ScanConfig::from_env()?;
    if let Some(host) = args.provider_host {
        config = config.with_provider_host(host);
    }
    tracing::debug!(?config, "loaded config");

    let source = RpcSource::new_http(config.rpc_url()?);

    let top = match scan(&source).await {
        Ok(report) => {
            tracing::info!(
                "{} addresses took part in {} transfers over the last {BLOCK_WINDOW_LEN} blocks",
                report.ranked.len(),
                report.transfers
            );
            report.top(args.top).to_vec()
        }
        Err(err) => {
            tracing::error!("scan failed: {err}");
            eprintln!("error in scan: {err}");
            vec![]
        }
    };

    print_top(&top, args.json)
}

fn print_top(top: &[AddressMetric], json: bool) -> eyre::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(top)?);
        return Ok(());
    }

    for metric in top {
        println!("{metric}");
    }

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` and defaulting to `info`.
fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
