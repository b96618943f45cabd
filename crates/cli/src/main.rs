use clap::Parser;
use tapguard_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "tapguard")]
#[command(version)]
#[command(about = "dnstap metrics export and CNAME-cloaking defense for unbound")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// dnstap unix socket (or file with --file)
    #[arg(short = 'i', long, value_name = "PATH")]
    input: Option<String>,

    /// Treat the input as a Frame Streams file instead of a socket
    #[arg(short = 'f', long)]
    file: bool,

    /// InfluxDB base URL
    #[arg(long, value_name = "URL")]
    influx_url: Option<String>,

    /// InfluxDB API token
    #[arg(short = 't', long)]
    token: Option<String>,

    /// InfluxDB organization
    #[arg(short = 'o', long)]
    org: Option<String>,

    /// InfluxDB bucket
    #[arg(short = 'b', long)]
    bucket: Option<String>,

    /// InfluxDB measurement name
    #[arg(short = 'm', long)]
    measurement: Option<String>,

    /// Points per InfluxDB write
    #[arg(long)]
    batch: Option<usize>,

    /// Flush interval in milliseconds
    #[arg(long)]
    flush: Option<u64>,

    /// Disable the InfluxDB metrics consumer
    #[arg(long)]
    no_influx: bool,

    /// Enable the CNAME-cloaking defense engine
    #[arg(long)]
    cloak: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input_path: self.input.clone(),
            input_is_file: self.file,
            influx_url: self.influx_url.clone(),
            influx_token: self.token.clone(),
            influx_org: self.org.clone(),
            influx_bucket: self.bucket.clone(),
            influx_measurement: self.measurement.clone(),
            influx_batch_size: self.batch,
            influx_flush_interval_ms: self.flush,
            disable_influx: self.no_influx,
            enable_cloak: self.cloak,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    info!("Starting tapguard v{}", env!("CARGO_PKG_VERSION"));

    let pipeline = di::Pipeline::build(&config).await?;
    server::run_pipeline(pipeline).await?;

    info!("Shutdown complete");
    Ok(())
}
