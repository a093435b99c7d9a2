use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use m5_metrics::config::DEFAULT_LOG_LEVEL;
use m5_metrics::prelude::*;

/// Streams host CPU, memory, network and disk meters to a serial display
#[derive(Debug, Parser)]
#[command(name = "m5-metrics", version)]
struct Cli {
    /// Serial port; only used together with BAUD
    port: Option<String>,

    /// Baud rate; a value that is not a number becomes 0
    baud: Option<String>,

    /// Settings file [default: m5-metrics.toml when present]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `m5_metrics=trace`
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Run a single tick and exit
    #[arg(long)]
    once: bool,

    /// Print records without opening the serial port
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config_level)),
    }
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn print_result(result: &Result<String>) {
    match result {
        Ok(record) => println!("{record}"),
        Err(err) => println!("{err}"),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}

/// Returns whether the last tick succeeded in one-shot mode; a continuous run always succeeds.
async fn drive<C: SerialChannel>(mut transport: TransportLoop<C>, once: bool) -> bool {
    if once {
        let result = transport.tick().await;
        print_result(&result);
        return result.is_ok();
    }
    transport.run_until(shutdown_signal(), print_result).await;
    true
}

async fn run(cli: Cli, mut settings: Settings) -> Result<bool> {
    settings.apply_cli_override(cli.port.as_deref(), cli.baud.as_deref());
    let core = MetricsCore::new(settings.slots()?, &HostCounterSource::new())?;

    let format = settings.wire_format;
    let interval = settings.poll_interval();
    if cli.dry_run {
        info!(?format, "dry run, records are not sent");
        return Ok(drive(TransportLoop::new(core, DryRunChannel::new(), format, interval), cli.once).await);
    }

    info!(
        port = %settings.channel.port,
        baud_rate = settings.channel.baud_rate,
        ?format,
        "streaming meters"
    );
    let channel = SerialportChannel::new(&settings.channel.port, settings.channel.baud_rate, settings.write_timeout());
    Ok(drive(TransportLoop::new(core, channel, format, interval), cli.once).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.config.as_deref());

    let config_level = settings
        .as_ref()
        .map(|settings| settings.log_level.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    init_tracing(cli.log_level.as_deref(), config_level);

    let outcome = match settings {
        Ok(settings) => run(cli, settings).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, fatal = err.is_fatal(), "startup failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
