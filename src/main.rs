//! RV-C battery gateway daemon.
//!
//! Loads the configuration, opens the CAN interface (or the dry-run logger),
//! and drives the transmission scheduler until interrupted.

use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use tokio::time::{Duration, Instant};

use rvc_gateway::config::{GatewayConfig, LoggingConfig, SocketType};
use rvc_gateway::core::StaticIdentity;
use rvc_gateway::protocol::scheduler::{CommandChannel, GatewayService, RunSummary};
use rvc_gateway::protocol::transport::log_bus::LogBus;
use rvc_gateway::protocol::transport::traits::{can_bus::CanBus, gateway_timer::GatewayTimer};
use rvc_gateway::telemetry::JsonFileTelemetry;

/// Pending on-demand requests the runner can hold at once.
const COMMAND_CAPACITY: usize = 8;

/// RV-C battery gateway - broadcast BMS telemetry as RV-C DGNs
#[derive(Parser, Debug)]
#[command(name = "rvc-gateway")]
#[command(about = "Broadcast battery telemetry as RV-C frames on a CAN bus", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the configuration file (rvc-gateway.toml)
    #[arg(short, long, value_name = "FILE", env = "RVC_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log frames instead of opening the CAN interface
    #[arg(long)]
    dry_run: bool,

    /// Transmit a message kind once at startup, e.g. DM_RV (can be repeated)
    #[arg(long, value_name = "NAME")]
    request: Vec<String>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GatewayConfig::load(path)
            .with_context(|| format!("unable to load configuration {}", path.display()))?,
        None => GatewayConfig::default(),
    };
    init_logging(&config.logging, args.verbose)?;

    let identity = config.identity().context("invalid identity")?;
    info!("RV-C gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("Identity: {}", identity);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("unable to start the async runtime")?;

    let summary = if args.dry_run || config.bus.socket_type == SocketType::Log {
        info!("Dry run: frames are logged, not sent");
        runtime.block_on(run(LogBus::new(), identity, &config, &args.request))?
    } else {
        run_socketcan(&runtime, identity, &config, &args.request)?
    };

    info!(
        "{} cycle(s), {} frame(s) sent, {} encode failure(s), {} transmit failure(s)",
        summary.cycles, summary.frames_sent, summary.encode_failures, summary.transmit_failures
    );
    Ok(())
}

#[cfg(all(target_os = "linux", feature = "socketcan"))]
fn run_socketcan(
    runtime: &tokio::runtime::Runtime,
    identity: StaticIdentity,
    config: &GatewayConfig,
    requests: &[String],
) -> Result<RunSummary> {
    use rvc_gateway::protocol::transport::socketcan::SocketCanBus;

    let bus = SocketCanBus::open(&config.bus.interface, config.bus.bitrate)
        .with_context(|| format!("unable to open CAN interface {}", config.bus.interface))?;
    runtime.block_on(run(bus, identity, config, requests))
}

#[cfg(not(all(target_os = "linux", feature = "socketcan")))]
fn run_socketcan(
    _runtime: &tokio::runtime::Runtime,
    _identity: StaticIdentity,
    config: &GatewayConfig,
    _requests: &[String],
) -> Result<RunSummary> {
    Err(anyhow!(
        "cannot open {}: built without the `socketcan` feature (use --dry-run or [bus] socket_type = \"log\")",
        config.bus.interface
    ))
}

/// Assemble the service on `bus` and drive it until Ctrl-C.
async fn run<C>(
    bus: C,
    identity: StaticIdentity,
    config: &GatewayConfig,
    requests: &[String],
) -> Result<RunSummary>
where
    C: CanBus,
    C::Error: Debug,
{
    let telemetry = JsonFileTelemetry::new(
        &config.telemetry.snapshot_file,
        config.telemetry.service.clone(),
    );
    info!(
        "Telemetry: {} from {}",
        config.telemetry.service,
        config.telemetry.snapshot_file.display()
    );

    let channel = CommandChannel::<COMMAND_CAPACITY>::new();
    let parts = GatewayService::with_catalog(
        identity,
        telemetry,
        bus,
        TokioTimer::new(),
        Some(&channel),
    )?
    .into_parts();
    let handle = parts
        .handle
        .ok_or_else(|| anyhow!("gateway handle missing despite a command channel"))?;
    let mut runner = parts.runner;

    let control = async {
        for name in requests {
            handle.request_named(name).await;
        }
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for Ctrl-C: {}", err);
        }
        info!("Interrupt received, stopping");
        handle.shutdown().await;
    };

    let (summary, ()) = tokio::join!(runner.drive(), control);
    Ok(summary)
}

/// Gateway clock on top of the tokio timer.
struct TokioTimer {
    origin: Instant,
}

impl TokioTimer {
    fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl GatewayTimer for TokioTimer {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    async fn delay_ms(&mut self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// Initialize logging from the configured level, raised by `-v` flags.
/// `RUST_LOG` directives take precedence over both.
fn init_logging(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    use env_logger::{Builder, Target};

    let configured: LevelFilter = logging
        .level
        .parse()
        .with_context(|| format!("invalid [logging] level {:?}", logging.level))?;
    let level = match verbose {
        0 => configured,
        1 => configured.max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });

    if let Some(path) = &logging.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("unable to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
