//! PathaNav - navigation daemon.
//!
//! Boots the costmap generator and the dynamic-window planner, wires the
//! input channels and topics, and supervises the worker threads until a
//! shutdown signal or a worker failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::unbounded;
use log::{error, info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

use patha_nav::config::NavConfig;
use patha_nav::core::types::Pose2D;
use patha_nav::costmap::{CostmapGenerator, PaddingSettings};
use patha_nav::io::bus::NavTopics;
use patha_nav::io::map_provider::{FileMapProvider, MapProvider};
use patha_nav::io::transforms::TransformBuffer;
use patha_nav::state::commands::create_map_channel;
use patha_nav::state::shared::create_shared_world;
use patha_nav::threads::{InputReceivers, spawn_threads};

/// Navigation daemon: padded global costmap, rolling local costmap and
/// dynamic-window velocity commands.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(default_value = "patha.toml")]
    config: PathBuf,

    /// Override the startup map number
    #[arg(long)]
    map: Option<i8>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        info!("Loading configuration from {:?}", args.config);
        match NavConfig::load(&args.config) {
            Ok(config) => config,
            Err(e) => {
                error!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        info!("No config file at {:?}, using defaults", args.config);
        NavConfig::default()
    };
    if let Some(map) = args.map {
        config.global.init_map_nr = map;
    }

    info!("PathaNav v{}", env!("CARGO_PKG_VERSION"));

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: NavConfig) -> patha_nav::Result<()> {
    let world = create_shared_world();
    let topics = NavTopics::new();

    // Stamped odometry buffer sized to roughly one second of samples
    let mount = Pose2D::new(config.mount.laser_x, config.mount.laser_y, config.mount.laser_yaw);
    let capacity = (config.local_costmap.frequency_scan.ceil() as usize).max(16);
    let tf = Arc::new(TransformBuffer::new(mount, capacity));

    // Fetching the initial map is fatal when it fails
    let provider: Box<dyn MapProvider> =
        Box::new(FileMapProvider::new(&config.global_costmap.maps_dir));
    let generator = CostmapGenerator::startup(
        provider,
        PaddingSettings::from_config(&config),
        config.global.init_map_nr,
        Arc::clone(&topics),
        Arc::clone(&world),
    )?;

    // Input channels; the senders are handed to in-process driver adapters
    let (odom_tx, odom_rx) = unbounded();
    let (scan_tx, scan_rx) = unbounded();
    let (path_tx, path_rx) = unbounded();
    let receivers = InputReceivers {
        odom: odom_rx,
        scan: scan_rx,
        path: path_rx,
    };
    let (map_tx, map_rx) = create_map_channel();

    let shutdown = Arc::new(AtomicBool::new(false));
    let handles = spawn_threads(
        config,
        Arc::clone(&world),
        tf,
        Arc::clone(&topics),
        receivers,
        generator,
        map_rx,
        map_tx.clone(),
        Arc::clone(&shutdown),
    );

    // Signal handling: SIGINT/SIGTERM flip the shutdown flag
    let signal_shutdown = Arc::clone(&shutdown);
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!("Received signal {}, shutting down", signal);
                signal_shutdown.store(true, Ordering::Release);
            }
        })
        .expect("Failed to spawn signal thread");

    info!("PathaNav running; waiting for odometry, scans and paths");

    // Supervise the workers
    loop {
        std::thread::sleep(Duration::from_millis(500));

        if shutdown.load(Ordering::Acquire) {
            break;
        }
        if handles.any_finished() {
            warn!("A worker thread exited unexpectedly");
            shutdown.store(true, Ordering::Release);
            break;
        }
    }

    info!("Waiting for threads to finish...");
    drop((odom_tx, scan_tx, path_tx, map_tx));
    handles.join_all();
    info!("PathaNav finished");
    Ok(())
}
