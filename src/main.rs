//! Homeguard CLI
//!
//! Console front end for the simulated home security controller. One-shot
//! commands (arm, trigger, status, ...) operate against the file-backed
//! repository so state carries across invocations; `run` drives a live
//! simulation loop.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use homeguard::{
    CameraImage, Config, ConsoleListener, FileRepository, InMemoryRepository, Sensor, SensorType,
    SecurityRepository, SecurityService, SimEvent, SimulatedClassifier, Simulator,
    SimulatorConfig, StatusListener, VERSION,
};

#[derive(Parser)]
#[command(name = "homeguard")]
#[command(version = VERSION)]
#[command(about = "Simulated home security controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SensorKind {
    Door,
    Window,
    Motion,
}

impl From<SensorKind> for SensorType {
    fn from(kind: SensorKind) -> Self {
        match kind {
            SensorKind::Door => SensorType::Door,
            SensorKind::Window => SensorType::Window,
            SensorKind::Motion => SensorType::Motion,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArmMode {
    Home,
    Away,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live simulation loop
    Run {
        /// Use a volatile in-memory repository instead of the state file
        #[arg(long)]
        memory: bool,

        /// Seconds between simulated sensor triggers
        #[arg(long)]
        trigger_interval: Option<u64>,

        /// Seconds between simulated camera scans
        #[arg(long)]
        scan_interval: Option<u64>,
    },

    /// Arm the system (resets all sensors to inactive)
    Arm {
        /// Arming mode
        #[arg(value_enum)]
        mode: ArmMode,
    },

    /// Disarm the system (always clears the alarm)
    Disarm,

    /// Register a new sensor
    AddSensor {
        /// Sensor name
        name: String,
        /// Sensor kind
        #[arg(value_enum)]
        kind: SensorKind,
    },

    /// Remove a registered sensor
    RemoveSensor {
        name: String,
        #[arg(value_enum)]
        kind: SensorKind,
    },

    /// Activate (or deactivate) a sensor by hand
    Trigger {
        name: String,
        #[arg(value_enum)]
        kind: SensorKind,
        /// Deactivate instead of activate
        #[arg(long)]
        off: bool,
    },

    /// Capture one synthetic camera frame and classify it
    Scan,

    /// Show current alarm, arming, and sensor state
    Status,

    /// Show configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homeguard=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    match cli.command {
        Commands::Run {
            memory,
            trigger_interval,
            scan_interval,
        } => cmd_run(&config, memory, trigger_interval, scan_interval),
        Commands::Arm { mode } => {
            let mut service = file_service(&config)?;
            let status = match mode {
                ArmMode::Home => homeguard::ArmingStatus::ArmedHome,
                ArmMode::Away => homeguard::ArmingStatus::ArmedAway,
            };
            service.set_arming_status(status)?;
            println!("system is now {status}");
            Ok(())
        }
        Commands::Disarm => {
            let mut service = file_service(&config)?;
            service.set_arming_status(homeguard::ArmingStatus::Disarmed)?;
            println!("system is now disarmed");
            Ok(())
        }
        Commands::AddSensor { name, kind } => {
            let mut service = file_service(&config)?;
            let sensor = Sensor::new(name, kind.into());
            service.add_sensor(sensor.clone())?;
            println!("added {sensor}");
            Ok(())
        }
        Commands::RemoveSensor { name, kind } => {
            let mut service = file_service(&config)?;
            let sensor = Sensor::new(name, kind.into());
            service.remove_sensor(&sensor)?;
            println!("removed {} [{}]", sensor.name, sensor.sensor_type);
            Ok(())
        }
        Commands::Trigger { name, kind, off } => {
            let mut service = file_service(&config)?;
            let sensor = Sensor::new(name, kind.into());
            service.change_sensor_activation(&sensor, !off)?;
            println!("alarm status: {}", service.alarm_status()?);
            Ok(())
        }
        Commands::Scan => {
            let mut service = file_service(&config)?;
            let detected = service.process_image(&CameraImage::synthetic())?;
            println!(
                "scan result: {}",
                if detected { "threat detected" } else { "clear" }
            );
            println!("alarm status: {}", service.alarm_status()?);
            Ok(())
        }
        Commands::Status => cmd_status(&config),
        Commands::Config => cmd_config(&config),
    }
}

/// Build a service over the file repository and simulated classifier.
fn file_service(config: &Config) -> Result<SecurityService> {
    let repository =
        FileRepository::open(&config.state_path).context("opening state repository")?;
    let classifier = SimulatedClassifier::new(config.detection_probability);
    Ok(
        SecurityService::new(Box::new(repository), Box::new(classifier))
            .with_confidence_threshold(config.confidence_threshold),
    )
}

fn cmd_run(
    config: &Config,
    memory: bool,
    trigger_interval: Option<u64>,
    scan_interval: Option<u64>,
) -> Result<()> {
    println!("Homeguard v{VERSION}");
    println!();

    let repository: Box<dyn SecurityRepository> = if memory {
        Box::new(InMemoryRepository::new())
    } else {
        Box::new(FileRepository::open(&config.state_path).context("opening state repository")?)
    };
    let classifier = SimulatedClassifier::new(config.detection_probability);
    let mut service = SecurityService::new(repository, Box::new(classifier))
        .with_confidence_threshold(config.confidence_threshold);

    let console: Arc<dyn StatusListener> = Arc::new(ConsoleListener);
    service.add_listener(console);

    let sensors = service.sensors()?;
    if sensors.is_empty() {
        bail!("no sensors registered; add some with `homeguard add-sensor` first");
    }

    println!("Sensors:");
    for sensor in &sensors {
        println!("  {sensor}");
    }
    println!("Arming status: {}", service.arming_status()?);
    println!("Alarm status:  {}", service.alarm_status()?);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let sim_config = SimulatorConfig {
        trigger_interval: Duration::from_secs(
            trigger_interval.unwrap_or(config.trigger_interval_secs),
        ),
        scan_interval: Duration::from_secs(scan_interval.unwrap_or(config.scan_interval_secs)),
        ..SimulatorConfig::default()
    };
    let mut simulator = Simulator::new(sim_config, sensors);
    simulator
        .start()
        .context("starting background simulator")?;

    // Ctrl+C flips the flag; the loop drains and exits.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("installing Ctrl+C handler")?;

    let receiver = simulator.receiver().clone();
    while running.load(Ordering::SeqCst) {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(SimEvent::SensorChanged { sensor, active, .. }) => {
                service.change_sensor_activation(&sensor, active)?;
            }
            Ok(SimEvent::CameraFrame { image, .. }) => {
                service.process_image(&image)?;
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }

    println!();
    println!("Stopping...");
    simulator.stop();
    println!("Final alarm status: {}", service.alarm_status()?);
    Ok(())
}

fn cmd_status(config: &Config) -> Result<()> {
    let service = file_service(config)?;
    println!("Arming status: {}", service.arming_status()?);
    println!("Alarm status:  {}", service.alarm_status()?);
    let sensors = service.sensors()?;
    if sensors.is_empty() {
        println!("No sensors registered.");
    } else {
        println!("Sensors:");
        for sensor in sensors {
            println!("  {sensor}");
        }
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    println!("Config file: {:?}", Config::config_path());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
