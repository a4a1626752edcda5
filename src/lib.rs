//! Homeguard - simulated home security controller.
//!
//! This library models a home security system: binary sensors
//! (door/window/motion) and a camera-based intruder check feed a small state
//! machine that derives one authoritative alarm status from arming state,
//! sensor activity, and classifier verdicts.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        Homeguard                           │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐    ┌──────────────────┐    ┌────────────┐  │
//! │  │ Simulator │───▶│ SecurityService  │───▶│ Listeners  │  │
//! │  │ (sensors, │    │ (decision table) │    │ (console)  │  │
//! │  │  camera)  │    └──────────────────┘    └────────────┘  │
//! │  └───────────┘       │            │                       │
//! │                      ▼            ▼                       │
//! │              ┌────────────┐  ┌────────────┐               │
//! │              │ Repository │  │ Classifier │               │
//! │              │ (mem/file) │  │ (simulated)│               │
//! │              └────────────┘  └────────────┘               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`service::SecurityService`] is the only writer of alarm/arming
//! state and the only component that touches the repository; everything
//! else is a collaborator behind a trait.
//!
//! # Example
//!
//! ```
//! use homeguard::image::SimulatedClassifier;
//! use homeguard::model::{ArmingStatus, Sensor, SensorType};
//! use homeguard::repository::InMemoryRepository;
//! use homeguard::service::SecurityService;
//!
//! let mut service = SecurityService::new(
//!     Box::new(InMemoryRepository::new()),
//!     Box::new(SimulatedClassifier::new(0.0)),
//! );
//!
//! let sensor = Sensor::new("front door", SensorType::Door);
//! service.add_sensor(sensor.clone()).unwrap();
//! service.set_arming_status(ArmingStatus::ArmedAway).unwrap();
//! service.trigger_sensor(&sensor).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod listener;
pub mod model;
pub mod repository;
pub mod service;
pub mod simulate;

// Re-export key types at crate root for convenience
pub use config::Config;
pub use error::{ClassifierError, RepositoryError, SecurityError};
pub use image::{CameraImage, SimulatedClassifier, ThreatClassifier};
pub use listener::{ConsoleListener, StatusListener};
pub use model::{AlarmStatus, ArmingStatus, Sensor, SensorType};
pub use repository::{FileRepository, InMemoryRepository, SecurityRepository};
pub use service::SecurityService;
pub use simulate::{SimEvent, Simulator, SimulatorConfig};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
