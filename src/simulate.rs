//! Background simulator feeding the controller with events.
//!
//! A worker thread stands in for real hardware: it periodically trips a
//! random registered sensor and periodically produces a camera frame, and
//! pushes both into a bounded channel. The main loop drains the channel and
//! drives the [`crate::service::SecurityService`]; the service itself never
//! sees the channel.

use crate::image::CameraImage;
use crate::model::Sensor;
use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// An event produced by the simulator.
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// A sensor changed physical state.
    SensorChanged {
        timestamp: DateTime<Utc>,
        sensor: Sensor,
        active: bool,
    },
    /// The camera captured a frame to classify.
    CameraFrame {
        timestamp: DateTime<Utc>,
        image: CameraImage,
    },
}

/// Tuning knobs for the simulator thread.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Seconds between sensor trigger attempts
    pub trigger_interval: Duration,
    /// Seconds between camera frames
    pub scan_interval: Duration,
    /// Probability that a triggered sensor goes active (vs. quiet again)
    pub activation_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            trigger_interval: Duration::from_secs(5),
            scan_interval: Duration::from_secs(15),
            activation_probability: 0.7,
        }
    }
}

/// Errors that can occur when driving the simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("simulator is already running")]
    AlreadyRunning,
}

/// Randomized hardware stand-in running on its own thread.
pub struct Simulator {
    config: SimulatorConfig,
    sensors: Vec<Sensor>,
    sender: Sender<SimEvent>,
    receiver: Receiver<SimEvent>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Simulator {
    /// Create a simulator over the given registered sensors.
    pub fn new(config: SimulatorConfig, sensors: Vec<Sensor>) -> Self {
        let (sender, receiver) = bounded(1_000);
        Self {
            config,
            sensors,
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Start the simulator thread.
    pub fn start(&mut self) -> Result<(), SimulatorError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SimulatorError::AlreadyRunning);
        }
        self.running.store(true, Ordering::SeqCst);

        let running = self.running.clone();
        let sender = self.sender.clone();
        let sensors = self.sensors.clone();
        let config = self.config.clone();

        let handle = thread::spawn(move || {
            let mut rng = rand::thread_rng();
            let mut last_trigger = Instant::now();
            let mut last_scan = Instant::now();

            while running.load(Ordering::SeqCst) {
                if !sensors.is_empty() && last_trigger.elapsed() >= config.trigger_interval {
                    // Unwrap is fine: the slice is non-empty.
                    let sensor = sensors.choose(&mut rng).unwrap().clone();
                    let active = rng.gen_bool(config.activation_probability);
                    let event = SimEvent::SensorChanged {
                        timestamp: Utc::now(),
                        sensor,
                        active,
                    };
                    // Drop events when the consumer falls behind.
                    let _ = sender.try_send(event);
                    last_trigger = Instant::now();
                }

                if last_scan.elapsed() >= config.scan_interval {
                    let event = SimEvent::CameraFrame {
                        timestamp: Utc::now(),
                        image: CameraImage::synthetic(),
                    };
                    let _ = sender.try_send(event);
                    last_scan = Instant::now();
                }

                thread::sleep(Duration::from_millis(50));
            }
        });

        self.handle = Some(handle);
        Ok(())
    }

    /// Stop the simulator thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the simulator is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for simulated events.
    pub fn receiver(&self) -> &Receiver<SimEvent> {
        &self.receiver
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorType;

    #[test]
    fn test_start_stop() {
        let mut sim = Simulator::new(SimulatorConfig::default(), Vec::new());
        assert!(!sim.is_running());
        sim.start().unwrap();
        assert!(sim.is_running());
        assert!(matches!(sim.start(), Err(SimulatorError::AlreadyRunning)));
        sim.stop();
        assert!(!sim.is_running());
    }

    #[test]
    fn test_emits_sensor_events() {
        let config = SimulatorConfig {
            trigger_interval: Duration::from_millis(1),
            scan_interval: Duration::from_secs(3600),
            activation_probability: 1.0,
        };
        let sensors = vec![Sensor::new("front door", SensorType::Door)];
        let mut sim = Simulator::new(config, sensors);
        sim.start().unwrap();

        let event = sim
            .receiver()
            .recv_timeout(Duration::from_secs(2))
            .expect("simulator produced no event");
        sim.stop();

        match event {
            SimEvent::SensorChanged { sensor, active, .. } => {
                assert_eq!(sensor.name, "front door");
                assert!(active);
            }
            SimEvent::CameraFrame { .. } => panic!("expected a sensor event"),
        }
    }
}
