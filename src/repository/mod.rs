//! Durable storage for alarm state, arming state, and the sensor set.
//!
//! The repository is the single source of truth; the
//! [`crate::service::SecurityService`] is its only writer. Backends are
//! injected at service construction, never reached through globals.

pub mod file;
pub mod memory;

use crate::error::RepositoryError;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};

pub use file::FileRepository;
pub use memory::InMemoryRepository;

/// Storage contract for the security controller's state.
///
/// Sensors are a set keyed by `(name, sensor_type)` identity; `sensors()`
/// reports them in registration order so listener notifications stay
/// deterministic. Duplicate/missing checks are the service's job, not the
/// repository's: `add_sensor` and `remove_sensor` here are plain set
/// mutations.
pub trait SecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError>;

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError>;
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError>;

    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError>;
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError>;
    /// Persist a sensor's current `active` flag, matched by identity.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;
}
