//! In-process repository backend.
//!
//! Used by tests and `homeguard run --memory`. Never fails, but keeps the
//! fallible trait signatures so the service treats all backends alike.

use crate::error::RepositoryError;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use crate::repository::SecurityRepository;

/// Volatile repository holding everything in process memory.
#[derive(Debug)]
pub struct InMemoryRepository {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: Vec<Sensor>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            alarm_status: AlarmStatus::NoAlarm,
            arming_status: ArmingStatus::Disarmed,
            sensors: Vec::new(),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityRepository for InMemoryRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        Ok(self.sensors.clone())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.sensors.push(sensor);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        if let Some(existing) = self.sensors.iter_mut().find(|s| s.same_identity(sensor)) {
            existing.active = sensor.active;
        }
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.sensors.retain(|s| !s.same_identity(sensor));
        Ok(())
    }
}
