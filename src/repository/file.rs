//! JSON-file repository backend.
//!
//! Persists the whole controller state as one pretty-printed JSON document,
//! written through on every mutation so separate CLI invocations observe
//! each other's changes. Default location is
//! `dirs::data_local_dir()/homeguard/state.json`.

use crate::error::RepositoryError;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use crate::repository::SecurityRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk document format.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: Vec<Sensor>,
    last_updated: DateTime<Utc>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            alarm_status: AlarmStatus::NoAlarm,
            arming_status: ArmingStatus::Disarmed,
            sensors: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

/// File-backed repository. State is loaded once at construction and kept in
/// memory; every mutation rewrites the file.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    state: PersistedState,
}

impl FileRepository {
    /// Open (or initialize) the repository at the default state path.
    pub fn open_default() -> Result<Self, RepositoryError> {
        Self::open(Self::default_path())
    }

    /// Open (or initialize) the repository at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            PersistedState::default()
        };
        Ok(Self { path, state })
    }

    /// Default state file location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homeguard")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&mut self) -> Result<(), RepositoryError> {
        self.state.last_updated = Utc::now();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SecurityRepository for FileRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.state.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.state.alarm_status = status;
        self.persist()
    }

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.state.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.state.arming_status = status;
        self.persist()
    }

    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        Ok(self.state.sensors.clone())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.state.sensors.push(sensor);
        self.persist()
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        if let Some(existing) = self
            .state
            .sensors
            .iter_mut()
            .find(|s| s.same_identity(sensor))
        {
            existing.active = sensor.active;
        }
        self.persist()
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.state.sensors.retain(|s| !s.same_identity(sensor));
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorType;

    fn test_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("homeguard-file-repo-test")
            .join(name)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = test_path("missing/state.json");
        let _ = std::fs::remove_file(&path);
        let repo = FileRepository::open(&path).unwrap();
        assert_eq!(repo.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(repo.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert!(repo.sensors().unwrap().is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        let path = test_path("reopen/state.json");
        let _ = std::fs::remove_file(&path);

        let mut repo = FileRepository::open(&path).unwrap();
        repo.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        repo.add_sensor(Sensor::new("porch", SensorType::Motion))
            .unwrap();
        drop(repo);

        let reopened = FileRepository::open(&path).unwrap();
        assert_eq!(reopened.arming_status().unwrap(), ArmingStatus::ArmedAway);
        assert_eq!(reopened.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
        assert_eq!(reopened.sensors().unwrap().len(), 1);
        assert_eq!(reopened.sensors().unwrap()[0].name, "porch");
    }

    #[test]
    fn test_update_sensor_persists_active_flag() {
        let path = test_path("update/state.json");
        let _ = std::fs::remove_file(&path);

        let mut repo = FileRepository::open(&path).unwrap();
        let sensor = Sensor::new("kitchen window", SensorType::Window);
        repo.add_sensor(sensor.clone()).unwrap();

        let mut tripped = sensor;
        tripped.active = true;
        repo.update_sensor(&tripped).unwrap();
        drop(repo);

        let reopened = FileRepository::open(&path).unwrap();
        assert!(reopened.sensors().unwrap()[0].active);
    }
}
