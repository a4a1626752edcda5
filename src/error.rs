//! Error taxonomy for the security controller.
//!
//! Two families: invalid operations (caller mistakes, e.g. removing an
//! unknown sensor) and collaborator failures (repository or classifier).
//! Collaborator failures propagate unmodified; the state machine never
//! retries them internally.

use thiserror::Error;

/// Failures from a [`crate::repository::SecurityRepository`] backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("repository serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures from a [`crate::image::ThreatClassifier`] backend.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier backend failure: {0}")]
    Backend(String),
}

/// Errors surfaced by the [`crate::service::SecurityService`].
#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("sensor '{name}' ({sensor_type}) is already registered")]
    DuplicateSensor { name: String, sensor_type: String },

    #[error("sensor '{name}' ({sensor_type}) is not registered")]
    UnknownSensor { name: String, sensor_type: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl SecurityError {
    pub(crate) fn duplicate(sensor: &crate::model::Sensor) -> Self {
        SecurityError::DuplicateSensor {
            name: sensor.name.clone(),
            sensor_type: sensor.sensor_type.to_string(),
        }
    }

    pub(crate) fn unknown(sensor: &crate::model::Sensor) -> Self {
        SecurityError::UnknownSensor {
            name: sensor.name.clone(),
            sensor_type: sensor.sensor_type.to_string(),
        }
    }
}
