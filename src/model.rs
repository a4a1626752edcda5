//! Core data model for the security controller.
//!
//! These types are deliberately small: the interesting behavior lives in the
//! [`crate::service`] state machine, which is the only writer of
//! [`AlarmStatus`] and [`ArmingStatus`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// The headline security state of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmStatus {
    /// Nothing suspicious; the system is quiet.
    NoAlarm,
    /// A sensor has tripped while armed; one more trigger escalates.
    PendingAlarm,
    /// Full alarm. Only an explicit disarm clears this.
    Alarm,
}

impl AlarmStatus {
    /// Short human-readable description, used by the console listener.
    pub fn description(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "all clear",
            AlarmStatus::PendingAlarm => "pending alarm",
            AlarmStatus::Alarm => "ALARM!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Whether the system is disarmed or armed, and in which mode.
///
/// Arming gates whether sensor activations may escalate the alarm; the
/// home/away distinction only matters to the camera path (a threat sighting
/// escalates only while armed-home, i.e. someone should not be moving around
/// inside).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmingStatus {
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub fn is_armed(&self) -> bool {
        !matches!(self, ArmingStatus::Disarmed)
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArmingStatus::Disarmed => "disarmed",
            ArmingStatus::ArmedHome => "armed (home)",
            ArmingStatus::ArmedAway => "armed (away)",
        };
        f.write_str(s)
    }
}

/// Kind of binary detector. Descriptive only; transition logic never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SensorType::Door => "door",
            SensorType::Window => "window",
            SensorType::Motion => "motion",
        };
        f.write_str(s)
    }
}

/// A binary detector registered with the system.
///
/// Identity is the `(name, sensor_type)` pair: two sensors with the same
/// name and type are the same sensor for set-membership purposes, even when
/// one of them was reconstructed from persisted state. The uuid is a debug
/// aid and is excluded from equality and hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: Uuid,
    pub name: String,
    pub sensor_type: SensorType,
    pub active: bool,
}

impl Sensor {
    /// Create a new, inactive sensor.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    /// Whether `other` refers to the same sensor.
    pub fn same_identity(&self, other: &Sensor) -> bool {
        self.name == other.name && self.sensor_type == other.sensor_type
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sensor_type.hash(state);
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {}",
            self.name,
            self.sensor_type,
            if self.active { "active" } else { "inactive" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sensor_identity_ignores_uuid_and_active() {
        let mut a = Sensor::new("front door", SensorType::Door);
        let b = Sensor::new("front door", SensorType::Door);
        assert_ne!(a.id, b.id);

        a.active = true;
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_sensor_identity_distinguishes_type() {
        let door = Sensor::new("hallway", SensorType::Door);
        let motion = Sensor::new("hallway", SensorType::Motion);
        assert_ne!(door, motion);
    }

    #[test]
    fn test_new_sensor_starts_inactive() {
        let sensor = Sensor::new("garage", SensorType::Window);
        assert!(!sensor.active);
    }

    #[test]
    fn test_status_descriptions() {
        assert_eq!(AlarmStatus::NoAlarm.to_string(), "all clear");
        assert_eq!(AlarmStatus::Alarm.to_string(), "ALARM!");
        assert!(ArmingStatus::ArmedAway.is_armed());
        assert!(!ArmingStatus::Disarmed.is_armed());
    }
}
