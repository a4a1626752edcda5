//! Status listener capability and the console implementation.
//!
//! Listeners are presentation-side observers: the service notifies them of
//! alarm changes, sensor changes, and classifier verdicts synchronously, in
//! registration order, always after the corresponding repository write has
//! committed.

use crate::model::{AlarmStatus, ArmingStatus, Sensor};

/// Callback capability held by presentation components.
///
/// `arming_status_changed` has a default empty body: most observers only
/// care about the three core notification kinds.
pub trait StatusListener {
    /// The persisted alarm status changed to `status`.
    fn alarm_status_changed(&self, status: AlarmStatus);

    /// A sensor's active flag changed (the new value is on the sensor).
    fn sensor_status_changed(&self, sensor: &Sensor);

    /// The classifier produced a verdict for the latest frame, whether or
    /// not the alarm status moved as a result.
    fn threat_detected(&self, detected: bool);

    /// The persisted arming status changed to `status`.
    fn arming_status_changed(&self, _status: ArmingStatus) {}
}

/// Console observer used by the CLI in place of GUI panels.
#[derive(Debug, Default)]
pub struct ConsoleListener;

impl StatusListener for ConsoleListener {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => println!("*** {status} ***"),
            _ => println!("alarm status: {status}"),
        }
    }

    fn sensor_status_changed(&self, sensor: &Sensor) {
        println!("sensor: {sensor}");
    }

    fn threat_detected(&self, detected: bool) {
        if detected {
            println!("camera: threat subject detected");
        } else {
            println!("camera: frame clear");
        }
    }

    fn arming_status_changed(&self, status: ArmingStatus) {
        println!("system is now {status}");
    }
}
