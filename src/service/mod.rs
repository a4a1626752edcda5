//! The security controller core.
//!
//! [`SecurityService`] owns the authoritative alarm/arming state: it is the
//! sole writer of the repository's [`AlarmStatus`]/[`ArmingStatus`] and the
//! sole broadcaster to [`StatusListener`]s. Every public operation runs to
//! completion synchronously: read state, decide via the
//! [`transitions`] table, write the repository, notify listeners. Callers in
//! a concurrent setting must serialize calls (each operation reads then
//! writes non-atomically).

pub mod transitions;

use crate::error::SecurityError;
use crate::image::{CameraImage, ThreatClassifier, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::listener::StatusListener;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use crate::repository::SecurityRepository;
use std::sync::Arc;
use tracing::{debug, info};
use transitions::{next_alarm_status, SecurityEvent};

/// Orchestrates all alarm/arming state transitions.
pub struct SecurityService {
    repository: Box<dyn SecurityRepository>,
    classifier: Box<dyn ThreatClassifier>,
    listeners: Vec<Arc<dyn StatusListener>>,
    confidence_threshold: f32,
}

impl SecurityService {
    /// Build a service over the injected collaborators, using the default
    /// classifier confidence threshold.
    pub fn new(
        repository: Box<dyn SecurityRepository>,
        classifier: Box<dyn ThreatClassifier>,
    ) -> Self {
        Self {
            repository,
            classifier,
            listeners: Vec::new(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Override the classifier confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    // --- listener registry -------------------------------------------------

    /// Register a listener. Registering the same handle twice is a no-op;
    /// dispatch order is registration order.
    pub fn add_listener(&mut self, listener: Arc<dyn StatusListener>) {
        if !self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    /// Deregister a listener by handle identity.
    pub fn remove_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
    }

    // --- public operations -------------------------------------------------

    /// Apply a sensor activation change and run the alarm rules.
    ///
    /// The decision is taken against the state recorded *before* any
    /// mutation for this call. The sensor's flag is always updated and
    /// persisted; an alarm write happens only when the rules produce a new
    /// value.
    pub fn change_sensor_activation(
        &mut self,
        sensor: &Sensor,
        active: bool,
    ) -> Result<(), SecurityError> {
        let sensors = self.repository.sensors()?;
        let recorded = sensors
            .iter()
            .find(|s| s.same_identity(sensor))
            .ok_or_else(|| SecurityError::unknown(sensor))?;

        let event = if active {
            SecurityEvent::SensorActivated
        } else {
            SecurityEvent::SensorDeactivated {
                was_active: recorded.active,
                // "Remaining" means once this sensor's flag is cleared.
                any_remaining_active: sensors
                    .iter()
                    .any(|s| s.active && !s.same_identity(sensor)),
            }
        };

        let alarm = self.repository.alarm_status()?;
        let arming = self.repository.arming_status()?;
        let next = next_alarm_status(alarm, arming, event);

        let mut updated = recorded.clone();
        updated.active = active;
        self.repository.update_sensor(&updated)?;
        debug!(sensor = %updated.name, active, "sensor activation changed");
        self.notify_sensor(&updated);

        if let Some(status) = next {
            self.write_alarm_status(status)?;
        }
        Ok(())
    }

    /// Convenience trigger used by simulated sensors: activate `sensor`.
    pub fn trigger_sensor(&mut self, sensor: &Sensor) -> Result<(), SecurityError> {
        self.change_sensor_activation(sensor, true)
    }

    /// Run the classifier over `image` and apply the camera rules.
    ///
    /// Listeners always receive the raw verdict, even when the alarm status
    /// is unaffected. Returns the verdict.
    pub fn process_image(&mut self, image: &CameraImage) -> Result<bool, SecurityError> {
        let detected = self
            .classifier
            .contains_threat(image, self.confidence_threshold)?;

        let event = if detected {
            SecurityEvent::ThreatDetected
        } else {
            SecurityEvent::ThreatCleared {
                any_sensor_active: self.repository.sensors()?.iter().any(|s| s.active),
            }
        };
        let alarm = self.repository.alarm_status()?;
        let arming = self.repository.arming_status()?;

        if let Some(status) = next_alarm_status(alarm, arming, event) {
            self.write_alarm_status(status)?;
        }

        debug!(detected, "classifier verdict");
        for listener in &self.listeners {
            listener.threat_detected(detected);
        }
        Ok(detected)
    }

    /// Arm or disarm the system.
    ///
    /// Disarming always writes `NoAlarm` first, even when the alarm was
    /// already clear (the one deliberately unconditional write in the
    /// system). Arming resets every sensor flag to false, notifying per
    /// sensor, and leaves any existing escalation untouched.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), SecurityError> {
        match status {
            ArmingStatus::Disarmed => {
                self.repository.set_alarm_status(AlarmStatus::NoAlarm)?;
                info!(status = %AlarmStatus::NoAlarm, "alarm cleared by disarm");
                self.notify_alarm(AlarmStatus::NoAlarm);
            }
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => {
                for sensor in self.repository.sensors()? {
                    if sensor.active {
                        let mut reset = sensor;
                        reset.active = false;
                        self.repository.update_sensor(&reset)?;
                        self.notify_sensor(&reset);
                    }
                }
            }
        }

        self.repository.set_arming_status(status)?;
        info!(%status, "arming status changed");
        for listener in &self.listeners {
            listener.arming_status_changed(status);
        }
        Ok(())
    }

    /// Register a new sensor. Fails on a duplicate `(name, type)` identity.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), SecurityError> {
        if self
            .repository
            .sensors()?
            .iter()
            .any(|s| s.same_identity(&sensor))
        {
            return Err(SecurityError::duplicate(&sensor));
        }
        info!(sensor = %sensor.name, kind = %sensor.sensor_type, "sensor added");
        self.repository.add_sensor(sensor)?;
        Ok(())
    }

    /// Remove a registered sensor. Fails when the identity is unknown.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), SecurityError> {
        if !self
            .repository
            .sensors()?
            .iter()
            .any(|s| s.same_identity(sensor))
        {
            return Err(SecurityError::unknown(sensor));
        }
        info!(sensor = %sensor.name, kind = %sensor.sensor_type, "sensor removed");
        self.repository.remove_sensor(sensor)?;
        Ok(())
    }

    /// Current sensor set, in registration order.
    pub fn sensors(&self) -> Result<Vec<Sensor>, SecurityError> {
        Ok(self.repository.sensors()?)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus, SecurityError> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus, SecurityError> {
        Ok(self.repository.arming_status()?)
    }

    // --- internals ---------------------------------------------------------

    /// Persist a new alarm status and broadcast it. Callers only pass values
    /// the decision table already vetted as changes.
    fn write_alarm_status(&mut self, status: AlarmStatus) -> Result<(), SecurityError> {
        self.repository.set_alarm_status(status)?;
        info!(%status, "alarm status changed");
        self.notify_alarm(status);
        Ok(())
    }

    fn notify_alarm(&self, status: AlarmStatus) {
        for listener in &self.listeners {
            listener.alarm_status_changed(status);
        }
    }

    fn notify_sensor(&self, sensor: &Sensor) {
        for listener in &self.listeners {
            listener.sensor_status_changed(sensor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::SimulatedClassifier;
    use crate::model::SensorType;
    use crate::repository::InMemoryRepository;
    use std::sync::Mutex;

    fn service() -> SecurityService {
        SecurityService::new(
            Box::new(InMemoryRepository::new()),
            Box::new(SimulatedClassifier::new(0.0)),
        )
    }

    #[derive(Default)]
    struct RecordingListener {
        alarms: Mutex<Vec<AlarmStatus>>,
    }

    impl StatusListener for RecordingListener {
        fn alarm_status_changed(&self, status: AlarmStatus) {
            self.alarms.lock().unwrap().push(status);
        }
        fn sensor_status_changed(&self, _sensor: &Sensor) {}
        fn threat_detected(&self, _detected: bool) {}
    }

    #[test]
    fn test_add_duplicate_sensor_rejected() {
        let mut svc = service();
        svc.add_sensor(Sensor::new("front door", SensorType::Door))
            .unwrap();
        let err = svc
            .add_sensor(Sensor::new("front door", SensorType::Door))
            .unwrap_err();
        assert!(matches!(err, SecurityError::DuplicateSensor { .. }));
    }

    #[test]
    fn test_remove_unknown_sensor_rejected() {
        let mut svc = service();
        let err = svc
            .remove_sensor(&Sensor::new("ghost", SensorType::Motion))
            .unwrap_err();
        assert!(matches!(err, SecurityError::UnknownSensor { .. }));
    }

    #[test]
    fn test_activation_of_unknown_sensor_rejected() {
        let mut svc = service();
        let err = svc
            .change_sensor_activation(&Sensor::new("ghost", SensorType::Door), true)
            .unwrap_err();
        assert!(matches!(err, SecurityError::UnknownSensor { .. }));
    }

    #[test]
    fn test_listener_registration_is_idempotent() {
        let mut svc = service();
        let listener: Arc<RecordingListener> = Arc::new(RecordingListener::default());
        let handle: Arc<dyn StatusListener> = listener.clone();
        svc.add_listener(handle.clone());
        svc.add_listener(handle.clone());

        svc.set_arming_status(ArmingStatus::Disarmed).unwrap();
        // One registration, one disarm write, one notification.
        assert_eq!(listener.alarms.lock().unwrap().len(), 1);

        svc.remove_listener(&handle);
        svc.set_arming_status(ArmingStatus::Disarmed).unwrap();
        assert_eq!(listener.alarms.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_trigger_sensor_is_activation() {
        let mut svc = service();
        let sensor = Sensor::new("patio", SensorType::Motion);
        svc.add_sensor(sensor.clone()).unwrap();
        svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        svc.trigger_sensor(&sensor).unwrap();
        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
        assert!(svc.sensors().unwrap()[0].active);
    }
}
