//! Alarm transition rules as an explicit decision table.
//!
//! [`next_alarm_status`] is a pure function from (current alarm, current
//! arming, event) to an optional new alarm status. `None` means "no alarm
//! write for this event": same-value writes are suppressed here, so the
//! service never persists or broadcasts a status that did not change.
//!
//! Precedence, in table order:
//! - Sensor activation: ALARM is absorbing; a disarmed system ignores
//!   triggers; otherwise NO_ALARM escalates to PENDING_ALARM and
//!   PENDING_ALARM escalates to ALARM (re-triggering an already-active
//!   sensor counts).
//! - Sensor deactivation: only clearing the *last* active sensor while
//!   PENDING_ALARM resolves back to NO_ALARM. A deactivation never
//!   downgrades ALARM, and deactivating an already-inactive sensor is a
//!   no-op.
//! - Camera: a positive verdict escalates straight to ALARM, but only while
//!   armed-home. A negative verdict resolves to NO_ALARM only when no
//!   sensor is still signaling.
//!
//! Disarming is not an event here: it clears the alarm unconditionally and
//! is handled directly by the service.

use crate::model::{AlarmStatus, ArmingStatus};

/// An observed event the alarm state machine reacts to.
///
/// Deactivation carries the facts the rules need, computed by the service
/// from repository state *before* any mutation: whether the sensor was
/// recorded as active, and whether any sensor remains active once this one
/// is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    SensorActivated,
    SensorDeactivated {
        was_active: bool,
        any_remaining_active: bool,
    },
    ThreatDetected,
    ThreatCleared {
        any_sensor_active: bool,
    },
}

/// Decide the next alarm status for `event`, or `None` when the status must
/// not be written.
pub fn next_alarm_status(
    alarm: AlarmStatus,
    arming: ArmingStatus,
    event: SecurityEvent,
) -> Option<AlarmStatus> {
    use AlarmStatus::{Alarm, NoAlarm, PendingAlarm};
    use SecurityEvent::{SensorActivated, SensorDeactivated, ThreatCleared, ThreatDetected};

    match (event, alarm, arming) {
        // Activation: alarm is already maximal.
        (SensorActivated, Alarm, _) => None,
        // Activation while disarmed never escalates.
        (SensorActivated, _, ArmingStatus::Disarmed) => None,
        (SensorActivated, NoAlarm, _) => Some(PendingAlarm),
        (SensorActivated, PendingAlarm, _) => Some(Alarm),

        // Deactivating an already-inactive sensor changes nothing.
        (SensorDeactivated { was_active: false, .. }, _, _) => None,
        // Last active sensor cleared while pending: stand down.
        (
            SensorDeactivated {
                was_active: true,
                any_remaining_active: false,
            },
            PendingAlarm,
            _,
        ) => Some(NoAlarm),
        // Other sensors still active, or alarm not pending (ALARM is never
        // downgraded by a deactivation).
        (SensorDeactivated { .. }, _, _) => None,

        // Camera sighting escalates only while armed-home.
        (ThreatDetected, current, ArmingStatus::ArmedHome) => {
            (current != Alarm).then_some(Alarm)
        }
        (ThreatDetected, _, _) => None,

        // Clear frame stands the system down only when no sensor disagrees.
        (
            ThreatCleared {
                any_sensor_active: false,
            },
            current,
            _,
        ) => (current != NoAlarm).then_some(NoAlarm),
        (ThreatCleared { .. }, _, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AlarmStatus::{Alarm, NoAlarm, PendingAlarm};
    use ArmingStatus::{ArmedAway, ArmedHome, Disarmed};

    const ALL_ALARM: [AlarmStatus; 3] = [NoAlarm, PendingAlarm, Alarm];
    const ALL_ARMING: [ArmingStatus; 3] = [Disarmed, ArmedHome, ArmedAway];

    #[test]
    fn test_activation_escalates_while_armed() {
        for arming in [ArmedHome, ArmedAway] {
            assert_eq!(
                next_alarm_status(NoAlarm, arming, SecurityEvent::SensorActivated),
                Some(PendingAlarm)
            );
            assert_eq!(
                next_alarm_status(PendingAlarm, arming, SecurityEvent::SensorActivated),
                Some(Alarm)
            );
        }
    }

    #[test]
    fn test_activation_ignored_while_disarmed() {
        for alarm in ALL_ALARM {
            assert_eq!(
                next_alarm_status(alarm, Disarmed, SecurityEvent::SensorActivated),
                None
            );
        }
    }

    #[test]
    fn test_activation_never_downgrades_alarm() {
        for arming in ALL_ARMING {
            assert_eq!(
                next_alarm_status(Alarm, arming, SecurityEvent::SensorActivated),
                None
            );
        }
    }

    #[test]
    fn test_last_deactivation_resolves_pending() {
        let event = SecurityEvent::SensorDeactivated {
            was_active: true,
            any_remaining_active: false,
        };
        for arming in ALL_ARMING {
            assert_eq!(next_alarm_status(PendingAlarm, arming, event), Some(NoAlarm));
            assert_eq!(next_alarm_status(NoAlarm, arming, event), None);
            assert_eq!(next_alarm_status(Alarm, arming, event), None);
        }
    }

    #[test]
    fn test_deactivation_with_others_active_stays_pending() {
        let event = SecurityEvent::SensorDeactivated {
            was_active: true,
            any_remaining_active: true,
        };
        for alarm in ALL_ALARM {
            for arming in ALL_ARMING {
                assert_eq!(next_alarm_status(alarm, arming, event), None);
            }
        }
    }

    #[test]
    fn test_deactivating_inactive_sensor_is_noop_everywhere() {
        for any_remaining_active in [false, true] {
            let event = SecurityEvent::SensorDeactivated {
                was_active: false,
                any_remaining_active,
            };
            for alarm in ALL_ALARM {
                for arming in ALL_ARMING {
                    assert_eq!(next_alarm_status(alarm, arming, event), None);
                }
            }
        }
    }

    #[test]
    fn test_threat_escalates_only_armed_home() {
        assert_eq!(
            next_alarm_status(NoAlarm, ArmedHome, SecurityEvent::ThreatDetected),
            Some(Alarm)
        );
        assert_eq!(
            next_alarm_status(PendingAlarm, ArmedHome, SecurityEvent::ThreatDetected),
            Some(Alarm)
        );
        // Already at ALARM: same-value write suppressed.
        assert_eq!(
            next_alarm_status(Alarm, ArmedHome, SecurityEvent::ThreatDetected),
            None
        );
        for arming in [Disarmed, ArmedAway] {
            for alarm in ALL_ALARM {
                assert_eq!(
                    next_alarm_status(alarm, arming, SecurityEvent::ThreatDetected),
                    None
                );
            }
        }
    }

    #[test]
    fn test_clear_frame_resolves_only_with_quiet_sensors() {
        let quiet = SecurityEvent::ThreatCleared {
            any_sensor_active: false,
        };
        let noisy = SecurityEvent::ThreatCleared {
            any_sensor_active: true,
        };
        for arming in ALL_ARMING {
            assert_eq!(next_alarm_status(Alarm, arming, quiet), Some(NoAlarm));
            assert_eq!(next_alarm_status(PendingAlarm, arming, quiet), Some(NoAlarm));
            assert_eq!(next_alarm_status(NoAlarm, arming, quiet), None);
            for alarm in ALL_ALARM {
                assert_eq!(next_alarm_status(alarm, arming, noisy), None);
            }
        }
    }
}
