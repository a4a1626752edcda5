//! Camera images and threat classification.
//!
//! The classifier is a black box to the state machine: it takes a frame and
//! a confidence threshold and answers "does this contain a threat subject".
//! The shipped implementation is a randomized stand-in for a real model.

use crate::error::ClassifierError;
use rand::Rng;

/// Confidence threshold the service uses when none is configured.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// A raw camera frame.
///
/// Pixel contents are opaque to the controller; only the classifier looks at
/// them. `synthetic()` produces a noise frame for simulation runs.
#[derive(Debug, Clone)]
pub struct CameraImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl CameraImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Generate a random 256x256 grayscale noise frame.
    pub fn synthetic() -> Self {
        let mut rng = rand::thread_rng();
        let pixels = (0..256 * 256).map(|_| rng.gen::<u8>()).collect();
        Self::new(256, 256, pixels)
    }
}

/// Image-analysis contract: does the frame contain a threat subject at or
/// above the given confidence threshold? Stateless from the controller's
/// perspective.
pub trait ThreatClassifier {
    fn contains_threat(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}

/// Randomized classifier standing in for a real model.
///
/// Reports a detection with the configured probability, ignoring the frame
/// contents entirely.
#[derive(Debug, Clone)]
pub struct SimulatedClassifier {
    detection_probability: f64,
}

impl SimulatedClassifier {
    pub fn new(detection_probability: f64) -> Self {
        Self {
            detection_probability: detection_probability.clamp(0.0, 1.0),
        }
    }
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ThreatClassifier for SimulatedClassifier {
    fn contains_threat(
        &self,
        _image: &CameraImage,
        _confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        Ok(rand::thread_rng().gen_bool(self.detection_probability))
    }
}
