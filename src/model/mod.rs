mod onnx;

pub use onnx::OnnxClassifier;

use crate::{
    Result,
    diagnosis::{Diagnosis, Prediction},
    vision::{self, ImageTensor},
};
use tracing::debug;

/// A loaded network mapping a normalized image tensor to per-label probabilities.
///
/// Implementations are shared across requests and must not mutate on `predict`.
pub trait Classifier: Send + Sync {
    fn predict(&self, tensor: &ImageTensor) -> Result<Vec<f32>>;
}

/// Decodes, preprocesses and classifies a base64 image payload.
///
/// CPU bound; async callers should run it on the blocking pool.
pub fn classify(classifier: &dyn Classifier, encoded: &str) -> Result<Diagnosis> {
    let image = vision::decode_base64_image(encoded)?;
    debug!("Decoded {}x{} image", image.width(), image.height());

    let tensor = vision::preprocess(&image);
    let prediction = Prediction::try_from(classifier.predict(&tensor)?)?;

    Ok(Diagnosis::from(&prediction))
}
