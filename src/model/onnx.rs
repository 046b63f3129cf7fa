use super::Classifier;
use crate::{
    Error, Result,
    vision::{ImageTensor, INPUT_SHAPE},
};
use std::path::Path;
use tracing::info;
use tract_onnx::prelude::*;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX export of the trained network, optimized once and shared read-only.
pub struct OnnxClassifier {
    plan: OnnxPlan,
}

impl OnnxClassifier {
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        info!("Loading classifier from {}", model_path.display());

        let plan = Self::build_plan(model_path)
            .map_err(|e| Error::ModelLoad(format!("{}: {:#}", model_path.display(), e)))?;

        info!("Classifier ready with input shape {:?}", INPUT_SHAPE);
        Ok(Self { plan })
    }

    fn build_plan(model_path: &Path) -> TractResult<OnnxPlan> {
        tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(
                    INPUT_SHAPE[0],
                    INPUT_SHAPE[1],
                    INPUT_SHAPE[2],
                    INPUT_SHAPE[3]
                )),
            )?
            .into_optimized()?
            .into_runnable()
    }

    fn run(&self, tensor: &ImageTensor) -> TractResult<Vec<f32>> {
        let [batch, height, width, channels] = tensor.shape();
        let input = tract_ndarray::Array4::from_shape_vec(
            (batch, height, width, channels),
            tensor.as_slice().to_vec(),
        )?;

        let outputs = self.plan.run(tvec!(input.into_tensor().into()))?;
        let probabilities = outputs[0].to_array_view::<f32>()?;

        Ok(probabilities.iter().copied().collect())
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, tensor: &ImageTensor) -> Result<Vec<f32>> {
        self.run(tensor).map_err(|e| Error::inference(format!("{:#}", e)))
    }
}
