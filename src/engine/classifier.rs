//! Skin-Type Classifier
//!
//! Runs the forward pass: fixed-shape NHWC tensor in, five-way probability
//! distribution out. Each call creates its own inference request against the
//! shared compiled model, so concurrent callers never share mutable state.

use std::sync::Arc;

use ndarray::Array4;
use openvino::{ElementType, Shape, Tensor};

use super::preprocess::{preprocess_bytes, INPUT_CHANNELS, INPUT_HEIGHT, INPUT_WIDTH};
use super::provider::ModelProvider;
use super::skin_type::SkinType;
use crate::error::Error;
use crate::utils::math::argmax;

/// Probability distribution over the five skin types, positionally aligned
/// to `SkinType::ALL`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    probabilities: [f32; SkinType::COUNT],
}

impl Prediction {
    pub fn new(probabilities: [f32; SkinType::COUNT]) -> Self {
        Self { probabilities }
    }

    /// The most likely skin type and its probability.
    pub fn top(&self) -> (SkinType, f32) {
        let idx = argmax(&self.probabilities);
        (SkinType::ALL[idx], self.probabilities[idx])
    }

    /// Iterate (skin type, probability) pairs in model output order.
    pub fn iter(&self) -> impl Iterator<Item = (SkinType, f32)> + '_ {
        SkinType::ALL
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }

    /// Whether the values form a probability simplex (non-negative, sum 1).
    pub fn is_distribution(&self, epsilon: f32) -> bool {
        let sum: f32 = self.probabilities.iter().sum();
        self.probabilities.iter().all(|p| *p >= 0.0) && (sum - 1.0).abs() <= epsilon
    }
}

/// Skin-type classifier over the shared model handle.
pub struct SkinClassifier {
    provider: Arc<ModelProvider>,
}

impl SkinClassifier {
    pub fn new(provider: Arc<ModelProvider>) -> Self {
        Self { provider }
    }

    /// Decode, preprocess and predict in one step.
    pub fn classify(&self, image_data: &[u8]) -> Result<Prediction, Error> {
        let tensor = preprocess_bytes(image_data)?;
        self.predict(&tensor)
    }

    /// Run the forward pass on a preprocessed tensor.
    pub fn predict(&self, tensor: &Array4<f32>) -> Result<Prediction, Error> {
        validate_input_shape(tensor)?;

        let model = self.provider.get()?;

        let mut request = model
            .create_infer_request()
            .map_err(|e| Error::Inference(format!("create inference request: {}", e)))?;

        let input_shape = Shape::new(&[
            1,
            INPUT_HEIGHT as i64,
            INPUT_WIDTH as i64,
            INPUT_CHANNELS as i64,
        ])
        .map_err(|e| Error::Inference(format!("input shape: {}", e)))?;
        let mut input = Tensor::new(ElementType::F32, &input_shape)
            .map_err(|e| Error::Inference(format!("input tensor: {}", e)))?;

        let input_data = tensor
            .as_slice()
            .ok_or_else(|| Error::Inference("input tensor is not contiguous".to_string()))?;
        unsafe {
            let tensor_data = input
                .get_raw_data_mut()
                .map_err(|e| Error::Inference(format!("input buffer: {}", e)))?
                .as_mut_ptr() as *mut f32;
            std::ptr::copy_nonoverlapping(input_data.as_ptr(), tensor_data, input_data.len());
        }

        request
            .set_input_tensor(&input)
            .map_err(|e| Error::Inference(format!("set input: {}", e)))?;

        request
            .infer()
            .map_err(|e| Error::Inference(format!("forward pass: {}", e)))?;

        let output = request
            .get_output_tensor()
            .map_err(|e| Error::Inference(format!("get output: {}", e)))?;
        let output_shape = output
            .get_shape()
            .map_err(|e| Error::Inference(format!("output shape: {}", e)))?;
        let output_len = output_shape.get_dimensions().iter().product::<i64>() as usize;

        // Batch size is 1, so the whole output is the single prediction row.
        if output_len != SkinType::COUNT {
            return Err(Error::Inference(format!(
                "model produced {} values, expected {}",
                output_len,
                SkinType::COUNT
            )));
        }

        let raw = output
            .get_raw_data()
            .map_err(|e| Error::Inference(format!("output buffer: {}", e)))?;
        let output_data: Vec<f32> = unsafe {
            let ptr = raw.as_ptr() as *const f32;
            std::slice::from_raw_parts(ptr, output_len).to_vec()
        };

        let mut probabilities = [0f32; SkinType::COUNT];
        probabilities.copy_from_slice(&output_data);

        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(Error::Inference(format!(
                "model produced an invalid probability distribution: {:?}",
                probabilities
            )));
        }

        Ok(Prediction::new(probabilities))
    }
}

fn validate_input_shape(tensor: &Array4<f32>) -> Result<(), Error> {
    let expected = (
        1,
        INPUT_HEIGHT as usize,
        INPUT_WIDTH as usize,
        INPUT_CHANNELS,
    );
    if tensor.dim() != expected {
        return Err(Error::Inference(format!(
            "input tensor shape {:?} does not match model input {:?}",
            tensor.dim(),
            expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_prediction() {
        let prediction = Prediction::new([0.1, 0.05, 0.6, 0.2, 0.05]);
        let (skin_type, probability) = prediction.top();
        assert_eq!(skin_type, SkinType::Combination);
        assert!((probability - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_iter_alignment() {
        let prediction = Prediction::new([0.5, 0.2, 0.1, 0.1, 0.1]);
        let pairs: Vec<(SkinType, f32)> = prediction.iter().collect();
        assert_eq!(pairs.len(), SkinType::COUNT);
        assert_eq!(pairs[0].0, SkinType::Oily);
        assert!((pairs[0].1 - 0.5).abs() < 1e-6);
        assert_eq!(pairs[4].0, SkinType::Sensitive);
    }

    #[test]
    fn test_is_distribution() {
        assert!(Prediction::new([0.2, 0.2, 0.2, 0.2, 0.2]).is_distribution(1e-6));
        assert!(!Prediction::new([0.5, 0.5, 0.5, 0.5, 0.5]).is_distribution(1e-6));
        assert!(!Prediction::new([-0.2, 0.4, 0.2, 0.3, 0.3]).is_distribution(1e-6));
    }

    #[test]
    fn test_validate_input_shape() {
        let good = Array4::<f32>::zeros((1, 150, 150, 3));
        assert!(validate_input_shape(&good).is_ok());

        let bad = Array4::<f32>::zeros((1, 100, 100, 3));
        assert!(matches!(
            validate_input_shape(&bad),
            Err(Error::Inference(_))
        ));

        let bad_batch = Array4::<f32>::zeros((2, 150, 150, 3));
        assert!(validate_input_shape(&bad_batch).is_err());
    }
}
