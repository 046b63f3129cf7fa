//! Image decoding and tensor preparation.
//!
//! Inbound payloads are base64 strings, usually the `data:` URI a browser
//! `FileReader` produces. They are decoded to a bitmap, resized to the
//! network's input resolution and flattened into an NHWC tensor in `[0, 1]`.

use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, imageops::FilterType};

/// Side length the classifier was trained on.
pub const INPUT_SIZE: u32 = 224;
pub const CHANNELS: usize = 3;
/// `[batch, height, width, channels]`
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, CHANNELS];

/// Normalized model input laid out row-major as `INPUT_SHAPE`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn shape(&self) -> [usize; 4] {
        INPUT_SHAPE
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Decodes a base64 image, with or without a `data:<mime>;base64,` header.
pub fn decode_base64_image(encoded: &str) -> Result<DynamicImage> {
    let payload = strip_data_uri(encoded.trim());
    if payload.is_empty() {
        return Err(Error::decode("image payload is empty"));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::decode(format!("invalid base64: {}", e)))?;

    image::load_from_memory(&bytes)
        .map_err(|e| Error::decode(format!("unsupported or corrupt image: {}", e)))
}

fn strip_data_uri(encoded: &str) -> &str {
    match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
        None => encoded,
    }
}

/// Resizes to `INPUT_SIZE` square, forces RGB and scales channels to `[0, 1]`.
pub fn preprocess(image: &DynamicImage) -> ImageTensor {
    let rgb = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    let data = rgb
        .into_raw()
        .into_iter()
        .map(|channel| f32::from(channel) / 255.0)
        .collect();

    ImageTensor { data }
}
