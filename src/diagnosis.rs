//! Label set, advisory table and the mapping from model output to a result.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const LABEL_COUNT: usize = 10;

/// Conditions in the order of the classifier's output vector.
pub const LABELS: [&str; LABEL_COUNT] = [
    "Alopecia Areata",
    "Contact Dermatitis",
    "Folliculitis",
    "Head Lice",
    "Lichen Planus",
    "Male Pattern Baldness",
    "Psoriasis",
    "Seborrheic Dermatitis",
    "Telogen Effluvium",
    "Tinea Capitis",
];

pub const DEFAULT_RECOMMENDATION: &str = "No specific recommendation available for this condition.";

pub fn recommendation(label: &str) -> &'static str {
    match label {
        "Alopecia Areata" => {
            "Consider consulting a dermatologist for appropriate treatment options."
        }
        "Contact Dermatitis" => {
            "Avoid contact with the allergen or irritant that caused the reaction. Use mild soaps and moisturizers."
        }
        "Folliculitis" => {
            "Practice good hygiene, keep the affected area clean and dry. Avoid shaving until the condition improves."
        }
        "Head Lice" => {
            "Use over-the-counter or prescription treatments specifically designed to kill lice and their eggs."
        }
        "Lichen Planus" => {
            "Consult a dermatologist for treatment options. Avoid scratching the affected area to prevent infection."
        }
        "Male Pattern Baldness" => {
            "Consider consulting a dermatologist or hair specialist for treatment options such as minoxidil or hair transplants."
        }
        "Psoriasis" => {
            "Consult a dermatologist for appropriate treatment options, which may include topical treatments, phototherapy, or systemic medications."
        }
        "Seborrheic Dermatitis" => {
            "Use medicated shampoos containing ingredients like ketoconazole or coal tar. Avoid harsh hair products."
        }
        "Telogen Effluvium" => {
            "Identify and address any underlying causes such as stress, hormonal changes, or nutritional deficiencies. Ensure a balanced diet."
        }
        "Tinea Capitis" => {
            "Consult a healthcare professional for antifungal treatment options, which may include oral medications or medicated shampoos."
        }
        _ => DEFAULT_RECOMMENDATION,
    }
}

/// One probability per entry of `LABELS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    probabilities: [f32; LABEL_COUNT],
}

impl Prediction {
    pub fn new(probabilities: [f32; LABEL_COUNT]) -> Self {
        Self { probabilities }
    }

    pub fn probabilities(&self) -> &[f32; LABEL_COUNT] {
        &self.probabilities
    }

    /// Index and value of the highest entry. The first maximum wins and NaN never does.
    pub fn argmax(&self) -> (usize, f32) {
        let mut best = (0, self.probabilities[0]);
        for (index, &value) in self.probabilities.iter().enumerate().skip(1) {
            if value > best.1 || (best.1.is_nan() && !value.is_nan()) {
                best = (index, value);
            }
        }
        best
    }
}

impl TryFrom<Vec<f32>> for Prediction {
    type Error = Error;

    fn try_from(output: Vec<f32>) -> Result<Self> {
        let len = output.len();
        let probabilities: [f32; LABEL_COUNT] = output.try_into().map_err(|_| {
            Error::inference(format!(
                "model produced {} outputs but {} labels are known",
                len, LABEL_COUNT
            ))
        })?;
        Ok(Self { probabilities })
    }
}

/// Response body of `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub result: String,
    pub probability: f32,
    pub recommendation: String,
}

impl From<&Prediction> for Diagnosis {
    fn from(prediction: &Prediction) -> Self {
        let (index, probability) = prediction.argmax();
        let label = LABELS[index];

        Self {
            result: label.to_string(),
            probability,
            recommendation: recommendation(label).to_string(),
        }
    }
}
