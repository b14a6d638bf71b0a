use crate::error::{SaasiError, SxResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub weights: ScoringWeights,
    #[command(flatten)]
    pub gates: GateParams,
}

/// Component weights for the phase score formula. Must sum to 1.0; the
/// scorer normalizes each component to [0,1] before applying these.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    #[arg(long, default_value_t = 0.30)]
    pub weight_empathy: f32,
    #[arg(long, default_value_t = 0.25)]
    pub weight_information: f32,
    #[arg(long, default_value_t = 0.15)]
    pub weight_interactions: f32,
    #[arg(long, default_value_t = 0.10)]
    pub weight_categorization: f32,
    #[arg(long, default_value_t = 0.10)]
    pub weight_documents: f32,
    #[arg(long, default_value_t = 0.10)]
    pub weight_decisions: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight_empathy: 0.30,
            weight_information: 0.25,
            weight_interactions: 0.15,
            weight_categorization: 0.10,
            weight_documents: 0.10,
            weight_decisions: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn component_sum(&self) -> f32 {
        self.weight_empathy
            + self.weight_information
            + self.weight_interactions
            + self.weight_categorization
            + self.weight_documents
            + self.weight_decisions
    }

    /// Load a weights profile from a JSON file. Missing fields fall back to
    /// the embedded defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SxResult<Self> {
        let content = fs::read_to_string(path)?;
        let weights: ScoringWeights = serde_json::from_str(&content)?;
        let sum = weights.component_sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(SaasiError::Config(format!(
                "Scoring weights must sum to 1.0, got {:.3}",
                sum
            )));
        }
        Ok(weights)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateParams {
    /// Minimum predecessor scores required to enter phases 2, 3 and 4.
    #[arg(long, default_value = "60,60,65")]
    pub unlock_thresholds: String,
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            unlock_thresholds: "60,60,65".to_string(),
        }
    }
}

impl GateParams {
    pub fn get_unlock_thresholds(&self) -> [u32; 3] {
        parse_u32_array::<3>(&self.unlock_thresholds, "unlock_thresholds")
    }
}

fn parse_u32_array<const N: usize>(s: &str, name: &str) -> [u32; N] {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        panic!("--{} requires {} values", name, N);
    }
    let mut arr = [0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("Invalid number in {}", name));
    }
    arr
}
