//! emulator/weights.rs
//! Exported-network weights files: JSON schema and consistency checks.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::emulator::{EmulatorError, Probe};

/// On-disk layout of an exported dense network.
///
/// `weights[l]` is row-major with one row per input unit, so a layer mapping
/// `n_in` to `n_out` units stores `n_in` rows of `n_out` columns. Hidden
/// layers carry one `(alpha, beta)` gate pair per unit; the output layer is
/// linear. Inputs are standardized with `param_mean`/`param_std`, outputs
/// de-standardized with `target_mean`/`target_std`.
#[derive(Clone, Debug, Deserialize)]
pub struct NetworkFile {
    pub probe: Probe,
    pub parameters: Vec<String>,
    pub modes: Vec<f64>,
    pub n_hidden: Vec<usize>,
    pub weights: Vec<Vec<Vec<f64>>>,
    pub biases: Vec<Vec<f64>>,
    pub alphas: Vec<Vec<f64>>,
    pub betas: Vec<Vec<f64>>,
    pub param_mean: Vec<f64>,
    pub param_std: Vec<f64>,
    pub target_mean: Vec<f64>,
    pub target_std: Vec<f64>,
}

impl NetworkFile {
    /// Read a weights file. Consistency checks are left to [`validate`],
    /// which [`crate::emulator::network::DenseNetwork`] runs on construction.
    ///
    /// [`validate`]: NetworkFile::validate
    pub fn load(path: &Path) -> Result<Self, EmulatorError> {
        if !path.exists() {
            return Err(EmulatorError::WeightsNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| EmulatorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| EmulatorError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Unit counts from the input layer through to the output layer.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.n_hidden.len() + 2);
        sizes.push(self.parameters.len());
        sizes.extend_from_slice(&self.n_hidden);
        sizes.push(self.modes.len());
        sizes
    }

    pub fn validate(&self) -> Result<(), EmulatorError> {
        fn schema(reason: String) -> EmulatorError {
            EmulatorError::Schema { reason }
        }

        if self.parameters.is_empty() {
            return Err(schema("network has no input parameters".into()));
        }
        for (i, name) in self.parameters.iter().enumerate() {
            if self.parameters[..i].contains(name) {
                return Err(schema(format!("duplicate input parameter '{name}'")));
            }
        }
        if self.modes.is_empty() {
            return Err(schema("network has no output modes".into()));
        }
        if !self.modes.iter().all(|k| k.is_finite() && *k > 0.0) {
            return Err(schema("modes must be positive and finite".into()));
        }
        if !self.modes.windows(2).all(|w| w[0] < w[1]) {
            return Err(schema("modes must be strictly ascending".into()));
        }

        let n_layers = self.n_hidden.len() + 1;
        if self.weights.len() != n_layers {
            return Err(schema(format!(
                "expected {n_layers} weight matrices, got {}",
                self.weights.len()
            )));
        }
        if self.biases.len() != n_layers {
            return Err(schema(format!(
                "expected {n_layers} bias vectors, got {}",
                self.biases.len()
            )));
        }
        if self.alphas.len() != self.n_hidden.len() || self.betas.len() != self.n_hidden.len() {
            return Err(schema(format!(
                "expected {} gate vectors, got {} alphas and {} betas",
                self.n_hidden.len(),
                self.alphas.len(),
                self.betas.len()
            )));
        }

        let sizes = self.layer_sizes();
        for l in 0..n_layers {
            let (n_in, n_out) = (sizes[l], sizes[l + 1]);
            let w = &self.weights[l];
            if w.len() != n_in {
                return Err(schema(format!(
                    "layer {l}: expected {n_in} weight rows, got {}",
                    w.len()
                )));
            }
            if let Some(row) = w.iter().find(|row| row.len() != n_out) {
                return Err(schema(format!(
                    "layer {l}: expected weight rows of length {n_out}, found {}",
                    row.len()
                )));
            }
            if self.biases[l].len() != n_out {
                return Err(schema(format!(
                    "layer {l}: expected {n_out} biases, got {}",
                    self.biases[l].len()
                )));
            }
        }
        for (l, &n_out) in self.n_hidden.iter().enumerate() {
            if self.alphas[l].len() != n_out || self.betas[l].len() != n_out {
                return Err(schema(format!("layer {l}: gate vectors do not match width")));
            }
        }

        let n_params = self.parameters.len();
        if self.param_mean.len() != n_params || self.param_std.len() != n_params {
            return Err(schema("input standardization does not match parameters".into()));
        }
        let n_modes = self.modes.len();
        if self.target_mean.len() != n_modes || self.target_std.len() != n_modes {
            return Err(schema("output standardization does not match modes".into()));
        }
        if !self.param_std.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(schema("param_std entries must be positive".into()));
        }
        if !self.target_std.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(schema("target_std entries must be positive".into()));
        }
        Ok(())
    }
}
