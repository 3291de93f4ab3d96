//! emulator/network.rs
//! Dense emulator network with gated activations.
//!
//! The forward pass mirrors the exporting trainer: standardize inputs,
//! run the hidden layers with the per-unit gate
//! `f(a) = (beta + sigmoid(alpha * a) * (1 - beta)) * a`, apply the linear
//! output layer, de-standardize into log10 P(k), and return `10^x` so
//! callers see spectra in Mpc^3.

use std::path::Path;

use ndarray::{Array1, Array2};

use crate::core::table::ParamTable;
use crate::emulator::weights::NetworkFile;
use crate::emulator::{Emulator, EmulatorError, Probe};

/// One hidden layer with its per-unit gate parameters.
#[derive(Clone, Debug)]
struct HiddenLayer {
    weights: Array2<f64>,
    biases: Array1<f64>,
    alphas: Array1<f64>,
    betas: Array1<f64>,
}

impl HiddenLayer {
    /// `a = h W + b`, then the gate applied per unit.
    ///
    /// `beta = 1` makes a unit linear, `beta = 0` a pure sigmoid-weighted
    /// ramp; trained values sit in between.
    fn apply(&self, h: &Array2<f64>) -> Array2<f64> {
        let mut a = h.dot(&self.weights) + &self.biases;
        for (j, mut col) in a.columns_mut().into_iter().enumerate() {
            let (alpha, beta) = (self.alphas[j], self.betas[j]);
            for v in col.iter_mut() {
                let s = 1.0 / (1.0 + (-alpha * *v).exp());
                *v = (beta + s * (1.0 - beta)) * *v;
            }
        }
        a
    }
}

/// Dense network loaded from an exported weights file.
#[derive(Clone, Debug)]
pub struct DenseNetwork {
    probe: Probe,
    parameters: Vec<String>,
    modes: Vec<f64>,
    hidden: Vec<HiddenLayer>,
    out_weights: Array2<f64>,
    out_biases: Array1<f64>,
    param_mean: Array1<f64>,
    param_std: Array1<f64>,
    target_mean: Array1<f64>,
    target_std: Array1<f64>,
}

impl DenseNetwork {
    /// Load the network for `probe` from `path`, or from the bundled asset
    /// when no path is given.
    pub fn load(probe: Probe, path: Option<&Path>) -> Result<Self, EmulatorError> {
        let resolved = match path {
            Some(p) => p.to_path_buf(),
            None => probe.default_weights_path(),
        };
        let file = NetworkFile::load(&resolved)?;
        if file.probe != probe {
            return Err(EmulatorError::Schema {
                reason: format!(
                    "weights file {} holds probe '{}', wanted '{}'",
                    resolved.display(),
                    file.probe,
                    probe
                ),
            });
        }
        Self::from_parts(file)
    }

    /// Validate a parsed weights file and assemble the layer stack.
    pub fn from_parts(file: NetworkFile) -> Result<Self, EmulatorError> {
        file.validate()?;

        let n_hidden = file.n_hidden.len();
        let mut hidden = Vec::with_capacity(n_hidden);
        for l in 0..n_hidden {
            hidden.push(HiddenLayer {
                weights: matrix(&file.weights[l])?,
                biases: Array1::from_vec(file.biases[l].clone()),
                alphas: Array1::from_vec(file.alphas[l].clone()),
                betas: Array1::from_vec(file.betas[l].clone()),
            });
        }
        Ok(Self {
            probe: file.probe,
            out_weights: matrix(&file.weights[n_hidden])?,
            out_biases: Array1::from_vec(file.biases[n_hidden].clone()),
            parameters: file.parameters,
            modes: file.modes,
            hidden,
            param_mean: Array1::from_vec(file.param_mean),
            param_std: Array1::from_vec(file.param_std),
            target_mean: Array1::from_vec(file.target_mean),
            target_std: Array1::from_vec(file.target_std),
        })
    }

    #[inline]
    pub fn probe(&self) -> Probe {
        self.probe
    }

    /// Input parameter names in network order.
    #[inline]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Pull the network's inputs out of `table` by name and standardize.
    fn standardized_inputs(&self, table: &ParamTable) -> Result<Array2<f64>, EmulatorError> {
        let nreal = table.nreal();
        let mut x = Array2::<f64>::zeros((nreal, self.parameters.len()));
        for (j, name) in self.parameters.iter().enumerate() {
            let col = table
                .column(name)
                .ok_or_else(|| EmulatorError::MissingParameter { name: name.clone() })?;
            let (mean, std) = (self.param_mean[j], self.param_std[j]);
            for (i, &v) in col.iter().enumerate() {
                x[[i, j]] = (v - mean) / std;
            }
        }
        Ok(x)
    }
}

impl Emulator for DenseNetwork {
    fn modes(&self) -> &[f64] {
        &self.modes
    }

    fn predict(&self, table: &ParamTable) -> Result<Array2<f64>, EmulatorError> {
        let mut h = self.standardized_inputs(table)?;
        for layer in &self.hidden {
            h = layer.apply(&h);
        }
        let mut p = h.dot(&self.out_weights) + &self.out_biases;
        for (k, mut col) in p.columns_mut().into_iter().enumerate() {
            let (mean, std) = (self.target_mean[k], self.target_std[k]);
            for v in col.iter_mut() {
                *v = 10f64.powf(*v * std + mean);
            }
        }
        Ok(p)
    }
}

fn matrix(rows: &[Vec<f64>]) -> Result<Array2<f64>, EmulatorError> {
    let n_in = rows.len();
    let n_out = rows.first().map_or(0, |r| r.len());
    let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Array2::from_shape_vec((n_in, n_out), flat).map_err(|e| EmulatorError::Schema {
        reason: format!("weight matrix has inconsistent shape: {e}"),
    })
}
