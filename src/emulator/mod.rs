//! Pretrained matter power spectrum emulators.
//!
//! An emulator maps a parameter table to one power spectrum per row,
//! evaluated on a fixed wavenumber grid. The only backend here is a dense
//! network with gated activations loaded from an exported-weights JSON
//! file, but the pipeline only talks to the [`Emulator`] trait.

pub mod network;
pub mod weights;

use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::core::table::ParamTable;

/// Which pretrained spectrum an emulator predicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Probe {
    /// Linear matter power spectrum.
    MpkLin,
    /// Nonlinear (halofit-corrected) matter power spectrum.
    MpkNonlin,
}

impl Probe {
    pub fn parse(name: &str) -> Result<Self, EmulatorError> {
        match name {
            "mpk_lin" => Ok(Probe::MpkLin),
            "mpk_nonlin" => Ok(Probe::MpkNonlin),
            _ => Err(EmulatorError::UnknownProbe {
                name: name.to_string(),
            }),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Probe::MpkLin => "mpk_lin",
            Probe::MpkNonlin => "mpk_nonlin",
        }
    }

    /// Bundled weights file for this probe, relative to the crate root.
    pub fn default_weights_path(&self) -> PathBuf {
        Path::new("assets").join(format!("{}.json", self.as_str()))
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pretrained spectrum predictor on a fixed wavenumber grid.
pub trait Emulator {
    /// Wavenumber grid of the prediction, ascending, in 1/Mpc.
    fn modes(&self) -> &[f64];

    /// Power spectra in Mpc^3: one row per table realization, one column
    /// per mode.
    fn predict(&self, table: &ParamTable) -> Result<Array2<f64>, EmulatorError>;
}

/// Errors raised while loading weights or evaluating an emulator.
#[derive(Debug)]
pub enum EmulatorError {
    /// Weights file exists but could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Weights file is not valid JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Weights file parsed but its contents are inconsistent.
    Schema { reason: String },
    /// The network wants a parameter the table does not carry.
    MissingParameter { name: String },
    /// Probe name outside the supported set.
    UnknownProbe { name: String },
    /// No weights file at the resolved path.
    WeightsNotFound { path: PathBuf },
}

impl std::fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmulatorError::Io { path, source } => {
                write!(f, "failed to read weights file {}: {source}", path.display())
            }
            EmulatorError::Parse { path, source } => {
                write!(f, "failed to parse weights file {}: {source}", path.display())
            }
            EmulatorError::Schema { reason } => write!(f, "malformed network: {reason}"),
            EmulatorError::MissingParameter { name } => {
                write!(f, "parameter table has no column '{name}'")
            }
            EmulatorError::UnknownProbe { name } => write!(f, "unknown probe '{name}'"),
            EmulatorError::WeightsNotFound { path } => {
                write!(f, "no weights file at {}", path.display())
            }
        }
    }
}

impl std::error::Error for EmulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmulatorError::Io { source, .. } => Some(source),
            EmulatorError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_names_round_trip() {
        for probe in [Probe::MpkLin, Probe::MpkNonlin] {
            assert_eq!(Probe::parse(probe.as_str()).unwrap(), probe);
        }
        assert!(matches!(
            Probe::parse("mpk_sigma8"),
            Err(EmulatorError::UnknownProbe { .. })
        ));
    }

    #[test]
    fn test_default_weights_path_follows_probe() {
        assert_eq!(
            Probe::MpkNonlin.default_weights_path(),
            PathBuf::from("assets/mpk_nonlin.json")
        );
    }
}
