//! config.rs
//! Sweep configuration: sampling sizes, emulator selection, output
//! locations, and an optional prior table.
//!
//! A missing config file is not an error: defaults are written out as a
//! fully commented file so every knob is visible. A file that exists but
//! does not parse or validate is fatal, since a silently ignored config
//! would corrupt a sweep.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::DesignError;
use crate::core::params::{ParamDef, ParamSpace};
use crate::emulator::Probe;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Realizations to draw (design rows).
    #[serde(default = "SamplingConfig::default_nreal")]
    pub nreal: usize,
    /// Leading parameters to vary (design columns).
    #[serde(default = "SamplingConfig::default_ndim")]
    pub ndim: usize,
    /// RNG seed. Absent means a fresh entropy seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SamplingConfig {
    fn default_nreal() -> usize {
        4200
    }
    fn default_ndim() -> usize {
        5
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            nreal: Self::default_nreal(),
            ndim: Self::default_ndim(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    #[serde(default = "EmulatorConfig::default_probe")]
    pub probe: Probe,
    /// Weights file override. Absent means the bundled asset for `probe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<PathBuf>,
}

impl EmulatorConfig {
    fn default_probe() -> Probe {
        Probe::MpkNonlin
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            probe: Self::default_probe(),
            weights: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the figures land in.
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: PathBuf,
    /// Overlay every n-th realization in the spectra figure.
    #[serde(default = "OutputConfig::default_spectrum_stride")]
    pub spectrum_stride: usize,
}

impl OutputConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("target/plots/sweep")
    }
    fn default_spectrum_stride() -> usize {
        10
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            spectrum_stride: Self::default_spectrum_stride(),
        }
    }
}

/// One row of the prior table. Order matters: the first `ndim` entries are
/// the varied parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorEntry {
    pub name: String,
    pub fiducial: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_width: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub emulator: EmulatorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Empty means the built-in fiducial table.
    #[serde(default)]
    pub priors: Vec<PriorEntry>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            emulator: EmulatorConfig::default(),
            output: OutputConfig::default(),
            priors: Self::default_priors(),
        }
    }
}

impl SweepConfig {
    /// The built-in fiducial table as prior entries, used when writing a
    /// default config so the whole table is visible for editing.
    fn default_priors() -> Vec<PriorEntry> {
        ParamSpace::fiducial()
            .defs()
            .iter()
            .map(|d| PriorEntry {
                name: d.name.clone(),
                fiducial: d.fiducial,
                half_width: d.half_width,
            })
            .collect()
    }

    /// Parameter space described by the prior table.
    pub fn param_space(&self) -> Result<ParamSpace, DesignError> {
        if self.priors.is_empty() {
            return Ok(ParamSpace::fiducial());
        }
        let defs = self
            .priors
            .iter()
            .map(|p| ParamDef {
                name: p.name.clone(),
                fiducial: p.fiducial,
                half_width: p.half_width,
            })
            .collect();
        ParamSpace::from_defs(defs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(reason: String) -> ConfigError {
            ConfigError::Invalid { reason }
        }
        if self.sampling.nreal == 0 {
            return Err(invalid("sampling.nreal must be at least 1".into()));
        }
        if self.sampling.ndim == 0 {
            return Err(invalid("sampling.ndim must be at least 1".into()));
        }
        if self.output.spectrum_stride == 0 {
            return Err(invalid("output.spectrum_stride must be at least 1".into()));
        }
        for entry in &self.priors {
            if entry.name.is_empty() {
                return Err(invalid("priors entry with an empty name".into()));
            }
            if !entry.fiducial.is_finite() {
                return Err(invalid(format!(
                    "prior '{}' has a non-finite fiducial",
                    entry.name
                )));
            }
            if let Some(hw) = entry.half_width {
                if !hw.is_finite() || hw <= 0.0 {
                    return Err(invalid(format!(
                        "prior '{}' needs a positive finite half_width",
                        entry.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Load a config, or write commented defaults if the file is missing.
    ///
    /// Unlike a missing file, an unreadable or malformed one is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let cfg: SweepConfig =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            cfg.validate()?;
            return Ok(cfg);
        }

        // File does not exist: write commented defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let commented = comment_out(&text);
                if let Err(err) = fs::write(path, commented) {
                    eprintln!(
                        "Failed to write default config to {}: {err}",
                        path.display()
                    );
                }
            }
            Err(err) => {
                eprintln!("Failed to serialize default config: {err}");
            }
        }
        Ok(default_cfg)
    }
}

/// Comment out every value line, keeping plain `[section]` headers so the
/// file parses back as all-defaults. Array-of-table headers are commented
/// too: an uncommented `[[priors]]` over commented keys would read back as
/// an entry with no fields.
fn comment_out(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push('\n');
        } else if trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.starts_with("[[") {
            out.push_str(line);
            out.push('\n');
        } else {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Errors raised while loading a sweep config.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for a sweep.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Config parsed but holds an unusable value.
    Invalid { reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            ConfigError::Invalid { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn unique_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "pksweep_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_cleanly() {
        let path = unique_path("defaults.toml");
        let _ = fs::remove_file(&path);

        let cfg = SweepConfig::load_or_default(&path).unwrap();
        assert!(path.exists(), "config file should be created");
        assert_eq!(cfg.sampling.nreal, 4200);
        assert_eq!(cfg.sampling.ndim, 5);
        assert_eq!(cfg.sampling.seed, None);
        assert_eq!(cfg.emulator.probe, Probe::MpkNonlin);
        assert_eq!(cfg.output.spectrum_stride, 10);
        assert_eq!(cfg.priors.len(), 8);

        let contents = fs::read_to_string(&path).expect("read written config");
        assert!(contents.contains("[sampling]"));
        assert!(contents.contains("# nreal = 4200"));
        assert!(contents.contains("# [[priors]]"));
        assert!(contents.contains("# name = \"omega_b\""));

        // The written file must read back as all-defaults
        let reread = SweepConfig::load_or_default(&path).unwrap();
        assert_eq!(reread.sampling.nreal, 4200);
        assert!(reread.priors.is_empty());
        assert_eq!(reread.param_space().unwrap().len(), 8);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        let custom = SweepConfig {
            sampling: SamplingConfig {
                nreal: 100,
                ndim: 2,
                seed: Some(7),
            },
            emulator: EmulatorConfig {
                probe: Probe::MpkLin,
                weights: Some(PathBuf::from("weights/custom.json")),
            },
            output: OutputConfig {
                dir: PathBuf::from("out"),
                spectrum_stride: 5,
            },
            priors: vec![
                PriorEntry {
                    name: "omega_cdm".to_string(),
                    fiducial: 0.12,
                    half_width: Some(0.05),
                },
                PriorEntry {
                    name: "h".to_string(),
                    fiducial: 0.7,
                    half_width: Some(0.1),
                },
            ],
        };
        fs::write(&path, toml::to_string_pretty(&custom).unwrap()).unwrap();

        let cfg = SweepConfig::load_or_default(&path).unwrap();
        assert_eq!(cfg.sampling.nreal, 100);
        assert_eq!(cfg.sampling.seed, Some(7));
        assert_eq!(cfg.emulator.probe, Probe::MpkLin);
        assert_eq!(
            cfg.emulator.weights,
            Some(PathBuf::from("weights/custom.json"))
        );
        assert_eq!(cfg.output.dir, PathBuf::from("out"));
        assert_eq!(cfg.output.spectrum_stride, 5);
        let space = cfg.param_space().unwrap();
        assert_eq!(space.names(), vec!["omega_cdm", "h"]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: SweepConfig = toml::from_str("[sampling]\nnreal = 64\n").unwrap();
        assert_eq!(cfg.sampling.nreal, 64);
        assert_eq!(cfg.sampling.ndim, 5);
        assert_eq!(cfg.emulator.probe, Probe::MpkNonlin);
        assert_eq!(cfg.output.spectrum_stride, 10);
        assert!(cfg.priors.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = unique_path("broken.toml");
        fs::write(&path, "[sampling]\nnreal = \"many\"\n").unwrap();
        let err = SweepConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let mut cfg = SweepConfig::default();
        cfg.sampling.nreal = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SweepConfig::default();
        cfg.sampling.ndim = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SweepConfig::default();
        cfg.output.spectrum_stride = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_prior_entries_are_rejected() {
        let mut cfg = SweepConfig::default();
        cfg.priors[0].half_width = Some(-0.1);
        assert!(cfg.validate().is_err());

        let mut cfg = SweepConfig::default();
        cfg.priors[0].fiducial = f64::NAN;
        assert!(cfg.validate().is_err());
    }
}
