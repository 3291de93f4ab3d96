use clap::Parser;
use std::path::PathBuf;

use crate::config::SweepConfig;
use crate::emulator::Probe;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "sweep.toml")]
    pub config: PathBuf,

    /// Realizations to draw (overrides config)
    #[arg(long)]
    pub nreal: Option<usize>,

    /// Leading parameters to vary (overrides config)
    #[arg(long)]
    pub ndim: Option<usize>,

    /// RNG seed for a reproducible design (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probe to emulate: mpk_lin or mpk_nonlin (overrides config)
    #[arg(long, value_parser = Probe::parse)]
    pub probe: Option<Probe>,

    /// Weights file (overrides config)
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Directory for the figures (overrides config)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Overlay every n-th spectrum (overrides config)
    #[arg(long)]
    pub stride: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Overlay command-line overrides onto a loaded config.
    pub fn apply_to(&self, cfg: &mut SweepConfig) {
        if let Some(nreal) = self.nreal {
            cfg.sampling.nreal = nreal;
        }
        if let Some(ndim) = self.ndim {
            cfg.sampling.ndim = ndim;
        }
        if let Some(seed) = self.seed {
            cfg.sampling.seed = Some(seed);
        }
        if let Some(probe) = self.probe {
            cfg.emulator.probe = probe;
        }
        if let Some(ref weights) = self.weights {
            cfg.emulator.weights = Some(weights.clone());
        }
        if let Some(ref dir) = self.out_dir {
            cfg.output.dir = dir.clone();
        }
        if let Some(stride) = self.stride {
            cfg.output.spectrum_stride = stride;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_land_in_config() {
        let args = Args::try_parse_from([
            "pksweep", "--nreal", "256", "--ndim", "3", "--seed", "99", "--probe", "mpk_lin",
            "--stride", "4",
        ])
        .unwrap();
        let mut cfg = SweepConfig::default();
        args.apply_to(&mut cfg);
        assert_eq!(cfg.sampling.nreal, 256);
        assert_eq!(cfg.sampling.ndim, 3);
        assert_eq!(cfg.sampling.seed, Some(99));
        assert_eq!(cfg.emulator.probe, Probe::MpkLin);
        assert_eq!(cfg.output.spectrum_stride, 4);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let args = Args::try_parse_from(["pksweep"]).unwrap();
        let mut cfg = SweepConfig::default();
        args.apply_to(&mut cfg);
        assert_eq!(cfg.sampling.nreal, 4200);
        assert_eq!(cfg.sampling.seed, None);
        assert_eq!(cfg.emulator.probe, Probe::MpkNonlin);
    }

    #[test]
    fn unknown_probe_is_a_parse_error() {
        assert!(Args::try_parse_from(["pksweep", "--probe", "mpk_sigma8"]).is_err());
    }
}
