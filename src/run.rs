//! run.rs
//! The sweep pipeline: draw a design, rescale it into the priors, assemble
//! the parameter table, emulate one spectrum per realization, and render
//! the diagnostic figures.

use std::error::Error;
use std::fs::create_dir_all;
use std::path::PathBuf;

use tracing::info;

use crate::config::SweepConfig;
use crate::core::design::LatinHypercube;
use crate::core::table::ParamTable;
use crate::emulator::Emulator;
use crate::emulator::network::DenseNetwork;
use crate::plots;

/// What a finished sweep produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Seed the design was drawn with, whether configured or entropy-chosen.
    pub seed: u64,
    /// Figures written, in render order.
    pub figures: Vec<PathBuf>,
}

pub fn run(cfg: &SweepConfig) -> Result<RunSummary, Box<dyn Error>> {
    cfg.validate()?;
    let space = cfg.param_space()?;
    let nreal = cfg.sampling.nreal;
    let ndim = cfg.sampling.ndim;
    // The design scatters plot the first two varied dimensions
    if ndim < 2 {
        return Err(format!("design figures need at least 2 varied dimensions, got {ndim}").into());
    }
    let seed = cfg.sampling.seed.unwrap_or_else(rand::random::<u64>);

    let bounds = space.bounds(ndim)?;

    info!("drawing {nreal} x {ndim} latin hypercube (seed {seed})");
    let unit = LatinHypercube::seeded(ndim, seed).sample(nreal)?;
    let scaled = unit.rescale(&bounds)?;
    let table = ParamTable::assemble(&space, ndim, &scaled)?;

    let network = DenseNetwork::load(cfg.emulator.probe, cfg.emulator.weights.as_deref())?;
    info!(
        "loaded {} network: {} inputs, {} modes",
        network.probe(),
        network.parameters().len(),
        network.modes().len()
    );
    let spectra = network.predict(&table)?;
    info!("emulated {nreal} spectra");

    create_dir_all(&cfg.output.dir)?;
    let mut figures = Vec::new();

    let names = space.names();
    let unit_path = cfg.output.dir.join(plots::UNIT_SCATTER_FILE);
    plots::render_unit_scatter(&unit_path, &unit, (names[0], names[1]))?;
    info!("wrote {}", unit_path.display());
    figures.push(unit_path);

    let rescaled_path = cfg.output.dir.join(plots::RESCALED_SCATTER_FILE);
    plots::render_rescaled_scatter(
        &rescaled_path,
        &scaled,
        (names[0], names[1]),
        (bounds[0], bounds[1]),
    )?;
    info!("wrote {}", rescaled_path.display());
    figures.push(rescaled_path);

    let rows = plots::overlay_rows(nreal, cfg.output.spectrum_stride);
    let caption = format!("Emulated {} spectra", cfg.emulator.probe);
    let spectra_path = cfg.output.dir.join(plots::SPECTRA_FILE);
    plots::render_spectra_overlay(&spectra_path, &caption, network.modes(), &spectra, &rows)?;
    info!(
        "wrote {} ({} of {} spectra)",
        spectra_path.display(),
        rows.len(),
        nreal
    );
    figures.push(spectra_path);

    Ok(RunSummary { seed, figures })
}
