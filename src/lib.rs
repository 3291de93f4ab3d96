//! Latin hypercube sweeps of cosmological parameters through a pretrained
//! matter power spectrum emulator.
//!
//! A sweep draws a stratified design on the unit cube, rescales it into
//! flat priors around the fiducial cosmology, assembles an emulator-ready
//! parameter table, predicts one spectrum per realization, and renders
//! diagnostic figures of the design and the spectra.

pub mod cli;
pub mod config;
pub mod core;
pub mod emulator;
pub mod plots;
pub mod run;
