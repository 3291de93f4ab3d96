//! core/design.rs
//! Latin hypercube sampling on the unit cube, and affine rescaling of a
//! design into physical prior intervals.

use ndarray::{Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::core::DesignError;
use crate::core::params::PriorBounds;

/// A sampling design: `nreal` rows by `ndim` columns.
///
/// Freshly drawn designs live on the unit cube. `rescale` maps each column
/// into its prior interval and flips `scaled`, so downstream consumers can
/// tell which convention the matrix is in.
#[derive(Clone, Debug, PartialEq)]
pub struct Design {
    values: Array2<f64>,
    scaled: bool,
}

impl Design {
    /// Wrap an existing unit-cube matrix.
    pub fn from_unit(values: Array2<f64>) -> Result<Self, DesignError> {
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(DesignError::EmptyDesign);
        }
        Ok(Self {
            values,
            scaled: false,
        })
    }

    /// Number of realizations (rows).
    #[inline]
    pub fn nreal(&self) -> usize {
        self.values.nrows()
    }

    /// Number of varied dimensions (columns).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.values.ncols()
    }

    #[inline]
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    #[inline]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Column `j` across all realizations.
    #[inline]
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.values.column(j)
    }

    /// Map each column from `[0, 1)` into its prior interval:
    /// `x' = x * (upper - lower) + lower`.
    pub fn rescale(&self, bounds: &[PriorBounds]) -> Result<Design, DesignError> {
        if self.scaled {
            return Err(DesignError::AlreadyScaled);
        }
        if bounds.len() != self.ndim() {
            return Err(DesignError::BoundsMismatch {
                expected: self.ndim(),
                got: bounds.len(),
            });
        }
        let mut values = self.values.clone();
        for (j, b) in bounds.iter().enumerate() {
            let width = b.width();
            for v in values.column_mut(j).iter_mut() {
                *v = *v * width + b.lower;
            }
        }
        Ok(Design {
            values,
            scaled: true,
        })
    }
}

/// Latin hypercube sampler over the unit cube.
///
/// Each column is stratified independently: the row strata `[i/n, (i+1)/n)`
/// are visited in shuffled order with one uniform draw inside each, so every
/// one-dimensional projection covers its axis evenly.
#[derive(Clone, Debug)]
pub struct LatinHypercube {
    ndim: usize,
    rng: StdRng,
}

impl LatinHypercube {
    /// Sampler with an entropy-chosen seed.
    pub fn new(ndim: usize) -> Self {
        Self::seeded(ndim, rand::random::<u64>())
    }

    /// Sampler with a fixed seed, for reproducible designs.
    pub fn seeded(ndim: usize, seed: u64) -> Self {
        Self {
            ndim,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Draw `nreal` points on the unit cube.
    pub fn sample(&mut self, nreal: usize) -> Result<Design, DesignError> {
        if nreal == 0 || self.ndim == 0 {
            return Err(DesignError::EmptyDesign);
        }
        let mut values = Array2::<f64>::zeros((nreal, self.ndim));
        let mut strata: Vec<usize> = (0..nreal).collect();
        for j in 0..self.ndim {
            strata.shuffle(&mut self.rng);
            for (i, &s) in strata.iter().enumerate() {
                let u = self.rng.random::<f64>();
                values[[i, j]] = (s as f64 + u) / nreal as f64;
            }
        }
        Ok(Design {
            values,
            scaled: false,
        })
    }
}
