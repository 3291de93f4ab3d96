//! core/table.rs
//! Emulator-ready parameter tables.
//!
//! A table pairs every parameter of a [`ParamSpace`] with a column of
//! `nreal` values: varied parameters take their column from a rescaled
//! design, pinned parameters broadcast their fiducial. Assembly is a pure
//! function of its inputs, so rebuilding with a new design never leaks
//! values from a previous one.

use ndarray::{Array2, ArrayView1};

use crate::core::DesignError;
use crate::core::design::Design;
use crate::core::params::ParamSpace;

/// Named parameter columns, one row per realization.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamTable {
    names: Vec<String>,
    values: Array2<f64>,
}

impl ParamTable {
    /// Combine a rescaled design with the pinned fiducials of `space`.
    ///
    /// The first `ndim` columns come from `design` (in space order), the
    /// remaining columns are constant at their fiducial values.
    pub fn assemble(
        space: &ParamSpace,
        ndim: usize,
        design: &Design,
    ) -> Result<Self, DesignError> {
        if !design.is_scaled() {
            return Err(DesignError::UnscaledDesign);
        }
        if design.ndim() != ndim {
            return Err(DesignError::BoundsMismatch {
                expected: ndim,
                got: design.ndim(),
            });
        }
        // Checks ndim against the space and half-width eligibility
        space.varied(ndim)?;

        let nreal = design.nreal();
        let mut values = Array2::<f64>::zeros((nreal, space.len()));
        for (j, def) in space.defs().iter().enumerate() {
            if j < ndim {
                values.column_mut(j).assign(&design.column(j));
            } else {
                values.column_mut(j).fill(def.fiducial);
            }
        }
        Ok(Self {
            names: space.names().iter().map(|s| s.to_string()).collect(),
            values,
        })
    }

    /// Build a table directly from named columns.
    ///
    /// For tables at hand-picked points, bypassing the design machinery.
    pub fn from_columns(names: Vec<String>, values: Array2<f64>) -> Result<Self, DesignError> {
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(DesignError::EmptyDesign);
        }
        if names.len() != values.ncols() {
            return Err(DesignError::BoundsMismatch {
                expected: values.ncols(),
                got: names.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(DesignError::DuplicateParam { name: name.clone() });
            }
        }
        Ok(Self { names, values })
    }

    /// Number of realizations (rows).
    #[inline]
    pub fn nreal(&self) -> usize {
        self.values.nrows()
    }

    /// Number of parameters (columns).
    #[inline]
    pub fn nparams(&self) -> usize {
        self.values.ncols()
    }

    /// Parameter names in column order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Column for a parameter name, if the table has it.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let j = self.names.iter().position(|n| n == name)?;
        Some(self.values.column(j))
    }
}
