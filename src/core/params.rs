//! core/params.rs
//! Cosmological parameter space: fiducial values and prior half widths.
//!
//! Parameters are ordered. The first `ndim` entries are varied by a sampling
//! design; the rest stay pinned at their fiducial values. Priors are flat
//! intervals `fiducial ± half_width`, so a parameter is only eligible for
//! variation if it carries a half width.

use crate::core::DesignError;

/// One parameter: name, fiducial value, and optional prior half width.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamDef {
    pub name: String,
    pub fiducial: f64,
    /// Half width of the flat prior. `None` pins the parameter.
    pub half_width: Option<f64>,
}

impl ParamDef {
    pub fn varied(name: &str, fiducial: f64, half_width: f64) -> Self {
        Self {
            name: name.to_string(),
            fiducial,
            half_width: Some(half_width),
        }
    }

    pub fn fixed(name: &str, fiducial: f64) -> Self {
        Self {
            name: name.to_string(),
            fiducial,
            half_width: None,
        }
    }
}

/// Flat prior interval for one varied parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriorBounds {
    pub lower: f64,
    pub upper: f64,
}

impl PriorBounds {
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// Ordered set of parameter definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpace {
    defs: Vec<ParamDef>,
}

impl ParamSpace {
    /// Build a space from explicit definitions, rejecting duplicates and
    /// non-finite values.
    pub fn from_defs(defs: Vec<ParamDef>) -> Result<Self, DesignError> {
        for (i, def) in defs.iter().enumerate() {
            if !def.fiducial.is_finite() {
                return Err(DesignError::NonFiniteValue {
                    name: def.name.clone(),
                });
            }
            if let Some(hw) = def.half_width {
                if !hw.is_finite() || hw <= 0.0 {
                    return Err(DesignError::NonFiniteValue {
                        name: def.name.clone(),
                    });
                }
            }
            if defs[..i].iter().any(|d| d.name == def.name) {
                return Err(DesignError::DuplicateParam {
                    name: def.name.clone(),
                });
            }
        }
        Ok(Self { defs })
    }

    /// Fiducial power spectrum parameter set.
    ///
    /// First five carry flat priors and are eligible for variation; the
    /// halofit internals (`eta_0`, `cmin`) and redshift stay pinned.
    pub fn fiducial() -> Self {
        Self {
            defs: vec![
                ParamDef::varied("omega_b", 0.025, 0.01),
                ParamDef::varied("omega_cdm", 0.11, 0.1),
                ParamDef::varied("h", 0.68, 0.1),
                ParamDef::varied("n_s", 0.97, 0.1),
                ParamDef::varied("ln10^{10}A_s", 3.1, 0.5),
                ParamDef::fixed("eta_0", 0.7),
                ParamDef::fixed("cmin", 2.6),
                ParamDef::fixed("z", 0.0),
            ],
        }
    }

    /// Number of parameters (varied and pinned).
    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    #[inline]
    pub fn defs(&self) -> &[ParamDef] {
        &self.defs
    }

    /// Parameter names in order.
    pub fn names(&self) -> Vec<&str> {
        self.defs.iter().map(|d| d.name.as_str()).collect()
    }

    /// The first `ndim` definitions, checked for eligibility.
    pub fn varied(&self, ndim: usize) -> Result<&[ParamDef], DesignError> {
        if ndim > self.defs.len() {
            return Err(DesignError::NdimExceedsParams {
                requested: ndim,
                available: self.defs.len(),
            });
        }
        for def in &self.defs[..ndim] {
            if def.half_width.is_none() {
                return Err(DesignError::MissingHalfWidth {
                    name: def.name.clone(),
                });
            }
        }
        Ok(&self.defs[..ndim])
    }

    /// Definitions pinned at their fiducials when varying `ndim` dimensions.
    #[inline]
    pub fn pinned(&self, ndim: usize) -> &[ParamDef] {
        &self.defs[ndim.min(self.defs.len())..]
    }

    /// Prior bounds `fiducial ± half_width` for the first `ndim` parameters.
    pub fn bounds(&self, ndim: usize) -> Result<Vec<PriorBounds>, DesignError> {
        let varied = self.varied(ndim)?;
        Ok(varied
            .iter()
            .map(|def| {
                // varied() guarantees the half width exists
                let hw = def.half_width.unwrap_or(0.0);
                PriorBounds {
                    lower: def.fiducial - hw,
                    upper: def.fiducial + hw,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiducial_space_shape() {
        let space = ParamSpace::fiducial();
        assert_eq!(space.len(), 8);
        assert_eq!(
            space.names(),
            vec![
                "omega_b",
                "omega_cdm",
                "h",
                "n_s",
                "ln10^{10}A_s",
                "eta_0",
                "cmin",
                "z"
            ]
        );
        // First five varied, last three pinned
        assert!(space.defs()[..5].iter().all(|d| d.half_width.is_some()));
        assert!(space.defs()[5..].iter().all(|d| d.half_width.is_none()));
    }

    #[test]
    fn test_bounds_are_fiducial_plus_minus_half_width() {
        let space = ParamSpace::fiducial();
        let bounds = space.bounds(5).unwrap();
        assert_eq!(bounds.len(), 5);
        let b = bounds[0];
        assert!((b.lower - 0.015).abs() < 1e-12);
        assert!((b.upper - 0.035).abs() < 1e-12);
        for (def, b) in space.varied(5).unwrap().iter().zip(&bounds) {
            assert!((b.lower + b.upper) / 2.0 - def.fiducial < 1e-12);
            assert!(b.contains(def.fiducial));
        }
    }

    #[test]
    fn test_ndim_past_available_is_rejected() {
        let space = ParamSpace::fiducial();
        let err = space.bounds(9).unwrap_err();
        assert_eq!(
            err,
            DesignError::NdimExceedsParams {
                requested: 9,
                available: 8
            }
        );
    }

    #[test]
    fn test_varying_a_pinned_parameter_is_rejected() {
        let space = ParamSpace::fiducial();
        // eta_0 at index 5 has no half width
        let err = space.varied(6).unwrap_err();
        assert_eq!(
            err,
            DesignError::MissingHalfWidth {
                name: "eta_0".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let defs = vec![
            ParamDef::varied("h", 0.68, 0.1),
            ParamDef::varied("h", 0.7, 0.1),
        ];
        let err = ParamSpace::from_defs(defs).unwrap_err();
        assert_eq!(
            err,
            DesignError::DuplicateParam {
                name: "h".to_string()
            }
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let defs = vec![ParamDef::varied("h", f64::NAN, 0.1)];
        assert!(ParamSpace::from_defs(defs).is_err());
        let defs = vec![ParamDef::varied("h", 0.68, 0.0)];
        assert!(ParamSpace::from_defs(defs).is_err());
    }
}
