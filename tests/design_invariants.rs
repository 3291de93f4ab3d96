use pksweep::core::design::{Design, LatinHypercube};
use pksweep::core::params::ParamSpace;

#[test]
fn full_scale_design_is_stratified_in_every_column() {
    let nreal = 4200;
    let design = LatinHypercube::seeded(5, 20240817).sample(nreal).unwrap();
    assert_eq!(design.nreal(), nreal);
    assert_eq!(design.ndim(), 5);
    for j in 0..5 {
        let mut strata: Vec<usize> = design
            .column(j)
            .iter()
            .map(|&v| {
                assert!((0.0..1.0).contains(&v), "column {j}: {v} outside unit cube");
                (v * nreal as f64).floor() as usize
            })
            .collect();
        strata.sort_unstable();
        assert!(
            strata.iter().enumerate().all(|(i, &s)| i == s),
            "column {j} misses a stratum"
        );
    }
}

#[test]
fn small_rescaled_design_obeys_fiducial_priors() {
    let space = ParamSpace::fiducial();
    let bounds = space.bounds(2).unwrap();
    let design = LatinHypercube::seeded(2, 1234)
        .sample(10)
        .unwrap()
        .rescale(&bounds)
        .unwrap();

    // omega_b in fiducial 0.025 +/- 0.01, omega_cdm in 0.11 +/- 0.1
    assert!(design.column(0).iter().all(|&v| (0.015..0.035).contains(&v)));
    assert!(design.column(1).iter().all(|&v| (0.01..0.21).contains(&v)));

    // Stratification survives the affine map: ten distinct values per axis
    for j in 0..2 {
        let mut vals: Vec<f64> = design.column(j).to_vec();
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(vals.len(), 10);
        assert!(vals.windows(2).all(|w| w[0] < w[1]), "column {j} has ties");
    }
}

#[test]
fn bounds_come_one_per_varied_dimension() {
    let space = ParamSpace::fiducial();
    for ndim in 1..=5 {
        let bounds = space.bounds(ndim).unwrap();
        assert_eq!(bounds.len(), ndim);
        for (b, def) in bounds.iter().zip(space.varied(ndim).unwrap()) {
            let mid = 0.5 * (b.lower + b.upper);
            assert!(
                (mid - def.fiducial).abs() < 1e-12,
                "{} prior is not centered",
                def.name
            );
        }
    }
}

#[test]
fn seeded_samplers_agree_across_instances() {
    let a = LatinHypercube::seeded(5, 42).sample(100).unwrap();
    let b = LatinHypercube::seeded(5, 42).sample(100).unwrap();
    assert_eq!(a, b);
}

#[test]
fn consecutive_draws_from_one_sampler_differ() {
    let mut lhs = LatinHypercube::seeded(3, 7);
    let first = lhs.sample(20).unwrap();
    let second = lhs.sample(20).unwrap();
    assert_ne!(first, second);
}

#[test]
fn unit_midpoints_land_on_fiducials() {
    let space = ParamSpace::fiducial();
    let bounds = space.bounds(5).unwrap();
    let values = ndarray::Array2::from_elem((1, 5), 0.5);
    let scaled = Design::from_unit(values).unwrap().rescale(&bounds).unwrap();
    for (j, def) in space.varied(5).unwrap().iter().enumerate() {
        assert!(
            (scaled.values()[[0, j]] - def.fiducial).abs() < 1e-12,
            "{} midpoint off fiducial",
            def.name
        );
    }
}
