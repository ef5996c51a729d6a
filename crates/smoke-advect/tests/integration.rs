//! End-to-end tests driving `Advector::step` over whole fields.

use smoke_advect::semi_lagrangian::donor_bounds;
use smoke_advect::{AdvectConfig, Advector};
use smoke_core::{
    AdvectError, AdvectionMethod, Grid2, Integrator, Interpolation, MacVelocity, Resolution,
};
use smoke_test_utils::{
    all_finite, max_abs_diff, random_concentration, random_velocity, spike_concentration,
    swirl_velocity, total_mass,
};

fn advector(
    method: AdvectionMethod,
    interpolation: Interpolation,
    integrator: Integrator,
) -> Advector {
    Advector::new(
        AdvectConfig::builder()
            .method(method)
            .interpolation(interpolation)
            .integrator(integrator)
            .build()
            .unwrap(),
    )
}

#[test]
fn still_fluid_is_unchanged_for_every_combination() {
    let c0 = random_concentration(7, 3);
    for method in AdvectionMethod::ALL {
        for interpolation in Interpolation::ALL {
            for integrator in Integrator::ALL {
                let mut adv = advector(method, interpolation, integrator);
                let mut v = MacVelocity::zeros(5);
                let mut c = c0.clone();
                adv.step(&mut v, &mut c, 0.7).unwrap();
                assert!(
                    max_abs_diff(&c, &c0) < 1e-12,
                    "{method}/{interpolation}/{integrator}"
                );
                assert_eq!(v.max_abs(), 0.0);
            }
        }
    }
}

#[test]
fn upwind_euler_moves_spike_downstream() {
    let mut adv = advector(
        AdvectionMethod::Upwind,
        Interpolation::Linear,
        Integrator::ForwardEuler,
    );
    let mut v = MacVelocity::uniform(4, 1.0, 0.0);
    let mut c = spike_concentration(4, 1, 1, 1.0);

    adv.step(&mut v, &mut c, 0.1).unwrap();

    // Upwind fluxes telescope; nothing reaches the open boundary yet.
    assert!((total_mass(&c) - 1.0).abs() < 1e-12);
    assert!(c.get(1, 1) < 1.0);
    assert!(c.get(2, 1) > 0.0);
    assert!(c.as_slice().iter().all(|x| (0.0..=1.0).contains(x)));
}

#[test]
fn mismatched_resolutions_stay_finite_over_many_steps() {
    let v0 = swirl_velocity(8, 1.0);
    let c0 = random_concentration(16, 11);
    for method in AdvectionMethod::ALL {
        for integrator in [Integrator::ForwardEuler, Integrator::Rk4] {
            let mut adv = advector(method, Interpolation::MonotonicCubic, integrator);
            let (mut v, mut c) = (v0.clone(), c0.clone());
            for _ in 0..100 {
                adv.step(&mut v, &mut c, 0.01).unwrap();
            }
            assert!(all_finite(&c), "{method}/{integrator}");
            assert!(all_finite(v.u()) && all_finite(v.v()), "{method}/{integrator}");
        }
    }
}

#[test]
fn maccormack_output_respects_donor_neighbourhood() {
    let (ux, uy, dt, cn) = (0.7, -0.3, 0.1, 8);
    let c0 = spike_concentration(cn, 4, 3, 1.0);
    for interpolation in Interpolation::ALL {
        let mut adv = advector(
            AdvectionMethod::MacCormack,
            interpolation,
            Integrator::ForwardEuler,
        );
        let mut v = MacVelocity::uniform(cn, ux, uy);
        let mut c = c0.clone();
        adv.step(&mut v, &mut c, dt).unwrap();

        let scale = dt * cn as f64;
        let max = (cn - 1) as f64;
        for j in 0..cn {
            for i in 0..cn {
                let x = (i as f64 - scale * ux).clamp(0.0, max);
                let y = (j as f64 - scale * uy).clamp(0.0, max);
                let (lo, hi) = donor_bounds(&c0, x, y);
                let got = c.get(i, j);
                assert!(lo <= got && got <= hi, "{interpolation} ({i},{j}): {got}");
            }
        }
    }
}

#[test]
fn resolution_change_reallocates_scratch() {
    let mut adv = Advector::with_defaults();
    let small = Resolution::new(4, 4);
    let large = Resolution::new(8, 16);

    let mut v = MacVelocity::uniform(4, 0.2, 0.1);
    let mut c = Grid2::zeros(4, 4);
    adv.step(&mut v, &mut c, 0.01).unwrap();
    adv.step(&mut v, &mut c, 0.01).unwrap();
    assert_eq!(adv.scratch().allocations(), 1);

    let mut v2 = MacVelocity::uniform(8, 0.2, 0.1);
    let mut c2 = Grid2::zeros(16, 16);
    adv.step(&mut v2, &mut c2, 0.01).unwrap();
    assert_eq!(adv.scratch().allocations(), 2);
    assert!(adv.scratch().contains(large));
    assert!(!adv.scratch().contains(small));

    adv.step(&mut v, &mut c, 0.01).unwrap();
    assert_eq!(adv.scratch().allocations(), 3);
}

#[test]
fn larger_cache_reuses_previous_resolution() {
    let mut adv = Advector::new(
        AdvectConfig::builder()
            .max_cached_resolutions(2)
            .build()
            .unwrap(),
    );
    let mut v = MacVelocity::uniform(4, 0.2, 0.1);
    let mut c = Grid2::zeros(4, 4);
    let mut v2 = MacVelocity::uniform(8, 0.2, 0.1);
    let mut c2 = Grid2::zeros(16, 16);

    adv.step(&mut v, &mut c, 0.01).unwrap();
    adv.step(&mut v2, &mut c2, 0.01).unwrap();
    adv.step(&mut v, &mut c, 0.01).unwrap();
    assert_eq!(adv.scratch().allocations(), 2);
    assert_eq!(adv.scratch().len(), 2);
}

#[test]
fn malformed_fields_are_reported() {
    let mut adv = Advector::with_defaults();

    let mut v = MacVelocity::zeros(4);
    let mut c = Grid2::zeros(4, 3);
    assert!(matches!(
        adv.step(&mut v, &mut c, 0.1),
        Err(AdvectError::ShapeMismatch { field: "concentration", .. })
    ));

    let mut empty = MacVelocity::zeros(0);
    let mut c = Grid2::zeros(4, 4);
    assert_eq!(adv.step(&mut empty, &mut c, 0.1), Err(AdvectError::EmptyResolution));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn maccormack_never_leaves_initial_range(
            c_seed in any::<u64>(),
            v_seed in any::<u64>(),
            dt in 0.001f64..0.05,
        ) {
            let mut adv = advector(
                AdvectionMethod::MacCormack,
                Interpolation::Spline,
                Integrator::ForwardEuler,
            );
            let mut v = random_velocity(6, 1.0, v_seed);
            let c0 = random_concentration(9, c_seed);
            let mut c = c0.clone();
            adv.step(&mut v, &mut c, dt).unwrap();

            let (lo, hi) = c0.min_max().unwrap();
            for &x in c.as_slice() {
                prop_assert!(lo <= x && x <= hi, "{x} outside [{lo}, {hi}]");
            }
        }
    }
}
