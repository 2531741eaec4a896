//! Property checks for the hybrid spline over randomly generated grids.

use proptest::prelude::*;
use spline3d::{check_bounds, interpolate, Spline3D, Spline3DConfig, ZMode};

/// A strictly increasing axis with `n` entries and uneven spacing
fn axis(n: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<f64>> {
    (prop::collection::vec(0.1_f64..2.0, n), -5.0_f64..5.0).prop_map(|(steps, start)| {
        let mut x = Vec::with_capacity(steps.len());
        let mut acc = start;
        for dx in steps {
            x.push(acc);
            acc += dx;
        }
        x
    })
}

/// Grid axes plus one value per grid point
fn grid(
    nz: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    (axis(2..=6), axis(2..=6), axis(nz)).prop_flat_map(|(x, y, z)| {
        let n = x.len() * y.len() * z.len();
        (
            Just(x),
            Just(y),
            Just(z),
            prop::collection::vec(-10.0_f64..10.0, n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reproduces_values_at_nodes((x, y, z, v) in grid(4..=7)) {
        let mut points = Vec::with_capacity(v.len());
        for &xi in &x {
            for &yj in &y {
                for &zk in &z {
                    points.push([xi, yj, zk]);
                }
            }
        }

        let out = interpolate(&[&x[..], &y[..], &z[..]], &v, &points, Spline3DConfig::default())
            .unwrap();

        for (got, want) in out.iter().zip(&v) {
            prop_assert!((got - want).abs() <= 1e-9 * (1.0 + want.abs()));
        }
    }

    #[test]
    fn fills_outside_grid(
        (x, y, z, v) in grid(1..=7),
        dim in 0_usize..3,
        offset in 1e-6_f64..100.0,
        below in any::<bool>(),
        fill_value in -1e3_f64..1e3,
    ) {
        // Start from the middle of the grid and push one coordinate out
        let grids = [&x[..], &y[..], &z[..]];
        let mut point = [0.0; 3];
        for d in 0..3 {
            point[d] = 0.5 * (grids[d][0] + grids[d][grids[d].len() - 1]);
        }
        // Thin z ignores the z coordinate entirely, so only x and y can be out of bounds there
        let dim = if z.len() < 4 { dim % 2 } else { dim };
        let g = grids[dim];
        point[dim] = if below { g[0] - offset } else { g[g.len() - 1] + offset };

        let config = Spline3DConfig::default().with_fill_value(fill_value);
        let out = interpolate(&grids, &v, &[point], config).unwrap();
        prop_assert_eq!(out[0], fill_value);

        // Bounds checking flags the same axis
        let obs: Vec<[f64; 1]> = point.iter().map(|&p| [p]).collect();
        let obsslice: Vec<&[f64]> = obs.iter().map(|p| &p[..]).collect();
        let mut flags = [false; 3];
        check_bounds(&grids, &obsslice, 0.0, &mut flags).unwrap();
        prop_assert!(flags[dim]);
    }

    #[test]
    fn thin_z_ignores_z(
        (x, y, z, v) in grid(1..=3),
        tx in 0.0_f64..=1.0,
        ty in 0.0_f64..=1.0,
        za in -100.0_f64..100.0,
        zb in -100.0_f64..100.0,
    ) {
        let interpolator = Spline3D::new(&x, &y, &z, &v, Spline3DConfig::default()).unwrap();
        prop_assert_eq!(interpolator.mode(), ZMode::Thin { layer: z.len() / 2 });

        let xo = x[0] + tx * (x[x.len() - 1] - x[0]);
        let yo = y[0] + ty * (y[y.len() - 1] - y[0]);
        prop_assert_eq!(interpolator.interp_one(xo, yo, za), interpolator.interp_one(xo, yo, zb));
    }

    #[test]
    fn repeated_calls_match(
        (x, y, z, v) in grid(4..=6),
        t in prop::collection::vec((0.0_f64..=1.0, 0.0_f64..=1.0, 0.0_f64..=1.0), 1..20),
    ) {
        let grids = [&x[..], &y[..], &z[..]];
        let points: Vec<[f64; 3]> = t
            .iter()
            .map(|&(a, b, c)| {
                let lerp = |g: &[f64], s: f64| g[0] + s * (g[g.len() - 1] - g[0]);
                [lerp(&x, a), lerp(&y, b), lerp(&z, c)]
            })
            .collect();

        let first = interpolate(&grids, &v, &points, Spline3DConfig::default()).unwrap();
        let second = interpolate(&grids, &v, &points, Spline3DConfig::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}
