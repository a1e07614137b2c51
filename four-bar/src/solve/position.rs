//! Position analysis.
use super::{coord, dir, singular};
use crate::{Coeffs, CouplerPoint, Error, MechConfig, Pair, Result, Stage};

/// Discriminants negative by less than this fraction of their terms are
/// rounding noise at a toggle position and are clamped to zero.
const DISC_TOL: f64 = 1e-12;

/// Loop-closure solution of one branch.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pose {
    /// Coupler angle
    pub theta3: f64,
    /// Output link angle
    pub theta4: f64,
    /// Position of joint B
    pub b: [f64; 2],
    /// Position of the coupler point P
    pub p: [f64; 2],
}

/// Position of the crank joint A.
pub fn crank(cfg: &MechConfig, theta2: f64) -> [f64; 2] {
    coord(cfg.links().a() * dir(theta2))
}

/// Position of the output link pivot. The crank pivot is the origin.
pub fn output_pivot(cfg: &MechConfig) -> [f64; 2] {
    [cfg.links().d(), 0.]
}

/// Solve the coupler and output link angles of both branches at `theta2`,
/// then place joint B and the coupler point P.
pub fn solve(cfg: &MechConfig, theta2: f64) -> Result<Pair<Pose>> {
    let Coeffs { k1, k2, k3, k4, k5 } = *cfg.coeffs();
    let (s, c) = theta2.sin_cos();
    let unreachable = |discriminant| Error::AssemblyUnreachable {
        theta2,
        links: *cfg.links(),
        discriminant,
    };
    let theta4 = half_angle([c - k1 - k2 * c + k3, -2. * s, k1 - (k2 + 1.) * c + k3])
        .map_err(unreachable)?;
    let theta3 = half_angle([c - k1 + k4 * c + k5, -2. * s, k1 + (k4 - 1.) * c + k5])
        .map_err(unreachable)?;
    let a = nalgebra::Vector2::from(crank(cfg, theta2));
    let CouplerPoint { rpa, delta3 } = *cfg.point();
    Pair::try_from_fn(|branch| {
        let (theta3, theta4) = (theta3[branch], theta4[branch]);
        if !theta3.is_finite() || !theta4.is_finite() {
            return Err(singular(cfg, theta2, branch, Stage::Position));
        }
        Ok(Pose {
            theta3,
            theta4,
            b: coord(a + cfg.links().b() * dir(theta3)),
            p: coord(a + rpa * dir(theta3 + delta3)),
        })
    })
}

/// Solve `A t² + B t + C = 0` for `t = tan(θ / 2)` and return `θ` of both
/// branches, or the discriminant if it is negative.
///
/// The open branch takes `(-B - √disc) / 2A` and the closed branch
/// `(-B + √disc) / 2A`. The roots are computed as `q / A` and `C / q` to
/// avoid cancellation, so a vanishing `A` gives `θ = ±π` instead of NaN.
fn half_angle([a, b, c]: [f64; 3]) -> Result<Pair<f64>, f64> {
    let ac4 = 4. * a * c;
    let mut disc = b * b - ac4;
    if disc < 0. {
        if disc < -DISC_TOL * (b * b + ac4.abs()) {
            return Err(disc);
        }
        disc = 0.;
    }
    let q = -0.5 * (b + disc.sqrt().copysign(b));
    let r1 = q / a;
    // Double root at zero
    let r2 = if q == 0. { r1 } else { c / q };
    let (minus, plus) = if b.is_sign_negative() { (r2, r1) } else { (r1, r2) };
    Ok(Pair::new(2. * minus.atan(), 2. * plus.atan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Branch, Links};
    use approx::assert_abs_diff_eq;

    fn naive(a: f64, b: f64, c: f64, sign: f64) -> f64 {
        2. * ((-b + sign * (b * b - 4. * a * c).sqrt()) / (2. * a)).atan()
    }

    #[test]
    fn half_angle_matches_quadratic_formula() {
        for [a, b, c] in [[-2., 0.5, 1.], [3., -4., 1.], [1., 2., -3.], [-0.5, -1., 0.25]] {
            let th = half_angle([a, b, c]).unwrap();
            assert_abs_diff_eq!(th.open, naive(a, b, c, -1.), epsilon = 1e-12);
            assert_abs_diff_eq!(th.closed, naive(a, b, c, 1.), epsilon = 1e-12);
        }
    }

    #[test]
    fn half_angle_vanishing_leading_term() {
        // t = -C / B for one root, t at infinity for the other
        let th = half_angle([0., 2., -1.]).unwrap();
        assert_abs_diff_eq!(th.closed, 2. * 0.5f64.atan(), epsilon = 1e-15);
        assert_abs_diff_eq!(th.open.abs(), std::f64::consts::PI, epsilon = 1e-15);
    }

    #[test]
    fn half_angle_negative_discriminant() {
        assert_eq!(half_angle([1., 0., 1.]), Err(-4.));
    }

    #[test]
    fn unreachable_crank_angle() {
        // Non-Grashof, the crank cannot reach the far side of the ground
        let links = Links::new(100., 80., 60., 50.);
        let cfg = MechConfig::new(links, CouplerPoint::default()).unwrap();
        let err = solve(&cfg, std::f64::consts::PI).unwrap_err();
        match err {
            Error::AssemblyUnreachable { theta2, links: l, discriminant } => {
                assert_eq!(theta2, std::f64::consts::PI);
                assert_eq!(l, links);
                assert!(discriminant < 0.);
            }
            _ => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn output_link_closes_the_loop() {
        let cfg = MechConfig::example();
        let poses = solve(&cfg, 1.).unwrap();
        let [dx, _] = output_pivot(&cfg);
        for branch in Branch::ALL {
            let Pose { theta4, b: [bx, by], .. } = poses[branch];
            let c = cfg.links().c();
            assert_abs_diff_eq!(bx, dx + c * theta4.cos(), epsilon = 1e-9);
            assert_abs_diff_eq!(by, c * theta4.sin(), epsilon = 1e-9);
        }
    }
}
