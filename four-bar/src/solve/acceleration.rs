//! Acceleration analysis.
use super::{coord, singular, tip_acc, Pose, Vel, SINGULAR_TOL};
use crate::{Crank, MechConfig, Pair, Result, Stage};

/// Angular and linear accelerations of one branch.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Accel {
    /// Coupler angular acceleration
    pub alpha3: f64,
    /// Output link angular acceleration
    pub alpha4: f64,
    /// Acceleration of joint B relative to joint A
    pub ba: [f64; 2],
    /// Acceleration of joint B
    pub b: [f64; 2],
    /// Acceleration of the coupler point relative to joint A
    pub pa: [f64; 2],
    /// Acceleration of the coupler point
    pub p: [f64; 2],
}

/// Acceleration of the crank joint A.
pub fn crank(cfg: &MechConfig, crank: &Crank) -> [f64; 2] {
    let Crank { theta2, omega2, alpha2 } = *crank;
    coord(tip_acc(cfg.links().a(), omega2, alpha2, theta2))
}

/// Differentiate the loop-closure equation twice for both branches.
///
/// The angular accelerations solve
///
/// ```text
/// | A  -B | |alpha4|   | C |
/// | D  -E | |alpha3| = | F |
/// ```
///
/// by Cramer's rule, failing if the determinant `AE - BD` vanishes.
pub fn solve(
    cfg: &MechConfig,
    crank: &Crank,
    poses: &Pair<Pose>,
    vels: &Pair<Vel>,
) -> Result<Pair<Accel>> {
    let Crank { theta2, omega2, alpha2 } = *crank;
    let (a, b, c) = (cfg.links().a(), cfg.links().b(), cfg.links().c());
    let rpa = cfg.point().rpa;
    let (s2, c2) = theta2.sin_cos();
    let aa = tip_acc(a, omega2, alpha2, theta2);
    Pair::try_from_fn(|branch| {
        let Pose { theta3, theta4, .. } = poses[branch];
        let Vel { omega3, omega4, .. } = vels[branch];
        let (s3, c3) = theta3.sin_cos();
        let (s4, c4) = theta4.sin_cos();
        let ca = c * s4;
        let cb = b * s3;
        let cc = a * alpha2 * s2 + a * omega2 * omega2 * c2 + b * omega3 * omega3 * c3
            - c * omega4 * omega4 * c4;
        let cd = c * c4;
        let ce = b * c3;
        let cf = a * alpha2 * c2 - a * omega2 * omega2 * s2 - b * omega3 * omega3 * s3
            + c * omega4 * omega4 * s4;
        // Equals `b c sin(θ4 - θ3)`, so the velocity stage rejects it first
        let det = ca * ce - cb * cd;
        if det.abs() <= SINGULAR_TOL * b * c {
            return Err(singular(cfg, theta2, branch, Stage::Acceleration));
        }
        let alpha3 = (cc * cd - ca * cf) / det;
        let alpha4 = (cc * ce - cb * cf) / det;
        let apa = tip_acc(rpa, omega3, alpha3, theta3 + cfg.point().delta3);
        Ok(Accel {
            alpha3,
            alpha4,
            ba: coord(tip_acc(b, omega3, alpha3, theta3)),
            b: coord(tip_acc(c, omega4, alpha4, theta4)),
            pa: coord(apa),
            p: coord(aa + apa),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{solve::position, solve::velocity, Branch, Error};
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_finite_difference_of_velocity() {
        let cfg = MechConfig::example();
        let crank = Crank::new(1.).with_omega(10.).with_alpha(3.);
        let vel_at = |t: f64| {
            let crank = Crank::new(crank.theta2 + t * crank.omega2)
                .with_omega(crank.omega2 + t * crank.alpha2);
            let poses = position::solve(&cfg, crank.theta2).unwrap();
            velocity::solve(&cfg, &crank, &poses).unwrap()
        };
        let poses = position::solve(&cfg, crank.theta2).unwrap();
        let vels = velocity::solve(&cfg, &crank, &poses).unwrap();
        let accs = solve(&cfg, &crank, &poses, &vels).unwrap();
        let h = 1e-7;
        let (fwd, bwd) = (vel_at(h), vel_at(-h));
        for branch in Branch::ALL {
            let alpha3 = (fwd[branch].omega3 - bwd[branch].omega3) / (2. * h);
            let alpha4 = (fwd[branch].omega4 - bwd[branch].omega4) / (2. * h);
            assert_abs_diff_eq!(accs[branch].alpha3, alpha3, epsilon = 1e-3);
            assert_abs_diff_eq!(accs[branch].alpha4, alpha4, epsilon = 1e-3);
        }
    }

    #[test]
    fn collinear_links_are_singular() {
        let cfg = MechConfig::example();
        let pose = Pose { theta3: 0.3, theta4: 0.3, ..Pose::default() };
        let vel = Vel::default();
        let err = solve(&cfg, &Crank::new(0.), &Pair::new(pose, pose), &Pair::new(vel, vel))
            .unwrap_err();
        assert_eq!(
            err,
            Error::SingularConfiguration {
                theta2: 0.,
                links: *cfg.links(),
                branch: Branch::Open,
                stage: Stage::Acceleration,
            }
        );
    }
}
