//! Velocity analysis.
use super::{coord, singular, tip_vel, Pose, SINGULAR_TOL};
use crate::{Crank, MechConfig, Pair, Result, Stage};

/// Angular and linear velocities of one branch.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vel {
    /// Coupler angular velocity
    pub omega3: f64,
    /// Output link angular velocity
    pub omega4: f64,
    /// Velocity of joint B relative to joint A
    pub ba: [f64; 2],
    /// Velocity of joint B
    pub b: [f64; 2],
    /// Velocity of the coupler point relative to joint A
    pub pa: [f64; 2],
    /// Velocity of the coupler point
    pub p: [f64; 2],
}

/// Velocity of the crank joint A.
pub fn crank(cfg: &MechConfig, crank: &Crank) -> [f64; 2] {
    coord(tip_vel(cfg.links().a(), crank.omega2, crank.theta2))
}

/// Differentiate the loop-closure equation once for both branches.
///
/// Fails if the coupler and the output link are collinear.
pub fn solve(cfg: &MechConfig, crank: &Crank, poses: &Pair<Pose>) -> Result<Pair<Vel>> {
    let Crank { theta2, omega2, .. } = *crank;
    let (a, b, c) = (cfg.links().a(), cfg.links().b(), cfg.links().c());
    let rpa = cfg.point().rpa;
    let va = tip_vel(a, omega2, theta2);
    Pair::try_from_fn(|branch| {
        let Pose { theta3, theta4, .. } = poses[branch];
        let den = (theta3 - theta4).sin();
        if den.abs() <= SINGULAR_TOL {
            return Err(singular(cfg, theta2, branch, Stage::Velocity));
        }
        let omega3 = a * omega2 / b * (theta4 - theta2).sin() / den;
        let omega4 = a * omega2 / c * (theta2 - theta3).sin() / (theta4 - theta3).sin();
        let vpa = tip_vel(rpa, omega3, theta3 + cfg.point().delta3);
        Ok(Vel {
            omega3,
            omega4,
            ba: coord(tip_vel(b, omega3, theta3)),
            b: coord(tip_vel(c, omega4, theta4)),
            pa: coord(vpa),
            p: coord(va + vpa),
        })
    })
}
