//! Closed-form solver stages.
//!
//! Each stage is a pure function of the configuration, the crank input and
//! the results of the earlier stages. [`MechState::solve()`](crate::MechState::solve)
//! chains them in the order position, velocity, acceleration.
pub use self::{acceleration::Accel, position::Pose, velocity::Vel};
use crate::{Branch, Error, MechConfig, Stage};
use nalgebra as na;

pub mod acceleration;
pub mod position;
pub mod velocity;

/// Denominators below this magnitude (relative to the link scale) are
/// treated as zero.
pub const SINGULAR_TOL: f64 = 1e-12;

/// Unit vector at angle `t`.
fn dir(t: f64) -> na::Vector2<f64> {
    let (s, c) = t.sin_cos();
    na::Vector2::new(c, s)
}

/// Unit vector at angle `t + π/2`.
fn perp(t: f64) -> na::Vector2<f64> {
    let (s, c) = t.sin_cos();
    na::Vector2::new(-s, c)
}

/// Velocity of the tip of a link of length `len` rotating about its base.
fn tip_vel(len: f64, omega: f64, t: f64) -> na::Vector2<f64> {
    len * omega * perp(t)
}

/// Acceleration of the tip of a link of length `len` rotating about its base,
/// tangential term minus centripetal term.
fn tip_acc(len: f64, omega: f64, alpha: f64, t: f64) -> na::Vector2<f64> {
    len * alpha * perp(t) - len * omega * omega * dir(t)
}

fn coord(v: na::Vector2<f64>) -> [f64; 2] {
    [v.x, v.y]
}

fn singular(cfg: &MechConfig, theta2: f64, branch: Branch, stage: Stage) -> Error {
    Error::SingularConfiguration { theta2, links: *cfg.links(), branch, stage }
}
