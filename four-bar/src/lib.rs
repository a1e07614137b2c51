//! Four🍀bar kinematics is a closed-form kinematic solver for planar four-bar
//! linkages.
//!
//! Given the four link lengths and the angular position, velocity and
//! acceleration of the crank, the solver derives both assembly branches of
//! the linkage and reports the positions, velocities and accelerations of
//! every joint and of a point fixed on the coupler.
//!
//! ```
//! use four_bar_kin::*;
//!
//! let links = Links::new(152.4, 50.8, 177.8, 228.6);
//! let point = CouplerPoint::new(152.4, std::f64::consts::FRAC_PI_6);
//! let cfg = MechConfig::new(links, point).unwrap();
//! let mut mech = Mechanism::new(cfg, Crank::new(0.).with_omega(10.)).unwrap();
//! assert!(mech.is_grashof());
//! let state = mech.update(0.5).unwrap();
//! let [x, y] = state.joint_b(Branch::Open).pos;
//! assert!(x.is_finite() && y.is_finite());
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
pub use crate::{
    branch::*,
    config::*,
    error::{Error, Result, Stage},
    mechanism::*,
    singular::*,
    state::*,
};

mod branch;
mod config;
mod error;
mod mechanism;
mod singular;
pub mod solve;
mod state;
