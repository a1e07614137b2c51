//! Error types of the kinematic solver.
use crate::{Branch, Links};
use thiserror::Error;

/// Solver stage where a singular configuration is met.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Stage {
    /// Loop-closure angles are indeterminate
    Position,
    /// Angular velocity ratios have a zero denominator
    Velocity,
    /// Angular acceleration system has a zero determinant
    Acceleration,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Position => write!(f, "position"),
            Self::Velocity => write!(f, "velocity"),
            Self::Acceleration => write!(f, "acceleration"),
        }
    }
}

/// Errors of construction and update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A link length or coupler point parameter is out of range.
    #[error("invalid geometry: `{name}` = {value} ({reason})")]
    InvalidGeometry {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
        /// Violated constraint
        reason: &'static str,
    },
    /// A crank input is NaN or infinite.
    #[error("non-finite crank input: `{name}` = {value}")]
    NonFiniteInput {
        /// Input name
        name: &'static str,
        /// Rejected value
        value: f64,
    },
    /// The loop cannot close at this crank angle.
    #[error(
        "linkage {links} cannot assemble at crank angle {theta2} rad \
         (discriminant {discriminant})"
    )]
    AssemblyUnreachable {
        /// Requested crank angle
        theta2: f64,
        /// Link lengths of the linkage
        links: Links,
        /// The negative discriminant
        discriminant: f64,
    },
    /// The linkage locks at this crank angle.
    #[error(
        "linkage {links} is singular at crank angle {theta2} rad \
         ({branch} branch, {stage} stage)"
    )]
    SingularConfiguration {
        /// Requested crank angle
        theta2: f64,
        /// Link lengths of the linkage
        links: Links,
        /// Branch which failed first
        branch: Branch,
        /// Stage which failed
        stage: Stage,
    },
}

/// Result type of the kinematic solver.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let links = Links::new(4., 2., 4., 2.);
        let err = Error::SingularConfiguration {
            theta2: 0.,
            links,
            branch: Branch::Open,
            stage: Stage::Velocity,
        };
        let msg = err.to_string();
        assert!(msg.contains("crank angle 0 rad"));
        assert!(msg.contains("open branch, velocity stage"));
        assert!(msg.contains("[4, 2, 4, 2]"));

        let err = Error::InvalidGeometry { name: "l3", value: -1., reason: "must be positive" };
        assert_eq!(err.to_string(), "invalid geometry: `l3` = -1 (must be positive)");
    }
}
