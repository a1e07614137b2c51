use crate::{
    solve::{acceleration, position, velocity, Accel, Pose, Vel},
    Branch, Error, MechConfig, Pair, Result,
};
use tracing::trace;

/// Prescribed motion of the crank at one instant.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Crank {
    /// Crank angle
    pub theta2: f64,
    /// Crank angular velocity
    pub omega2: f64,
    /// Crank angular acceleration
    pub alpha2: f64,
}

impl Crank {
    /// Crank at rest at angle `theta2`.
    pub const fn new(theta2: f64) -> Self {
        Self { theta2, omega2: 0., alpha2: 0. }
    }

    /// Build with angular velocity.
    #[must_use]
    pub const fn with_omega(self, omega2: f64) -> Self {
        Self { omega2, ..self }
    }

    /// Build with angular acceleration.
    #[must_use]
    pub const fn with_alpha(self, alpha2: f64) -> Self {
        Self { alpha2, ..self }
    }

    /// Same motion at another angle.
    #[must_use]
    pub const fn at(self, theta2: f64) -> Self {
        Self { theta2, ..self }
    }

    fn validate(&self) -> Result<()> {
        let Self { theta2, omega2, alpha2 } = *self;
        for (name, value) in [("theta2", theta2), ("omega2", omega2), ("alpha2", alpha2)] {
            if !value.is_finite() {
                return Err(Error::NonFiniteInput { name, value });
            }
        }
        Ok(())
    }
}

/// Position, velocity and acceleration of a point.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointKin {
    /// Position
    pub pos: [f64; 2],
    /// Velocity
    pub vel: [f64; 2],
    /// Acceleration
    pub acc: [f64; 2],
}

/// Kinematics of the coupler and the output link on one branch.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BranchState {
    /// Coupler angle
    pub theta3: f64,
    /// Output link angle
    pub theta4: f64,
    /// Coupler angular velocity
    pub omega3: f64,
    /// Output link angular velocity
    pub omega4: f64,
    /// Coupler angular acceleration
    pub alpha3: f64,
    /// Output link angular acceleration
    pub alpha4: f64,
    /// Joint B
    pub b: PointKin,
    /// Coupler point P
    pub p: PointKin,
    /// Joint B relative to joint A
    pub ba: PointKin,
    /// Coupler point P relative to joint A
    pub pa: PointKin,
}

impl BranchState {
    fn new(a: &PointKin, pose: Pose, vel: Vel, acc: Accel) -> Self {
        let rel = |p: [f64; 2]| [p[0] - a.pos[0], p[1] - a.pos[1]];
        Self {
            theta3: pose.theta3,
            theta4: pose.theta4,
            omega3: vel.omega3,
            omega4: vel.omega4,
            alpha3: acc.alpha3,
            alpha4: acc.alpha4,
            b: PointKin { pos: pose.b, vel: vel.b, acc: acc.b },
            p: PointKin { pos: pose.p, vel: vel.p, acc: acc.p },
            ba: PointKin { pos: rel(pose.b), vel: vel.ba, acc: acc.ba },
            pa: PointKin { pos: rel(pose.p), vel: vel.pa, acc: acc.pa },
        }
    }
}

/// Kinematic state of the linkage at one crank input.
///
/// A state is only built by [`MechState::solve()`], so every field belongs
/// to the same crank input.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MechState {
    crank: Crank,
    o2: [f64; 2],
    o4: [f64; 2],
    a: PointKin,
    branches: Pair<BranchState>,
}

impl MechState {
    /// Solve positions, velocities and accelerations in order.
    ///
    /// Each stage only reads the finished results of the previous stage, and
    /// the first failure aborts the whole solution.
    pub fn solve(cfg: &MechConfig, crank: Crank) -> Result<Self> {
        crank.validate()?;
        let poses = position::solve(cfg, crank.theta2)?;
        trace!(theta2 = crank.theta2, ?poses, "position solved");
        let vels = velocity::solve(cfg, &crank, &poses)?;
        trace!(theta2 = crank.theta2, ?vels, "velocity solved");
        let accs = acceleration::solve(cfg, &crank, &poses, &vels)?;
        trace!(theta2 = crank.theta2, ?accs, "acceleration solved");
        let a = PointKin {
            pos: position::crank(cfg, crank.theta2),
            vel: velocity::crank(cfg, &crank),
            acc: acceleration::crank(cfg, &crank),
        };
        let branches = Pair::from_fn(|b| BranchState::new(&a, poses[b], vels[b], accs[b]));
        Ok(Self { crank, o2: [0.; 2], o4: position::output_pivot(cfg), a, branches })
    }

    /// Crank input of this state.
    pub const fn crank(&self) -> &Crank {
        &self.crank
    }

    /// Crank pivot O2, the origin.
    pub const fn o2(&self) -> [f64; 2] {
        self.o2
    }

    /// Output link pivot O4.
    pub const fn o4(&self) -> [f64; 2] {
        self.o4
    }

    /// Crank joint A.
    pub const fn joint_a(&self) -> &PointKin {
        &self.a
    }

    /// All per-branch data.
    pub const fn branches(&self) -> &Pair<BranchState> {
        &self.branches
    }

    /// Per-branch data.
    pub const fn branch(&self, branch: Branch) -> &BranchState {
        self.branches.get(branch)
    }

    /// Coupler angle.
    pub const fn theta3(&self, branch: Branch) -> f64 {
        self.branch(branch).theta3
    }

    /// Output link angle.
    pub const fn theta4(&self, branch: Branch) -> f64 {
        self.branch(branch).theta4
    }

    /// Coupler angular velocity.
    pub const fn omega3(&self, branch: Branch) -> f64 {
        self.branch(branch).omega3
    }

    /// Output link angular velocity.
    pub const fn omega4(&self, branch: Branch) -> f64 {
        self.branch(branch).omega4
    }

    /// Coupler angular acceleration.
    pub const fn alpha3(&self, branch: Branch) -> f64 {
        self.branch(branch).alpha3
    }

    /// Output link angular acceleration.
    pub const fn alpha4(&self, branch: Branch) -> f64 {
        self.branch(branch).alpha4
    }

    /// Joint B.
    pub const fn joint_b(&self, branch: Branch) -> &PointKin {
        &self.branch(branch).b
    }

    /// Coupler point P.
    pub const fn point_p(&self, branch: Branch) -> &PointKin {
        &self.branch(branch).p
    }
}
