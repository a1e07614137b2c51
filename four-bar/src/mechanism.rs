use crate::{Crank, FourBarTy, MechConfig, MechState, Result, SingularitySet, Warning};
use tracing::debug;

/// Kinematic solver of a four-bar linkage.
///
/// Holds the immutable configuration, its singular angles and the latest
/// solved state. An update solves a complete new state first and replaces
/// the stored one only on success, so a failed update keeps the previous
/// state.
#[derive(Clone, Debug)]
pub struct Mechanism {
    cfg: MechConfig,
    sing: SingularitySet,
    state: MechState,
}

impl Mechanism {
    /// Detect the singular angles and solve the initial state.
    pub fn new(cfg: MechConfig, crank: Crank) -> Result<Self> {
        let sing = SingularitySet::detect(&cfg);
        let state = MechState::solve(&cfg, crank)?;
        debug!(links = %cfg.links(), ty = cfg.ty().name(), "mechanism configured");
        Ok(Self { cfg, sing, state })
    }

    /// Move the crank to `theta2`, keeping the current angular velocity and
    /// acceleration.
    pub fn update(&mut self, theta2: f64) -> Result<&MechState> {
        self.update_crank(self.state.crank().at(theta2))
    }

    /// Replace the whole crank input.
    pub fn update_crank(&mut self, crank: Crank) -> Result<&MechState> {
        match MechState::solve(&self.cfg, crank) {
            Ok(state) => {
                self.state = state;
                Ok(&self.state)
            }
            Err(e) => {
                debug!(theta2 = crank.theta2, "update rejected: {e}");
                Err(e)
            }
        }
    }

    /// Configuration of the linkage.
    pub const fn config(&self) -> &MechConfig {
        &self.cfg
    }

    /// Singular crank angles of the linkage.
    pub const fn singularities(&self) -> &SingularitySet {
        &self.sing
    }

    /// Diagnostics collected at construction.
    pub fn warnings(&self) -> &[Warning] {
        &self.sing.warnings
    }

    /// Latest solved state.
    pub const fn state(&self) -> &MechState {
        &self.state
    }

    /// Return true if the linkage is a Grashof linkage.
    pub fn is_grashof(&self) -> bool {
        self.cfg.is_grashof()
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        self.cfg.ty()
    }
}
