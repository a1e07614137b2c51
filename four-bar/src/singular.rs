use crate::{FourBarTy, MechConfig};
use tracing::debug;

/// Which root of the singularity equation.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Root {
    /// `cos θ2 = k + bc/ad`, coupler and output link folded onto each other
    Folded,
    /// `cos θ2 = k - bc/ad`, coupler and output link stretched in line
    Extended,
}

impl std::fmt::Display for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Folded => write!(f, "folded"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// Diagnostics which never abort a computation.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Warning {
    /// The linkage is Grashof, the singular angles assume a locking
    /// (non-Grashof) linkage and may be unreliable.
    Grashof {
        /// Type of the linkage
        ty: FourBarTy,
    },
    /// A candidate cosine is outside `(-1, 1)`, so the singular angle of
    /// this root does not exist.
    OutOfDomain {
        /// The rejected root
        root: Root,
        /// The rejected cosine value
        cos: f64,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Grashof { ty } => write!(
                f,
                "{} linkage: singular angles assume a non-Grashof linkage",
                ty.name()
            ),
            Self::OutOfDomain { root, cos } => write!(
                f,
                "no {root} singular angle: cosine {cos} is outside the arccosine domain"
            ),
        }
    }
}

/// Crank angles where the coupler and the output link become collinear, so
/// the velocity and acceleration equations lose rank.
///
/// Depends on the link lengths only. An absent angle is a normal outcome.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SingularitySet {
    /// Singular angle of the [`Root::Folded`] root
    pub folded: Option<f64>,
    /// Singular angle of the [`Root::Extended`] root
    pub extended: Option<f64>,
    /// Diagnostics of the detection
    pub warnings: Vec<Warning>,
}

impl SingularitySet {
    /// Detect the singular crank angles of a linkage.
    ///
    /// ```text
    /// cos θ2 = (a² + d² - b² - c²) / 2ad ± bc / ad
    /// ```
    pub fn detect(cfg: &MechConfig) -> Self {
        let links = cfg.links();
        let (a, b, c, d) = (links.a(), links.b(), links.c(), links.d());
        let mut warnings = Vec::new();
        if links.is_grashof() {
            warnings.push(Warning::Grashof { ty: links.ty() });
        }
        let k = (a * a + d * d - b * b - c * c) / (2. * a * d);
        let g = b * c / (a * d);
        let mut angle = |root, cos: f64| {
            if cos > -1. && cos < 1. {
                Some(cos.acos())
            } else {
                warnings.push(Warning::OutOfDomain { root, cos });
                None
            }
        };
        let folded = angle(Root::Folded, k + g);
        let extended = angle(Root::Extended, k - g);
        for w in &warnings {
            debug!(links = %links, "{w}");
        }
        Self { folded, extended, warnings }
    }

    /// Both singular angles, `[folded, extended]`.
    pub const fn angles(&self) -> [Option<f64>; 2] {
        [self.folded, self.extended]
    }

    /// Return true if no singular angle exists.
    pub const fn is_empty(&self) -> bool {
        self.folded.is_none() && self.extended.is_none()
    }
}
