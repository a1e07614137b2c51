use crate::{Error, Result};

/// Link lengths of a four-bar loop.
///
/// # Parameters
///
/// + Ground link `l1` (`d`)
/// + Crank link `l2` (`a`)
/// + Coupler link `l3` (`b`)
/// + Output link `l4` (`c`)
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Links {
    /// Length of the ground link
    pub l1: f64,
    /// Length of the crank link
    pub l2: f64,
    /// Length of the coupler link
    pub l3: f64,
    /// Length of the output link
    pub l4: f64,
}

impl std::fmt::Display for Links {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Self { l1, l2, l3, l4 } = self;
        write!(f, "[{l1}, {l2}, {l3}, {l4}]")
    }
}

impl Links {
    /// Create a new loop from the ground, crank, coupler and output lengths.
    pub const fn new(l1: f64, l2: f64, l3: f64, l4: f64) -> Self {
        Self { l1, l2, l3, l4 }
    }

    /// Get the planar loop `[l1, l2, l3, l4]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.l1, self.l2, self.l3, self.l4]
    }

    /// Crank length.
    pub const fn a(&self) -> f64 {
        self.l2
    }

    /// Coupler length.
    pub const fn b(&self) -> f64 {
        self.l3
    }

    /// Output link length.
    pub const fn c(&self) -> f64 {
        self.l4
    }

    /// Ground length.
    pub const fn d(&self) -> f64 {
        self.l1
    }

    /// Return true if the shortest and the longest links together are
    /// shorter than the other two, which lets the shortest link rotate fully.
    pub fn is_grashof(&self) -> bool {
        let [s, p, q, l] = sorted(self.planar_loop());
        s + l < p + q
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        FourBarTy::from_loop(self.planar_loop())
    }

    fn validate(&self) -> Result<()> {
        let names = ["l1", "l2", "l3", "l4"];
        for (name, value) in names.into_iter().zip(self.planar_loop()) {
            positive(name, value)?;
        }
        Ok(())
    }
}

/// A point rigidly attached to the coupler.
///
/// The point is located `rpa` away from the crank joint A, at angle `delta3`
/// measured from the coupler line A→B.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CouplerPoint {
    /// Distance from joint A
    pub rpa: f64,
    /// Angle from the coupler line
    pub delta3: f64,
}

impl CouplerPoint {
    /// Create a new coupler point.
    pub const fn new(rpa: f64, delta3: f64) -> Self {
        Self { rpa, delta3 }
    }

    fn validate(&self) -> Result<()> {
        if !self.rpa.is_finite() || self.rpa < 0. {
            return Err(Error::InvalidGeometry {
                name: "rpa",
                value: self.rpa,
                reason: "must be non-negative and finite",
            });
        }
        if !self.delta3.is_finite() {
            return Err(Error::InvalidGeometry {
                name: "delta3",
                value: self.delta3,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

/// Dimensionless constants of the Freudenstein loop-closure equations.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coeffs {
    /// `d / a`
    pub k1: f64,
    /// `d / c`
    pub k2: f64,
    /// `(a² - b² + c² + d²) / 2ac`
    pub k3: f64,
    /// `d / b`
    pub k4: f64,
    /// `(c² - d² - a² - b²) / 2ab`
    pub k5: f64,
}

impl Coeffs {
    fn new(links: &Links) -> Self {
        let (a, b, c, d) = (links.a(), links.b(), links.c(), links.d());
        let (a2, b2, c2, d2) = (a * a, b * b, c * c, d * d);
        Self {
            k1: d / a,
            k2: d / c,
            k3: (a2 - b2 + c2 + d2) / (2. * a * c),
            k4: d / b,
            k5: (c2 - d2 - a2 - b2) / (2. * a * b),
        }
    }
}

/// Validated configuration of a four-bar linkage.
///
/// Immutable after construction, use [`MechConfig::new()`] to build one.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MechConfig {
    links: Links,
    point: CouplerPoint,
    k: Coeffs,
}

impl MechConfig {
    /// Validate the geometry and derive the loop-closure constants.
    ///
    /// Every link length must be positive and finite, the coupler point
    /// distance must be non-negative.
    pub fn new(links: Links, point: CouplerPoint) -> Result<Self> {
        links.validate()?;
        point.validate()?;
        Ok(Self { links, point, k: Coeffs::new(&links) })
    }

    /// An example crank rocker, the textbook linkage with
    /// `[152.4, 50.8, 177.8, 228.6]` and a coupler point at `152.4∠30°`.
    pub fn example() -> Self {
        let links = Links::new(152.4, 50.8, 177.8, 228.6);
        let point = CouplerPoint::new(152.4, std::f64::consts::FRAC_PI_6);
        Self { links, point, k: Coeffs::new(&links) }
    }

    /// Link lengths.
    pub const fn links(&self) -> &Links {
        &self.links
    }

    /// Coupler point.
    pub const fn point(&self) -> &CouplerPoint {
        &self.point
    }

    /// Constants `K1..K5`.
    pub const fn coeffs(&self) -> &Coeffs {
        &self.k
    }

    /// Return true if the linkage is a Grashof linkage.
    pub fn is_grashof(&self) -> bool {
        self.links.is_grashof()
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        self.links.ty()
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(Error::InvalidGeometry { name, value, reason: "must be positive and finite" })
    }
}

fn sorted(mut v: [f64; 4]) -> [f64; 4] {
    v.sort_unstable_by(f64::total_cmp);
    v
}

/// Type of the four-bar linkage.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum FourBarTy {
    /// Grashof double crank (Drag-link)
    GCCC,
    /// Grashof crank rocker
    GCRR,
    /// Grashof double rocker
    GRCR,
    /// Grashof rocker crank
    GRRC,
    /// Non-Grashof triple rocker (ground link is the longest)
    RRR1,
    /// Non-Grashof triple rocker (crank link is the longest)
    RRR2,
    /// Non-Grashof triple rocker (coupler link is the longest)
    RRR3,
    /// Non-Grashof triple rocker (output link is the longest)
    RRR4,
    /// The loop can never close
    Invalid,
}

impl FourBarTy {
    /// Detect from four-bar loop `[l1, l2, l3, l4]`.
    ///
    /// Change-point linkages (`s + l = p + q`) are reported as triple
    /// rockers, matching [`Links::is_grashof()`].
    pub fn from_loop(fb_loop: [f64; 4]) -> Self {
        let [l1, l2, l3, _] = fb_loop;
        let [s, p, q, l] = sorted(fb_loop);
        if l > s + p + q {
            return Self::Invalid;
        }
        let pick = |d: f64, tys: [Self; 4]| {
            if d == l1 {
                tys[0]
            } else if d == l2 {
                tys[1]
            } else if d == l3 {
                tys[2]
            } else {
                tys[3]
            }
        };
        if s + l < p + q {
            pick(s, [Self::GCCC, Self::GCRR, Self::GRCR, Self::GRRC])
        } else {
            pick(l, [Self::RRR1, Self::RRR2, Self::RRR3, Self::RRR4])
        }
    }

    /// Short code of the type, e.g. `GCRR`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GCCC => "GCCC",
            Self::GCRR => "GCRR",
            Self::GRCR => "GRCR",
            Self::GRRC => "GRRC",
            Self::RRR1 => "RRR1",
            Self::RRR2 => "RRR2",
            Self::RRR3 => "RRR3",
            Self::RRR4 => "RRR4",
            Self::Invalid => "invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR | Self::GRCR | Self::GRRC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grashof_textbook_linkage() {
        let links = Links::new(152.4, 50.8, 177.8, 228.6);
        let [s, p, q, l] = sorted(links.planar_loop());
        assert_eq!([s, p, q, l], [50.8, 152.4, 177.8, 228.6]);
        assert_eq!(links.is_grashof(), s + l < p + q);
        assert!(links.is_grashof());
        assert_eq!(links.ty(), FourBarTy::GCRR);
    }

    #[test]
    fn linkage_types() {
        use FourBarTy::*;
        let cases = [
            ([80., 20., 60., 75.], GCRR),
            ([30., 60., 60., 75.], GCCC),
            ([80., 75., 25., 70.], GRCR),
            ([80., 75., 70., 25.], GRRC),
            ([85., 75., 65., 70.], RRR1),
            ([100., 80., 60., 50.], RRR1),
            ([60., 100., 80., 50.], RRR2),
            ([4., 2., 4., 2.], RRR1),
            ([10., 1., 2., 3.], Invalid),
        ];
        for (fb_loop, ty) in cases {
            let [l1, l2, l3, l4] = fb_loop;
            let links = Links::new(l1, l2, l3, l4);
            assert_eq!(links.ty(), ty, "{links}");
            if ty.is_valid() {
                assert_eq!(ty.name(), format!("{ty:?}"));
                assert_eq!(links.is_grashof(), ty.is_grashof(), "{links}");
            }
        }
    }

    #[test]
    fn coefficients() {
        let cfg = MechConfig::new(Links::new(4., 2., 4., 2.), CouplerPoint::default()).unwrap();
        let Coeffs { k1, k2, k3, k4, k5 } = *cfg.coeffs();
        assert_eq!([k1, k2, k3, k4, k5], [2., 2., 1., 1., -2.]);
    }

    #[test]
    fn reject_bad_geometry() {
        let bad = [
            Links::new(0., 1., 1., 1.),
            Links::new(1., -2., 1., 1.),
            Links::new(1., 1., f64::NAN, 1.),
            Links::new(1., 1., 1., f64::INFINITY),
        ];
        for links in bad {
            let err = MechConfig::new(links, CouplerPoint::default()).unwrap_err();
            assert!(matches!(err, Error::InvalidGeometry { .. }), "{err}");
        }
        let links = Links::new(1., 1., 1., 1.);
        let err = MechConfig::new(links, CouplerPoint::new(-1., 0.)).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { name: "rpa", .. }));
        let err = MechConfig::new(links, CouplerPoint::new(1., f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { name: "delta3", .. }));
    }

    #[test]
    fn example_is_valid() {
        let cfg = MechConfig::example();
        assert_eq!(MechConfig::new(*cfg.links(), *cfg.point()).unwrap(), cfg);
    }
}
