/// Assembly branch of the linkage.
///
/// For a given crank angle the loop-closure equation has two solutions, the
/// open and the crossed (closed) configuration of the coupler and output
/// link.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Branch {
    /// Open configuration (minus root of the half-angle quadratic)
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "Open"))]
    Open = 1,
    /// Closed (crossed) configuration (plus root of the half-angle quadratic)
    #[cfg_attr(feature = "serde", serde(alias = "Closed"))]
    Closed = 2,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name_lowercase())
    }
}

impl Branch {
    /// Both branches, open first.
    pub const ALL: [Self; 2] = [Self::Open, Self::Closed];

    /// Get the lowercase name.
    pub const fn name_lowercase(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Check if the branch is the open one.
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Switch to the other branch.
    pub fn switch(&mut self) {
        *self = self.other();
    }

    /// The other branch.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// A value for each assembly branch.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pair<T> {
    /// Value of the open branch
    pub open: T,
    /// Value of the closed branch
    pub closed: T,
}

impl<T> Pair<T> {
    /// Create a new pair.
    pub const fn new(open: T, closed: T) -> Self {
        Self { open, closed }
    }

    /// Build the pair by evaluating `f` on each branch, open first.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Branch) -> T,
    {
        let open = f(Branch::Open);
        Self { open, closed: f(Branch::Closed) }
    }

    /// Fallible version of [`Pair::from_fn()`]. Stops at the first error.
    pub fn try_from_fn<E, F>(mut f: F) -> Result<Self, E>
    where
        F: FnMut(Branch) -> Result<T, E>,
    {
        let open = f(Branch::Open)?;
        Ok(Self { open, closed: f(Branch::Closed)? })
    }

    /// Get the value of a branch.
    pub const fn get(&self, branch: Branch) -> &T {
        match branch {
            Branch::Open => &self.open,
            Branch::Closed => &self.closed,
        }
    }

    /// Get the mutable value of a branch.
    pub fn get_mut(&mut self, branch: Branch) -> &mut T {
        match branch {
            Branch::Open => &mut self.open,
            Branch::Closed => &mut self.closed,
        }
    }

    /// Exchange the two branches.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self { open: self.closed, closed: self.open }
    }

    /// Iterate over the branches and their values, open first.
    pub fn iter(&self) -> impl Iterator<Item = (Branch, &T)> {
        [(Branch::Open, &self.open), (Branch::Closed, &self.closed)].into_iter()
    }
}

impl<T> std::ops::Index<Branch> for Pair<T> {
    type Output = T;

    fn index(&self, branch: Branch) -> &Self::Output {
        self.get(branch)
    }
}

impl<T> std::ops::IndexMut<Branch> for Pair<T> {
    fn index_mut(&mut self, branch: Branch) -> &mut Self::Output {
        self.get_mut(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_branch() {
        let mut b = Branch::Open;
        b.switch();
        assert_eq!(b, Branch::Closed);
        assert_eq!(b.other(), Branch::Open);
        assert_eq!(Branch::Open.to_string(), "open");
    }

    #[test]
    fn pair_index() {
        let mut p = Pair::from_fn(|b| b as u8);
        assert_eq!(p[Branch::Open], 1);
        assert_eq!(p[Branch::Closed], 2);
        p[Branch::Closed] = 5;
        assert_eq!(p.swapped(), Pair::new(5, 1));
        let order = p.iter().map(|(b, _)| b).collect::<Vec<_>>();
        assert_eq!(order, Branch::ALL);
    }

    #[test]
    fn pair_try_from_fn_stops_at_error() {
        let mut seen = Vec::new();
        let r = Pair::<u8>::try_from_fn(|b| {
            seen.push(b);
            if b.is_open() {
                Err(b)
            } else {
                Ok(0)
            }
        });
        assert_eq!(r, Err(Branch::Open));
        assert_eq!(seen, [Branch::Open]);
    }
}
