//! Multi-indices addressing series coefficients.
//!
//! A multi-index holds one non-negative exponent per variable, in the
//! series' canonical variable order. Indices compare lexicographically,
//! which refines the componentwise partial order: if `i <= k`
//! componentwise then `i` never sorts after `k`.

use std::fmt;

use smallvec::SmallVec;

/// An exponent tuple `(k_1, ..., k_d)`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MultiIndex(SmallVec<[u32; 4]>);

impl MultiIndex {
    /// Creates an index from its components.
    #[must_use]
    pub fn new(components: &[u32]) -> Self {
        Self(SmallVec::from_slice(components))
    }

    /// The all-zero index of dimension `dimension`.
    #[must_use]
    pub fn zero(dimension: usize) -> Self {
        Self(smallvec::smallvec![0; dimension])
    }

    /// Number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// The components.
    #[must_use]
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Returns true if every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&k| k == 0)
    }

    /// Returns true if every component is below `order`.
    #[must_use]
    pub fn fits(&self, order: usize) -> bool {
        self.0.iter().all(|&k| (k as usize) < order)
    }

    /// Componentwise `self - other`, or `None` if any component would be
    /// negative or the dimensions differ.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.dimension() != other.dimension() {
            return None;
        }
        self.0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| a.checked_sub(b))
            .collect::<Option<SmallVec<_>>>()
            .map(Self)
    }

    /// The last axis with a non-zero component.
    #[must_use]
    pub fn last_nonzero_axis(&self) -> Option<usize> {
        self.0.iter().rposition(|&k| k != 0)
    }

    /// The index with component `axis` lowered by one.
    ///
    /// Returns `None` if that component is already zero.
    #[must_use]
    pub fn decrement(&self, axis: usize) -> Option<Self> {
        let mut components = self.0.clone();
        let slot = components.get_mut(axis)?;
        *slot = slot.checked_sub(1)?;
        Some(Self(components))
    }

    /// Every index of `{0, ..., order - 1}^dimension`, in lexicographic order.
    ///
    /// The last axis varies fastest. For `dimension == 0` the cube holds the
    /// single empty index.
    #[must_use]
    pub fn cube(dimension: usize, order: usize) -> IndexBox {
        match u32::try_from(order).ok().and_then(|n| n.checked_sub(1)) {
            Some(max) => IndexBox::new(smallvec::smallvec![max; dimension]),
            None => IndexBox::empty(),
        }
    }

    /// Every index `i` with `0 <= i <= self` componentwise, in lexicographic
    /// order.
    #[must_use]
    pub fn lower_set(&self) -> IndexBox {
        IndexBox::new(self.0.clone())
    }
}

impl From<Vec<u32>> for MultiIndex {
    fn from(components: Vec<u32>) -> Self {
        Self(SmallVec::from_vec(components))
    }
}

impl<const N: usize> From<[u32; N]> for MultiIndex {
    fn from(components: [u32; N]) -> Self {
        Self::new(&components)
    }
}

impl fmt::Display for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, k) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Odometer over the box `{0..=upper_1} x ... x {0..=upper_d}`.
#[derive(Clone, Debug)]
pub struct IndexBox {
    upper: SmallVec<[u32; 4]>,
    next: Option<MultiIndex>,
}

impl IndexBox {
    fn new(upper: SmallVec<[u32; 4]>) -> Self {
        let start = MultiIndex::zero(upper.len());
        Self {
            upper,
            next: Some(start),
        }
    }

    fn empty() -> Self {
        Self {
            upper: SmallVec::new(),
            next: None,
        }
    }
}

impl Iterator for IndexBox {
    type Item = MultiIndex;

    fn next(&mut self) -> Option<MultiIndex> {
        let current = self.next.take()?;
        let mut successor = current.0.clone();
        for axis in (0..successor.len()).rev() {
            if successor[axis] < self.upper[axis] {
                successor[axis] += 1;
                for later in &mut successor[axis + 1..] {
                    *later = 0;
                }
                self.next = Some(MultiIndex(successor));
                break;
            }
        }
        Some(current)
    }
}
