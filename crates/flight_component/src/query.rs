//! Component sets for query matching.
//!
//! A [`ComponentSet`] records which component kinds an entity holds, or which
//! kinds a query requires. An entity matches a query when its set is a
//! superset of the query's set.

use crate::component::ComponentKind;

/// A small bit set of [`ComponentKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComponentSet(u8);

impl ComponentSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of kinds. Duplicates are ignored.
    #[must_use]
    pub fn of(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |set, kind| set.with(*kind))
    }

    /// Returns a copy of this set with `kind` added.
    #[must_use]
    pub const fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Adds `kind` to the set.
    pub fn insert(&mut self, kind: ComponentKind) {
        self.0 |= kind.bit();
    }

    /// Returns `true` if `kind` is in the set.
    #[must_use]
    pub const fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if every kind in `required` is also in `self`.
    ///
    /// The empty set is contained in every set.
    #[must_use]
    pub const fn contains_all(self, required: ComponentSet) -> bool {
        self.0 & required.0 == required.0
    }

    /// Number of kinds in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set holds no kinds.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the kinds in the set, in [`ComponentKind::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ComponentKind> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}
