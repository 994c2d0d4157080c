//! DOM-agnostic identifier for bound elements.
//!
//! This type intentionally uses a plain `u64` so the binding engine does not
//! depend on any particular DOM's node handle. [`Dom`](crate::Dom)
//! implementations convert at the trait boundary.

/// Opaque handle to an element inside a [`Dom`](crate::Dom).
///
/// The value has no meaning to this crate beyond identity: it keys the
/// per-element state bindings keep between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<ElementId> for u64 {
    #[inline]
    fn from(id: ElementId) -> Self {
        id.as_raw()
    }
}
