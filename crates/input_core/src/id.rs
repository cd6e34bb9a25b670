//! Host-assigned identifier for text fields.

use std::fmt;

/// Opaque handle for a text field owned by the host.
///
/// The value carries no meaning inside the engine; hosts map their own widget
/// handles onto it at the boundary:
///
/// ```ignore
/// impl From<WidgetHandle> for FieldId {
///     fn from(handle: WidgetHandle) -> Self {
///         FieldId::from_raw(handle.index() as u64)
///     }
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FieldId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}
