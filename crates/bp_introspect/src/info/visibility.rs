use serde::Deserialize;

/// Declared visibility of a member, ordered from least to most permissive.
///
/// Rust visibilities map as follows:
///
/// | Rust | `Visibility` |
/// |---|---|
/// | `pub` | `Public` |
/// | `pub(crate)`, `pub(super)`, `pub(in path)` | `Protected` |
/// | inherited | `Private` |
///
/// Members of traits are always `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Protected,
    Public,
}

impl Visibility {
    /// Returns `true` if `self` is at least as visible as `min`.
    #[inline]
    pub fn at_least(self, min: Visibility) -> bool {
        self >= min
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
        }
    }
}

impl core::fmt::Display for Visibility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
