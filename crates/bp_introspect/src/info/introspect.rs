use std::sync::OnceLock;

use crate::info::TypeShape;

// -----------------------------------------------------------------------------
// Introspect

/// A type whose declared structure is known at compile time.
///
/// Implemented for structs by [`#[derive(Bean)]`](crate::derive::Bean), for
/// `dyn Trait` by [`#[bean_interface]`](crate::derive::bean_interface) and for
/// opaque types by [`impl_opaque!`](crate::impl_opaque).
///
/// # Manual implementation
///
/// ```
/// use bp_introspect::Introspect;
/// use bp_introspect::info::{FieldDecl, NonGenericShapeCell, TypeShape, ValueType};
///
/// struct Id {
///     raw: u64,
/// }
///
/// impl Introspect for Id {
///     fn type_shape() -> &'static TypeShape {
///         static CELL: NonGenericShapeCell = NonGenericShapeCell::new();
///         CELL.get_or_init(|| {
///             TypeShape::class::<Id>("Id")
///                 .with_fields(vec![FieldDecl::new("raw", ValueType::new::<u64>("u64"))])
///         })
///     }
/// }
///
/// assert_eq!(Id::type_shape().name(), "Id");
/// ```
pub trait Introspect: 'static {
    /// Returns the shape of this type, built on first access.
    fn type_shape() -> &'static TypeShape;
}

// -----------------------------------------------------------------------------
// NonGenericShapeCell

/// Container for static storage of a non-generic [`TypeShape`].
///
/// Internally, there is an [`OnceLock`], almost no additional expenses.
pub struct NonGenericShapeCell(OnceLock<TypeShape>);

impl NonGenericShapeCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored shape, generating it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeShape
    where
        F: FnOnce() -> TypeShape,
    {
        self.0.get_or_init(f)
    }
}
