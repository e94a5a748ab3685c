use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// The type of a property value, as seen by a getter, a setter or a field.
///
/// Equality only compares the [`TypeId`]; the name is kept for diagnostics.
///
/// The front end normalizes borrowed forms before creating a `ValueType`
/// (`&T` becomes `T`, `&str` becomes `String` and `&[T]` becomes `Vec<T>`),
/// so a getter returning `&str` and a setter taking `String` describe the
/// same value type.
///
/// # Examples
///
/// ```
/// use bp_introspect::info::ValueType;
///
/// let a = ValueType::new::<String>("String");
/// let b = ValueType::of::<String>();
/// assert_eq!(a, b);
/// assert!(a.is::<String>());
/// assert_eq!(a.name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Creates a [`ValueType`] for `T` with the given display name.
    #[inline]
    pub fn new<T: ?Sized + Any>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    /// Creates a [`ValueType`] for `T` named by [`core::any::type_name`].
    #[inline]
    pub fn of<T: ?Sized + Any>() -> Self {
        Self::new::<T>(core::any::type_name::<T>())
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ValueType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
