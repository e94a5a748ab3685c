use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::__macro_exports::ShapeRegistration;
use crate::hash::TypeIdMap;
use crate::info::{Introspect, TypeRef};

/// Maps [`TypeId`]s to the shapes of introspectable types.
///
/// Only needed to request plans by `TypeId` alone. With the `auto_register`
/// feature, every non-generic type with `#[derive(Bean)]` or
/// `#[bean_interface]` is collected at startup by [`ShapeRegistry::new`];
/// other types can be added with [`register`](Self::register).
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use bp_introspect::{ShapeRegistry, impl_opaque};
///
/// struct Token;
/// impl_opaque!(Token);
///
/// let registry = ShapeRegistry::empty();
/// assert!(registry.register::<Token>());
/// assert!(!registry.register::<Token>());
///
/// let ty = registry.get(TypeId::of::<Token>()).unwrap();
/// assert_eq!(ty.name(), "Token");
/// ```
pub struct ShapeRegistry {
    shapes: RwLock<TypeIdMap<TypeRef>>,
}

impl Default for ShapeRegistry {
    /// See [`ShapeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    /// Create a empty [`ShapeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            shapes: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Create a registry holding every automatically registered shape.
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut shapes = registry.write();
            for registration in inventory::iter::<ShapeRegistration> {
                let ty = registration.type_ref();
                shapes.try_insert(ty.id(), || ty);
            }
        }
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, TypeIdMap<TypeRef>> {
        self.shapes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TypeIdMap<TypeRef>> {
        self.shapes.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T`.
    ///
    /// Returns `false` if it was already registered.
    #[inline]
    pub fn register<T: Introspect + ?Sized>(&self) -> bool {
        self.register_ref(TypeRef::of::<T>())
    }

    /// Registers a [`TypeRef`].
    ///
    /// Returns `false` if it was already registered.
    pub fn register_ref(&self, ty: TypeRef) -> bool {
        if self.contains(ty.id()) {
            return false;
        }
        self.write().try_insert(ty.id(), || ty)
    }

    pub fn get(&self, id: TypeId) -> Option<TypeRef> {
        self.read().get(&id).copied()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.read().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.read().values()).finish()
    }
}
