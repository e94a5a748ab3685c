use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{FieldDecl, Introspect, MethodDecl};

// -----------------------------------------------------------------------------
// TypeRef

/// Identity of a type in a bean hierarchy.
///
/// The shape itself is reached through a function pointer, so a `TypeRef`
/// can be created before the referenced shape has been built.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    shape: fn() -> &'static TypeShape,
}

impl TypeRef {
    /// Creates the [`TypeRef`] of `T`.
    #[inline]
    pub fn of<T: Introspect + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            shape: T::type_shape,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the [`TypeShape`], building it on first access.
    #[inline]
    pub fn shape(&self) -> &'static TypeShape {
        (self.shape)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.shape().name()
    }
}

impl PartialEq for TypeRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// SuperEdge

/// Up-cast from a subtype value to its embedded supertype value.
///
/// Returns `None` if the input is not the subtype.
pub type UpcastRef = fn(&dyn Any) -> Option<&dyn Any>;

/// Mutable twin of [`UpcastRef`].
pub type UpcastMut = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// The "extends" edge of a class.
///
/// Rust models inheritance by embedding the supertype value in a field;
/// the up-casts project a subtype value onto that field so inherited
/// invokers can run on it.
#[derive(Clone, Copy)]
pub struct SuperEdge {
    ty: TypeRef,
    upcast_ref: UpcastRef,
    upcast_mut: UpcastMut,
}

impl SuperEdge {
    #[inline]
    pub fn new(ty: TypeRef, upcast_ref: UpcastRef, upcast_mut: UpcastMut) -> Self {
        Self {
            ty,
            upcast_ref,
            upcast_mut,
        }
    }

    /// The supertype.
    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn upcast_ref<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.upcast_ref)(value)
    }

    #[inline]
    pub fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.upcast_mut)(value)
    }
}

impl fmt::Debug for SuperEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SuperEdge").field(&self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeShape

/// What kind of type a [`TypeShape`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// A concrete bean type.
    Class,
    /// A trait, described through `dyn Trait`.
    Interface,
    /// A type whose members cannot be enumerated.
    Opaque,
}

/// Declared structure of a single type.
///
/// Only members declared directly on the type are listed; inherited members
/// are found by following [`interfaces`](Self::interfaces) and
/// [`super_edge`](Self::super_edge).
///
/// # Examples
///
/// ```
/// use bp_introspect::info::{FieldDecl, TypeShape, ValueType, Visibility};
///
/// struct Point {
///     pub x: i32,
/// }
///
/// let shape = TypeShape::class::<Point>("Point").with_fields(vec![
///     FieldDecl::new("x", ValueType::new::<i32>("i32")).with_visibility(Visibility::Public),
/// ]);
///
/// assert_eq!(shape.name(), "Point");
/// assert_eq!(shape.fields().len(), 1);
/// assert!(shape.super_edge().is_none());
/// ```
pub struct TypeShape {
    id: TypeId,
    name: &'static str,
    kind: ShapeKind,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    interfaces: Vec<TypeRef>,
    super_edge: Option<SuperEdge>,
}

impl TypeShape {
    fn new<T: ?Sized + Any>(name: &'static str, kind: ShapeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            kind,
            fields: Vec::new(),
            methods: Vec::new(),
            interfaces: Vec::new(),
            super_edge: None,
        }
    }

    /// Creates an empty [`ShapeKind::Class`] shape.
    #[inline]
    pub fn class<T: Any>(name: &'static str) -> Self {
        Self::new::<T>(name, ShapeKind::Class)
    }

    /// Creates an empty [`ShapeKind::Interface`] shape, usually for `dyn Trait`.
    #[inline]
    pub fn interface<T: ?Sized + Any>(name: &'static str) -> Self {
        Self::new::<T>(name, ShapeKind::Interface)
    }

    /// Creates an [`ShapeKind::Opaque`] shape.
    #[inline]
    pub fn opaque<T: ?Sized + Any>(name: &'static str) -> Self {
        Self::new::<T>(name, ShapeKind::Opaque)
    }

    /// Sets the declared fields, in declaration order.
    #[inline]
    pub fn with_fields(mut self, fields: Vec<FieldDecl>) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the declared methods, in declaration order.
    #[inline]
    pub fn with_methods(mut self, methods: Vec<MethodDecl>) -> Self {
        self.methods = methods;
        self
    }

    /// Sets the directly implemented interfaces, in declaration order.
    #[inline]
    pub fn with_interfaces(mut self, interfaces: Vec<TypeRef>) -> Self {
        self.interfaces = interfaces;
        self
    }

    #[inline]
    pub fn with_super(mut self, edge: SuperEdge) -> Self {
        self.super_edge = Some(edge);
        self
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    #[inline]
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    #[inline]
    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    #[inline]
    pub fn super_edge(&self) -> Option<&SuperEdge> {
        self.super_edge.as_ref()
    }

    /// Returns the field named `name`, if declared on this type.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the first method named `name`, if declared on this type.
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|method| method.name() == name)
    }
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeShape")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("interfaces", &self.interfaces)
            .field("super_edge", &self.super_edge)
            .finish()
    }
}
