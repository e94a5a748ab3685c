//! Static descriptors of bean types.
//!
//! A [`TypeShape`] is what the compile-time front end knows about one type:
//! its declared fields and methods, the interfaces it implements and the type
//! it extends. Shapes are built once, on first access, and live for the rest
//! of the process; the planner only ever reads them.
//!
//! Shapes are normally generated by [`#[derive(Bean)]`](crate::derive::Bean),
//! [`#[bean_methods]`](crate::derive::bean_methods) and
//! [`#[bean_interface]`](crate::derive::bean_interface), but hand-written
//! [`Introspect`] implementations are equally valid input.

// -----------------------------------------------------------------------------
// Modules

mod field_decl;
mod introspect;
mod method_decl;
mod shape;
mod value_type;
mod visibility;

// -----------------------------------------------------------------------------
// Exports

pub use field_decl::{FieldDecl, ReadFn, WriteFn};
pub use introspect::{Introspect, NonGenericShapeCell};
pub use method_decl::{Invoker, MethodDecl};
pub use shape::{ShapeKind, SuperEdge, TypeRef, TypeShape, UpcastMut, UpcastRef};
pub use value_type::ValueType;
pub use visibility::Visibility;
