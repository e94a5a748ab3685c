//! Items used by code generated in `bp_introspect_derive`. Not public API.

use core::any::TypeId;

use crate::info::{MethodDecl, TypeRef};

// -----------------------------------------------------------------------------
// Re-exports

pub use alloc::boxed::Box;
pub use alloc::vec::Vec;
pub use erased_serde;
pub use inventory;

// -----------------------------------------------------------------------------
// Method blocks

/// Methods collected from one `#[bean_methods]` impl block.
///
/// A type may have several blocks (an inherent impl and trait impls); they
/// are merged in source order by [`declared_methods_of`].
pub struct MethodBlock {
    owner: fn() -> TypeId,
    module: &'static str,
    line: u32,
    column: u32,
    methods: fn() -> Vec<MethodDecl>,
}

impl MethodBlock {
    #[inline]
    pub const fn new(
        owner: fn() -> TypeId,
        module: &'static str,
        line: u32,
        column: u32,
        methods: fn() -> Vec<MethodDecl>,
    ) -> Self {
        Self {
            owner,
            module,
            line,
            column,
            methods,
        }
    }
}

inventory::collect!(MethodBlock);

/// All methods declared by `#[bean_methods]` blocks of the type `owner`.
///
/// Blocks are ordered by module path, then by source position, so the
/// result does not depend on link order.
pub fn declared_methods_of(owner: TypeId) -> Vec<MethodDecl> {
    let mut blocks: Vec<&MethodBlock> = inventory::iter::<MethodBlock>
        .into_iter()
        .filter(|block| (block.owner)() == owner)
        .collect();
    blocks.sort_by_key(|block| (block.module, block.line, block.column));
    blocks.into_iter().flat_map(|block| (block.methods)()).collect()
}

// -----------------------------------------------------------------------------
// Shape registration

/// A shape submitted for the [`ShapeRegistry`](crate::ShapeRegistry).
pub struct ShapeRegistration(fn() -> TypeRef);

impl ShapeRegistration {
    #[inline]
    pub const fn new(type_ref: fn() -> TypeRef) -> Self {
        Self(type_ref)
    }

    #[inline]
    pub fn type_ref(&self) -> TypeRef {
        (self.0)()
    }
}

inventory::collect!(ShapeRegistration);
