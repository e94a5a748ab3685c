//! Type descriptor extraction.
//!
//! [`extract`] walks a root type and everything it inherits from, producing a
//! [`TypeDescriptor`]: the flattened hierarchy in precedence order and every
//! declared member as a [`RawMember`].
//!
//! The walk order is fixed: a type's own fields, then its own methods, then
//! each directly implemented interface in declaration order, then its
//! supertype. Each type is visited once, at its first encounter, so diamond
//! inheritance through interfaces produces a single node.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::hash::HashMap;
use crate::info::{FieldDecl, MethodDecl, ShapeKind, SuperEdge, TypeRef, Visibility};
use crate::marker::ExclusionMarkers;

// -----------------------------------------------------------------------------
// HierarchyNode

/// One type of the hierarchy closure.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    ty: TypeRef,
    depth: usize,
    route: Vec<&'static SuperEdge>,
    parents: Vec<usize>,
    ancestors: Vec<usize>,
}

impl HierarchyNode {
    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    /// Number of edges between the root and this type along the walk.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Super edges to follow from a root value to reach a value of this type.
    ///
    /// Empty for the root and for interfaces implemented by the root.
    #[inline]
    pub fn route(&self) -> &[&'static SuperEdge] {
        &self.route
    }

    /// Indices of the direct supertypes and interfaces.
    #[inline]
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// Indices of all transitive supertypes and interfaces, ascending.
    #[inline]
    pub fn ancestors(&self) -> &[usize] {
        &self.ancestors
    }
}

// -----------------------------------------------------------------------------
// RawMember

/// The declaration a [`RawMember`] was extracted from.
#[derive(Debug, Clone, Copy)]
pub enum MemberDecl {
    Field(&'static FieldDecl),
    Method(&'static MethodDecl),
}

/// A single declared field or method, tagged with where it was found.
#[derive(Debug, Clone)]
pub struct RawMember {
    order: usize,
    node: usize,
    decl: MemberDecl,
    markers: ExclusionMarkers,
}

impl RawMember {
    /// Position in the extraction walk.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Index of the declaring type in [`TypeDescriptor::nodes`].
    #[inline]
    pub fn node(&self) -> usize {
        self.node
    }

    #[inline]
    pub fn decl(&self) -> MemberDecl {
        self.decl
    }

    #[inline]
    pub fn markers(&self) -> ExclusionMarkers {
        self.markers
    }

    /// The declared member name (not the logical property name).
    pub fn name(&self) -> &'static str {
        match self.decl {
            MemberDecl::Field(field) => field.name(),
            MemberDecl::Method(method) => method.name(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self.decl {
            MemberDecl::Field(field) => field.visibility(),
            MemberDecl::Method(method) => method.visibility(),
        }
    }

    #[inline]
    pub fn is_field(&self) -> bool {
        matches!(self.decl, MemberDecl::Field(_))
    }

    /// Returns `true` if the member can be invoked to read a value.
    pub fn is_readable(&self) -> bool {
        match self.decl {
            MemberDecl::Field(field) => field.reader().is_some(),
            MemberDecl::Method(method) => method.reader().is_some(),
        }
    }

    /// Returns `true` if the member can be invoked to write a value.
    pub fn is_writable(&self) -> bool {
        match self.decl {
            MemberDecl::Field(field) => field.writer().is_some(),
            MemberDecl::Method(method) => method.writer().is_some(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The flattened hierarchy of a root type and all of its members.
///
/// Node `0` is the root. Nodes are in precedence order: a type's interfaces
/// and supertype come after it.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    nodes: Vec<HierarchyNode>,
    members: Vec<RawMember>,
}

impl TypeDescriptor {
    #[inline]
    pub fn root(&self) -> TypeRef {
        self.nodes[0].ty
    }

    #[inline]
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, index: usize) -> &HierarchyNode {
        &self.nodes[index]
    }

    /// All members in walk order.
    #[inline]
    pub fn members(&self) -> &[RawMember] {
        &self.members
    }

    /// Types of the closure, most-derived first.
    pub fn precedence(&self) -> impl ExactSizeIterator<Item = TypeRef> + '_ {
        self.nodes.iter().map(|node| node.ty)
    }

    /// Returns `true` if `descendant` inherits, directly or transitively,
    /// from `ancestor`.
    pub fn is_proper_descendant(&self, descendant: usize, ancestor: usize) -> bool {
        descendant != ancestor && self.nodes[descendant].ancestors.binary_search(&ancestor).is_ok()
    }
}

// -----------------------------------------------------------------------------
// Extraction

struct Walker<'a> {
    cfg: &'a PlannerConfig,
    index: HashMap<TypeId, usize>,
    nodes: Vec<HierarchyNode>,
    members: Vec<RawMember>,
}

impl Walker<'_> {
    fn visit(
        &mut self,
        ty: TypeRef,
        depth: usize,
        route: Vec<&'static SuperEdge>,
    ) -> Result<usize, PlanError> {
        if let Some(&index) = self.index.get(&ty.id()) {
            return Ok(index);
        }

        let shape = ty.shape();
        if shape.kind() == ShapeKind::Opaque {
            return Err(PlanError::UnreflectableType {
                type_name: shape.name().to_string(),
            });
        }

        let node = self.nodes.len();
        self.index.insert(ty.id(), node);
        self.nodes.push(HierarchyNode {
            ty,
            depth,
            route: route.clone(),
            parents: Vec::new(),
            ancestors: Vec::new(),
        });

        for field in shape.fields() {
            let markers =
                ExclusionMarkers::from_declaration(field.annotations(), field.is_transient(), self.cfg);
            self.push(node, MemberDecl::Field(field), markers);
        }
        for method in shape.methods() {
            let markers = ExclusionMarkers::from_declaration(
                method.annotations(),
                method.is_transient(),
                self.cfg,
            );
            self.push(node, MemberDecl::Method(method), markers);
        }

        let mut parents = Vec::with_capacity(shape.interfaces().len() + 1);
        for interface in shape.interfaces() {
            parents.push(self.visit(*interface, depth + 1, route.clone())?);
        }
        if let Some(edge) = shape.super_edge() {
            let mut route = route;
            route.push(edge);
            parents.push(self.visit(edge.ty(), depth + 1, route)?);
        }
        self.nodes[node].parents = parents;

        Ok(node)
    }

    fn push(&mut self, node: usize, decl: MemberDecl, markers: ExclusionMarkers) {
        self.members.push(RawMember {
            order: self.members.len(),
            node,
            decl,
            markers,
        });
    }

    // Transitive closure over `parents`; tolerates cycles in hand-built shapes.
    fn link_ancestors(&mut self) {
        for node in 0..self.nodes.len() {
            let mut seen = alloc::vec![false; self.nodes.len()];
            let mut stack = self.nodes[node].parents.clone();
            while let Some(next) = stack.pop() {
                if core::mem::replace(&mut seen[next], true) {
                    continue;
                }
                stack.extend_from_slice(&self.nodes[next].parents);
            }
            seen[node] = false;
            self.nodes[node].ancestors = seen
                .iter()
                .enumerate()
                .filter_map(|(index, &is_ancestor)| is_ancestor.then_some(index))
                .collect();
        }
    }
}

/// Extracts the descriptor of `root`.
///
/// Fails with [`PlanError::UnreflectableType`] if `root` or any type it
/// inherits from has an [`Opaque`](ShapeKind::Opaque) shape.
pub fn extract(root: TypeRef, cfg: &PlannerConfig) -> Result<TypeDescriptor, PlanError> {
    let mut walker = Walker {
        cfg,
        index: HashMap::default(),
        nodes: Vec::new(),
        members: Vec::new(),
    };
    walker.visit(root, 0, Vec::new())?;
    walker.link_ancestors();

    Ok(TypeDescriptor {
        nodes: walker.nodes,
        members: walker.members,
    })
}
