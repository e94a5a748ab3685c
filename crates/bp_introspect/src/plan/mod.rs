//! Serialization plans.
//!
//! A [`SerializationPlan`] is the ordered list of properties of one type,
//! each with a read path and, when a setter or writable field exists, a
//! write path. Plans are immutable once built.
//!
//! [`plan_type`] runs the whole pipeline without caching:
//! [`extract`] → [`classify`] → [`resolve`] → [`build`].

// -----------------------------------------------------------------------------
// Modules

mod entry;
mod view;

// -----------------------------------------------------------------------------
// Exports

pub use entry::{EntryKind, PlanEntry};
pub use view::PlanView;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use log::{debug, trace};

use crate::classify::classify;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::extract::{MemberDecl, TypeDescriptor, extract};
use crate::hash::HashMap;
use crate::info::{Introspect, SuperEdge, TypeRef};
use crate::resolve::{PropertyCandidate, resolve};
use entry::Route;

// -----------------------------------------------------------------------------
// SerializationPlan

/// The serializable properties of one type.
///
/// # Examples
///
/// ```
/// use bp_introspect::{PlannerConfig, SerializationPlan};
/// use bp_introspect::derive::{Bean, bean_methods};
///
/// #[derive(Bean, Default)]
/// struct User {
///     name: String,
/// }
///
/// #[bean_methods]
/// impl User {
///     pub fn get_name(&self) -> &str {
///         &self.name
///     }
///
///     pub fn set_name(&mut self, name: String) {
///         self.name = name;
///     }
/// }
///
/// let plan = SerializationPlan::of::<User>(&PlannerConfig::default()).unwrap();
/// assert_eq!(plan.names().collect::<Vec<_>>(), ["name"]);
///
/// let user = User { name: "Ada".into() };
/// assert_eq!(serde_json::to_string(&plan.view(&user)).unwrap(), r#"{"name":"Ada"}"#);
/// ```
pub struct SerializationPlan {
    ty: TypeRef,
    entries: Vec<PlanEntry>,
    index: HashMap<String, usize>,
}

impl SerializationPlan {
    /// Builds the plan of `T` without consulting any cache.
    #[inline]
    pub fn of<T: Introspect + ?Sized>(cfg: &PlannerConfig) -> Result<Self, PlanError> {
        plan_type(TypeRef::of::<T>(), cfg)
    }

    /// The type this plan describes.
    #[inline]
    pub fn type_ref(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Entries in plan order.
    #[inline]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Returns the entry of the property `name`.
    pub fn get(&self, name: &str) -> Option<&PlanEntry> {
        self.index.get(name).map(|&index| &self.entries[index])
    }

    /// Property names in plan order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(PlanEntry::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes `target` as a map of this plan's properties.
    ///
    /// `target` must be of the plan's type; otherwise serialization fails
    /// with a custom error.
    #[inline]
    pub fn view<'a>(&'a self, target: &'a dyn Any) -> PlanView<'a> {
        PlanView { plan: self, target }
    }
}

impl fmt::Debug for SerializationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializationPlan")
            .field("type", &self.ty)
            .field("entries", &self.entries)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Builder

/// Runs extraction, classification, resolution and building for `root`.
pub fn plan_type(root: TypeRef, cfg: &PlannerConfig) -> Result<SerializationPlan, PlanError> {
    let desc = extract(root, cfg)?;
    let classified: Vec<_> = desc.members().iter().map(|member| classify(member, cfg)).collect();
    let candidates = resolve(&desc, &classified, cfg)?;
    let plan = build(&desc, candidates);

    debug!(
        "built serialization plan for `{}`: {} entries from {} types",
        plan.type_name(),
        plan.len(),
        desc.nodes().len(),
    );
    Ok(plan)
}

/// Builds the plan from resolved candidates.
///
/// Excluded candidates and candidates without an invocable read path are
/// dropped. The rest are ordered by first declaration in the extraction walk,
/// ties broken by name.
pub fn build(desc: &TypeDescriptor, candidates: Vec<PropertyCandidate>) -> SerializationPlan {
    let root = desc.root();

    let mut kept: Vec<PropertyCandidate> = candidates
        .into_iter()
        .filter(|candidate| {
            if candidate.excluded {
                trace!("`{}.{}` dropped: excluded", root.name(), candidate.name);
                false
            } else if candidate.read.is_none() {
                trace!("`{}.{}` dropped: no readable path", root.name(), candidate.name);
                false
            } else {
                true
            }
        })
        .collect();
    kept.sort_by(|a, b| {
        a.first_declared
            .cmp(&b.first_declared)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut entries = Vec::with_capacity(kept.len());
    let mut index = HashMap::default();
    for candidate in kept {
        let Some(entry) = entry_of(desc, candidate) else {
            continue;
        };
        index.insert(entry.name.clone(), entries.len());
        entries.push(entry);
    }

    SerializationPlan {
        ty: root,
        entries,
        index,
    }
}

fn entry_of(desc: &TypeDescriptor, candidate: PropertyCandidate) -> Option<PlanEntry> {
    let root = desc.root();
    let route = |member: usize| -> (MemberDecl, Box<[&'static SuperEdge]>, &'static str) {
        let member = &desc.members()[member];
        let node = desc.node(member.node());
        (member.decl(), node.route().into(), node.ty().name())
    };

    let (decl, upcasts, owner) = route(candidate.read?);
    let invoker = match decl {
        MemberDecl::Field(field) => field.reader(),
        MemberDecl::Method(method) => method.reader(),
    }?;
    let reader = Route {
        invoker,
        upcasts,
        owner,
    };

    let writer = candidate.write.and_then(|member| {
        let (decl, upcasts, owner) = route(member);
        let invoker = match decl {
            MemberDecl::Field(field) => field.writer(),
            MemberDecl::Method(method) => method.writer(),
        }?;
        Some(Route {
            invoker,
            upcasts,
            owner,
        })
    });

    Some(PlanEntry {
        name: candidate.name,
        kind: candidate.kind,
        value_type: candidate.value_type?,
        visibility: candidate.visibility,
        root: (root.id(), root.name()),
        reader,
        writer,
    })
}
