//! Shadow and override resolution.
//!
//! Declarations of one logical property are grouped per [`Slot`]. Inside a
//! slot, a declaration is *overridden* when a proper descendant of its
//! declaring type re-declares the same member with the same value type; the
//! remaining declarations are *effective*. Exclusion is merged from effective
//! declarations only, so an interface method marked as ignored stops
//! excluding the property once the implementing class re-declares it
//! without the marker.
//!
//! Accessors take precedence over fields: a field only supplies the read and
//! write paths of a property that has no accessor declarations at all.

use alloc::string::String;
use alloc::vec::Vec;

use crate::classify::{Classification, Slot};
use crate::config::{PlannerConfig, SiblingExclusion};
use crate::error::PlanError;
use crate::extract::TypeDescriptor;
use crate::hash::HashMap;
use crate::info::{ValueType, Visibility};

// -----------------------------------------------------------------------------
// PropertyCandidate

/// Where the read and write paths of a property come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Accessor,
    Field,
}

/// A property assembled from all of its declarations in the hierarchy.
///
/// `read` and `write` index into [`TypeDescriptor::members`]; either may be
/// absent.
#[derive(Debug, Clone)]
pub struct PropertyCandidate {
    pub name: String,
    pub kind: PropertyKind,
    pub value_type: Option<ValueType>,
    pub read: Option<usize>,
    pub write: Option<usize>,
    /// Sticky (or first-declared) exclusion merged over the hierarchy.
    pub excluded: bool,
    /// Most permissive visibility among the declarations.
    pub visibility: Visibility,
    /// Walk position of the earliest declaration.
    pub first_declared: usize,
}

// -----------------------------------------------------------------------------
// Grouping

#[derive(Debug)]
struct Decl {
    member: usize,
    node: usize,
    member_name: &'static str,
    value_type: ValueType,
    excluded: bool,
    invocable: bool,
}

#[derive(Debug)]
struct Group {
    name: String,
    first_declared: usize,
    visibility: Visibility,
    slots: [Vec<Decl>; 3],
}

/// Resolves the classified members of `desc` into property candidates.
///
/// `classified` holds one [`Classification`] per member of `desc`, in the
/// same order. Candidates are returned in order of first declaration.
pub fn resolve(
    desc: &TypeDescriptor,
    classified: &[Classification],
    cfg: &PlannerConfig,
) -> Result<Vec<PropertyCandidate>, PlanError> {
    let mut index: HashMap<String, usize> = HashMap::default();
    let mut groups: Vec<Group> = Vec::new();

    for (member, class) in desc.members().iter().zip(classified) {
        let (Some(slot), Some(name), Some(value_type)) =
            (class.slot, class.logical_name.as_ref(), class.value_type)
        else {
            continue;
        };

        let group = *index.entry(name.clone()).or_insert_with(|| {
            groups.push(Group {
                name: name.clone(),
                first_declared: member.order(),
                visibility: Visibility::Private,
                slots: [Vec::new(), Vec::new(), Vec::new()],
            });
            groups.len() - 1
        });
        let group = &mut groups[group];

        group.visibility = group.visibility.max(member.visibility());
        group.slots[slot.index()].push(Decl {
            member: member.order(),
            node: member.node(),
            member_name: member.name(),
            value_type,
            excluded: class.exclusion.excludes(),
            invocable: match slot {
                Slot::Read | Slot::Field => member.is_readable(),
                Slot::Write => member.is_writable(),
            },
        });
    }

    groups
        .into_iter()
        .map(|group| resolve_group(desc, group, cfg))
        .collect()
}

fn effective_decls<'a>(desc: &TypeDescriptor, decls: &'a [Decl]) -> Vec<&'a Decl> {
    decls
        .iter()
        .filter(|decl| {
            !decls.iter().any(|other| {
                other.member_name == decl.member_name
                    && other.value_type == decl.value_type
                    && desc.is_proper_descendant(other.node, decl.node)
            })
        })
        .collect()
}

fn resolve_group(
    desc: &TypeDescriptor,
    group: Group,
    cfg: &PlannerConfig,
) -> Result<PropertyCandidate, PlanError> {
    let effective: [Vec<&Decl>; 3] =
        Slot::ALL.map(|slot| effective_decls(desc, &group.slots[slot.index()]));

    let excluded = match cfg.sibling_exclusion {
        SiblingExclusion::Sticky => effective.iter().flatten().any(|decl| decl.excluded),
        SiblingExclusion::FirstDeclared => effective
            .iter()
            .any(|decls| decls.first().is_some_and(|decl| decl.excluded)),
    };

    let has_accessors =
        !group.slots[Slot::Read.index()].is_empty() || !group.slots[Slot::Write.index()].is_empty();
    let (kind, readers, writers) = if has_accessors {
        (
            PropertyKind::Accessor,
            &effective[Slot::Read.index()],
            &effective[Slot::Write.index()],
        )
    } else {
        let fields = &effective[Slot::Field.index()];
        (PropertyKind::Field, fields, fields)
    };

    // First invocable, non-excluded declaration in precedence order.
    let pick = |decls: &[&Decl]| {
        decls
            .iter()
            .find(|decl| decl.invocable && !decl.excluded)
            .map(|decl| decl.member)
    };
    let read = pick(readers.as_slice());
    let write = match kind {
        PropertyKind::Accessor => pick(writers.as_slice()),
        PropertyKind::Field => read.filter(|&member| desc.members()[member].is_writable()),
    };

    let writers: &[&Decl] = match kind {
        PropertyKind::Accessor => writers,
        PropertyKind::Field => &[],
    };
    let mut types = readers
        .iter()
        .chain(writers)
        .filter(|decl| !decl.excluded)
        .map(|decl| decl.value_type);
    let value_type = types.next();

    if !excluded
        && let Some(first) = value_type
        && let Some(second) = types.find(|ty| *ty != first)
    {
        return Err(PlanError::AmbiguousProperty {
            type_name: desc.root().name(),
            property: group.name,
            first: first.name(),
            second: second.name(),
        });
    }

    Ok(PropertyCandidate {
        name: group.name,
        kind,
        value_type,
        read,
        write,
        excluded,
        visibility: group.visibility,
        first_declared: group.first_declared,
    })
}

#[cfg(test)]
mod tests {
    use core::any::Any;

    use super::{PropertyCandidate, PropertyKind, resolve};
    use crate::classify::classify;
    use crate::config::{PlannerConfig, SiblingExclusion};
    use crate::error::PlanError;
    use crate::extract::{TypeDescriptor, extract};
    use crate::info::{
        FieldDecl, Introspect, MethodDecl, NonGenericShapeCell, TypeRef, TypeShape, ValueType,
        Visibility,
    };

    macro_rules! shape {
        ($ty:ty => $shape:expr) => {
            impl Introspect for $ty {
                fn type_shape() -> &'static TypeShape {
                    static CELL: NonGenericShapeCell = NonGenericShapeCell::new();
                    CELL.get_or_init(|| $shape)
                }
            }
        };
    }

    // Invokers are only checked for presence here.
    fn read(_: &dyn Any) -> Option<Box<dyn erased_serde::Serialize + '_>> {
        None
    }

    fn write(
        _: &mut dyn Any,
        _: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Option<Result<(), erased_serde::Error>> {
        None
    }

    fn string() -> ValueType {
        ValueType::new::<String>("String")
    }

    fn int() -> ValueType {
        ValueType::new::<i32>("i32")
    }

    fn getter(name: &'static str, returns: ValueType) -> MethodDecl {
        MethodDecl::new(name)
            .with_returns(returns)
            .with_visibility(Visibility::Public)
            .with_reader(read)
    }

    fn setter(name: &'static str, param: ValueType) -> MethodDecl {
        MethodDecl::new(name)
            .with_params(vec![param])
            .with_visibility(Visibility::Public)
            .with_writer(write)
    }

    struct Labeled;
    struct Titled;
    struct Card;
    struct TitledCard;
    struct Override;
    struct Retyped;
    struct Mixed;
    struct Clash;

    shape!(Labeled => TypeShape::interface::<Labeled>("Labeled")
        .with_methods(vec![getter("get_label", string()).with_annotations(&["JsonIgnore"])]));
    shape!(Titled => TypeShape::interface::<Titled>("Titled")
        .with_methods(vec![getter("get_label", string())]));
    shape!(Card => TypeShape::class::<Card>("Card")
        .with_interfaces(vec![TypeRef::of::<Labeled>(), TypeRef::of::<Titled>()]));
    shape!(TitledCard => TypeShape::class::<TitledCard>("TitledCard")
        .with_interfaces(vec![TypeRef::of::<Titled>(), TypeRef::of::<Labeled>()]));
    shape!(Override => TypeShape::class::<Override>("Override")
        .with_methods(vec![getter("get_label", string()), setter("set_label", string())])
        .with_interfaces(vec![TypeRef::of::<Labeled>()]));
    shape!(Retyped => TypeShape::class::<Retyped>("Retyped")
        .with_methods(vec![getter("get_label", int())])
        .with_interfaces(vec![TypeRef::of::<Labeled>()]));
    shape!(Mixed => TypeShape::class::<Mixed>("Mixed")
        .with_fields(vec![
            FieldDecl::new("label", string())
                .with_visibility(Visibility::Public)
                .with_reader(read)
                .with_writer(write),
            FieldDecl::new("count", int())
                .with_visibility(Visibility::Public)
                .with_reader(read),
            FieldDecl::new("size", int())
                .with_visibility(Visibility::Public)
                .with_reader(read)
                .with_writer(write),
        ])
        .with_methods(vec![getter("get_label", string())]));
    shape!(Clash => TypeShape::class::<Clash>("Clash")
        .with_methods(vec![getter("get_size", string()), setter("set_size", int())]));

    fn candidates<T: Introspect>(
        cfg: &PlannerConfig,
    ) -> Result<(TypeDescriptor, Vec<PropertyCandidate>), PlanError> {
        let desc = extract(TypeRef::of::<T>(), cfg)?;
        let classified: Vec<_> = desc.members().iter().map(|m| classify(m, cfg)).collect();
        let candidates = resolve(&desc, &classified, cfg)?;
        Ok((desc, candidates))
    }

    fn first_declared() -> PlannerConfig {
        PlannerConfig {
            sibling_exclusion: SiblingExclusion::FirstDeclared,
            ..PlannerConfig::default()
        }
    }

    #[test]
    fn sticky_sibling_exclusion() {
        let cfg = PlannerConfig::default();
        for (_, candidates) in [candidates::<Card>(&cfg), candidates::<TitledCard>(&cfg)]
            .map(Result::unwrap)
        {
            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].name, "label");
            assert!(candidates[0].excluded);
        }
    }

    #[test]
    fn first_declared_sibling_exclusion() {
        let cfg = first_declared();

        let (_, card) = candidates::<Card>(&cfg).unwrap();
        assert!(card[0].excluded);

        let (desc, titled) = candidates::<TitledCard>(&cfg).unwrap();
        assert!(!titled[0].excluded);
        let read = titled[0].read.unwrap();
        assert_eq!(desc.node(desc.members()[read].node()).ty().name(), "Titled");
    }

    #[test]
    fn unmarked_override_lifts_exclusion() {
        let (desc, candidates) = candidates::<Override>(&PlannerConfig::default()).unwrap();
        let label = &candidates[0];

        assert!(!label.excluded);
        assert_eq!(label.kind, PropertyKind::Accessor);
        assert_eq!(desc.members()[label.read.unwrap()].node(), 0);
        assert_eq!(desc.members()[label.write.unwrap()].name(), "set_label");
        assert_eq!(label.value_type, Some(string()));
        assert_eq!(label.first_declared, 0);
    }

    #[test]
    fn retyped_redeclaration_is_no_override() {
        let (_, candidates) = candidates::<Retyped>(&PlannerConfig::default()).unwrap();
        assert!(candidates[0].excluded);
    }

    #[test]
    fn accessors_win_over_fields() {
        let (desc, candidates) = candidates::<Mixed>(&PlannerConfig::default()).unwrap();
        let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["label", "count", "size"]);

        let label = &candidates[0];
        assert_eq!(label.kind, PropertyKind::Accessor);
        assert!(!desc.members()[label.read.unwrap()].is_field());
        // The writable field does not complete an accessor property.
        assert_eq!(label.write, None);

        let count = &candidates[1];
        assert_eq!(count.kind, PropertyKind::Field);
        assert_eq!(count.read, Some(1));
        assert_eq!(count.write, None);

        let size = &candidates[2];
        assert_eq!((size.read, size.write), (Some(2), Some(2)));
        assert_eq!(size.visibility, Visibility::Public);
    }

    #[test]
    fn conflicting_types_are_ambiguous() {
        let err = candidates::<Clash>(&PlannerConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PlanError::AmbiguousProperty {
                type_name: "Clash",
                property: "size".into(),
                first: "String",
                second: "i32",
            }
        );
    }
}
