//! Member classification.
//!
//! [`classify`] decides, for one [`RawMember`] in isolation, whether it can
//! contribute to a property and under which logical name. Rules apply in
//! order:
//!
//! 1. an explicit-ignore marker makes the member [`Ignored`](MemberRole::Ignored);
//! 2. so does storage transience;
//! 3. a `get`/`is` method with no parameters and a return value is a
//!    [`PropertyRead`](MemberRole::PropertyRead); a `set` method with exactly
//!    one parameter is a [`PropertyWrite`](MemberRole::PropertyWrite);
//! 4. a field at least as visible as
//!    [`min_field_visibility`](PlannerConfig::min_field_visibility) is a
//!    [`PlainField`](MemberRole::PlainField);
//! 5. anything else is ignored.
//!
//! Members excluded by rules 1 and 2 still report the slot and logical name
//! they would have had, so the resolver can merge their exclusion into the
//! property of that name.

use alloc::string::{String, ToString};

use crate::config::PlannerConfig;
use crate::extract::{MemberDecl, RawMember};
use crate::info::{MethodDecl, ValueType};
use crate::marker::ExclusionMarkers;

// -----------------------------------------------------------------------------
// Classification

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    PropertyRead,
    PropertyWrite,
    PlainField,
    Ignored,
}

/// The part of a property a declaration provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Read,
    Write,
    Field,
}

impl Slot {
    pub(crate) const ALL: [Slot; 3] = [Slot::Read, Slot::Write, Slot::Field];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Result of classifying one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub role: MemberRole,
    /// Property name the member maps to, if any.
    pub logical_name: Option<String>,
    /// Slot the member occupies, including for members ignored by marker.
    pub slot: Option<Slot>,
    /// Value type carried by the slot.
    pub value_type: Option<ValueType>,
    pub exclusion: ExclusionMarkers,
}

impl Classification {
    fn ignored(exclusion: ExclusionMarkers) -> Self {
        Self {
            role: MemberRole::Ignored,
            logical_name: None,
            slot: None,
            value_type: None,
            exclusion,
        }
    }
}

/// Classifies a single member.
pub fn classify(member: &RawMember, cfg: &PlannerConfig) -> Classification {
    let exclusion = member.markers();

    let (slot, logical_name, value_type) = match member.decl() {
        MemberDecl::Field(field) => (Slot::Field, field.name().to_string(), field.value_type()),
        MemberDecl::Method(method) => match accessor_shape(method) {
            Some(shape) => shape,
            None => return Classification::ignored(exclusion),
        },
    };

    let role = if exclusion.excludes() {
        MemberRole::Ignored
    } else {
        match slot {
            Slot::Read => MemberRole::PropertyRead,
            Slot::Write => MemberRole::PropertyWrite,
            Slot::Field if member.visibility().at_least(cfg.min_field_visibility) => {
                MemberRole::PlainField
            }
            Slot::Field => {
                return Classification {
                    logical_name: Some(logical_name),
                    ..Classification::ignored(exclusion)
                };
            }
        }
    };

    Classification {
        role,
        logical_name: Some(logical_name),
        slot: Some(slot),
        value_type: Some(value_type),
        exclusion,
    }
}

fn accessor_shape(method: &MethodDecl) -> Option<(Slot, String, ValueType)> {
    let params = method.params();
    if let Some(name) = property_name(method.name(), "get").or_else(|| property_name(method.name(), "is"))
        && params.is_empty()
        && let Some(returns) = method.returns()
    {
        return Some((Slot::Read, name, returns));
    }
    if let Some(name) = property_name(method.name(), "set")
        && let [param] = params
    {
        return Some((Slot::Write, name, *param));
    }
    None
}

// -----------------------------------------------------------------------------
// Naming

/// Derives the property name from an accessor name with the given prefix.
///
/// The prefix must be followed by `_` (`get_java_enum` gives `java_enum`) or
/// by an upper-case letter (`getJavaEnum` gives `javaEnum`). In the camel
/// case form the first letter is lower-cased unless the first two letters are
/// both upper case (`getURL` gives `URL`).
///
/// ```
/// use bp_introspect::classify::property_name;
///
/// assert_eq!(property_name("get_name", "get").as_deref(), Some("name"));
/// assert_eq!(property_name("isBool", "is").as_deref(), Some("bool"));
/// assert_eq!(property_name("getURL", "get").as_deref(), Some("URL"));
/// assert_eq!(property_name("settings", "set"), None);
/// assert_eq!(property_name("get", "get"), None);
/// ```
pub fn property_name(method: &str, prefix: &str) -> Option<String> {
    let rest = method.strip_prefix(prefix)?;

    if let Some(snake) = rest.strip_prefix('_') {
        return (!snake.is_empty()).then(|| snake.to_string());
    }

    let mut chars = rest.chars();
    let first = chars.next().filter(char::is_ascii_uppercase)?;
    if chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
        return Some(rest.to_string());
    }

    let mut name = String::with_capacity(rest.len());
    name.push(first.to_ascii_lowercase());
    name.push_str(&rest[first.len_utf8()..]);
    Some(name)
}
