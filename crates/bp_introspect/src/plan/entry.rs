use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::{Any, TypeId};
use core::fmt;

use crate::error::AccessError;
use crate::info::{ReadFn, SuperEdge, ValueType, Visibility, WriteFn};
use crate::resolve::PropertyKind;

/// Where an entry's accessors come from: accessor methods or a plain field.
pub type EntryKind = PropertyKind;

// -----------------------------------------------------------------------------
// Route

/// An invoker plus the up-casts leading from the plan's root type to the
/// declaring type of the invoker.
#[derive(Clone)]
pub(crate) struct Route<F> {
    pub(crate) invoker: F,
    pub(crate) upcasts: Box<[&'static SuperEdge]>,
    pub(crate) owner: &'static str,
}

// -----------------------------------------------------------------------------
// PlanEntry

/// One property of a [`SerializationPlan`](crate::SerializationPlan).
#[derive(Clone)]
pub struct PlanEntry {
    pub(crate) name: String,
    pub(crate) kind: EntryKind,
    pub(crate) value_type: ValueType,
    pub(crate) visibility: Visibility,
    pub(crate) root: (TypeId, &'static str),
    pub(crate) reader: Route<ReadFn>,
    pub(crate) writer: Option<Route<WriteFn>>,
}

impl PlanEntry {
    /// The logical property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The most permissive visibility among the property's declarations.
    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Name of the type declaring the read path.
    #[inline]
    pub fn read_owner(&self) -> &'static str {
        self.reader.owner
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    fn check_target(&self, actual: TypeId) -> Result<(), AccessError> {
        if actual == self.root.0 {
            Ok(())
        } else {
            Err(AccessError::TargetMismatch {
                expected: self.root.1,
            })
        }
    }

    fn unreachable(&self, owner: &'static str) -> AccessError {
        AccessError::Unreachable {
            property: self.name.to_string(),
            owner,
        }
    }

    /// Reads the property of `target`.
    ///
    /// The returned value borrows from `target` and can be handed to any
    /// `serde` serializer.
    pub fn read<'a>(
        &self,
        target: &'a dyn Any,
    ) -> Result<Box<dyn erased_serde::Serialize + 'a>, AccessError> {
        self.check_target((*target).type_id())?;

        let route = &self.reader;
        let mut value = target;
        for edge in route.upcasts.iter() {
            value = edge
                .upcast_ref(value)
                .ok_or_else(|| self.unreachable(route.owner))?;
        }
        (route.invoker)(value).ok_or_else(|| self.unreachable(route.owner))
    }

    /// Decodes a value from `deserializer` and writes it into `target`.
    pub fn write(
        &self,
        target: &mut dyn Any,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<(), AccessError> {
        let Some(route) = &self.writer else {
            return Err(AccessError::ReadOnly {
                property: self.name.to_string(),
            });
        };
        self.check_target((*target).type_id())?;

        let mut value = target;
        for edge in route.upcasts.iter() {
            value = edge
                .upcast_mut(value)
                .ok_or_else(|| self.unreachable(route.owner))?;
        }
        (route.invoker)(value, deserializer).ok_or_else(|| self.unreachable(route.owner))??;
        Ok(())
    }

    /// [`write`](Self::write) with any `serde` deserializer.
    ///
    /// ```ignore
    /// let mut de = serde_json::Deserializer::from_str("\"Ada\"");
    /// entry.write_from(&mut bean, &mut de)?;
    /// ```
    pub fn write_from<'de, D>(&self, target: &mut dyn Any, deserializer: D) -> Result<(), AccessError>
    where
        D: serde::Deserializer<'de>,
    {
        let mut erased = <dyn erased_serde::Deserializer<'de>>::erase(deserializer);
        self.write(target, &mut erased)
    }
}

impl fmt::Debug for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("visibility", &self.visibility)
            .field("read_owner", &self.reader.owner)
            .field("writable", &self.writer.is_some())
            .finish()
    }
}
