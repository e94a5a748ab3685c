use core::any::Any;

use serde::ser::{Error, Serialize, SerializeMap, Serializer};

use crate::plan::SerializationPlan;

/// A value serialized as a map of its plan entries, in plan order.
///
/// Created by [`SerializationPlan::view`].
pub struct PlanView<'a> {
    pub(crate) plan: &'a SerializationPlan,
    pub(crate) target: &'a dyn Any,
}

impl Serialize for PlanView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.plan.len()))?;
        for entry in self.plan.entries() {
            let value = entry.read(self.target).map_err(S::Error::custom)?;
            map.serialize_entry(entry.name(), &value)?;
        }
        map.end()
    }
}
