//! Process-wide storage: the [`ShapeRegistry`] and the [`PlanCache`].

// -----------------------------------------------------------------------------
// Modules

mod plan_cache;
mod shape_registry;

// -----------------------------------------------------------------------------
// Exports

pub use plan_cache::{PlanCache, plan_by_id, plan_of};
pub use shape_registry::ShapeRegistry;
