#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate through `bp_macro_utils::Manifest`, which
// falls back to `::bp_introspect` when the caller has no such dependency.
// The alias keeps that path valid inside this crate and its unit tests.
extern crate self as bp_introspect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hash;
mod marker;

pub mod cache;
pub mod classify;
pub mod config;
pub mod extract;
pub mod info;
pub mod plan;
pub mod resolve;

#[cfg(all(test, feature = "derive"))]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use cache::{PlanCache, ShapeRegistry, plan_by_id, plan_of};
pub use config::{PlannerConfig, SiblingExclusion};
pub use error::{AccessError, ConfigError, PlanError};
pub use hash::TypeIdMap;
pub use info::Introspect;
pub use marker::ExclusionMarkers;
pub use plan::{EntryKind, PlanEntry, SerializationPlan};

#[cfg(feature = "derive")]
pub use bp_introspect_derive as derive;

// -----------------------------------------------------------------------------
// Opaque types

/// Declare types whose structure cannot be introspected.
///
/// The generated [`Introspect`] implementation reports an
/// [`Opaque`](info::ShapeKind::Opaque) shape, so requesting a plan for the
/// type, or for any bean that extends or implements it, fails with
/// [`PlanError::UnreflectableType`].
///
/// ```
/// use bp_introspect::{PlanCache, PlanError, impl_opaque};
///
/// struct Handle(u64);
/// impl_opaque!(Handle);
///
/// let cache = PlanCache::default();
/// assert!(matches!(
///     cache.get::<Handle>(),
///     Err(PlanError::UnreflectableType { .. })
/// ));
/// ```
#[macro_export]
macro_rules! impl_opaque {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Introspect for $ty {
                fn type_shape() -> &'static $crate::info::TypeShape {
                    static CELL: $crate::info::NonGenericShapeCell =
                        $crate::info::NonGenericShapeCell::new();
                    CELL.get_or_init(|| {
                        $crate::info::TypeShape::opaque::<$ty>(::core::stringify!($ty))
                    })
                }
            }
        )+
    };
}
