#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use bp_introspect as introspect;

pub use bp_introspect::{Introspect, PlanCache, SerializationPlan};
pub use bp_introspect::{plan_by_id, plan_of};

#[cfg(feature = "derive")]
pub use bp_introspect::derive::{Bean, bean_interface, bean_methods};
