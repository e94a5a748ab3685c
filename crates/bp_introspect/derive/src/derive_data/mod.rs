//! Parsed forms of the macro inputs.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bean_struct;
mod method_data;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{MemberAttributes, TypeAttributes, strip_bean_attrs};
pub(crate) use bean_struct::{BeanField, BeanStruct};
pub(crate) use method_data::MethodData;
