// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod bean_interface;
mod bean_methods;
mod bean_struct;
mod invokers;
mod method_decl;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use bean_interface::impl_bean_interface;
pub(crate) use bean_methods::impl_bean_methods;
pub(crate) use bean_struct::impl_bean;
