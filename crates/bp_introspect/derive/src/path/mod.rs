//! Paths into the runtime crate used by generated code.
//!
//! Kept in one place so that reorganizing `bp_introspect` only touches
//! this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `bp_introspect` crate.
///
/// 1. For crates that depend on `bp_introspect`, `::bp_introspect` is returned.
/// 2. For crates that depend on `bean_plan`, `::bean_plan::introspect` is returned.
/// 3. For other situations, `::bp_introspect` is returned, but this may be incorrect.
///
/// The cost of this function is relatively high (reading and parsing the
/// caller's `Cargo.toml` behind a lock), so the path is obtained once per
/// macro invocation and passed around.
pub(crate) fn bp_introspect() -> syn::Path {
    bp_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bp_introspect"))
}

// -----------------------------------------------------------------------------
// Internal API

#[inline(always)]
pub(crate) fn introspect_(bp_path: &syn::Path) -> TokenStream {
    quote! {
        #bp_path::Introspect
    }
}

#[inline(always)]
pub(crate) fn info_(bp_path: &syn::Path) -> TokenStream {
    quote! {
        #bp_path::info
    }
}

#[inline(always)]
pub(crate) fn macro_exports_(bp_path: &syn::Path) -> TokenStream {
    quote! {
        #bp_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn erased_serde_(bp_path: &syn::Path) -> TokenStream {
    quote! {
        #bp_path::__macro_exports::erased_serde
    }
}
