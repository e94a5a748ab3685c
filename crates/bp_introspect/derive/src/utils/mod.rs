// -----------------------------------------------------------------------------
// Modules

mod naming;
mod value_type;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use naming::{AccessorShape, accessor_shape};
pub(crate) use value_type::{TypeScope, ValueTypeExpr, is_unit};

use proc_macro2::TokenStream;
use quote::quote;

/// Empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Tokens of the runtime `Visibility` for a Rust visibility.
///
/// `pub` is `Public`, any restricted `pub(..)` is `Protected`, and the
/// inherited visibility is `Private`.
pub(crate) fn visibility_tokens(info_: &TokenStream, vis: &syn::Visibility) -> TokenStream {
    match vis {
        syn::Visibility::Public(_) => quote! { #info_::Visibility::Public },
        syn::Visibility::Restricted(_) => quote! { #info_::Visibility::Protected },
        syn::Visibility::Inherited => quote! { #info_::Visibility::Private },
    }
}

/// Whether a visibility is anything but inherited.
#[inline]
pub(crate) fn is_visible(vis: &syn::Visibility) -> bool {
    !matches!(vis, syn::Visibility::Inherited)
}
