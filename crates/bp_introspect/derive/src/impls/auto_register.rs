use proc_macro2::TokenStream;
use quote::quote;

/// Submit the shape of `ty` to the shape registry.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(bp_path: &syn::Path, ty: &TokenStream) -> TokenStream {
    let info_ = crate::path::info_(bp_path);
    let macro_exports_ = crate::path::macro_exports_(bp_path);

    quote! {
        #macro_exports_::inventory::submit! {
            #macro_exports_::ShapeRegistration::new(#info_::TypeRef::of::<#ty>)
        }
    }
}

/// Submit the shape of `ty` to the shape registry.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &syn::Path, _: &TokenStream) -> TokenStream {
    crate::utils::empty()
}
