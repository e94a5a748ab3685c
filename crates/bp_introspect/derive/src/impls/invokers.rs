//! Free functions matching the runtime `ReadFn` and `WriteFn` signatures.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

/// `fn #name(target: &dyn Any) -> Option<Box<dyn Serialize + '_>>`
///
/// `read` is an expression of the value to serialize, evaluated with
/// `target: &#owner` in scope.
pub(crate) fn read_fn(
    bp_path: &syn::Path,
    name: &Ident,
    owner: &TokenStream,
    read: TokenStream,
) -> TokenStream {
    let macro_exports_ = crate::path::macro_exports_(bp_path);
    let erased_serde_ = crate::path::erased_serde_(bp_path);

    quote! {
        fn #name(
            target: &dyn ::core::any::Any,
        ) -> ::core::option::Option<#macro_exports_::Box<dyn #erased_serde_::Serialize + '_>> {
            let target = target.downcast_ref::<#owner>()?;
            let value: #macro_exports_::Box<dyn #erased_serde_::Serialize + '_> =
                #macro_exports_::Box::new(#read);
            ::core::option::Option::Some(value)
        }
    }
}

/// `fn #name(target: &mut dyn Any, deserializer: &mut dyn Deserializer<'_>) -> Option<Result<(), Error>>`
///
/// The decoded `value: #decoded` is stored by `write`, evaluated with
/// `target: &mut #owner` in scope.
pub(crate) fn write_fn(
    bp_path: &syn::Path,
    name: &Ident,
    owner: &TokenStream,
    decoded: &syn::Type,
    write: TokenStream,
) -> TokenStream {
    let erased_serde_ = crate::path::erased_serde_(bp_path);

    quote! {
        fn #name(
            target: &mut dyn ::core::any::Any,
            deserializer: &mut dyn #erased_serde_::Deserializer<'_>,
        ) -> ::core::option::Option<::core::result::Result<(), #erased_serde_::Error>> {
            let target = target.downcast_mut::<#owner>()?;
            ::core::option::Option::Some(
                #erased_serde_::deserialize::<#decoded>(deserializer).map(|value| {
                    #write;
                }),
            )
        }
    }
}
