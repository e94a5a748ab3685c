use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{ImplItem, ItemImpl};

use super::method_decl::{CallTarget, MethodTokens, method_decl};
use crate::derive_data::{MemberAttributes, MethodData, strip_bean_attrs};
use crate::utils::TypeScope;

/// Records the methods of an impl block and submits them for the self type.
///
/// The impl block itself is emitted unchanged apart from the removal of
/// `#[bean(..)]` attributes.
pub(crate) fn impl_bean_methods(mut item: ItemImpl) -> syn::Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "`#[bean_methods]` does not support generic impl blocks",
        ));
    }

    let bp_path = crate::path::bp_introspect();
    let info_ = crate::path::info_(&bp_path);
    let macro_exports_ = crate::path::macro_exports_(&bp_path);

    let self_ty = (*item.self_ty).clone();
    let trait_path = match &item.trait_ {
        Some((Some(bang), _, _)) => {
            return Err(syn::Error::new(
                bang.span(),
                "`#[bean_methods]` does not support negative impls",
            ));
        }
        Some((None, path, _)) => Some(path.clone()),
        None => None,
    };
    let qualified = match &trait_path {
        Some(path) => quote! { <#self_ty as #path> },
        None => quote! { <#self_ty> },
    };
    let target = CallTarget {
        owner: quote! { #self_ty },
        qualified,
    };
    let is_trait_impl = trait_path.is_some();
    let scope = TypeScope::new(&self_ty, trait_path.as_ref());

    let mut invokers = crate::utils::empty();
    let mut decls = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = MemberAttributes::parse_attrs(&method.attrs, false)?;
        strip_bean_attrs(&mut method.attrs);

        let Some(data) = MethodData::new(&method.sig, attrs, scope) else {
            continue;
        };
        // Trait methods are as visible as the trait itself.
        let visibility = if is_trait_impl {
            quote! { #info_::Visibility::Public }
        } else {
            crate::utils::visibility_tokens(&info_, &method.vis)
        };

        let MethodTokens { decl, invoker } =
            method_decl(&bp_path, decls.len(), &data, visibility, Some(&target));
        invokers.extend(invoker);
        decls.push(decl);
    }

    Ok(quote! {
        #item

        const _: () = {
            #invokers

            fn __bp_owner() -> ::core::any::TypeId {
                ::core::any::TypeId::of::<#self_ty>()
            }

            fn __bp_methods() -> #macro_exports_::Vec<#info_::MethodDecl> {
                #macro_exports_::Vec::from([#(#decls),*])
            }

            #macro_exports_::inventory::submit! {
                #macro_exports_::MethodBlock::new(
                    __bp_owner,
                    ::core::module_path!(),
                    ::core::line!(),
                    ::core::column!(),
                    __bp_methods,
                )
            }
        };
    })
}
