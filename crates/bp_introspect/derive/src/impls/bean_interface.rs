use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{ItemTrait, TraitItem};

use super::method_decl::{MethodTokens, method_decl};
use crate::derive_data::{MemberAttributes, MethodData, TypeAttributes, strip_bean_attrs};
use crate::utils::TypeScope;

/// Implements `Introspect` for `dyn Trait`.
///
/// Every method becomes an abstract declaration; the implementing classes
/// supply the invokers through `#[bean_methods]` on their trait impls.
pub(crate) fn impl_bean_interface(
    type_attrs: TypeAttributes,
    mut item: ItemTrait,
) -> syn::Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "`#[bean_interface]` does not support generic traits",
        ));
    }

    let bp_path = crate::path::bp_introspect();
    let introspect_ = crate::path::introspect_(&bp_path);
    let info_ = crate::path::info_(&bp_path);
    let macro_exports_ = crate::path::macro_exports_(&bp_path);

    let mut decls = Vec::new();
    for trait_item in &mut item.items {
        let TraitItem::Fn(method) = trait_item else {
            continue;
        };
        let attrs = MemberAttributes::parse_attrs(&method.attrs, false)?;
        strip_bean_attrs(&mut method.attrs);

        let Some(data) = MethodData::new(&method.sig, attrs, TypeScope::TRAIT) else {
            continue;
        };
        let visibility = quote! { #info_::Visibility::Public };
        let MethodTokens { decl, .. } = method_decl(&bp_path, decls.len(), &data, visibility, None);
        decls.push(decl);
    }

    let ident = &item.ident;
    let name = type_attrs
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| ident.to_string());
    let parents = &type_attrs.parents;
    let with_interfaces = (!parents.is_empty()).then(|| {
        quote! {
            .with_interfaces(#macro_exports_::Vec::from([
                #( #info_::TypeRef::of::<#parents>() ),*
            ]))
        }
    });

    let auto_register =
        super::auto_register::get_auto_register_impl(&bp_path, &quote! { dyn #ident });

    Ok(quote! {
        #item

        impl #introspect_ for dyn #ident {
            fn type_shape() -> &'static #info_::TypeShape {
                static CELL: #info_::NonGenericShapeCell = #info_::NonGenericShapeCell::new();
                CELL.get_or_init(|| {
                    #info_::TypeShape::interface::<Self>(#name)
                        .with_methods(#macro_exports_::Vec::from([#(#decls),*]))
                        #with_interfaces
                })
            }
        }

        #auto_register
    })
}
