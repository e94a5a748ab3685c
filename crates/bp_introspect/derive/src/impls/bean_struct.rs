use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Type;

use crate::derive_data::{BeanField, BeanStruct};
use crate::utils::{TypeScope, ValueTypeExpr};

// Read and write invokers of one field, plus its `FieldDecl` expression.
fn field_tokens(
    bp_path: &syn::Path,
    owner: &TokenStream,
    self_ty: &Type,
    field: &BeanField,
) -> syn::Result<(TokenStream, TokenStream)> {
    let info_ = crate::path::info_(bp_path);

    let name = field.name();
    let value_type = ValueTypeExpr::new(field.ty, TypeScope::new(self_ty, None))
        .ok_or_else(|| {
            syn::Error::new_spanned(field.ty, "`#[derive(Bean)]` cannot name this field type")
        })?
        .to_value_type(&info_);
    let visibility = crate::utils::visibility_tokens(&info_, field.vis);
    let transient = field.attrs.transient;
    let annotations = field.attrs.annotations();

    let mut invokers = crate::utils::empty();
    let mut with_invokers = crate::utils::empty();
    if field.has_invokers() {
        let ident = field.ident;
        let read_fn = format_ident!("__bp_read_{}", field.index);
        invokers.extend(super::invokers::read_fn(
            bp_path,
            &read_fn,
            owner,
            quote! { &target.#ident },
        ));
        with_invokers.extend(quote! { .with_reader(#read_fn) });

        if field.is_writable() {
            let write_fn = format_ident!("__bp_write_{}", field.index);
            invokers.extend(super::invokers::write_fn(
                bp_path,
                &write_fn,
                owner,
                field.ty,
                quote! { target.#ident = value },
            ));
            with_invokers.extend(quote! { .with_writer(#write_fn) });
        }
    }

    let decl = quote! {
        #info_::FieldDecl::new(#name, #value_type)
            .with_visibility(#visibility)
            .with_transient(#transient)
            .with_annotations(&[#(#annotations),*])
            #with_invokers
    };

    Ok((invokers, decl))
}

/// Implements `Introspect` for a `#[derive(Bean)]` struct.
pub(crate) fn impl_bean(bean: &BeanStruct) -> syn::Result<TokenStream> {
    let bp_path = bean.bp_path();
    let introspect_ = crate::path::introspect_(bp_path);
    let info_ = crate::path::info_(bp_path);
    let macro_exports_ = crate::path::macro_exports_(bp_path);

    let ident = bean.ident;
    let owner = quote! { #ident };
    let self_ty: Type = syn::parse_quote!(#ident);
    let name = &bean.name;

    let mut invokers = crate::utils::empty();
    let mut field_decls = Vec::with_capacity(bean.fields.len());
    for field in &bean.fields {
        let (field_invokers, decl) = field_tokens(bp_path, &owner, &self_ty, field)?;
        invokers.extend(field_invokers);
        field_decls.push(decl);
    }

    let implements = &bean.implements;
    let assert_implements = (!implements.is_empty()).then(|| {
        quote! {
            #[allow(dead_code)]
            fn __bp_assert_implements(value: &#ident) {
                #( let _: &(#implements) = value; )*
            }
        }
    });
    let with_interfaces = (!implements.is_empty()).then(|| {
        quote! {
            .with_interfaces(#macro_exports_::Vec::from([
                #( #info_::TypeRef::of::<#implements>() ),*
            ]))
        }
    });

    let (upcasts, with_super) = match &bean.extends {
        Some(base) => {
            let field = base.ident;
            let base_ty = base.ty;
            let upcasts = quote! {
                fn __bp_upcast_ref(
                    value: &dyn ::core::any::Any,
                ) -> ::core::option::Option<&dyn ::core::any::Any> {
                    let value = value.downcast_ref::<#ident>()?;
                    let base: &dyn ::core::any::Any = &value.#field;
                    ::core::option::Option::Some(base)
                }

                fn __bp_upcast_mut(
                    value: &mut dyn ::core::any::Any,
                ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                    let value = value.downcast_mut::<#ident>()?;
                    let base: &mut dyn ::core::any::Any = &mut value.#field;
                    ::core::option::Option::Some(base)
                }
            };
            let with_super = quote! {
                .with_super(#info_::SuperEdge::new(
                    #info_::TypeRef::of::<#base_ty>(),
                    __bp_upcast_ref,
                    __bp_upcast_mut,
                ))
            };
            (upcasts, with_super)
        }
        None => (crate::utils::empty(), crate::utils::empty()),
    };

    let auto_register = super::auto_register::get_auto_register_impl(bp_path, &owner);

    Ok(quote! {
        const _: () = {
            #invokers

            #upcasts

            #assert_implements

            impl #introspect_ for #ident {
                fn type_shape() -> &'static #info_::TypeShape {
                    static CELL: #info_::NonGenericShapeCell = #info_::NonGenericShapeCell::new();
                    CELL.get_or_init(|| {
                        #info_::TypeShape::class::<Self>(#name)
                            .with_fields(#macro_exports_::Vec::from([#(#field_decls),*]))
                            .with_methods(#macro_exports_::declared_methods_of(
                                ::core::any::TypeId::of::<Self>(),
                            ))
                            #with_interfaces
                            #with_super
                    })
                }
            }
        };

        #auto_register
    })
}
