use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::MethodData;
use crate::utils::AccessorShape;

/// How generated invokers reach the method.
pub(crate) struct CallTarget {
    /// The concrete type, used for the downcast.
    pub owner: TokenStream,
    /// `<Owner>` or `<Owner as Trait>`.
    pub qualified: TokenStream,
}

/// Tokens of one `MethodDecl` plus the invoker function it refers to.
pub(crate) struct MethodTokens {
    pub decl: TokenStream,
    pub invoker: TokenStream,
}

/// Generates the `MethodDecl` expression for `method`.
///
/// Without a `target`, the declaration is abstract.
pub(crate) fn method_decl(
    bp_path: &syn::Path,
    index: usize,
    method: &MethodData,
    visibility: TokenStream,
    target: Option<&CallTarget>,
) -> MethodTokens {
    let info_ = crate::path::info_(bp_path);
    let macro_exports_ = crate::path::macro_exports_(bp_path);

    let name = &method.name;
    let params = method.params.iter().map(|param| param.to_value_type(&info_));
    let returns = method.returns.as_ref().map(|returns| {
        let returns = returns.to_value_type(&info_);
        quote! { .with_returns(#returns) }
    });
    let transient = method.attrs.transient;
    let annotations = method.attrs.annotations();

    let mut invoker = crate::utils::empty();
    let mut with_invoker = crate::utils::empty();
    if let Some(target) = target
        && let Some(shape) = method.invoker_shape()
    {
        let fn_name = format_ident!("__bp_invoke_{}", index);
        let ident = &method.ident;
        let CallTarget { owner, qualified } = target;
        match shape {
            AccessorShape::Getter => {
                invoker = super::invokers::read_fn(
                    bp_path,
                    &fn_name,
                    owner,
                    quote! { #qualified::#ident(target) },
                );
                with_invoker = quote! { .with_reader(#fn_name) };
            }
            AccessorShape::Setter => {
                let param = &method.params[0];
                let decoded = &param.ty;
                let arg = if param.borrowed {
                    quote! { &value }
                } else {
                    quote! { value }
                };
                invoker = super::invokers::write_fn(
                    bp_path,
                    &fn_name,
                    owner,
                    decoded,
                    quote! { let _ = #qualified::#ident(target, #arg) },
                );
                with_invoker = quote! { .with_writer(#fn_name) };
            }
        }
    }

    let decl = quote! {
        #info_::MethodDecl::new(#name)
            .with_params(#macro_exports_::Vec::from([#(#params),*]))
            #returns
            .with_visibility(#visibility)
            .with_transient(#transient)
            .with_annotations(&[#(#annotations),*])
            #with_invoker
    };

    MethodTokens { decl, invoker }
}
