use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use crate::derive_data::{MemberAttributes, TypeAttributes};
use crate::utils::is_visible;

/// A named field of a bean.
pub(crate) struct BeanField<'a> {
    pub index: usize,
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub vis: &'a syn::Visibility,
    pub attrs: MemberAttributes,
}

impl BeanField<'_> {
    /// Field name without the `r#` prefix.
    pub(crate) fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Read and write invokers are only generated for fields that can
    /// become plain-field properties.
    pub(crate) fn has_invokers(&self) -> bool {
        is_visible(self.vis) && !self.attrs.ignore && !self.attrs.transient && !self.attrs.serde_skip
    }

    /// References cannot be decoded into, so such fields are read-only.
    pub(crate) fn is_writable(&self) -> bool {
        !matches!(self.ty, Type::Reference(_))
    }
}

/// Parsed `#[derive(Bean)]` input.
pub(crate) struct BeanStruct<'a> {
    pub ident: &'a Ident,
    pub name: String,
    pub implements: Vec<Type>,
    pub fields: Vec<BeanField<'a>>,
    /// The field marked `#[bean(extends)]`.
    pub extends: Option<BeanField<'a>>,
    bp_path: syn::Path,
}

impl<'a> BeanStruct<'a> {
    pub(crate) fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Bean)]` does not support generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Some(named),
                Fields::Unit => None,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`#[derive(Bean)]` requires named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`#[derive(Bean)]` only supports structs",
                ));
            }
        };

        let type_attrs = TypeAttributes::parse_attrs(&ast.attrs, "implements")?;

        let mut fields = Vec::new();
        let mut extends: Option<BeanField<'a>> = None;
        for (index, field) in named.into_iter().flat_map(|named| &named.named).enumerate() {
            let field = BeanField {
                index,
                // Named fields always carry an ident.
                ident: field.ident.as_ref().ok_or_else(|| syn::Error::new(field.span(), "unnamed field"))?,
                ty: &field.ty,
                vis: &field.vis,
                attrs: MemberAttributes::parse_attrs(&field.attrs, true)?,
            };
            if !field.attrs.extends {
                fields.push(field);
            } else if extends.is_some() {
                return Err(syn::Error::new(
                    field.ident.span(),
                    "a bean can extend only one type",
                ));
            } else {
                extends = Some(field);
            }
        }

        Ok(Self {
            ident: &ast.ident,
            name: type_attrs
                .name
                .map(|lit| lit.value())
                .unwrap_or_else(|| ast.ident.unraw().to_string()),
            implements: type_attrs.parents,
            fields,
            extends,
            bp_path: crate::path::bp_introspect(),
        })
    }

    #[inline]
    pub(crate) fn bp_path(&self) -> &syn::Path {
        &self.bp_path
    }
}
