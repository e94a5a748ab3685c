//! Parsing of `#[bean(...)]` and the `serde` attributes the front end honors.

use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, LitStr, Meta, Token, Type};

use crate::BEAN_ATTRIBUTE_NAME;

/// Marker recorded for `#[bean(ignore)]`.
const IGNORE_MARKER: &str = "Ignore";
/// Marker recorded for `#[serde(skip)]` and `#[serde(skip_serializing)]`.
const SERDE_SKIP_MARKER: &str = "SerdeSkip";

fn parse_type_list(meta: &ParseNestedMeta) -> syn::Result<Vec<Type>> {
    let content;
    syn::parenthesized!(content in meta.input);
    let types = content.parse_terminated(<Type as syn::parse::Parse>::parse, Token![,])?;
    Ok(types.into_iter().collect())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level attributes of `#[derive(Bean)]` and `#[bean_interface(...)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `name = "..."`
    pub name: Option<LitStr>,
    /// `implements(dyn A, dyn B)` on beans, `extends(dyn A)` on interfaces.
    pub parents: Vec<Type>,
}

impl TypeAttributes {
    /// Parses one nested meta item; `parent_key` is `implements` or `extends`.
    pub(crate) fn parse_meta(&mut self, meta: ParseNestedMeta, parent_key: &str) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident(parent_key) {
            self.parents.extend(parse_type_list(&meta)?);
            Ok(())
        } else {
            Err(meta.error(format!(
                "unsupported bean attribute, expected `name = \"..\"` or `{parent_key}(..)`"
            )))
        }
    }

    pub(crate) fn parse_attrs(attrs: &[Attribute], parent_key: &str) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta, parent_key))?;
            }
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// MemberAttributes

/// Attributes of a field or method.
#[derive(Default)]
pub(crate) struct MemberAttributes {
    /// `#[bean(ignore)]`
    pub ignore: bool,
    /// `#[bean(transient)]`
    pub transient: bool,
    /// `#[bean(extends)]`, fields only.
    pub extends: bool,
    /// `#[bean(marker = "..")]`
    pub markers: Vec<LitStr>,
    /// `#[serde(skip)]` or `#[serde(skip_serializing)]`
    pub serde_skip: bool,
}

impl MemberAttributes {
    /// Parses member attributes; `#[bean(extends)]` is rejected unless
    /// `allow_extends` is set.
    pub(crate) fn parse_attrs(attrs: &[Attribute], allow_extends: bool) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("ignore") {
                        this.ignore = true;
                    } else if meta.path.is_ident("transient") {
                        this.transient = true;
                    } else if meta.path.is_ident("marker") {
                        this.markers.push(meta.value()?.parse()?);
                    } else if allow_extends && meta.path.is_ident("extends") {
                        this.extends = true;
                    } else {
                        return Err(meta.error(
                            "unsupported bean attribute, expected `ignore`, `transient`, `marker = \"..\"` or `extends`",
                        ));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                this.serde_skip |= is_serde_skip(attr);
            }
        }
        Ok(this)
    }

    /// Annotation simple names recorded on the declaration.
    pub(crate) fn annotations(&self) -> Vec<String> {
        let mut annotations: Vec<String> = self.markers.iter().map(LitStr::value).collect();
        if self.ignore {
            annotations.push(IGNORE_MARKER.into());
        }
        if self.serde_skip {
            annotations.push(SERDE_SKIP_MARKER.into());
        }
        annotations
    }
}

// Malformed serde attributes are left for serde to report.
fn is_serde_skip(attr: &Attribute) -> bool {
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map(|metas| {
            metas.iter().any(|meta| {
                matches!(meta, Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_serializing"))
            })
        })
        .unwrap_or(false)
}

/// Removes `#[bean(...)]` attributes, which are not registered outside
/// of `#[derive(Bean)]`.
pub(crate) fn strip_bean_attrs(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !attr.path().is_ident(BEAN_ATTRIBUTE_NAME));
}
