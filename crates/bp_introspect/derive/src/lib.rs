//! See following macros:
//!
//! - [`Bean`]
//! - [`bean_methods`]
//! - [`bean_interface`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, ItemTrait, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Descriptor Derivation
///
/// `#[derive(Bean)]` implements `Introspect` for a struct with named fields.
/// The generated shape lists every field in declaration order, together with
/// the methods recorded by [`bean_methods`] blocks for the same type.
///
/// Generic structs, tuple structs, enums and unions are rejected.
///
/// ## Fields
///
/// A field is a plain-field property candidate when it is visible outside
/// of its module (`pub` is public, `pub(..)` is protected, no visibility is
/// private). Read and write invokers are generated for such fields; fields
/// of a reference type are read-only.
///
/// Member attributes:
///
/// - `#[bean(ignore)]`: records the `Ignore` marker and suppresses invokers.
/// - `#[bean(transient)]`: the field takes part in the hierarchy but never
///   becomes a property.
/// - `#[bean(marker = "Name")]`: records an arbitrary marker, matched by
///   simple name against the planner configuration.
/// - `#[serde(skip)]` and `#[serde(skip_serializing)]` record `SerdeSkip`.
///
/// ```rust, ignore
/// #[derive(Bean)]
/// struct User {
///     pub name: String,
///     #[bean(ignore)]
///     pub password: String,
///     #[bean(marker = "XmlTransient")]
///     pub cache: Vec<u8>,
/// }
/// ```
///
/// ## Hierarchy
///
/// A single field marked `#[bean(extends)]` embeds the supertype. Its type
/// must implement `Introspect`; invokers declared on the supertype run on
/// the embedded value.
///
/// Interfaces are listed at the type level and must be `#[bean_interface]`
/// traits implemented by the struct:
///
/// ```rust, ignore
/// #[derive(Bean)]
/// #[bean(name = "Admin", implements(dyn Named, dyn Audited))]
/// struct Admin {
///     #[bean(extends)]
///     user: User,
///     pub level: u8,
/// }
/// ```
///
/// ## Auto Registration
///
/// With the `auto_register` feature the type is submitted to the default
/// `ShapeRegistry`, so plans can be looked up by `TypeId` alone.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::BeanStruct::from_input(&ast).and_then(|bean| impls::impl_bean(&bean)) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Records the methods of an impl block as declared members of its self type.
///
/// Applies to inherent impls and to trait impls. Methods taking a receiver
/// are recorded in source order; associated functions are skipped. Getter
/// and setter invokers are generated for non-generic methods shaped like
/// accessors:
///
/// - `get_x`/`getX` and `is_x`/`isX` taking `&self` and returning a value;
/// - `set_x`/`setX` taking `&self` or `&mut self` and one argument that is
///   not a mutable reference.
///
/// Methods of trait impls are public; inherent methods keep their own
/// visibility. `#[bean(ignore)]`, `#[bean(transient)]` and
/// `#[bean(marker = "..")]` work as on fields.
///
/// Methods with type or const parameters, or whose signature mentions
/// `impl Trait`, are recorded without parameter and return types and never
/// become accessors. In trait impls `Self::Assoc` is read as
/// `<Type as Trait>::Assoc`; in inherent impls it leaves the method untyped
/// as well.
///
/// ```rust, ignore
/// #[bean_methods]
/// impl User {
///     pub fn get_display_name(&self) -> String {
///         format!("@{}", self.name)
///     }
///
///     pub fn set_display_name(&mut self, name: &str) {
///         self.name = name.trim_start_matches('@').into();
///     }
/// }
/// ```
///
/// A type may have any number of `#[bean_methods]` blocks. Blocks are
/// merged by module path and source position.
#[proc_macro_attribute]
pub fn bean_methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[bean_methods]` takes no arguments",
        )
        .into_compile_error()
        .into();
    }

    let item = parse_macro_input!(item as ItemImpl);

    impls::impl_bean_methods(item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Introspect` for `dyn Trait`.
///
/// The trait's methods become abstract declarations: they decide naming and
/// exclusion but are never invoked through the interface. Signatures that
/// mention `Self` or have type parameters are recorded untyped.
///
/// Default method bodies are not invoked either. A class exposes a default
/// getter only by writing it out in its `#[bean_methods]` trait impl;
/// otherwise the property has no readable path and is left out of the plan.
///
/// Arguments:
///
/// - `name = "..."`: the interface name, defaults to the trait ident.
/// - `extends(dyn A, dyn B)`: super-interfaces, each a `#[bean_interface]`.
///
/// ```rust, ignore
/// #[bean_interface(extends(dyn Named))]
/// trait Audited: Named {
///     fn get_audit_id(&self) -> u64;
///
///     #[bean(marker = "XmlTransient")]
///     fn get_audit_trail(&self) -> Vec<String>;
/// }
/// ```
#[proc_macro_attribute]
pub fn bean_interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut type_attrs = derive_data::TypeAttributes::default();
    let parser = syn::meta::parser(|meta| type_attrs.parse_meta(meta, "extends"));
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(item as ItemTrait);

    impls::impl_bean_interface(type_attrs, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
