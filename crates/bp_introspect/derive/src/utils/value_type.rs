use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::visit_mut::{self, VisitMut};
use syn::{
    ExprPath, Lifetime, ParenthesizedGenericArguments, Path, QSelf, Type, TypeBareFn, TypePath,
    TypeReference, parse_quote,
};

// -----------------------------------------------------------------------------
// Normalization

/// Where a declared type was written.
///
/// Generated code names value types from a free function outside the impl
/// or trait, so `Self` has to be spelled out.
#[derive(Clone, Copy)]
pub(crate) struct TypeScope<'a> {
    /// The concrete `Self`; `None` inside a trait definition.
    pub self_ty: Option<&'a Type>,
    /// The implemented trait, which qualifies `Self::Assoc` paths.
    pub trait_: Option<&'a Path>,
}

impl TypeScope<'static> {
    /// Inside a trait definition, where `Self` has no concrete spelling.
    pub(crate) const TRAIT: Self = Self {
        self_ty: None,
        trait_: None,
    };
}

impl<'a> TypeScope<'a> {
    #[inline]
    pub(crate) const fn new(self_ty: &'a Type, trait_: Option<&'a Path>) -> Self {
        Self {
            self_ty: Some(self_ty),
            trait_,
        }
    }
}

// Replaces every lifetime with `'static` and `Self` with the concrete type, so
// the result can name a `TypeId` outside of the original impl. Anything that
// cannot be named there clears `nameable`.
struct StaticType<'a> {
    scope: TypeScope<'a>,
    nameable: bool,
    // Depth of `fn(..)` and `Fn(..)` argument lists being visited.
    in_fn_args: usize,
}

impl StaticType<'_> {
    // `Self::Rest` becomes `<SelfTy as Trait>::Rest`.
    fn qualify_self(&mut self, qself: &mut Option<QSelf>, path: &mut Path) {
        if qself.is_some() || path.segments.len() < 2 || path.segments[0].ident != "Self" {
            return;
        }
        let (Some(self_ty), Some(trait_)) = (self.scope.self_ty, self.scope.trait_) else {
            self.nameable = false;
            return;
        };
        let rest = path.segments.iter().skip(1);
        let qualified: TypePath = parse_quote!(<#self_ty as #trait_>#(::#rest)*);
        *qself = qualified.qself;
        *path = qualified.path;
    }
}

impl VisitMut for StaticType<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        match ty {
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self") => {
                match self.scope.self_ty {
                    Some(self_ty) => *ty = self_ty.clone(),
                    None => self.nameable = false,
                }
            }
            Type::ImplTrait(_) | Type::Infer(_) => self.nameable = false,
            _ => visit_mut::visit_type_mut(self, ty),
        }
    }

    fn visit_type_path_mut(&mut self, ty: &mut TypePath) {
        visit_mut::visit_type_path_mut(self, ty);
        self.qualify_self(&mut ty.qself, &mut ty.path);
    }

    fn visit_expr_path_mut(&mut self, expr: &mut ExprPath) {
        visit_mut::visit_expr_path_mut(self, expr);
        self.qualify_self(&mut expr.qself, &mut expr.path);
    }

    fn visit_type_reference_mut(&mut self, reference: &mut TypeReference) {
        if reference.lifetime.is_none() && self.in_fn_args == 0 {
            reference.lifetime = Some(Lifetime::new("'static", Span::call_site()));
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }

    // Elided lifetimes of `fn(&T)` and `Fn(&T)` are higher-ranked and stay
    // as written. A named one belongs to the method.
    fn visit_type_bare_fn_mut(&mut self, bare_fn: &mut TypeBareFn) {
        let mut lifetimes = NamedLifetimes(false);
        lifetimes.visit_type_bare_fn_mut(bare_fn);
        self.nameable &= !lifetimes.0;

        self.in_fn_args += 1;
        visit_mut::visit_type_bare_fn_mut(self, bare_fn);
        self.in_fn_args -= 1;
    }

    fn visit_parenthesized_generic_arguments_mut(
        &mut self,
        args: &mut ParenthesizedGenericArguments,
    ) {
        let mut lifetimes = NamedLifetimes(false);
        lifetimes.visit_parenthesized_generic_arguments_mut(args);
        self.nameable &= !lifetimes.0;

        self.in_fn_args += 1;
        visit_mut::visit_parenthesized_generic_arguments_mut(self, args);
        self.in_fn_args -= 1;
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        if self.in_fn_args == 0 {
            *lifetime = Lifetime::new("'static", lifetime.apostrophe);
        }
    }
}

// Set when a lifetime other than `'static` is written out.
struct NamedLifetimes(bool);

impl VisitMut for NamedLifetimes {
    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        self.0 |= lifetime.ident != "static";
    }
}

fn static_type(ty: &Type, scope: TypeScope<'_>) -> Option<Type> {
    let mut ty = ty.clone();
    let mut visitor = StaticType {
        scope,
        nameable: true,
        in_fn_args: 0,
    };
    visitor.visit_type_mut(&mut ty);
    visitor.nameable.then_some(ty)
}

// Collapses the spacing of `TokenStream::to_string` (`Vec < String >`) into
// the usual source form (`Vec<String>`).
fn display(ty: &Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    for (index, &c) in chars.iter().enumerate() {
        if c != ' ' {
            out.push(c);
            continue;
        }
        let prev = index.checked_sub(1).map(|i| chars[i]);
        let next = chars.get(index + 1).copied();
        let keep = matches!(prev, Some(',')) || (prev.is_some_and(is_word) && next.is_some_and(is_word));
        if keep {
            out.push(' ');
        }
    }
    out
}

/// The owned value type of a declared type plus its display name.
///
/// Borrowed forms are normalized: `&str` to `String`, `&[T]` to `Vec<T>`
/// and `&T` to `T`.
pub(crate) struct ValueTypeExpr {
    /// Owned form of the type, with lifetimes set to `'static`.
    pub ty: Type,
    pub name: String,
    /// The declared type was a shared reference.
    pub borrowed: bool,
    /// The declared type was a mutable reference.
    pub borrowed_mut: bool,
}

impl ValueTypeExpr {
    /// Returns `None` when the type cannot be named outside `scope`: it
    /// mentions `impl Trait`, or a `Self` that the scope cannot spell out.
    pub(crate) fn new(declared: &Type, scope: TypeScope<'_>) -> Option<Self> {
        match declared {
            Type::Paren(inner) => Self::new(&inner.elem, scope),
            Type::Group(inner) => Self::new(&inner.elem, scope),
            Type::Reference(reference) => {
                let mut owned = Self::owned(&reference.elem, scope)?;
                owned.borrowed = reference.mutability.is_none();
                owned.borrowed_mut = reference.mutability.is_some();
                Some(owned)
            }
            other => {
                let ty = static_type(other, scope)?;
                Some(Self {
                    name: display(&ty).replace("'static ", ""),
                    ty,
                    borrowed: false,
                    borrowed_mut: false,
                })
            }
        }
    }

    fn owned(elem: &Type, scope: TypeScope<'_>) -> Option<Self> {
        let (ty, name): (Type, String) = match elem {
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => {
                (parse_quote!(::std::string::String), "String".into())
            }
            Type::Slice(slice) => {
                let item = static_type(&slice.elem, scope)?;
                let name = format!("Vec<{}>", display(&item).replace("'static ", ""));
                (parse_quote!(::std::vec::Vec<#item>), name)
            }
            other => {
                let ty = static_type(other, scope)?;
                (ty.clone(), display(&ty).replace("'static ", ""))
            }
        };
        Some(Self {
            ty,
            name,
            borrowed: false,
            borrowed_mut: false,
        })
    }

    /// `ValueType::new::<T>("T")`.
    pub(crate) fn to_value_type(&self, info_: &TokenStream) -> TokenStream {
        let ty = &self.ty;
        let name = &self.name;
        quote! {
            #info_::ValueType::new::<#ty>(#name)
        }
    }
}

/// `true` for `()`, which never describes a property value.
pub(crate) fn is_unit(ty: &Type) -> bool {
    match ty {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        Type::Paren(inner) => is_unit(&inner.elem),
        Type::Group(inner) => is_unit(&inner.elem),
        _ => false,
    }
}
