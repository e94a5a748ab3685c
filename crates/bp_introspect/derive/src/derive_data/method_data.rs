use syn::ext::IdentExt;
use syn::{FnArg, GenericParam, Ident, ReturnType, Signature};

use crate::derive_data::MemberAttributes;
use crate::utils::{AccessorShape, TypeScope, ValueTypeExpr, accessor_shape, is_unit};

/// How a method takes `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`, `self: Box<Self>` and the like.
    Other,
}

/// A receiver-taking method of a `#[bean_methods]` impl or a
/// `#[bean_interface]` trait.
pub(crate) struct MethodData {
    pub ident: Ident,
    pub name: String,
    pub receiver: Receiver,
    pub params: Vec<ValueTypeExpr>,
    pub returns: Option<ValueTypeExpr>,
    pub attrs: MemberAttributes,
    /// Typed, without generics, not `unsafe`, not `async`.
    plain: bool,
}

impl MethodData {
    /// Returns `None` for associated functions without a receiver.
    ///
    /// A signature with type or const parameters, or with a type that cannot
    /// be named outside `scope`, is recorded without parameter and return
    /// types, so it never shapes up as an accessor.
    pub(crate) fn new(
        sig: &Signature,
        attrs: MemberAttributes,
        scope: TypeScope<'_>,
    ) -> Option<Self> {
        let receiver = sig.receiver()?;
        let receiver = match (&receiver.reference, receiver.colon_token) {
            (Some(_), None) if receiver.mutability.is_some() => Receiver::RefMut,
            (Some(_), None) => Receiver::Ref,
            _ => Receiver::Other,
        };

        let typed = Self::typed_signature(sig, scope);
        let plain = typed.is_some()
            && sig.generics.params.is_empty()
            && sig.unsafety.is_none()
            && sig.asyncness.is_none();
        let (params, returns) = typed.unwrap_or_default();

        Some(Self {
            ident: sig.ident.clone(),
            name: sig.ident.unraw().to_string(),
            receiver,
            params,
            returns,
            attrs,
            plain,
        })
    }

    fn typed_signature(
        sig: &Signature,
        scope: TypeScope<'_>,
    ) -> Option<(Vec<ValueTypeExpr>, Option<ValueTypeExpr>)> {
        let generic = sig
            .generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)));
        if generic {
            return None;
        }

        let params = sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(pat) => Some(ValueTypeExpr::new(&pat.ty, scope)),
                FnArg::Receiver(_) => None,
            })
            .collect::<Option<Vec<_>>>()?;

        let returns = match &sig.output {
            ReturnType::Type(_, ty) if !is_unit(ty) => Some(ValueTypeExpr::new(ty, scope)?),
            _ => None,
        };

        Some((params, returns))
    }

    /// The invoker to generate, if any.
    pub(crate) fn invoker_shape(&self) -> Option<AccessorShape> {
        if !self.plain || self.attrs.ignore {
            return None;
        }
        match accessor_shape(&self.name, self.params.len(), self.returns.is_some())? {
            AccessorShape::Getter if self.receiver == Receiver::Ref => Some(AccessorShape::Getter),
            AccessorShape::Setter
                if self.receiver != Receiver::Other && !self.params[0].borrowed_mut =>
            {
                Some(AccessorShape::Setter)
            }
            _ => None,
        }
    }
}
