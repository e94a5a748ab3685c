use alloc::vec::Vec;
use core::fmt;

use crate::info::{ReadFn, ValueType, Visibility, WriteFn};

/// Callable form of an accessor-shaped method.
///
/// Abstract declarations (interface methods) carry no invoker.
#[derive(Clone, Copy)]
pub enum Invoker {
    Read(ReadFn),
    Write(WriteFn),
}

/// A receiver-taking method declared directly on a type.
///
/// Parameters exclude the receiver.
#[derive(Clone)]
pub struct MethodDecl {
    name: &'static str,
    params: Vec<ValueType>,
    returns: Option<ValueType>,
    visibility: Visibility,
    transient: bool,
    annotations: &'static [&'static str],
    invoker: Option<Invoker>,
}

impl MethodDecl {
    /// Creates a private method without parameters, return value, annotations
    /// or invoker.
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
            returns: None,
            visibility: Visibility::Private,
            transient: false,
            annotations: &[],
            invoker: None,
        }
    }

    #[inline]
    pub fn with_params(mut self, params: Vec<ValueType>) -> Self {
        self.params = params;
        self
    }

    #[inline]
    pub fn with_returns(mut self, returns: ValueType) -> Self {
        self.returns = Some(returns);
        self
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    #[inline]
    pub fn with_annotations(mut self, annotations: &'static [&'static str]) -> Self {
        self.annotations = annotations;
        self
    }

    #[inline]
    pub fn with_reader(mut self, reader: ReadFn) -> Self {
        self.invoker = Some(Invoker::Read(reader));
        self
    }

    #[inline]
    pub fn with_writer(mut self, writer: WriteFn) -> Self {
        self.invoker = Some(Invoker::Write(writer));
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    #[inline]
    pub const fn returns(&self) -> Option<ValueType> {
        self.returns
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn is_transient(&self) -> bool {
        self.transient
    }

    #[inline]
    pub const fn annotations(&self) -> &'static [&'static str] {
        self.annotations
    }

    #[inline]
    pub const fn invoker(&self) -> Option<Invoker> {
        self.invoker
    }

    /// Returns `true` if the method has no invoker.
    #[inline]
    pub const fn is_abstract(&self) -> bool {
        self.invoker.is_none()
    }

    pub(crate) fn reader(&self) -> Option<ReadFn> {
        match self.invoker {
            Some(Invoker::Read(read)) => Some(read),
            _ => None,
        }
    }

    pub(crate) fn writer(&self) -> Option<WriteFn> {
        match self.invoker {
            Some(Invoker::Write(write)) => Some(write),
            _ => None,
        }
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("visibility", &self.visibility)
            .field("transient", &self.transient)
            .field("annotations", &self.annotations)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}
