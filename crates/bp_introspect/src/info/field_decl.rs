use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::info::{ValueType, Visibility};

// -----------------------------------------------------------------------------
// Invokers

/// Reads a property from a value of the declaring type.
///
/// Returns `None` if the value is not of the declaring type.
pub type ReadFn = fn(&dyn Any) -> Option<Box<dyn erased_serde::Serialize + '_>>;

/// Decodes a property value and stores it into a value of the declaring type.
///
/// Returns `None` if the value is not of the declaring type, otherwise the
/// outcome of decoding.
pub type WriteFn = fn(
    &mut dyn Any,
    &mut dyn erased_serde::Deserializer<'_>,
) -> Option<Result<(), erased_serde::Error>>;

// -----------------------------------------------------------------------------
// FieldDecl

/// A field declared directly on a type.
///
/// # Examples
///
/// ```
/// use bp_introspect::info::{FieldDecl, ValueType, Visibility};
///
/// let field = FieldDecl::new("name", ValueType::new::<String>("String"))
///     .with_visibility(Visibility::Protected)
///     .with_annotations(&["XmlTransient"]);
///
/// assert_eq!(field.name(), "name");
/// assert_eq!(field.visibility(), Visibility::Protected);
/// assert!(!field.is_transient());
/// assert!(field.reader().is_none());
/// ```
#[derive(Clone)]
pub struct FieldDecl {
    name: &'static str,
    value_type: ValueType,
    visibility: Visibility,
    transient: bool,
    annotations: &'static [&'static str],
    reader: Option<ReadFn>,
    writer: Option<WriteFn>,
}

impl FieldDecl {
    /// Creates a private, non-transient field without annotations or invokers.
    #[inline]
    pub fn new(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            value_type,
            visibility: Visibility::Private,
            transient: false,
            annotations: &[],
            reader: None,
            writer: None,
        }
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the field as excluded from storage.
    #[inline]
    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    /// Sets the simple names of the annotations (markers) on this field.
    #[inline]
    pub fn with_annotations(mut self, annotations: &'static [&'static str]) -> Self {
        self.annotations = annotations;
        self
    }

    #[inline]
    pub fn with_reader(mut self, reader: ReadFn) -> Self {
        self.reader = Some(reader);
        self
    }

    #[inline]
    pub fn with_writer(mut self, writer: WriteFn) -> Self {
        self.writer = Some(writer);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
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
    pub const fn reader(&self) -> Option<ReadFn> {
        self.reader
    }

    #[inline]
    pub const fn writer(&self) -> Option<WriteFn> {
        self.writer
    }
}

impl fmt::Debug for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDecl")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("visibility", &self.visibility)
            .field("transient", &self.transient)
            .field("annotations", &self.annotations)
            .field("readable", &self.reader.is_some())
            .field("writable", &self.writer.is_some())
            .finish()
    }
}
