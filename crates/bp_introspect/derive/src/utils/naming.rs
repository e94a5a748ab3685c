/// The accessor role a method name and arity suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessorShape {
    Getter,
    Setter,
}

// The prefix must be followed by `_` and at least one more character, or by
// an upper-case letter.
fn has_prefix(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => match rest.strip_prefix('_') {
            Some(snake) => !snake.is_empty(),
            None => rest.starts_with(|c: char| c.is_ascii_uppercase()),
        },
        None => false,
    }
}

/// Decides whether an invoker should be generated for a method.
///
/// Mirrors the runtime classifier: `get`/`is` with no parameters and a return
/// value, or `set` with exactly one parameter.
pub(crate) fn accessor_shape(name: &str, params: usize, returns: bool) -> Option<AccessorShape> {
    if (has_prefix(name, "get") || has_prefix(name, "is")) && params == 0 && returns {
        Some(AccessorShape::Getter)
    } else if has_prefix(name, "set") && params == 1 {
        Some(AccessorShape::Setter)
    } else {
        None
    }
}
