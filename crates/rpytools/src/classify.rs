//! Classification of host objects before they are described.

use crate::callable::Callable;
use crate::value::Value;

/// `None` for native built-ins, the callable itself otherwise.
pub fn normalize_callable(callable: &dyn Callable) -> Option<&dyn Callable> {
    if callable.is_native() {
        None
    } else {
        Some(callable)
    }
}

/// True if the value is a text string.
pub fn is_text(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::FunctionDesc;

    #[test]
    fn native_normalizes_to_none() {
        assert!(normalize_callable(&FunctionDesc::new("abs").native()).is_none());
        let f = FunctionDesc::new("f");
        assert_eq!(normalize_callable(&f).and_then(|c| c.name()), Some("f"));
    }

    #[test]
    fn only_strings_are_text() {
        assert!(is_text(&Value::from("")));
        assert!(!is_text(&Value::Int(1)));
        assert!(!is_text(&Value::object("b'bytes'")));
    }
}
