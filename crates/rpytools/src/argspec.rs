//! Argument specifications and the parameter-name listing built on them.

use indexmap::IndexMap;
use tracing::debug;

use crate::callable::Callable;
use crate::classify::normalize_callable;
use crate::errors::IntrospectError;
use crate::settings::{RenderSettings, settings};
use crate::value::Value;

/// Parameter metadata of a callable.
///
/// `defaults` aligns to the trailing entries of `args`: with three args and
/// one default, the default belongs to the third arg.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgSpec {
    pub args: Vec<String>,
    pub defaults: Vec<Value>,
    /// Name of the rest-positional parameter (`*args`).
    pub varargs: Option<String>,
    /// Name of the rest-keyword parameter (`**kwargs`).
    pub varkw: Option<String>,
    pub kwonlyargs: Vec<String>,
    pub kwonlydefaults: IndexMap<String, Value>,
}

impl ArgSpec {
    /// Index of the first parameter that carries a default.
    pub fn first_default_index(&self) -> usize {
        self.args.len().saturating_sub(self.defaults.len())
    }

    /// Parameters that must be supplied by the caller.
    pub fn required(&self) -> &[String] {
        &self.args[..self.first_default_index()]
    }

    /// Trailing parameters paired with their default values.
    pub fn defaulted(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.args[self.first_default_index()..]
            .iter()
            .map(String::as_str)
            .zip(self.defaults.iter())
    }

    /// Keyword-only parameters paired with their default, if any.
    pub fn keyword_only(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.kwonlyargs
            .iter()
            .map(|name| (name.as_str(), self.kwonlydefaults.get(name)))
    }
}

/// Argument spec of a callable, or the reason it is unavailable.
pub fn try_argument_spec(callable: &dyn Callable) -> Result<ArgSpec, IntrospectError> {
    let callable = normalize_callable(callable)
        .ok_or_else(|| IntrospectError::native(callable.display_name()))?;
    callable.argument_spec()
}

/// Argument spec of a callable; `None` for native callables or when the
/// host cannot determine the signature.
pub fn get_argument_spec(callable: &dyn Callable) -> Option<ArgSpec> {
    match try_argument_spec(callable) {
        Ok(spec) => Some(spec),
        Err(err) => {
            debug!(callable = callable.display_name(), error = %err, "argument spec unavailable");
            None
        }
    }
}

/// Positional parameter names, without the implicit receiver.
pub fn get_arguments(callable: &dyn Callable) -> Option<Vec<String>> {
    get_arguments_with(callable, &settings())
}

pub fn get_arguments_with(callable: &dyn Callable, settings: &RenderSettings) -> Option<Vec<String>> {
    let mut args = get_argument_spec(callable)?.args;
    if let Some(pos) = args.iter().position(|arg| *arg == settings.receiver) {
        args.remove(pos);
    }
    Some(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::FunctionDesc;

    #[test]
    fn required_and_defaulted_split() {
        let spec = FunctionDesc::new("f")
            .arg("a")
            .arg("b")
            .arg_with_default("c", Value::Int(1))
            .argument_spec()
            .unwrap();

        assert_eq!(spec.required(), ["a".to_string(), "b".to_string()]);
        let defaulted: Vec<_> = spec.defaulted().collect();
        assert_eq!(defaulted, vec![("c", &Value::Int(1))]);
    }

    #[test]
    fn more_defaults_than_args_does_not_panic() {
        let spec = ArgSpec {
            args: vec!["a".into()],
            defaults: vec![Value::Int(1), Value::Int(2)],
            ..ArgSpec::default()
        };
        assert!(spec.required().is_empty());
        assert_eq!(spec.defaulted().count(), 1);
    }

    #[test]
    fn get_arguments_drops_receiver() {
        let method = FunctionDesc::new("fit").arg("self").arg("x").arg_with_default("y", Value::Null);
        assert_eq!(
            get_arguments(&method),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn get_arguments_honours_custom_receiver() {
        let settings = RenderSettings {
            receiver: "cls".into(),
            ..RenderSettings::default()
        };
        let method = FunctionDesc::new("create").arg("cls").arg("self");
        assert_eq!(
            get_arguments_with(&method, &settings),
            Some(vec!["self".to_string()])
        );
    }

    #[test]
    fn native_callable_has_no_spec() {
        let builtin = FunctionDesc::new("print").native();
        assert_eq!(get_argument_spec(&builtin), None);
        assert_eq!(get_arguments(&builtin), None);
    }

    #[test]
    fn unavailable_signature_is_absent() {
        let f = FunctionDesc::new("weird").signature_unavailable("unsupported callable");
        assert_eq!(get_argument_spec(&f), None);
        assert!(matches!(
            try_argument_spec(&f),
            Err(IntrospectError::SignatureUnavailable { .. })
        ));
    }

    #[test]
    fn keyword_only_pairs_defaults() {
        let spec = FunctionDesc::new("f")
            .kwonly("axis", None)
            .kwonly("keepdims", Some(Value::Bool(false)))
            .argument_spec()
            .unwrap();
        let kw: Vec<_> = spec.keyword_only().collect();
        assert_eq!(
            kw,
            vec![("axis", None), ("keepdims", Some(&Value::Bool(false)))]
        );
    }
}
