//! Assembly of a callable's R argument list, following transparent wrappers.

use tracing::{debug, trace};

use crate::argspec::{ArgSpec, try_argument_spec};
use crate::callable::Callable;
use crate::errors::IntrospectError;
use crate::render::render_default_with;
use crate::settings::{RenderSettings, settings};

const ELLIPSIS: &str = "...";

/// Parenthesized parameter list of `callable` in target syntax, e.g.
/// `(x, axis = 0L, ...)`. `None` when the signature is unavailable.
pub fn render_signature(callable: &dyn Callable) -> Option<String> {
    render_signature_with(callable, &settings())
}

pub fn render_signature_with(callable: &dyn Callable, settings: &RenderSettings) -> Option<String> {
    match try_render_signature_with(callable, settings) {
        Ok(signature) => Some(signature),
        Err(err) => {
            debug!(callable = callable.display_name(), error = %err, "signature unavailable");
            None
        }
    }
}

pub fn try_render_signature(callable: &dyn Callable) -> Result<String, IntrospectError> {
    try_render_signature_with(callable, &settings())
}

/// Like [`render_signature_with`], but reports why rendering failed.
///
/// Transparent wrappers are followed to the callable they forward to, at
/// most `settings.max_unwrap_depth` times.
#[tracing::instrument(
    name = "rpytools.signature",
    level = "debug",
    skip_all,
    fields(callable = callable.display_name())
)]
pub fn try_render_signature_with(
    callable: &dyn Callable,
    settings: &RenderSettings,
) -> Result<String, IntrospectError> {
    let mut current = callable;
    let mut depth = 0;
    loop {
        let spec = try_argument_spec(current)?;
        let Some(target) = current.wrapped() else {
            return Ok(assemble(&spec, settings));
        };
        if depth == settings.max_unwrap_depth {
            return Err(IntrospectError::UnwrapDepthExceeded { depth });
        }
        depth += 1;
        trace!(
            wrapper = current.display_name(),
            target = target.display_name(),
            depth,
            "unwrapping transparent wrapper"
        );
        current = target;
    }
}

fn assemble(spec: &ArgSpec, settings: &RenderSettings) -> String {
    let mut tokens: Vec<String> = spec
        .required()
        .iter()
        .filter(|arg| **arg != settings.receiver)
        .cloned()
        .collect();

    tokens.extend(
        spec.defaulted()
            .map(|(name, default)| format!("{name} = {}", render_default_with(default, settings))),
    );

    if spec.varargs.is_some() {
        tokens.push(ELLIPSIS.to_string());
    }
    if settings.keyword_only {
        tokens.extend(spec.keyword_only().map(|(name, default)| match default {
            Some(default) => format!("{name} = {}", render_default_with(default, settings)),
            None => name.to_string(),
        }));
    }
    if spec.varkw.is_some() {
        tokens.push(ELLIPSIS.to_string());
    }

    format!("({})", tokens.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::FunctionDesc;
    use crate::value::Value;

    #[test]
    fn empty_signature() {
        assert_eq!(render_signature(&FunctionDesc::new("f")).as_deref(), Some("()"));
    }

    #[test]
    fn required_defaults_and_rest() {
        let f = FunctionDesc::new("f")
            .arg("a")
            .arg_with_default("b", Value::Int(1))
            .varargs("args")
            .varkw("kwargs");
        assert_eq!(render_signature(&f).as_deref(), Some("(a, b = 1L, ..., ...)"));
    }

    #[test]
    fn receiver_is_dropped() {
        let method = FunctionDesc::new("fit")
            .arg("self")
            .arg("x")
            .arg_with_default("verbose", false);
        assert_eq!(
            render_signature(&method).as_deref(),
            Some("(x, verbose = FALSE)")
        );
    }

    #[test]
    fn native_is_absent() {
        assert_eq!(render_signature(&FunctionDesc::new("sum").native()), None);
        assert_eq!(
            try_render_signature(&FunctionDesc::new("sum").native()),
            Err(IntrospectError::native("sum"))
        );
    }

    #[test]
    fn wrapper_is_unwrapped() {
        let inner = FunctionDesc::new("dense").arg("units").arg_with_default("activation", Value::Null);
        let wrapper = FunctionDesc::new("wrapper")
            .varargs("args")
            .varkw("kwds")
            .wrapping(inner);
        assert_eq!(
            render_signature(&wrapper).as_deref(),
            Some("(units, activation = NULL)")
        );
    }

    #[test]
    fn keyword_only_is_opt_in() {
        let f = FunctionDesc::new("reduce")
            .arg("x")
            .varargs("args")
            .kwonly("axis", None)
            .kwonly("keepdims", Some(Value::Bool(false)))
            .varkw("kwargs");

        assert_eq!(render_signature(&f).as_deref(), Some("(x, ..., ...)"));

        let settings = RenderSettings {
            keyword_only: true,
            ..RenderSettings::default()
        };
        assert_eq!(
            render_signature_with(&f, &settings).as_deref(),
            Some("(x, ..., axis, keepdims = FALSE, ...)")
        );
    }
}
