//! The capability contract every introspectable callable satisfies.
//!
//! Reflection happens once, at the boundary with the host runtime (see the
//! `py` module behind the `pyo3` feature). Everything downstream works on
//! the [`Callable`] and [`TypeMembers`] traits, so the formatter can be driven
//! by live host objects or by descriptions built by hand.
//!
//! # Example
//!
//! ```
//! use rpytools::{FunctionDesc, Value, render_signature};
//!
//! let f = FunctionDesc::new("fit")
//!     .arg("x")
//!     .arg_with_default("epochs", Value::Int(10))
//!     .varargs("args");
//!
//! assert_eq!(render_signature(&f).as_deref(), Some("(x, epochs = 10L, ...)"));
//! ```

use crate::argspec::ArgSpec;
use crate::errors::IntrospectError;
use crate::value::Value;

/// Metadata a callable exposes to the formatter.
pub trait Callable {
    /// The callable's `__name__`, if it has one.
    fn name(&self) -> Option<&str>;

    /// True for built-ins implemented outside the reflection system's reach.
    fn is_native(&self) -> bool {
        false
    }

    /// Raw docstring attached to the callable itself.
    fn doc(&self) -> Option<&str> {
        None
    }

    /// Parameter metadata, or the reason it cannot be determined.
    fn argument_spec(&self) -> Result<ArgSpec, IntrospectError>;

    /// The callable this one transparently forwards to, if any.
    fn wrapped(&self) -> Option<&dyn Callable> {
        None
    }

    fn display_name(&self) -> &str {
        self.name().unwrap_or("<anonymous>")
    }
}

/// Owned description of a callable, built once and then read many times.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDesc {
    name: Option<String>,
    native: bool,
    doc: Option<String>,
    spec: Result<ArgSpec, String>,
    wrapped: Option<Box<FunctionDesc>>,
}

impl FunctionDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            native: false,
            doc: None,
            spec: Ok(ArgSpec::default()),
            wrapped: None,
        }
    }

    /// A callable with no `__name__`, such as a `functools.partial` object.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            ..Self::new(String::new())
        }
    }

    /// Mark the callable as a native built-in.
    pub fn native(mut self) -> Self {
        self.native = true;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Replace the whole argument spec.
    pub fn with_spec(mut self, spec: ArgSpec) -> Self {
        self.spec = Ok(spec);
        self
    }

    /// Record that the host could not produce a signature.
    pub fn signature_unavailable(mut self, reason: impl Into<String>) -> Self {
        self.spec = Err(reason.into());
        self
    }

    /// Mark this callable as a transparent wrapper around `target`.
    pub fn wrapping(mut self, target: FunctionDesc) -> Self {
        self.wrapped = Some(Box::new(target));
        self
    }

    /// Append a positional parameter without a default.
    ///
    /// Parameters without defaults must come before those with one, as in
    /// the host language; defaults align to the trailing parameters.
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        if let Ok(spec) = &mut self.spec {
            spec.args.push(name.into());
        }
        self
    }

    /// Append a positional parameter carrying a default value.
    pub fn arg_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        if let Ok(spec) = &mut self.spec {
            spec.args.push(name.into());
            spec.defaults.push(default.into());
        }
        self
    }

    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        if let Ok(spec) = &mut self.spec {
            spec.varargs = Some(name.into());
        }
        self
    }

    pub fn varkw(mut self, name: impl Into<String>) -> Self {
        if let Ok(spec) = &mut self.spec {
            spec.varkw = Some(name.into());
        }
        self
    }

    /// Append a keyword-only parameter, optionally with a default.
    pub fn kwonly(mut self, name: impl Into<String>, default: Option<Value>) -> Self {
        if let Ok(spec) = &mut self.spec {
            let name = name.into();
            if let Some(default) = default {
                spec.kwonlydefaults.insert(name.clone(), default);
            }
            spec.kwonlyargs.push(name);
        }
        self
    }
}

impl Callable for FunctionDesc {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_native(&self) -> bool {
        self.native
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn argument_spec(&self) -> Result<ArgSpec, IntrospectError> {
        if self.native {
            return Err(IntrospectError::native(self.display_name()));
        }
        self.spec
            .clone()
            .map_err(|reason| IntrospectError::unavailable(self.display_name(), reason))
    }

    fn wrapped(&self) -> Option<&dyn Callable> {
        self.wrapped.as_deref().map(|target| target as &dyn Callable)
    }
}

/// What kind of attribute a type member is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A `property`; carries the getter's raw docstring.
    Property { getter_doc: Option<String> },
    /// Any other data descriptor (slots, getset descriptors, ...).
    DataDescriptor,
    Method,
    Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDesc {
    pub name: String,
    pub kind: MemberKind,
}

impl MemberDesc {
    pub fn property(name: impl Into<String>, getter_doc: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property {
                getter_doc: getter_doc.map(str::to_string),
            },
        }
    }

    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Members declared on the type of an instance.
pub trait TypeMembers {
    fn type_name(&self) -> &str;

    /// Members in the host's enumeration order.
    fn members(&self) -> &[MemberDesc];
}

/// Owned description of a type and its members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDesc {
    name: String,
    members: Vec<MemberDesc>,
}

impl ClassDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDesc) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_property(self, name: impl Into<String>, getter_doc: Option<&str>) -> Self {
        self.with_member(MemberDesc::property(name, getter_doc))
    }
}

impl TypeMembers for ClassDesc {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> &[MemberDesc] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_aligns_defaults_to_trailing_args() {
        let f = FunctionDesc::new("f")
            .arg("a")
            .arg_with_default("b", Value::Int(1))
            .varargs("args")
            .varkw("kwargs");
        let spec = f.argument_spec().unwrap();

        assert_eq!(spec.args, vec!["a", "b"]);
        assert_eq!(spec.defaults, vec![Value::Int(1)]);
        assert_eq!(spec.varargs.as_deref(), Some("args"));
        assert_eq!(spec.varkw.as_deref(), Some("kwargs"));
    }

    #[test]
    fn native_callables_have_no_spec() {
        let f = FunctionDesc::new("len").native();
        assert_eq!(f.argument_spec(), Err(IntrospectError::native("len")));
    }

    #[test]
    fn unavailable_signature_keeps_reason() {
        let f = FunctionDesc::new("odd").signature_unavailable("unsupported callable");
        assert_eq!(
            f.argument_spec(),
            Err(IntrospectError::unavailable("odd", "unsupported callable"))
        );
    }

    #[test]
    fn anonymous_has_no_name() {
        let f = FunctionDesc::anonymous();
        assert_eq!(f.name(), None);
        assert_eq!(f.display_name(), "<anonymous>");
    }

    #[test]
    fn wrapping_exposes_target() {
        let f = FunctionDesc::new("wrapper").wrapping(FunctionDesc::new("inner"));
        assert_eq!(f.wrapped().and_then(|w| w.name()), Some("inner"));
    }

    #[test]
    fn class_members_keep_order() {
        let class = ClassDesc::new("Model")
            .with_property("weights", Some("The weights."))
            .with_member(MemberDesc::new("fit", MemberKind::Method));

        let names: Vec<&str> = class.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["weights", "fit"]);
        assert_eq!(class.type_name(), "Model");
    }
}
