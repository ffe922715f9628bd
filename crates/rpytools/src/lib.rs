//! Render Python callable metadata as R source text.
//!
//! Binding generators that wrap a Python library for R need each wrapped
//! function's call signature and documentation in R syntax. This crate reads
//! that metadata through a small capability contract and formats it.
//!
//! # Overview
//!
//! - [`Callable`] / [`TypeMembers`] - what a callable or type must expose
//! - [`FunctionDesc`] / [`ClassDesc`] - owned descriptions implementing them
//! - [`render_signature`] - `(x, axis = 0L, ...)` style parameter lists
//! - [`render_default`] - a single default value as an R literal
//! - [`get_doc`] / [`get_property_doc`] - cleaned docstrings
//! - [`get_argument_spec`] / [`get_arguments`] - parameter metadata
//!
//! With the `pyo3` feature, the `py` module fills the contract from live
//! Python objects and exposes the same helpers as a Python module.
//!
//! # Example
//!
//! ```
//! use rpytools::{FunctionDesc, Value, render_default, render_signature};
//!
//! let conv = FunctionDesc::new("conv2d")
//!     .arg("filters")
//!     .arg_with_default("strides", Value::tuple([Value::Int(1), Value::Int(1)]))
//!     .arg_with_default("dtype", Value::object("tf.float32"))
//!     .varkw("kwargs");
//!
//! assert_eq!(
//!     render_signature(&conv).as_deref(),
//!     Some("(filters, strides = list(1L, 1L), dtype = tf$float32, ...)")
//! );
//! assert_eq!(render_default(&Value::list([Value::Int(1), Value::Int(2)])), "c(1L, 2L)");
//! ```

pub mod argspec;
pub mod callable;
pub mod classify;
pub mod docs;
pub mod errors;
#[cfg(feature = "pyo3")]
pub mod py;
pub mod render;
pub mod settings;
pub mod signature;
pub mod telemetry;
pub mod value;

pub use argspec::{ArgSpec, get_argument_spec, get_arguments, get_arguments_with, try_argument_spec};
pub use callable::{Callable, ClassDesc, FunctionDesc, MemberDesc, MemberKind, TypeMembers};
pub use classify::{is_text, normalize_callable};
pub use docs::{clean_doc, get_doc, get_doc_with, get_property_doc};
pub use errors::{IntrospectError, SettingsError};
pub use render::{float_repr, render_default, render_default_with};
pub use settings::{RenderSettings, RewriteRule, configure_settings, settings};
pub use signature::{
    render_signature, render_signature_with, try_render_signature, try_render_signature_with,
};
pub use telemetry::{TelemetryInitError, init_tracing, init_tracing_with};
pub use value::Value;
