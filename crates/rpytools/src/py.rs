//! Python boundary: reads live objects through `inspect` once and turns them
//! into [`FunctionDesc`], [`ClassDesc`] and [`Value`].
//!
//! The module also exposes the formatter back to Python as `rpytools`, so a
//! binding generator running inside the interpreter can call it directly.

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PySet, PyString, PyTuple};
use tracing::debug;

use crate::argspec::ArgSpec;
use crate::callable::{ClassDesc, FunctionDesc, MemberDesc, MemberKind};
use crate::settings::settings;
use crate::value::Value;

/// Rest-parameter names of the decorator wrappers that predate `__wrapped__`.
const LEGACY_WRAPPER_VARARGS: &str = "args";
const LEGACY_WRAPPER_VARKW: &str = "kwds";

/// Describe a Python callable.
///
/// Built-ins are marked native. A `TypeError` from `getfullargspec` marks
/// the signature unavailable instead of failing.
pub fn describe_callable(obj: &Bound<'_, PyAny>) -> PyResult<FunctionDesc> {
    describe_callable_at(obj, 0, settings().max_unwrap_depth)
}

fn describe_callable_at(
    obj: &Bound<'_, PyAny>,
    depth: usize,
    max_depth: usize,
) -> PyResult<FunctionDesc> {
    let py = obj.py();
    let inspect = PyModule::import(py, "inspect")?;

    let name: Option<String> = match obj.getattr("__name__") {
        Ok(name) => name.extract().ok(),
        Err(_) => None,
    };
    let mut desc = name.map_or_else(FunctionDesc::anonymous, FunctionDesc::new);

    let doc: Option<String> = inspect.call_method1("getdoc", (obj,))?.extract()?;
    if let Some(doc) = doc {
        desc = desc.with_doc(doc);
    }

    if inspect.call_method1("isbuiltin", (obj,))?.is_truthy()? {
        return Ok(desc.native());
    }

    let raw_spec = match inspect.call_method1("getfullargspec", (obj,)) {
        Ok(raw_spec) => raw_spec,
        Err(err) if err.is_instance_of::<PyTypeError>(py) => {
            debug!(error = %err, "getfullargspec raised TypeError");
            return Ok(desc.signature_unavailable(err.to_string()));
        }
        Err(err) => return Err(err),
    };
    let spec = argspec_from_py(&raw_spec)?;

    let target = wrapped_target(obj, &spec)?;
    desc = desc.with_spec(spec);

    if let Some(target) = target {
        if depth == max_depth {
            return Ok(desc.signature_unavailable(format!(
                "wrapper chain deeper than {max_depth}"
            )));
        }
        desc = desc.wrapping(describe_callable_at(&target, depth + 1, max_depth)?);
    }
    Ok(desc)
}

/// The callable `obj` forwards to, if it is a transparent wrapper.
///
/// `functools.wraps` records the target as `__wrapped__`. Older decorators
/// only leave it in the first closure cell of an `(*args, **kwds)` function.
fn wrapped_target<'py>(
    obj: &Bound<'py, PyAny>,
    spec: &ArgSpec,
) -> PyResult<Option<Bound<'py, PyAny>>> {
    if obj.hasattr("__wrapped__")? {
        return Ok(Some(obj.getattr("__wrapped__")?));
    }

    let legacy = spec.varargs.as_deref() == Some(LEGACY_WRAPPER_VARARGS)
        && spec.varkw.as_deref() == Some(LEGACY_WRAPPER_VARKW);
    if !legacy || !obj.hasattr("__closure__")? {
        return Ok(None);
    }

    let closure = obj.getattr("__closure__")?;
    if closure.is_none() {
        return Ok(None);
    }
    let Ok(cells) = closure.downcast::<PyTuple>() else {
        return Ok(None);
    };
    match cells.iter().next() {
        Some(cell) => Ok(Some(cell.getattr("cell_contents")?)),
        None => Ok(None),
    }
}

fn argspec_from_py(raw: &Bound<'_, PyAny>) -> PyResult<ArgSpec> {
    let mut spec = ArgSpec {
        args: raw.getattr("args")?.extract()?,
        varargs: raw.getattr("varargs")?.extract()?,
        varkw: raw.getattr("varkw")?.extract()?,
        kwonlyargs: raw.getattr("kwonlyargs")?.extract()?,
        ..ArgSpec::default()
    };

    let defaults = raw.getattr("defaults")?;
    if !defaults.is_none() {
        for item in defaults.try_iter()? {
            spec.defaults.push(py_to_value(&item?)?);
        }
    }

    let kwonlydefaults = raw.getattr("kwonlydefaults")?;
    if let Ok(kwonlydefaults) = kwonlydefaults.downcast::<PyDict>() {
        for (key, value) in kwonlydefaults.iter() {
            spec.kwonlydefaults.insert(key.extract()?, py_to_value(&value)?);
        }
    }
    Ok(spec)
}

/// Describe the type of `instance`: its data descriptors in `getmembers` order.
pub fn describe_type_of(instance: &Bound<'_, PyAny>) -> PyResult<ClassDesc> {
    let py = instance.py();
    let inspect = PyModule::import(py, "inspect")?;
    let property = PyModule::import(py, "builtins")?.getattr("property")?;
    let ty = instance.get_type();

    let mut class = ClassDesc::new(ty.name()?.to_string());
    let members = inspect.call_method1(
        "getmembers",
        (&ty, inspect.getattr("isdatadescriptor")?),
    )?;
    for item in members.try_iter()? {
        let (name, member): (String, Bound<'_, PyAny>) = item?.extract()?;
        let kind = if member.is_instance(&property)? {
            let getter = member.getattr("fget")?;
            let getter_doc: Option<String> = if getter.is_none() {
                None
            } else {
                inspect.call_method1("getdoc", (getter,))?.extract()?
            };
            MemberKind::Property { getter_doc }
        } else {
            MemberKind::DataDescriptor
        };
        class = class.with_member(MemberDesc::new(name, kind));
    }
    Ok(class)
}

/// Convert a default value into a [`Value`].
pub fn py_to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_callable() && obj.hasattr("__name__")? {
        if let Ok(name) = obj.getattr("__name__")?.extract::<String>() {
            return Ok(Value::Callable { name });
        }
    }
    if obj.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(flag) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(flag.is_true()));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::Str(obj.extract()?));
    }
    if obj.is_instance_of::<PyInt>() {
        return Ok(match obj.extract::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::big_int(obj.str()?.to_string()),
        });
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(Value::Float(obj.extract()?));
    }
    if obj.is_instance_of::<PyList>() {
        return Ok(Value::List(collect_values(obj)?));
    }
    if obj.is_instance_of::<PyTuple>() {
        return Ok(Value::Tuple(collect_values(obj)?));
    }
    // `frozenset` is not a `set` and falls through to its repr.
    if obj.is_instance_of::<PySet>() {
        return Ok(Value::Set(collect_values(obj)?));
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut entries = Vec::with_capacity(dict.len());
        for (key, value) in dict.iter() {
            entries.push((key.str()?.to_string(), py_to_value(&value)?));
        }
        return Ok(Value::dict(entries));
    }
    Ok(Value::object(repr_of(obj)?))
}

fn collect_values(obj: &Bound<'_, PyAny>) -> PyResult<Vec<Value>> {
    obj.try_iter()?
        .map(|item| py_to_value(&item?))
        .collect()
}

fn repr_of(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    obj.repr()?.extract()
}

#[pyfunction]
#[pyo3(name = "is_text")]
fn py_is_text(value: &Bound<'_, PyAny>) -> bool {
    value.is_instance_of::<PyString>()
}

#[pyfunction]
#[pyo3(name = "get_doc")]
fn py_get_doc(func: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
    Ok(crate::docs::get_doc(&describe_callable(func)?))
}

#[pyfunction]
#[pyo3(name = "get_property_doc")]
fn py_get_property_doc(target: &Bound<'_, PyAny>, prop: &str) -> PyResult<Option<String>> {
    Ok(crate::docs::get_property_doc(&describe_type_of(target)?, prop))
}

#[pyfunction]
#[pyo3(name = "get_arguments")]
fn py_get_arguments(func: &Bound<'_, PyAny>) -> PyResult<Option<Vec<String>>> {
    Ok(crate::argspec::get_arguments(&describe_callable(func)?))
}

#[pyfunction]
#[pyo3(name = "render_default")]
fn py_render_default(value: &Bound<'_, PyAny>) -> PyResult<String> {
    Ok(crate::render::render_default(&py_to_value(value)?))
}

#[pyfunction]
#[pyo3(name = "render_signature")]
fn py_render_signature(func: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
    Ok(crate::signature::render_signature(&describe_callable(func)?))
}

#[pyfunction]
#[pyo3(name = "init_logging", signature = (filter = None))]
fn py_init_logging(filter: Option<&str>) -> PyResult<()> {
    let result = match filter {
        Some(directive) => crate::telemetry::init_tracing_with(directive),
        None => crate::telemetry::init_tracing(),
    };
    result.map_err(|err| PyValueError::new_err(err.to_string()))
}

/// The `rpytools` Python module.
#[pymodule]
pub fn rpytools(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_is_text, m)?)?;
    m.add_function(wrap_pyfunction!(py_get_doc, m)?)?;
    m.add_function(wrap_pyfunction!(py_get_property_doc, m)?)?;
    m.add_function(wrap_pyfunction!(py_get_arguments, m)?)?;
    m.add_function(wrap_pyfunction!(py_render_default, m)?)?;
    m.add_function(wrap_pyfunction!(py_render_signature, m)?)?;
    m.add_function(wrap_pyfunction!(py_init_logging, m)?)?;
    Ok(())
}
