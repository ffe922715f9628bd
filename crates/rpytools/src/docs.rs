//! Docstring lookup for callables and properties.

use tracing::trace;

use crate::callable::{Callable, MemberKind, TypeMembers};
use crate::classify::normalize_callable;
use crate::settings::{RenderSettings, settings};

const TAB_WIDTH: usize = 8;

/// Cleaned docstring of a callable.
///
/// A thin proxy without a docstring of its own reports the docstring of the
/// callable it wraps. Native callables stop the lookup.
pub fn get_doc(callable: &dyn Callable) -> Option<String> {
    get_doc_with(callable, &settings())
}

pub fn get_doc_with(callable: &dyn Callable, settings: &RenderSettings) -> Option<String> {
    if let Some(doc) = callable.doc() {
        return Some(clean_doc(doc));
    }

    let mut current = normalize_callable(callable)?;
    for _ in 0..settings.max_unwrap_depth {
        current = normalize_callable(current.wrapped()?)?;
        if let Some(doc) = current.doc() {
            trace!(
                callable = callable.display_name(),
                source = current.display_name(),
                "docstring taken from wrapped callable"
            );
            return Some(clean_doc(doc));
        }
    }
    None
}

/// Cleaned getter docstring of the property `name` on `instance`'s type.
///
/// Only `property` members qualify; the first one named `name` wins.
pub fn get_property_doc(instance: &dyn TypeMembers, name: &str) -> Option<String> {
    instance
        .members()
        .iter()
        .find_map(|member| match &member.kind {
            MemberKind::Property { getter_doc } if member.name == name => Some(getter_doc),
            _ => None,
        })?
        .as_deref()
        .map(clean_doc)
}

/// Normalize docstring indentation the way the host's `getdoc` does.
///
/// Tabs are expanded, the first line is left-stripped, the common indent of
/// the remaining lines is removed, and blank lines at either end dropped.
pub fn clean_doc(doc: &str) -> String {
    let mut lines: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start().chars().count();
            (content > 0).then(|| line.chars().count() - content)
        })
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading);

    lines.join("\n")
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => {
                let pad = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}
