//! Declared overrides for one modification function.
//!
//! A [`ModificationFunctionConfiguration`] is filled during model declaration
//! and read once when the inferred [`FunctionMapping`](super::FunctionMapping)
//! is configured (see `binder.rs`). `Clone` produces a fully independent copy,
//! which is how the same declaration is specialized down separate inheritance
//! branches.

use std::collections::BTreeMap;

use super::errors::{ensure_not_blank, FunctionMappingError};
use super::property_path::{PropertyId, PropertyPath};

/// Parameter names declared for one property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNames {
    pub current: String,
    /// Only applied when the path is bound to both a current and an original
    /// value parameter
    pub original: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModificationFunctionConfiguration {
    pub(super) name: Option<String>,
    pub(super) rows_affected_parameter: Option<String>,
    pub(super) parameter_names: BTreeMap<PropertyPath, ParameterNames>,
    pub(super) result_bindings: BTreeMap<PropertyId, String>,
}

impl ModificationFunctionConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_name(&mut self, name: &str) -> Result<(), FunctionMappingError> {
        ensure_not_blank("name", name)?;
        self.name = Some(name.to_string());
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rows_affected_parameter(&mut self, name: &str) -> Result<(), FunctionMappingError> {
        ensure_not_blank("name", name)?;
        self.rows_affected_parameter = Some(name.to_string());
        Ok(())
    }

    pub fn rows_affected_parameter_name(&self) -> Option<&str> {
        self.rows_affected_parameter.as_deref()
    }

    /// Declare the parameter name(s) for a property path. Re-declaring a path
    /// replaces the previous names.
    pub fn parameter(
        &mut self,
        path: PropertyPath,
        parameter_name: &str,
        original_value_parameter_name: Option<&str>,
    ) -> Result<(), FunctionMappingError> {
        if path.is_empty() {
            return Err(FunctionMappingError::PreconditionViolation {
                argument: "path",
                reason: "property path must not be empty".to_string(),
            });
        }
        ensure_not_blank("parameter_name", parameter_name)?;

        self.parameter_names.insert(
            path,
            ParameterNames {
                current: parameter_name.to_string(),
                original: original_value_parameter_name.map(str::to_string),
            },
        );
        Ok(())
    }

    pub fn parameter_names(&self) -> &BTreeMap<PropertyPath, ParameterNames> {
        &self.parameter_names
    }

    /// Declare the result column bound to a property. Result bindings cannot
    /// traverse members, so `path` must have exactly one segment.
    pub fn result(&mut self, path: &PropertyPath, column_name: &str) -> Result<(), FunctionMappingError> {
        let property = path
            .single()
            .ok_or_else(|| FunctionMappingError::PreconditionViolation {
                argument: "path",
                reason: format!(
                    "result bindings require a single property, got `{}` ({} segments)",
                    path,
                    path.len()
                ),
            })?;
        ensure_not_blank("column_name", column_name)?;

        self.result_bindings
            .insert(property.clone(), column_name.to_string());
        Ok(())
    }

    pub fn result_bindings(&self) -> &BTreeMap<PropertyId, String> {
        &self.result_bindings
    }

    /// True when both declarations can describe the same function: names (if
    /// both set) match ignoring case, and every path declared on both sides
    /// carries the same parameter names.
    pub fn is_compatible_with(&self, other: &ModificationFunctionConfiguration) -> bool {
        if let (Some(ours), Some(theirs)) = (&self.name, &other.name) {
            if !names_match(ours, theirs) {
                return false;
            }
        }

        self.parameter_names.iter().all(|(path, names)| {
            other
                .parameter_names
                .get(path)
                .map_or(true, |other_names| other_names == names)
        })
    }

    /// Fold the declarations of a compatible `other` into `self`. Entries we
    /// already hold are kept; names and keys only `other` declares are added.
    pub(crate) fn absorb(&mut self, other: &ModificationFunctionConfiguration) {
        if self.name.is_none() {
            self.name = other.name.clone();
        }
        if self.rows_affected_parameter.is_none() {
            self.rows_affected_parameter = other.rows_affected_parameter.clone();
        }
        for (path, names) in &other.parameter_names {
            self.parameter_names
                .entry(path.clone())
                .or_insert_with(|| names.clone());
        }
        for (property, column) in &other.result_bindings {
            self.result_bindings
                .entry(property.clone())
                .or_insert_with(|| column.clone());
        }
    }

    /// Describe the first incompatibility with `other`, if any
    pub(crate) fn incompatibility_with(&self, other: &ModificationFunctionConfiguration) -> Option<String> {
        if let (Some(ours), Some(theirs)) = (&self.name, &other.name) {
            if !names_match(ours, theirs) {
                return Some(format!("function names `{}` and `{}` differ", ours, theirs));
            }
        }

        self.parameter_names.iter().find_map(|(path, names)| {
            let other_names = other.parameter_names.get(path)?;
            (other_names != names).then(|| {
                format!(
                    "property `{}` is mapped to parameter `{}` and to parameter `{}`",
                    path,
                    describe(names),
                    describe(other_names)
                )
            })
        })
    }
}

// Ordinal, per-char comparison: characters whose uppercase form is more than
// one char (`ß`) only match themselves.
fn names_match(a: &str, b: &str) -> bool {
    a.chars().map(simple_uppercase).eq(b.chars().map(simple_uppercase))
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn describe(names: &ParameterNames) -> String {
    match &names.original {
        Some(original) => format!("{} (original: {})", names.current, original),
        None => names.current.clone(),
    }
}
