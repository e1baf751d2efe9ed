// Applies declared overrides onto an inferred function mapping

use log::{debug, info};

use super::errors::FunctionMappingError;
use super::function_configuration::{ModificationFunctionConfiguration, ParameterNames};
use super::function_mapping::{FunctionMapping, ParameterBinding};
use super::property_path::PropertyPath;

fn is_set(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl ModificationFunctionConfiguration {
    /// Apply every declared override to `mapping`.
    ///
    /// Steps run in order: function name, rows affected parameter, parameters,
    /// result bindings. The first failure is returned; renames applied by
    /// earlier steps are left in place.
    pub fn configure(&self, mapping: &mut FunctionMapping) -> Result<(), FunctionMappingError> {
        self.configure_name(mapping);
        self.configure_rows_affected_parameter(mapping)?;
        self.configure_parameters(mapping)?;
        self.configure_result_bindings(mapping)?;

        info!(
            "Configured modification function '{}' ({} parameter overrides, {} result overrides)",
            mapping.function.name,
            self.parameter_names.len(),
            self.result_bindings.len()
        );
        Ok(())
    }

    fn configure_name(&self, mapping: &mut FunctionMapping) {
        if let Some(name) = is_set(self.name.as_deref()) {
            debug!("Renaming function '{}' -> '{}'", mapping.function.name, name);
            mapping.function.name = name.to_string();
        }
    }

    fn configure_rows_affected_parameter(
        &self,
        mapping: &mut FunctionMapping,
    ) -> Result<(), FunctionMappingError> {
        let Some(name) = is_set(self.rows_affected_parameter.as_deref()) else {
            return Ok(());
        };

        match mapping.rows_affected_parameter.as_mut() {
            Some(parameter) => {
                debug!("Renaming rows affected parameter '{}' -> '{}'", parameter.name, name);
                parameter.name = name.to_string();
                Ok(())
            }
            None => Err(FunctionMappingError::MissingRowsAffectedParameter {
                function: mapping.function.name.clone(),
            }),
        }
    }

    fn configure_parameters(&self, mapping: &mut FunctionMapping) -> Result<(), FunctionMappingError> {
        for (path, names) in &self.parameter_names {
            let function = mapping.function.name.clone();

            let mut matches: Vec<&mut ParameterBinding> = mapping
                .parameter_bindings
                .iter_mut()
                .filter(|pb| pb.property_path() == *path)
                .collect();

            match matches.as_mut_slice() {
                [single] => bind_single(single, path, names, &function)?,
                [first, second] => bind_pair(first, second, path, names, &function)?,
                other => {
                    return Err(FunctionMappingError::AmbiguousOrMissingParameterBinding {
                        path: path.clone(),
                        function,
                        matches: other.len(),
                    })
                }
            }
        }
        Ok(())
    }

    fn configure_result_bindings(&self, mapping: &mut FunctionMapping) -> Result<(), FunctionMappingError> {
        for (property, column_name) in &self.result_bindings {
            let function = mapping.function.name.clone();

            let mut matches: Vec<_> = mapping
                .result_bindings
                .iter_mut()
                .flatten()
                .filter(|rb| rb.property == *property)
                .collect();

            match matches.as_mut_slice() {
                [binding] => {
                    debug!(
                        "Binding result column '{}' -> '{}' for property '{}'",
                        binding.column_name, column_name, property
                    );
                    binding.column_name = column_name.clone();
                }
                [] => {
                    return Err(FunctionMappingError::MissingResultBinding {
                        property: property.clone(),
                        function,
                    })
                }
                several => {
                    return Err(FunctionMappingError::AmbiguousResultBinding {
                        property: property.clone(),
                        function,
                        matches: several.len(),
                    })
                }
            }
        }
        Ok(())
    }
}

// A lone binding that is current cannot take an original value name. A lone
// non-current binding is renamed to the current name without complaint.
fn bind_single(
    binding: &mut ParameterBinding,
    path: &PropertyPath,
    names: &ParameterNames,
    function: &str,
) -> Result<(), FunctionMappingError> {
    if is_set(names.original.as_deref()).is_some() && binding.is_current {
        return Err(FunctionMappingError::OriginalValueNotApplicable {
            path: path.clone(),
            function: function.to_string(),
        });
    }

    rename(binding, &names.current, path);
    Ok(())
}

fn bind_pair(
    first: &mut ParameterBinding,
    second: &mut ParameterBinding,
    path: &PropertyPath,
    names: &ParameterNames,
    function: &str,
) -> Result<(), FunctionMappingError> {
    let (current, original) = match (first.is_current, second.is_current) {
        (true, false) => (first, second),
        (false, true) => (second, first),
        _ => {
            return Err(FunctionMappingError::AmbiguousOrMissingParameterBinding {
                path: path.clone(),
                function: function.to_string(),
                matches: 2,
            })
        }
    };

    rename(current, &names.current, path);
    if let Some(original_name) = is_set(names.original.as_deref()) {
        rename(original, original_name, path);
    }
    Ok(())
}

fn rename(binding: &mut ParameterBinding, name: &str, path: &PropertyPath) {
    debug!(
        "Renaming {} parameter '{}' -> '{}' for property '{}'",
        if binding.is_current { "current" } else { "original" },
        binding.parameter.name,
        name,
        path
    );
    binding.parameter.name = name.to_string();
}
