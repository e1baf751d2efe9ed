//! Declarative function configuration documents.
//!
//! Declared overrides can be written in YAML (or JSON) instead of through
//! the setter API:
//!
//! ```yaml
//! entity: Customer
//! insert:
//!   name: ins_customer
//!   parameters:
//!     - property: Address.City
//!       name: city
//!   results:
//!     - property: Id
//!       column: customer_id
//! update:
//!   name: upd_customer
//!   rows_affected_parameter: rows_affected
//!   parameters:
//!     - property: Version
//!       name: version
//!       original_name: version_original
//! ```
//!
//! Definitions are replayed through the setters on conversion, so a document
//! is held to the same preconditions as code (no blank names, single-segment
//! result properties).
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::entity_functions::EntityFunctionsConfiguration;
use super::errors::FunctionMappingError;
use super::function_configuration::ModificationFunctionConfiguration;
use super::function_mapping::{EntityFunctionMappings, FunctionKind};
use super::property_path::PropertyPath;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub property: PropertyPath,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDefinition {
    pub property: PropertyPath,
    pub column: String,
}

/// Declared overrides for one function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_affected_parameter: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultDefinition>,
}

impl FunctionDefinition {
    pub fn to_configuration(&self) -> Result<ModificationFunctionConfiguration, FunctionMappingError> {
        let mut configuration = ModificationFunctionConfiguration::new();

        if let Some(name) = &self.name {
            configuration.has_name(name)?;
        }
        if let Some(name) = &self.rows_affected_parameter {
            configuration.rows_affected_parameter(name)?;
        }
        for parameter in &self.parameters {
            configuration.parameter(
                parameter.property.clone(),
                &parameter.name,
                parameter.original_name.as_deref(),
            )?;
        }
        for result in &self.results {
            configuration.result(&result.property, &result.column)?;
        }

        Ok(configuration)
    }

    pub fn from_configuration(configuration: &ModificationFunctionConfiguration) -> Self {
        FunctionDefinition {
            name: configuration.name().map(str::to_string),
            rows_affected_parameter: configuration.rows_affected_parameter_name().map(str::to_string),
            parameters: configuration
                .parameter_names()
                .iter()
                .map(|(path, names)| ParameterDefinition {
                    property: path.clone(),
                    name: names.current.clone(),
                    original_name: names.original.clone(),
                })
                .collect(),
            results: configuration
                .result_bindings()
                .iter()
                .map(|(property, column)| ResultDefinition {
                    property: property.clone().into(),
                    column: column.clone(),
                })
                .collect(),
        }
    }
}

/// Declared insert/update/delete overrides for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFunctionsDefinition {
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<FunctionDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<FunctionDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<FunctionDefinition>,
}

impl EntityFunctionsDefinition {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, FunctionMappingError> {
        load_yaml_file(path)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, FunctionMappingError> {
        parse_yaml(yaml)
    }

    pub fn to_configuration(&self) -> Result<EntityFunctionsConfiguration, FunctionMappingError> {
        let mut configuration = EntityFunctionsConfiguration::new();
        if let Some(insert) = &self.insert {
            configuration.insert(insert.to_configuration()?);
        }
        if let Some(update) = &self.update {
            configuration.update(update.to_configuration()?);
        }
        if let Some(delete) = &self.delete {
            configuration.delete(delete.to_configuration()?);
        }
        Ok(configuration)
    }

    pub fn from_configuration(entity: impl Into<String>, configuration: &EntityFunctionsConfiguration) -> Self {
        let definition = |kind: FunctionKind| configuration.get(kind).map(FunctionDefinition::from_configuration);
        EntityFunctionsDefinition {
            entity: entity.into(),
            insert: definition(FunctionKind::Insert),
            update: definition(FunctionKind::Update),
            delete: definition(FunctionKind::Delete),
        }
    }
}

/// Outcome of reconciling two declaration documents for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationCheck {
    /// First conflict between the two documents. Reported even when
    /// overriding let the merge go through.
    pub incompatibility: Option<FunctionMappingError>,
    /// Merged declaration, absent when the documents conflict and overriding
    /// is not allowed
    pub merged: Option<EntityFunctionsDefinition>,
}

impl DeclarationCheck {
    pub fn is_compatible(&self) -> bool {
        self.incompatibility.is_none()
    }
}

impl EntityFunctionsDefinition {
    /// Check `other` against this declaration and merge it in, keeping this
    /// declaration's entity name. Errors are reserved for documents that fail
    /// to convert; a conflict is part of the outcome.
    pub fn check(
        &self,
        other: &EntityFunctionsDefinition,
        allow_override: bool,
    ) -> Result<DeclarationCheck, FunctionMappingError> {
        let mut merged = self.to_configuration()?;
        let theirs = other.to_configuration()?;

        let incompatibility = merged.incompatibility_with(&theirs);
        if incompatibility.is_some() && !allow_override {
            return Ok(DeclarationCheck {
                incompatibility,
                merged: None,
            });
        }

        merged.merge(&theirs, allow_override)?;
        Ok(DeclarationCheck {
            incompatibility,
            merged: Some(Self::from_configuration(self.entity.clone(), &merged)),
        })
    }
}

impl EntityFunctionMappings {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, FunctionMappingError> {
        load_yaml_file(path)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, FunctionMappingError> {
        parse_yaml(yaml)
    }
}

fn load_yaml_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, FunctionMappingError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| FunctionMappingError::DefinitionRead {
        error: format!("{}: {}", path.display(), e),
    })?;

    serde_yaml::from_str(&contents)
        .map_err(|e| FunctionMappingError::parse_error_with_context(e, path.display().to_string()))
}

fn parse_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, FunctionMappingError> {
    serde_yaml::from_str(yaml).map_err(|e| FunctionMappingError::DefinitionParse {
        error: e.to_string(),
    })
}
