//! Inferred (structural) modification function mappings.
//!
//! These types are produced by whatever inferred the mapping from the model
//! and consumed by the binder, which only ever renames things on them:
//!
//! - the function itself
//! - the rows affected output parameter
//! - individual parameters bound to property paths
//! - result binding column names
//!
//! They are plain serde data so a mapping can be loaded from YAML/JSON:
//!
//! ```yaml
//! function:
//!   name: Customer_Update
//! rows_affected_parameter:
//!   name: rows_affected
//! parameter_bindings:
//!   - parameter: { name: Address_City }
//!     member_path:
//!       - property: Address
//!       - property: City
//!     is_current: true
//! result_bindings:
//!   - property: Version
//!     column_name: Version
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::property_path::{PropertyId, PropertyPath};

/// Insert, update or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Insert,
    Update,
    Delete,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 3] = [FunctionKind::Insert, FunctionKind::Update, FunctionKind::Delete];
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Insert => write!(f, "insert"),
            FunctionKind::Update => write!(f, "update"),
            FunctionKind::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFunction {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
}

impl FunctionParameter {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionParameter { name: name.into() }
    }
}

/// One step of a binding's member path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    /// Scalar or complex property
    Property(PropertyId),
    /// Association end crossed to reach a foreign key property
    Navigation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub parameter: FunctionParameter,
    // Members are written as single-key maps (`- property: City`)
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub member_path: Vec<Member>,
    /// False for the parameter carrying the originally persisted value
    #[serde(default = "default_is_current")]
    pub is_current: bool,
}

fn default_is_current() -> bool {
    true
}

impl ParameterBinding {
    pub fn new(parameter_name: impl Into<String>, member_path: Vec<Member>, is_current: bool) -> Self {
        ParameterBinding {
            parameter: FunctionParameter::new(parameter_name),
            member_path,
            is_current,
        }
    }

    /// Binding whose member path consists of the given property path only
    pub fn for_path(parameter_name: impl Into<String>, path: &PropertyPath, is_current: bool) -> Self {
        let member_path = path
            .segments()
            .iter()
            .cloned()
            .map(Member::Property)
            .collect();
        Self::new(parameter_name, member_path, is_current)
    }

    /// Property path this binding was inferred from. Navigation members are
    /// skipped.
    pub fn property_path(&self) -> PropertyPath {
        self.member_path
            .iter()
            .filter_map(|member| match member {
                Member::Property(id) => Some(id.clone()),
                Member::Navigation(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBinding {
    pub property: PropertyId,
    pub column_name: String,
}

impl ResultBinding {
    pub fn new(property: impl Into<PropertyId>, column_name: impl Into<String>) -> Self {
        ResultBinding {
            property: property.into(),
            column_name: column_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMapping {
    pub function: StoreFunction,
    #[serde(default)]
    pub rows_affected_parameter: Option<FunctionParameter>,
    #[serde(default)]
    pub parameter_bindings: Vec<ParameterBinding>,
    #[serde(default)]
    pub result_bindings: Option<Vec<ResultBinding>>,
}

impl FunctionMapping {
    pub fn new(function_name: impl Into<String>) -> Self {
        FunctionMapping {
            function: StoreFunction {
                name: function_name.into(),
            },
            rows_affected_parameter: None,
            parameter_bindings: Vec::new(),
            result_bindings: None,
        }
    }

    pub fn with_rows_affected_parameter(mut self, name: impl Into<String>) -> Self {
        self.rows_affected_parameter = Some(FunctionParameter::new(name));
        self
    }

    pub fn with_parameter_binding(mut self, binding: ParameterBinding) -> Self {
        self.parameter_bindings.push(binding);
        self
    }

    pub fn with_result_binding(mut self, binding: ResultBinding) -> Self {
        self.result_bindings.get_or_insert_with(Vec::new).push(binding);
        self
    }

    pub fn function_name(&self) -> &str {
        &self.function.name
    }

    /// Parameter names in binding order
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameter_bindings
            .iter()
            .map(|pb| pb.parameter.name.as_str())
            .collect()
    }
}

/// Inferred insert/update/delete mappings for one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFunctionMappings {
    pub entity: String,
    #[serde(default)]
    pub insert: Option<FunctionMapping>,
    #[serde(default)]
    pub update: Option<FunctionMapping>,
    #[serde(default)]
    pub delete: Option<FunctionMapping>,
}

impl EntityFunctionMappings {
    pub fn get_mut(&mut self, kind: FunctionKind) -> Option<&mut FunctionMapping> {
        match kind {
            FunctionKind::Insert => self.insert.as_mut(),
            FunctionKind::Update => self.update.as_mut(),
            FunctionKind::Delete => self.delete.as_mut(),
        }
    }
}
