use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::FunctionMappingError;

/// Identifier of a single property on the object model
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(name: impl Into<String>) -> Self {
        PropertyId(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        PropertyId(s.to_string())
    }
}

impl From<String> for PropertyId {
    fn from(s: String) -> Self {
        PropertyId(s)
    }
}

/// Navigation from an entity through zero or more members to a scalar
/// property, e.g. `Address.City`.
///
/// Equality is per segment and order-sensitive. Serialized in dotted form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath(Vec<PropertyId>);

impl PropertyPath {
    pub fn new(segments: Vec<PropertyId>) -> Self {
        PropertyPath(segments)
    }

    /// Parse a dotted path. Empty segments (`"a..b"`, `""`) are rejected.
    pub fn parse(path: &str) -> Result<Self, FunctionMappingError> {
        let segments = path
            .split('.')
            .map(|segment| {
                let segment = segment.trim();
                if segment.is_empty() {
                    Err(FunctionMappingError::InvalidPropertyPath {
                        path: path.to_string(),
                    })
                } else {
                    Ok(PropertyId::new(segment))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PropertyPath(segments))
    }

    pub fn segments(&self) -> &[PropertyId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The only segment of a one-segment path
    pub fn single(&self) -> Option<&PropertyId> {
        match self.0.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.name())?;
        }
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = FunctionMappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::parse(s)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = FunctionMappingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PropertyPath::parse(&s)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}

impl From<PropertyId> for PropertyPath {
    fn from(id: PropertyId) -> Self {
        PropertyPath(vec![id])
    }
}

impl FromIterator<PropertyId> for PropertyPath {
    fn from_iter<I: IntoIterator<Item = PropertyId>>(iter: I) -> Self {
        PropertyPath(iter.into_iter().collect())
    }
}
