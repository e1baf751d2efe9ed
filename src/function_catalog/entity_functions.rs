//! Insert/update/delete function declarations for one entity type.
//!
//! This is the caller-side reconciliation of per-function configurations:
//! two declarations for the same entity (for example one per inheritance
//! branch, or two partial declarations) are merged here, and an
//! incompatible pair is rejected with
//! [`FunctionMappingError::IncompatibleConfigurations`].

use log::{debug, warn};

use super::errors::FunctionMappingError;
use super::function_configuration::ModificationFunctionConfiguration;
use super::function_mapping::{EntityFunctionMappings, FunctionKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFunctionsConfiguration {
    insert: Option<ModificationFunctionConfiguration>,
    update: Option<ModificationFunctionConfiguration>,
    delete: Option<ModificationFunctionConfiguration>,
}

impl EntityFunctionsConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, configuration: ModificationFunctionConfiguration) {
        self.insert = Some(configuration);
    }

    pub fn update(&mut self, configuration: ModificationFunctionConfiguration) {
        self.update = Some(configuration);
    }

    pub fn delete(&mut self, configuration: ModificationFunctionConfiguration) {
        self.delete = Some(configuration);
    }

    pub fn get(&self, kind: FunctionKind) -> Option<&ModificationFunctionConfiguration> {
        self.slot(kind).as_ref()
    }

    fn slot(&self, kind: FunctionKind) -> &Option<ModificationFunctionConfiguration> {
        match kind {
            FunctionKind::Insert => &self.insert,
            FunctionKind::Update => &self.update,
            FunctionKind::Delete => &self.delete,
        }
    }

    fn slot_mut(&mut self, kind: FunctionKind) -> &mut Option<ModificationFunctionConfiguration> {
        match kind {
            FunctionKind::Insert => &mut self.insert,
            FunctionKind::Update => &mut self.update,
            FunctionKind::Delete => &mut self.delete,
        }
    }

    /// Every function declared on both sides must be compatible.
    pub fn is_compatible_with(&self, other: &EntityFunctionsConfiguration) -> bool {
        FunctionKind::ALL.iter().all(|&kind| match (self.get(kind), other.get(kind)) {
            (Some(ours), Some(theirs)) => ours.is_compatible_with(theirs),
            _ => true,
        })
    }

    /// First function declared on both sides whose declarations conflict,
    /// checked in insert, update, delete order.
    pub fn incompatibility_with(&self, other: &EntityFunctionsConfiguration) -> Option<FunctionMappingError> {
        FunctionKind::ALL.iter().find_map(|&kind| {
            let reason = self.get(kind)?.incompatibility_with(other.get(kind)?)?;
            Some(FunctionMappingError::incompatible(kind.to_string(), reason))
        })
    }

    /// Merge `other` into `self`.
    ///
    /// Functions only `other` declares are copied over. Where both declare a
    /// function, `allow_override` takes `other`'s declaration; otherwise the
    /// two must be compatible and are combined: ours wins on shared keys and
    /// `other` fills in what ours leaves undeclared. Nothing is modified when
    /// an incompatibility is found.
    pub fn merge(
        &mut self,
        other: &EntityFunctionsConfiguration,
        allow_override: bool,
    ) -> Result<(), FunctionMappingError> {
        if !allow_override {
            if let Some(err) = self.incompatibility_with(other) {
                return Err(err);
            }
        }

        for kind in FunctionKind::ALL {
            let Some(theirs) = other.get(kind) else {
                continue;
            };
            match self.slot_mut(kind) {
                Some(ours) if allow_override => {
                    warn!("Overriding existing {} function configuration", kind);
                    *ours = theirs.clone();
                }
                Some(ours) => {
                    debug!("Combining compatible {} function configurations", kind);
                    ours.absorb(theirs);
                }
                slot => {
                    debug!("Merging {} function configuration", kind);
                    *slot = Some(theirs.clone());
                }
            }
        }
        Ok(())
    }

    /// Configure each inferred function mapping that has a declaration, in
    /// insert, update, delete order.
    pub fn configure(&self, mappings: &mut EntityFunctionMappings) -> Result<(), FunctionMappingError> {
        for kind in FunctionKind::ALL {
            let Some(configuration) = self.get(kind) else {
                continue;
            };
            let mapping = mappings
                .get_mut(kind)
                .ok_or_else(|| FunctionMappingError::MissingFunctionMapping {
                    kind: kind.to_string(),
                })?;
            configuration.configure(mapping)?;
        }
        Ok(())
    }
}
