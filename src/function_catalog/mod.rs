mod binder;
pub mod definition;
pub mod entity_functions;
pub mod errors;
pub mod function_configuration;
pub mod function_mapping;
pub mod property_path;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types
pub use definition::{DeclarationCheck, EntityFunctionsDefinition, FunctionDefinition};
pub use entity_functions::EntityFunctionsConfiguration;
pub use errors::FunctionMappingError;
pub use function_configuration::{ModificationFunctionConfiguration, ParameterNames};
pub use function_mapping::{
    EntityFunctionMappings, FunctionKind, FunctionMapping, FunctionParameter, Member,
    ParameterBinding, ResultBinding, StoreFunction,
};
pub use property_path::{PropertyId, PropertyPath};
