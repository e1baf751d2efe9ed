//! procmap - modification function mapping configuration
//!
//! This crate resolves user-declared overrides for insert/update/delete
//! modification functions and applies them onto inferred function mappings:
//! - Function and rows affected parameter renames
//! - Property path to parameter bindings (current and original values)
//! - Result column bindings
//! - Compatibility checks and merging of independently declared configurations

pub mod config;
pub mod function_catalog;
