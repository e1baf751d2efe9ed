//! Integration tests - Tests that load definitions from disk and run them
//! through the full declare, merge and configure flow.

mod configure_pipeline_tests;
