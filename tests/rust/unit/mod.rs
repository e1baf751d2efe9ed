//! Unit tests - public API tests that need no files or external state

mod property_path_tests;
