//! Integration test modules.

mod persistence_test;
