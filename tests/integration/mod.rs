//! Integration tests

pub mod session_test;
pub mod store_test;
