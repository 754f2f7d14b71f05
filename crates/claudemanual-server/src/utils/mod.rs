//! Shared server utilities

pub mod paths;
