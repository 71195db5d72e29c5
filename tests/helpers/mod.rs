//! Test helpers module
//!
//! This module provides utilities for testing ClubPortal against a mocked
//! club backend, plus JSON builders for the backend's payloads.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_data;

pub use backend_mock::*;
pub use test_data::*;
