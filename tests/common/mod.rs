//! Shared fixtures for integration tests.
//!
//! Each test file only uses part of this, hence `allow(dead_code)`.
#![allow(dead_code)]

pub mod cli;
