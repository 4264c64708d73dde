//! Acctd Library
//!
//! This library provides the core components for the user account management
//! service backend.

pub mod account;
pub mod api;
pub mod db;
pub mod validate;
