//! Core types shared across jsondiff facilities
//!
//! This crate provides the canonical structured-logging schema used by both
//! the comparison core and the command-line front end:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
