//! Journal Portal Core - Shared types library.
//!
//! This crate provides the identity and credential types used across the
//! Journal Portal components:
//! - `session` - Session store with durable, write-through persistence
//! - `cli` - Command-line front end for logging in and out of the portal
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, user IDs, roles, and tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
