//! Journal Portal CLI library.
//!
//! The `jp-cli` binary is a thin wrapper around this crate, which keeps the
//! backend client and the commands testable.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod commands;
pub mod config;
