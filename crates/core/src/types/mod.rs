//! Core types for the Journal Portal.
//!
//! This module provides type-safe wrappers for identity and credential data.

pub mod email;
pub mod id;
pub mod role;
pub mod token;

pub use email::{Email, EmailError};
pub use id::{UserId, UserIdError};
pub use role::{Role, RoleParseError};
pub use token::{AccessToken, RefreshToken, TokenError};
