//! Newtype IDs for type-safe entity references.
//!
//! Portal identifiers are opaque strings: the backend assigns them, and the
//! offline demo login synthesizes fixed ones. Use the `define_id!` macro to
//! create wrappers that prevent mixing IDs from different entity types.

/// Errors that can occur when constructing an ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input string is empty.
    #[error("identifier cannot be empty")]
    Empty,
}

/// Macro to define a type-safe, opaque string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, rejecting empty values
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `Display` and `From<$name> for String`
///
/// # Example
///
/// ```rust
/// # use journal_portal_core::define_id;
/// define_id!(ReviewerId);
///
/// let id = ReviewerId::new("reviewer-7").unwrap();
/// assert_eq!(id.as_str(), "reviewer-7");
/// assert!(ReviewerId::new("").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a non-empty string.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is empty.
            pub fn new(id: impl Into<String>) -> Result<Self, $crate::types::id::UserIdError> {
                let id = id.into();
                if id.is_empty() {
                    return Err($crate::types::id::UserIdError::Empty);
                }
                Ok(Self(id))
            }

            /// Create an ID from a non-empty literal known at compile time.
            #[must_use]
            pub fn from_static(id: &'static str) -> Self {
                debug_assert!(!id.is_empty(), "static identifiers must not be empty");
                Self(id.to_owned())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::types::id::UserIdError;

            fn try_from(id: String) -> Result<Self, Self::Error> {
                Self::new(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
