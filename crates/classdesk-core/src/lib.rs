//! # Classdesk Core
//!
//! Core types, errors, and utilities for the Classdesk API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: The application error taxonomy with HTTP response conversion
//! - [`password`]: bcrypt credential hashing and verification
//! - [`serde`]: Lenient deserialization helpers for request bodies
//!
//! # Example
//!
//! ```ignore
//! use classdesk_core::errors::AppError;
//! use classdesk_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Classroom not found");
//!
//! let hash = hash_password("secure_password").await?;
//! assert!(verify_password("secure_password", &hash).await?);
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
