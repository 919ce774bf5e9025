//! # Classdesk Models
//!
//! Domain models and DTOs shared by the store backends and the HTTP layer.
//!
//! - [`ids`]: Typed UUID wrappers
//! - [`accounts`]: Accounts, roles and registration
//! - [`classrooms`]: Classrooms and enrollment
//! - [`subjects`]: Subjects and faculty assignment
//! - [`auth`]: Login and token responses
//! - [`views`]: Classrooms and subjects with their references resolved

pub mod accounts;
pub mod auth;
pub mod classrooms;
pub mod ids;
pub mod subjects;
pub mod views;

pub use ids::{AccountId, ClassroomId, SubjectId};
