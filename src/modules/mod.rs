pub mod accounts;
pub mod auth;
pub mod classrooms;
pub mod subjects;
