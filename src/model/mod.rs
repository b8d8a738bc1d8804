//! JSON request and response shapes of the public API.
//!
//! Field names mirror the stored schema in camelCase. Server-side domain models convert
//! into these DTOs at the controller boundary.

pub mod api;
pub mod review;
pub mod tour;
pub mod user;
