//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types carry validated
//! request data from the controller into the service layer.

pub mod review;
pub mod tour;
pub mod user;
