//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer.
//! They are responsible for:
//!
//! - **Business Logic**: Enforcing rules the database cannot (one review per tour, guides exist)
//! - **Orchestration**: Coordinating several repositories, e.g. recomputing tour ratings after a review write
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Side Effects**: Password hashing, token signing and outgoing email

pub mod auth;
pub mod email;
pub mod review;
pub mod tour;
pub mod user;

#[cfg(test)]
mod test;
