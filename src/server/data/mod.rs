//! Database repository layer for all domain entities.
//!
//! Repositories hold a borrowed connection and perform the CRUD operations for one
//! aggregate each. They use SeaORM entity models internally and return domain models,
//! keeping the entity crate out of the service and controller layers.
//!
//! Each repository also implements [`Queryable`](crate::server::util::api_features::Queryable)
//! for its entity, declaring which JSON fields list requests may filter and sort on.

pub mod review;
pub mod tour;
pub mod user;

#[cfg(test)]
mod test;
