//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories insert rows directly through SeaORM active
//! models, bypassing request validation, so tests can set up any state they need.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!     let tour = factory::tour::create_tour(&db).await?;
//!
//!     // Create with all dependencies
//!     let (user, tour, review) = factory::helpers::create_review_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let guide = factory::user::UserFactory::new(&db)
//!     .email("guide@example.com")
//!     .role("lead-guide")
//!     .build()
//!     .await?;
//!
//! let tour = factory::tour::TourFactory::new(&db)
//!     .difficulty("difficult")
//!     .price(997.0)
//!     .start_location(34.01, -118.49)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `tour` - Create tour entities, start dates and guide links
//! - `review` - Create review entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod helpers;
pub mod review;
pub mod tour;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use review::create_review;
pub use tour::{add_guide, add_start_date, create_tour};
pub use user::create_user;
