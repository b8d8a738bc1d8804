//! Tourboard Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the tourboard
//! API. This crate offers a builder pattern for creating test contexts with in-memory SQLite
//! databases and factories for inserting users, tours and reviews with sensible defaults.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_tour_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_all_tables().build().await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     let tour = factory::tour::create_tour(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
