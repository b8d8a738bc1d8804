use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Tour, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Tour)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// CREATE INDEX statements executed after all tables exist.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and tour tables along with the tour's child tables.
    ///
    /// Tables are added in dependency order:
    /// - User
    /// - Tour
    /// - TourStartDate
    /// - TourLocation
    /// - TourGuide
    pub fn with_tour_tables(self) -> Self {
        self.with_table(User)
            .with_table(Tour)
            .with_table(TourStartDate)
            .with_table(TourLocation)
            .with_table(TourGuide)
    }

    /// Adds every table of the schema, including reviews.
    ///
    /// Also creates the `(tour_id, user_id)` unique index on reviews.
    pub fn with_all_tables(self) -> Self {
        self.with_tour_tables()
            .with_table(Review)
            .with_index(
                Index::create()
                    .name("idx_review_tour_id_user_id")
                    .table(Review)
                    .col(entity::review::Column::TourId)
                    .col(entity::review::Column::UserId)
                    .unique()
                    .to_owned(),
            )
    }

    /// Adds an index, e.g. a composite unique key the entity definitions cannot express.
    pub fn with_index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
