pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_user_table;
mod m20261001_000002_create_tour_table;
mod m20261001_000003_create_tour_start_date_table;
mod m20261001_000004_create_tour_location_table;
mod m20261001_000005_create_tour_guide_table;
mod m20261001_000006_create_review_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_user_table::Migration),
            Box::new(m20261001_000002_create_tour_table::Migration),
            Box::new(m20261001_000003_create_tour_start_date_table::Migration),
            Box::new(m20261001_000004_create_tour_location_table::Migration),
            Box::new(m20261001_000005_create_tour_guide_table::Migration),
            Box::new(m20261001_000006_create_review_table::Migration),
        ]
    }
}
