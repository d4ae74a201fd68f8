//! Schema migrations for the Aura backend.

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_moderated_tables;
mod m20240601_000002_create_catalog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_moderated_tables::Migration),
            Box::new(m20240601_000002_create_catalog_tables::Migration),
        ]
    }
}
