pub use sea_orm_migration::prelude::*;

mod m20240719_000000_users;
mod m20240720_100000_directory;
mod m20240720_110000_categories;
mod m20240720_125016_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240719_000000_users::Migration),
            Box::new(m20240720_100000_directory::Migration),
            Box::new(m20240720_110000_categories::Migration),
            Box::new(m20240720_125016_transactions::Migration),
        ]
    }
}
