pub use sea_orm_migration::prelude::*;

mod m20250901_000001_initial;
mod m20250901_000002_add_otp_codes;
mod m20250901_000003_add_audit_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_initial::Migration),
            Box::new(m20250901_000002_add_otp_codes::Migration),
            Box::new(m20250901_000003_add_audit_logs::Migration),
        ]
    }
}
