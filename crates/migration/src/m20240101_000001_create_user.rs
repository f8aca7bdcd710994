//! Create `user` table.
//!
//! Email is the login key; the password column holds an argon2 PHC string
//! (or an unusable marker starting with `!`).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::Name, 255).not_null())
                    .col(string_len(User::Password, 255).not_null())
                    .col(boolean(User::IsActive).not_null().default(true))
                    .col(boolean(User::IsStaff).not_null().default(false))
                    .col(boolean(User::IsSuperuser).not_null().default(false))
                    .col(ColumnDef::new(User::Phone).integer().null())
                    .col(ColumnDef::new(User::LeavingDate).date().null())
                    .col(
                        ColumnDef::new(User::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    Name,
    Password,
    IsActive,
    IsStaff,
    IsSuperuser,
    Phone,
    LeavingDate,
    LastLogin,
}
