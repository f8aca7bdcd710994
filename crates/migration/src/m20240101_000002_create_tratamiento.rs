//! Create `tratamiento` table.
//! `codigo` is the business key and carries its own unique index.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tratamiento::Table)
                    .if_not_exists()
                    .col(pk_auto(Tratamiento::Id))
                    .col(string_len(Tratamiento::Codigo, 8).not_null())
                    .col(string_len(Tratamiento::Nombre, 255).not_null())
                    .col(string_len(Tratamiento::Descripcion, 255).not_null())
                    .col(integer(Tratamiento::DuracionMinutos).not_null())
                    .col(ColumnDef::new(Tratamiento::Familia).string_len(2).null())
                    .col(decimal_len(Tratamiento::PrecioBase, 5, 2).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tratamiento_codigo_unique")
                    .table(Tratamiento::Table)
                    .col(Tratamiento::Codigo)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tratamiento::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tratamiento {
    Table,
    Id,
    Codigo,
    Nombre,
    Descripcion,
    DuracionMinutos,
    Familia,
    PrecioBase,
}
