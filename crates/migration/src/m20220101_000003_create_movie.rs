//! Create `movie` table with FK to `genre`.
//!
//! Titles are unique; every movie carries exactly one genre.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string_len(Movie::Title, 255).unique_key().not_null())
                    .col(date(Movie::ReleaseDate).not_null())
                    .col(string_len(Movie::DirectorName, 255).not_null())
                    .col(integer(Movie::GenreId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre")
                            .from(Movie::Table, Movie::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Movie { Table, Id, Title, ReleaseDate, DirectorName, GenreId }

#[derive(DeriveIden)]
enum Genre { Table, Id }
