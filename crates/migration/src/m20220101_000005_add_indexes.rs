use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Movie: index on genre_id
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genre")
                    .table(Movie::Table)
                    .col(Movie::GenreId)
                    .to_owned(),
            )
            .await?;

        // Rating: ratings are always loaded per movie
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_movie")
                    .table(Rating::Table)
                    .col(Rating::MovieId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_user")
                    .table(Rating::Table)
                    .col(Rating::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_movie_genre").table(Movie::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rating_movie").table(Rating::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rating_user").table(Rating::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Movie { Table, GenreId }

#[derive(DeriveIden)]
enum Rating { Table, MovieId, UserId }
