use sea_orm_migration::{prelude::*, schema::*};

use super::m20260118_000001_create_users_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Thread::Table)
                    .col(pk_uuid(Thread::Id))
                    .col(string(Thread::Text))
                    .col(uuid(Thread::AuthorId))
                    .col(uuid_null(Thread::ParentThreadId)) // For comments
                    .col(uuid_null(Thread::CommunityId)) // Unused for now, no FK
                    .col(timestamp_with_time_zone(Thread::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-thread-author_id")
                            .from(Thread::Table, Thread::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-thread-parent_id")
                            .from(Thread::Table, Thread::ParentThreadId)
                            .to(Thread::Table, Thread::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on author_id
        manager
            .create_index(
                Index::create()
                    .name("idx_threads_author_id")
                    .table(Thread::Table)
                    .col(Thread::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Create index on parent_thread_id for efficient reply lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_threads_parent_thread_id")
                    .table(Thread::Table)
                    .col(Thread::ParentThreadId)
                    .to_owned(),
            )
            .await?;

        // Create index on created_at for the feed ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_threads_created_at")
                    .table(Thread::Table)
                    .col(Thread::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Thread::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Thread {
    Table,
    Id,
    Text,
    AuthorId,
    ParentThreadId,
    CommunityId,
    CreatedAt,
}
