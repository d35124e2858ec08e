//! 访客交互事件表迁移
//!
//! interaction_events 只追加写入，不提供更新/删除路径。
//! 去重查询按 (ip, interaction_type, timestamp) 过滤，因此建立复合索引；
//! path 为 TEXT，不进入索引（MySQL 无法对 TEXT 建普通索引）。
//! ip 保持定长以便建索引，写入前在 `utils::ip` 按列宽截断；
//! browser / os 来自客户端 User-Agent，长度不可控，同样用 TEXT。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InteractionEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InteractionEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InteractionEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InteractionEvents::LocalTime)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InteractionEvents::Browser).text().not_null())
                    .col(ColumnDef::new(InteractionEvents::Os).text().not_null())
                    .col(
                        ColumnDef::new(InteractionEvents::Device)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InteractionEvents::Ip)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InteractionEvents::Section).text().not_null())
                    .col(ColumnDef::new(InteractionEvents::Path).text().not_null())
                    .col(
                        ColumnDef::new(InteractionEvents::InteractionType)
                            .string_len(16)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 去重查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_interaction_events_dedup")
                    .table(InteractionEvents::Table)
                    .col(InteractionEvents::Ip)
                    .col(InteractionEvents::InteractionType)
                    .col(InteractionEvents::Timestamp)
                    .to_owned(),
            )
            .await?;

        // Admin 列表按时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_interaction_events_timestamp")
                    .table(InteractionEvents::Table)
                    .col(InteractionEvents::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_interaction_events_timestamp")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_interaction_events_dedup").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(InteractionEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InteractionEvents {
    #[sea_orm(iden = "interaction_events")]
    Table,
    Id,
    Timestamp,
    LocalTime,
    Browser,
    Os,
    Device,
    Ip,
    Section,
    Path,
    InteractionType,
}
