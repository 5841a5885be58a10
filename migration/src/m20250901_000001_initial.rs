use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Email,
    FullName,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Voters {
    Table,
    Id,
    Email,
    FullName,
    MatricNumber,
    Verified,
    HasVoted,
    VoteToken,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Positions {
    Table,
    Id,
    Title,
    Description,
    MinCgpa,
    EligibleDepartments,
    EligibleLevels,
    EligibleGender,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    PositionId,
    Email,
    FullName,
    MatricNumber,
    Department,
    Level,
    Gender,
    Cgpa,
    Manifesto,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Admins::Email).string().not_null())
                    .col(ColumnDef::new(Admins::FullName).string().not_null())
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_admins_email")
                    .table(Admins::Table)
                    .col(Admins::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Voters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Voters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Voters::Email).string().not_null())
                    .col(ColumnDef::new(Voters::FullName).string().not_null())
                    .col(ColumnDef::new(Voters::MatricNumber).string().not_null())
                    .col(
                        ColumnDef::new(Voters::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Voters::HasVoted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Voters::VoteToken).string().null())
                    .col(
                        ColumnDef::new(Voters::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_voters_email")
                    .table(Voters::Table)
                    .col(Voters::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_voters_matric_number")
                    .table(Voters::Table)
                    .col(Voters::MatricNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Positions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Positions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Positions::Title).string().not_null())
                    .col(ColumnDef::new(Positions::Description).text().null())
                    .col(ColumnDef::new(Positions::MinCgpa).double().null())
                    .col(
                        ColumnDef::new(Positions::EligibleDepartments)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Positions::EligibleLevels)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Positions::EligibleGender).string().null())
                    .col(
                        ColumnDef::new(Positions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_positions_title")
                    .table(Positions::Table)
                    .col(Positions::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::PositionId).uuid().not_null())
                    .col(ColumnDef::new(Applications::Email).string().not_null())
                    .col(ColumnDef::new(Applications::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Applications::MatricNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Department).string().not_null())
                    .col(ColumnDef::new(Applications::Level).string().not_null())
                    .col(ColumnDef::new(Applications::Gender).string().not_null())
                    .col(ColumnDef::new(Applications::Cgpa).double().not_null())
                    .col(ColumnDef::new(Applications::Manifesto).text().null())
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_applications_position_id")
                    .table(Applications::Table)
                    .col(Applications::PositionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_applications_status")
                    .table(Applications::Table)
                    .col(Applications::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Positions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Voters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        Ok(())
    }
}
