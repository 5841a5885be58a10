use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ApplicationStatus {
    /// Transition table. Approved and rejected are terminal.
    pub fn can_transition(&self, next: &ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Submitted)
                | (Submitted, UnderReview)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Submitted => write!(f, "submitted"),
            ApplicationStatus::UnderReview => write!(f, "under_review"),
            ApplicationStatus::Approved => write!(f, "approved"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub position_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub matric_number: String,
    pub department: String,
    pub level: String,
    pub gender: String,
    pub cgpa: f64,
    pub manifesto: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::*;

    #[test]
    fn forward_path_is_allowed() {
        assert!(Pending.can_transition(&Submitted));
        assert!(Submitted.can_transition(&UnderReview));
        assert!(UnderReview.can_transition(&Approved));
        assert!(UnderReview.can_transition(&Rejected));
    }

    #[test]
    fn jumps_and_reversals_are_rejected() {
        assert!(!Pending.can_transition(&Approved));
        assert!(!Pending.can_transition(&UnderReview));
        assert!(!Submitted.can_transition(&Approved));
        assert!(!Submitted.can_transition(&Pending));
        assert!(!Approved.can_transition(&Rejected));
        assert!(!Rejected.can_transition(&Submitted));
        assert!(!UnderReview.can_transition(&UnderReview));
    }
}
