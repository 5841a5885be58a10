use crate::entities::position_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePositionRequest {
    #[schema(example = "Student Union President")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = 3.0)]
    pub min_cgpa: Option<f64>,
    /// Empty list means any department qualifies.
    #[serde(default)]
    pub eligible_departments: Vec<String>,
    /// Empty list means any level qualifies.
    #[serde(default)]
    pub eligible_levels: Vec<String>,
    /// Absent or "any" means no gender restriction.
    pub eligible_gender: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PositionResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub min_cgpa: Option<f64>,
    pub eligible_departments: Vec<String>,
    pub eligible_levels: Vec<String>,
    pub eligible_gender: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<position_entity::Model> for PositionResponse {
    fn from(p: position_entity::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            min_cgpa: p.min_cgpa,
            eligible_departments: p.eligible_departments.0,
            eligible_levels: p.eligible_levels.0,
            eligible_gender: p.eligible_gender,
            created_at: p.created_at.unwrap_or_else(Utc::now),
        }
    }
}
