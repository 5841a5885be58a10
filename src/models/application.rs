use crate::entities::{ApplicationStatus, application_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateApplicationRequest {
    pub position_id: Uuid,
    #[schema(example = "aspirant@example.com")]
    pub email: String,
    #[schema(example = "Ada Obi")]
    pub full_name: String,
    #[schema(example = "ENG/2021/044")]
    pub matric_number: String,
    #[schema(example = "Computer Engineering")]
    pub department: String,
    #[schema(example = "400")]
    pub level: String,
    #[schema(example = "female")]
    pub gender: String,
    #[schema(example = 4.2)]
    pub cgpa: f64,
    pub manifesto: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
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

impl From<application_entity::Model> for ApplicationResponse {
    fn from(a: application_entity::Model) -> Self {
        Self {
            id: a.id,
            position_id: a.position_id,
            email: a.email,
            full_name: a.full_name,
            matric_number: a.matric_number,
            department: a.department,
            level: a.level,
            gender: a.gender,
            cgpa: a.cgpa,
            manifesto: a.manifesto,
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}
