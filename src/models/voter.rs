use crate::entities::voter_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterVoterRequest {
    #[schema(example = "voter@example.com")]
    pub email: String,
    #[schema(example = "Ada Obi")]
    pub full_name: String,
    #[schema(example = "ENG/2021/044")]
    pub matric_number: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoterResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub matric_number: String,
    pub verified: bool,
    pub has_voted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<voter_entity::Model> for VoterResponse {
    fn from(v: voter_entity::Model) -> Self {
        Self {
            id: v.id,
            email: v.email,
            full_name: v.full_name,
            matric_number: v.matric_number,
            verified: v.verified,
            has_voted: v.has_voted,
            created_at: v.created_at.unwrap_or_else(Utc::now),
        }
    }
}
