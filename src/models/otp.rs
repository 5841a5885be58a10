use crate::entities::{OtpPurpose, voter_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    #[schema(example = "voter@example.com")]
    pub email: String,
    /// Wire name is `type`.
    #[serde(rename = "type")]
    pub purpose: OtpPurpose,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponse {
    pub success: bool,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    #[schema(example = "voter@example.com")]
    pub email: String,
    #[schema(example = "004213")]
    pub code: String,
}

/// Voter fields returned on successful verification. Never includes
/// credential material.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoterIdentity {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub verified: bool,
    pub has_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub valid: bool,
    pub voter: VoterIdentity,
}

impl From<voter_entity::Model> for VoterIdentity {
    fn from(v: voter_entity::Model) -> Self {
        Self {
            id: v.id,
            email: v.email,
            full_name: v.full_name,
            verified: v.verified,
            has_voted: v.has_voted,
            vote_token: v.vote_token,
        }
    }
}
