use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The aspirant-side inputs of an eligibility evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateProfile {
    #[schema(example = "Computer Engineering")]
    pub department: String,
    #[schema(example = "400")]
    pub level: String,
    #[schema(example = "female")]
    pub gender: String,
    #[schema(example = 4.2)]
    pub cgpa: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EligibilityCheckRequest {
    pub position_id: Uuid,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EligibilityResponse {
    pub eligible: bool,
    pub violations: Vec<String>,
}
