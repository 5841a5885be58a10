use crate::entities::audit_log_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Wire contract of `audit-log`; field names are snake_case on the wire.
/// The acting admin id comes from the verified bearer token, never from
/// the body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditLogRequest {
    #[schema(example = "application.status_changed")]
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditLogResponse {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<audit_log_entity::Model> for AuditLogResponse {
    fn from(a: audit_log_entity::Model) -> Self {
        Self {
            id: a.id,
            admin_id: a.admin_id,
            action: a.action,
            entity_type: a.entity_type,
            entity_id: a.entity_id,
            details: a.details,
            ip_address: a.ip_address,
            created_at: a.created_at.unwrap_or_else(Utc::now),
        }
    }
}
