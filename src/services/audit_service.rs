use crate::entities::audit_log_entity as audit_logs;
use crate::error::{AppError, AppResult};
use crate::models::{AuditLogRequest, AuditLogResponse, PaginatedResponse, PaginationParams};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuditService {
    pool: DatabaseConnection,
}

impl AuditService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Records an audit entry for the verified admin. The admin id always
    /// comes from the bearer token, never from the request body.
    pub async fn record(
        &self,
        admin_id: Uuid,
        request: AuditLogRequest,
    ) -> AppResult<AuditLogResponse> {
        let action = request.action.trim().to_string();
        if action.is_empty() {
            return Err(AppError::ValidationError("Action is required".to_string()));
        }

        let model = Self::insert_row(
            &self.pool,
            admin_id,
            action,
            request.entity_type,
            request.entity_id,
            request.details,
            request.ip_address,
        )
        .await?;

        Ok(model.into())
    }

    /// Transactional variant used when an audit row must commit together
    /// with the mutation it describes.
    pub async fn record_tx(
        &self,
        txn: &DatabaseTransaction,
        admin_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: String,
        details: serde_json::Value,
    ) -> Result<(), DbErr> {
        Self::insert_row(
            txn,
            admin_id,
            action.to_string(),
            Some(entity_type.to_string()),
            Some(entity_id),
            Some(details),
            None,
        )
        .await?;
        Ok(())
    }

    async fn insert_row<C: ConnectionTrait>(
        conn: &C,
        admin_id: Uuid,
        action: String,
        entity_type: Option<String>,
        entity_id: Option<String>,
        details: Option<serde_json::Value>,
        ip_address: Option<String>,
    ) -> Result<audit_logs::Model, DbErr> {
        audit_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            admin_id: Set(admin_id),
            action: Set(action),
            entity_type: Set(entity_type),
            entity_id: Set(entity_id),
            details: Set(details),
            ip_address: Set(ip_address),
            created_at: Set(Some(Utc::now())),
        }
        .insert(conn)
        .await
    }

    pub async fn list(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<AuditLogResponse>> {
        let page = params.page();
        let page_size = params.page_size();

        let base_query = audit_logs::Entity::find();
        let total = base_query.clone().count(&self.pool).await?;

        let models = base_query
            .order_by_desc(audit_logs::Column::CreatedAt)
            .limit(page_size)
            .offset(params.offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            models.into_iter().map(Into::into).collect(),
            page,
            page_size,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    #[tokio::test]
    async fn record_rejects_blank_action() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let svc = AuditService::new(db.into_connection());

        let err = svc
            .record(
                Uuid::new_v4(),
                AuditLogRequest {
                    action: "   ".to_string(),
                    entity_type: None,
                    entity_id: None,
                    details: None,
                    ip_address: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn record_stores_the_verified_admin_id() {
        let admin_id = Uuid::new_v4();
        let row = audit_logs::Model {
            id: Uuid::new_v4(),
            admin_id,
            action: "voter.exported".to_string(),
            entity_type: None,
            entity_id: None,
            details: Some(json!({"count": 12})),
            ip_address: Some("10.1.2.3".to_string()),
            created_at: Some(Utc::now()),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row]]);

        let svc = AuditService::new(db.into_connection());
        let entry = svc
            .record(
                admin_id,
                AuditLogRequest {
                    action: "voter.exported".to_string(),
                    entity_type: None,
                    entity_id: None,
                    details: Some(json!({"count": 12})),
                    ip_address: Some("10.1.2.3".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(entry.admin_id, admin_id);
        assert_eq!(entry.action, "voter.exported");
    }
}
