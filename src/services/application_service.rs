use crate::entities::{
    ApplicationStatus, application_entity as applications, position_entity as positions,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationQuery, ApplicationResponse, CandidateProfile, CreateApplicationRequest,
    PaginatedResponse, PaginationParams,
};
use crate::services::{AuditService, evaluate_eligibility};
use crate::utils::{normalize_email, validate_email};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

#[derive(Clone)]
pub struct ApplicationService {
    pool: DatabaseConnection,
    audit_service: AuditService,
}

impl ApplicationService {
    pub fn new(pool: DatabaseConnection, audit_service: AuditService) -> Self {
        Self {
            pool,
            audit_service,
        }
    }

    /// Creates an aspirant application:
    /// 1. The target position must exist.
    /// 2. The eligibility predicate must pass; violations come back to the
    ///    caller inside the validation message.
    /// 3. The record starts in `pending`.
    pub async fn create(
        &self,
        request: CreateApplicationRequest,
    ) -> AppResult<ApplicationResponse> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;

        let full_name = request.full_name.trim().to_string();
        let matric_number = request.matric_number.trim().to_string();
        if full_name.is_empty() || matric_number.is_empty() {
            return Err(AppError::ValidationError(
                "Full name and matric number are required".to_string(),
            ));
        }

        let position = positions::Entity::find_by_id(request.position_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Position not found".to_string()))?;

        let profile = CandidateProfile {
            department: request.department.clone(),
            level: request.level.clone(),
            gender: request.gender.clone(),
            cgpa: request.cgpa,
        };
        let violations = evaluate_eligibility(&position, &profile);
        if !violations.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Not eligible for {}: {}",
                position.title,
                violations.join("; ")
            )));
        }

        let now = Utc::now();
        let model = applications::ActiveModel {
            id: Set(Uuid::new_v4()),
            position_id: Set(position.id),
            email: Set(email),
            full_name: Set(full_name),
            matric_number: Set(matric_number),
            department: Set(request.department),
            level: Set(request.level),
            gender: Set(request.gender),
            cgpa: Set(request.cgpa),
            manifesto: Set(request.manifesto),
            status: Set(ApplicationStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Application {} created for position {}",
            model.id,
            position.title
        );
        Ok(model.into())
    }

    pub async fn list(
        &self,
        query: &ApplicationQuery,
    ) -> AppResult<PaginatedResponse<ApplicationResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };
        let page = params.page();
        let page_size = params.page_size();

        let mut base_query = applications::Entity::find();
        if let Some(status) = &query.status {
            base_query = base_query.filter(applications::Column::Status.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let models = base_query
            .order_by_desc(applications::Column::CreatedAt)
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

    /// Moves an application along the status machine. The update and its
    /// audit row commit together; an illegal move fails naming both
    /// states and writes nothing.
    pub async fn update_status(
        &self,
        id: Uuid,
        next: ApplicationStatus,
        admin_id: Uuid,
    ) -> AppResult<ApplicationResponse> {
        let txn = self.pool.begin().await?;

        let application = applications::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        let current = application.status.clone();
        if !current.can_transition(&next) {
            return Err(AppError::ValidationError(format!(
                "Cannot transition application from {current} to {next}"
            )));
        }

        let mut am = application.into_active_model();
        am.status = Set(next.clone());
        am.updated_at = Set(Utc::now());
        let updated = am.update(&txn).await?;

        self.audit_service
            .record_tx(
                &txn,
                admin_id,
                "application.status_changed",
                "application",
                updated.id.to_string(),
                json!({ "from": current.to_string(), "to": next.to_string() }),
            )
            .await?;

        txn.commit().await?;

        log::info!(
            "Application {} moved {} -> {} by admin {}",
            updated.id,
            current,
            next,
            admin_id
        );
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StringList;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn position_row() -> positions::Model {
        positions::Model {
            id: Uuid::new_v4(),
            title: "Student Union President".to_string(),
            description: None,
            min_cgpa: Some(3.0),
            eligible_departments: StringList(vec![]),
            eligible_levels: StringList(vec![]),
            eligible_gender: None,
            created_at: Some(Utc::now()),
        }
    }

    fn application_row(status: ApplicationStatus) -> applications::Model {
        let now = Utc::now();
        applications::Model {
            id: Uuid::new_v4(),
            position_id: Uuid::new_v4(),
            email: "aspirant@example.com".to_string(),
            full_name: "Ada Obi".to_string(),
            matric_number: "ENG/2021/044".to_string(),
            department: "Computer Engineering".to_string(),
            level: "400".to_string(),
            gender: "female".to_string(),
            cgpa: 4.1,
            manifesto: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(position_id: Uuid, cgpa: f64) -> CreateApplicationRequest {
        CreateApplicationRequest {
            position_id,
            email: "aspirant@example.com".to_string(),
            full_name: "Ada Obi".to_string(),
            matric_number: "ENG/2021/044".to_string(),
            department: "Computer Engineering".to_string(),
            level: "400".to_string(),
            gender: "female".to_string(),
            cgpa,
            manifesto: None,
        }
    }

    fn service(db: MockDatabase) -> ApplicationService {
        let pool = db.into_connection();
        ApplicationService::new(pool.clone(), AuditService::new(pool))
    }

    #[tokio::test]
    async fn create_starts_in_pending() {
        let position = position_row();
        let position_id = position.id;
        let inserted = applications::Model {
            position_id,
            ..application_row(ApplicationStatus::Pending)
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![position]])
            .append_query_results([vec![inserted]]);

        let svc = service(db);
        let application = svc.create(create_request(position_id, 4.1)).await.unwrap();
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn create_surfaces_violations_in_the_error() {
        let position = position_row();
        let position_id = position.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![position]]);

        let svc = service(db);
        let err = svc.create(create_request(position_id, 2.4)).await.unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert!(msg.contains("Not eligible"));
                assert!(msg.contains("CGPA"));
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_requires_an_existing_position() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<positions::Model>::new()]);

        let svc = service(db);
        let err = svc
            .create(create_request(Uuid::new_v4(), 4.1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_status_follows_the_transition_table() {
        let current = application_row(ApplicationStatus::UnderReview);
        let id = current.id;
        let updated = applications::Model {
            status: ApplicationStatus::Approved,
            ..current.clone()
        };
        let audit_row = crate::entities::audit_log_entity::Model {
            id: Uuid::new_v4(),
            admin_id: Uuid::new_v4(),
            action: "application.status_changed".to_string(),
            entity_type: Some("application".to_string()),
            entity_id: Some(id.to_string()),
            details: None,
            ip_address: None,
            created_at: Some(Utc::now()),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current]])
            .append_query_results([vec![updated]])
            .append_query_results([vec![audit_row]]);

        let svc = service(db);
        let result = svc
            .update_status(id, ApplicationStatus::Approved, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(result.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn update_status_rejects_illegal_jumps() {
        let current = application_row(ApplicationStatus::Pending);
        let id = current.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current]]);

        let svc = service(db);
        let err = svc
            .update_status(id, ApplicationStatus::Approved, Uuid::new_v4())
            .await
            .unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert!(msg.contains("pending"));
                assert!(msg.contains("approved"));
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_status_requires_an_existing_application() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<applications::Model>::new()]);

        let svc = service(db);
        let err = svc
            .update_status(Uuid::new_v4(), ApplicationStatus::Submitted, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
