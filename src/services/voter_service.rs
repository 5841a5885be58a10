use crate::entities::voter_entity as voters;
use crate::error::{AppError, AppResult};
use crate::models::{PaginatedResponse, PaginationParams, RegisterVoterRequest, VoterResponse};
use crate::utils::{normalize_email, validate_email};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoterService {
    pool: DatabaseConnection,
}

impl VoterService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Registers a voter. The email is validated and normalized here so
    /// OTP issuance later only has to lower-case its input to match.
    pub async fn register(&self, request: RegisterVoterRequest) -> AppResult<VoterResponse> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;

        let full_name = request.full_name.trim().to_string();
        let matric_number = request.matric_number.trim().to_string();
        if full_name.is_empty() || matric_number.is_empty() {
            return Err(AppError::ValidationError(
                "Full name and matric number are required".to_string(),
            ));
        }

        let existing = voters::Entity::find()
            .filter(voters::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        let existing = voters::Entity::find()
            .filter(voters::Column::MatricNumber.eq(matric_number.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Matric number is already registered".to_string(),
            ));
        }

        let model = voters::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            full_name: Set(full_name),
            matric_number: Set(matric_number),
            verified: Set(false),
            has_voted: Set(false),
            vote_token: Set(None),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Voter registered: {email}");
        Ok(model.into())
    }

    pub async fn list(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<VoterResponse>> {
        let page = params.page();
        let page_size = params.page_size();

        let base_query = voters::Entity::find();
        let total = base_query.clone().count(&self.pool).await?;

        let models = base_query
            .order_by_desc(voters::Column::CreatedAt)
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

    fn voter_row(email: &str, matric: &str) -> voters::Model {
        voters::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: "Ada Obi".to_string(),
            matric_number: matric.to_string(),
            verified: false,
            has_voted: false,
            vote_token: None,
            created_at: Some(Utc::now()),
        }
    }

    fn request(email: &str) -> RegisterVoterRequest {
        RegisterVoterRequest {
            email: email.to_string(),
            full_name: "Ada Obi".to_string(),
            matric_number: "ENG/2021/044".to_string(),
        }
    }

    #[tokio::test]
    async fn register_normalizes_and_stores_the_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<voters::Model>::new()])
            .append_query_results([Vec::<voters::Model>::new()])
            .append_query_results([vec![voter_row("voter@example.com", "ENG/2021/044")]]);

        let svc = VoterService::new(db.into_connection());
        let voter = svc.register(request("  Voter@Example.COM ")).await.unwrap();
        assert_eq!(voter.email, "voter@example.com");
        assert!(!voter.verified);
        assert!(!voter.has_voted);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![voter_row("voter@example.com", "ENG/2021/001")]]);

        let svc = VoterService::new(db.into_connection());
        let err = svc.register(request("voter@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_matric_number() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<voters::Model>::new()])
            .append_query_results([vec![voter_row("other@example.com", "ENG/2021/044")]]);

        let svc = VoterService::new(db.into_connection());
        let err = svc.register(request("voter@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn register_rejects_malformed_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let svc = VoterService::new(db.into_connection());

        let err = svc.register(request("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
