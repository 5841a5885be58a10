use crate::entities::{StringList, position_entity as positions};
use crate::error::{AppError, AppResult};
use crate::models::{CandidateProfile, CreatePositionRequest, EligibilityResponse, PositionResponse};
use crate::services::evaluate_eligibility;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct PositionService {
    pool: DatabaseConnection,
}

impl PositionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreatePositionRequest) -> AppResult<PositionResponse> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }

        let existing = positions::Entity::find()
            .filter(positions::Column::Title.eq(title.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "A position with this title already exists".to_string(),
            ));
        }

        let model = positions::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            description: Set(request.description),
            min_cgpa: Set(request.min_cgpa),
            eligible_departments: Set(StringList(request.eligible_departments)),
            eligible_levels: Set(StringList(request.eligible_levels)),
            eligible_gender: Set(request.eligible_gender),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Position created: {}", model.title);
        Ok(model.into())
    }

    pub async fn list(&self) -> AppResult<Vec<PositionResponse>> {
        let models = positions::Entity::find()
            .order_by_asc(positions::Column::Title)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<positions::Model> {
        positions::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Position not found".to_string()))
    }

    /// Stateless eligibility probe: evaluates the profile against the
    /// position's constraints without persisting anything.
    pub async fn check_eligibility(
        &self,
        position_id: Uuid,
        profile: &CandidateProfile,
    ) -> AppResult<EligibilityResponse> {
        let position = self.get(position_id).await?;
        let violations = evaluate_eligibility(&position, profile);
        Ok(EligibilityResponse {
            eligible: violations.is_empty(),
            violations,
        })
    }
}
