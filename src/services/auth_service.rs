use crate::config::BootstrapAdminConfig;
use crate::entities::admin_entity as admins;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RefreshResponse};
use crate::utils::{
    JwtService, hash_password, normalize_email, validate_email, validate_password, verify_password,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }

        // One message for both failure modes; do not reveal whether the
        // account exists.
        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &admin.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        let access_token = self
            .jwt_service
            .generate_access_token(admin.id, &admin.email)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(admin.id, &admin.email)?;
        let expires_in = self.jwt_service.get_access_token_expires_in();

        log::info!("Admin logged in: {email}");
        Ok(AuthResponse {
            admin: admin.into(),
            access_token,
            refresh_token,
            expires_in,
        })
    }

    pub async fn refresh_token(&self, token: &str) -> AppResult<RefreshResponse> {
        let claims = self.jwt_service.verify_refresh_token(token)?;
        let admin_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let admin = admins::Entity::find_by_id(admin_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Admin account no longer exists".to_string()))?;

        let access_token = self
            .jwt_service
            .generate_access_token(admin.id, &admin.email)?;

        Ok(RefreshResponse {
            access_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    /// Creates the configured admin account at startup when absent, so a
    /// fresh deployment has a way in.
    pub async fn ensure_bootstrap_admin(
        &self,
        bootstrap: Option<&BootstrapAdminConfig>,
    ) -> AppResult<()> {
        let Some(bootstrap) = bootstrap else {
            return Ok(());
        };

        let email = normalize_email(&bootstrap.email);
        validate_email(&email)
            .map_err(|_| AppError::ConfigError("Bootstrap admin email is invalid".to_string()))?;

        let existing = admins::Entity::find()
            .filter(admins::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        validate_password(&bootstrap.password).map_err(|_| {
            AppError::ConfigError("Bootstrap admin password does not meet the policy".to_string())
        })?;
        let password_hash = hash_password(&bootstrap.password)?;

        admins::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            full_name: Set(bootstrap.full_name.clone()),
            password_hash: Set(password_hash),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Bootstrap admin created: {email}");
        Ok(())
    }
}
