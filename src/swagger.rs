use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{ApplicationStatus, OtpPurpose};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::functions::send_otp,
        handlers::functions::verify_otp,
        handlers::functions::send_editorial_notification,
        handlers::functions::audit_log,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::voters::register_voter,
        handlers::voters::list_voters,
        handlers::positions::create_position,
        handlers::positions::list_positions,
        handlers::eligibility::check_eligibility,
        handlers::applications::create_application,
        handlers::applications::list_applications,
        handlers::applications::update_application_status,
        handlers::audit::list_audit_logs,
    ),
    components(
        schemas(
            SendOtpRequest,
            SendOtpResponse,
            VerifyOtpRequest,
            VerifyOtpResponse,
            VoterIdentity,
            OtpPurpose,
            EditorialNotificationRequest,
            AuditLogRequest,
            AuditLogResponse,
            LoginRequest,
            AdminResponse,
            AuthResponse,
            RefreshResponse,
            RegisterVoterRequest,
            VoterResponse,
            CreatePositionRequest,
            PositionResponse,
            CandidateProfile,
            EligibilityCheckRequest,
            EligibilityResponse,
            CreateApplicationRequest,
            ApplicationQuery,
            UpdateApplicationStatusRequest,
            ApplicationResponse,
            ApplicationStatus,
            PaginationParams,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "functions", description = "OTP, notification and audit function endpoints"),
        (name = "auth", description = "Admin authentication API"),
        (name = "voters", description = "Voter registration and listing API"),
        (name = "positions", description = "Election position API"),
        (name = "eligibility", description = "Eligibility check API"),
        (name = "applications", description = "Aspirant application API"),
        (name = "audit", description = "Audit trail API"),
    ),
    info(
        title = "UniVote Backend API",
        version = "1.0.0",
        description = "Student-election administration REST API documentation",
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
