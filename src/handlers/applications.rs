use crate::error::AppError;
use crate::models::*;
use crate::services::ApplicationService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

fn get_admin_id_from_request(req: &HttpRequest) -> Option<Uuid> {
    req.extensions().get::<Uuid>().copied()
}

#[utoipa::path(
    post,
    path = "/api/v1/applications",
    tag = "applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 200, description = "Application created in pending", body = ApplicationResponse),
        (status = 400, description = "Invalid fields or eligibility violations"),
        (status = 404, description = "Position not found")
    )
)]
pub async fn create_application(
    application_service: web::Data<ApplicationService>,
    request: web::Json<CreateApplicationRequest>,
) -> Result<HttpResponse> {
    match application_service.create(request.into_inner()).await {
        Ok(application) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": application
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    tag = "applications",
    params(
        ("status" = Option<String>, Query, description = "Filter by application status"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("page_size" = Option<u64>, Query, description = "Rows per page, capped at 100")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Application listing"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_applications(
    application_service: web::Data<ApplicationService>,
    query: web::Query<ApplicationQuery>,
) -> Result<HttpResponse> {
    match application_service.list(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{id}/status",
    tag = "applications",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = UpdateApplicationStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status updated", body = ApplicationResponse),
        (status = 400, description = "Transition not allowed"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_application_status(
    application_service: web::Data<ApplicationService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateApplicationStatusRequest>,
) -> Result<HttpResponse> {
    let Some(admin_id) = get_admin_id_from_request(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match application_service
        .update_status(path.into_inner(), request.into_inner().status, admin_id)
        .await
    {
        Ok(application) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": application
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn application_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/applications")
            .route("", web::post().to(create_application))
            .route("", web::get().to(list_applications))
            .route("/{id}/status", web::patch().to(update_application_status)),
    );
}
