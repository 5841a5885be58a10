use crate::models::*;
use crate::services::PositionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/v1/eligibility/check",
    tag = "eligibility",
    request_body = EligibilityCheckRequest,
    responses(
        (status = 200, description = "Violations for the given profile", body = EligibilityResponse),
        (status = 404, description = "Position not found")
    )
)]
pub async fn check_eligibility(
    position_service: web::Data<PositionService>,
    request: web::Json<EligibilityCheckRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match position_service
        .check_eligibility(request.position_id, &request.profile)
        .await
    {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn eligibility_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/eligibility").route("/check", web::post().to(check_eligibility)));
}
