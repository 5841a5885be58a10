use crate::models::*;
use crate::services::VoterService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/v1/voters",
    tag = "voters",
    request_body = RegisterVoterRequest,
    responses(
        (status = 200, description = "Voter registered", body = VoterResponse),
        (status = 400, description = "Invalid email or duplicate registration")
    )
)]
pub async fn register_voter(
    voter_service: web::Data<VoterService>,
    request: web::Json<RegisterVoterRequest>,
) -> Result<HttpResponse> {
    match voter_service.register(request.into_inner()).await {
        Ok(voter) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": voter
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/voters",
    tag = "voters",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("page_size" = Option<u64>, Query, description = "Rows per page, capped at 100")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Voter listing"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_voters(
    voter_service: web::Data<VoterService>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match voter_service.list(&params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn voter_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/voters")
            .route("", web::post().to(register_voter))
            .route("", web::get().to(list_voters)),
    );
}
