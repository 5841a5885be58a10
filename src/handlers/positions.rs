use crate::models::*;
use crate::services::PositionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/v1/positions",
    tag = "positions",
    request_body = CreatePositionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Position created", body = PositionResponse),
        (status = 400, description = "Missing or duplicate title"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_position(
    position_service: web::Data<PositionService>,
    request: web::Json<CreatePositionRequest>,
) -> Result<HttpResponse> {
    match position_service.create(request.into_inner()).await {
        Ok(position) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": position
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/positions",
    tag = "positions",
    responses(
        (status = 200, description = "All positions with their eligibility constraints")
    )
)]
pub async fn list_positions(
    position_service: web::Data<PositionService>,
) -> Result<HttpResponse> {
    match position_service.list().await {
        Ok(positions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": positions
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn position_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/positions")
            .route("", web::post().to(create_position))
            .route("", web::get().to(list_positions)),
    );
}
