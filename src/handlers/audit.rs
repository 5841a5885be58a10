use crate::models::*;
use crate::services::AuditService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    tag = "audit",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("page_size" = Option<u64>, Query, description = "Rows per page, capped at 100")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Audit trail, newest first"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_audit_logs(
    audit_service: web::Data<AuditService>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match audit_service.list(&params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn audit_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/audit-logs", web::get().to(list_audit_logs));
}
