//! The four function endpoints kept wire-compatible with the original
//! serverless deployment: `send-otp`, `verify-otp`,
//! `send-editorial-notification` and `audit-log`.

use crate::error::AppError;
use crate::models::*;
use crate::services::{AuditService, NotificationService, OtpService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

fn get_admin_id_from_request(req: &HttpRequest) -> Option<Uuid> {
    req.extensions().get::<Uuid>().copied()
}

#[utoipa::path(
    post,
    path = "/functions/v1/send-otp",
    tag = "functions",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code issued and emailed", body = SendOtpResponse),
        (status = 400, description = "Missing email"),
        (status = 429, description = "A code was issued too recently"),
        (status = 500, description = "Persistence or delivery failure")
    )
)]
pub async fn send_otp(
    otp_service: web::Data<OtpService>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match otp_service.issue(&request.email, request.purpose).await {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "expiresAt": record.expires_at
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/functions/v1/verify-otp",
    tag = "functions",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Code accepted", body = VerifyOtpResponse),
        (status = 400, description = "Invalid or expired code"),
        (status = 404, description = "No voter registered for this email")
    )
)]
pub async fn verify_otp(
    otp_service: web::Data<OtpService>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse> {
    match otp_service.verify(&request.email, &request.code).await {
        Ok(voter) => Ok(HttpResponse::Ok().json(json!({
            "valid": true,
            "voter": voter
        }))),
        // This endpoint's error envelope carries `valid` instead of
        // `success`; clients branch on it.
        Err(e) => Ok(HttpResponse::build(e.status_code()).json(json!({
            "valid": false,
            "error": {
                "code": e.code(),
                "message": e.message()
            }
        }))),
    }
}

#[utoipa::path(
    post,
    path = "/functions/v1/send-editorial-notification",
    tag = "functions",
    request_body = EditorialNotificationRequest,
    responses(
        (status = 200, description = "Notification sent"),
        (status = 400, description = "Missing request fields"),
        (status = 500, description = "Provider unconfigured or delivery failure")
    )
)]
pub async fn send_editorial_notification(
    notification_service: web::Data<NotificationService>,
    request: web::Json<EditorialNotificationRequest>,
) -> Result<HttpResponse> {
    match notification_service
        .send_editorial_notification(request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/functions/v1/audit-log",
    tag = "functions",
    request_body = AuditLogRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Audit entry recorded"),
        (status = 400, description = "Missing action"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn audit_log(
    audit_service: web::Data<AuditService>,
    req: HttpRequest,
    request: web::Json<AuditLogRequest>,
) -> Result<HttpResponse> {
    // The admin id comes from the verified token the middleware stashed;
    // a client-supplied id is never trusted.
    let Some(admin_id) = get_admin_id_from_request(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match audit_service.record(admin_id, request.into_inner()).await {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn functions_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-otp", web::post().to(send_otp))
        .route("/verify-otp", web::post().to(verify_otp))
        .route(
            "/send-editorial-notification",
            web::post().to(send_editorial_notification),
        )
        .route("/audit-log", web::post().to(audit_log));
}
