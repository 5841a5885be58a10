use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use univote_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::{Mailer, ResendMailer},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::new(config.resend.clone()));
    if !mailer.is_configured() {
        log::warn!("Resend is not configured; OTP and notification endpoints will fail");
    }

    let otp_service = OtpService::new(pool.clone(), mailer.clone(), config.otp.resend_window_secs);
    let notification_service = NotificationService::new(mailer.clone());
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let voter_service = VoterService::new(pool.clone());
    let position_service = PositionService::new(pool.clone());
    let audit_service = AuditService::new(pool.clone());
    let application_service = ApplicationService::new(pool.clone(), audit_service.clone());

    if let Err(e) = auth_service
        .ensure_bootstrap_admin(config.bootstrap_admin.as_ref())
        .await
    {
        log::error!("Bootstrap admin setup failed: {e:?}");
    }

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(otp_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(voter_service.clone()))
            .app_data(web::Data::new(position_service.clone()))
            .app_data(web::Data::new(audit_service.clone()))
            .app_data(web::Data::new(application_service.clone()))
            .configure(swagger_config)
            .service(web::scope("/functions/v1").configure(handlers::functions_config))
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::voter_config)
                    .configure(handlers::position_config)
                    .configure(handlers::eligibility_config)
                    .configure(handlers::application_config)
                    .configure(handlers::audit_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
