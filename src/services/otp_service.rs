use crate::entities::{OtpPurpose, otp_code_entity as otp, voter_entity as voters};
use crate::error::{AppError, AppResult};
use crate::external::Mailer;
use crate::models::VoterIdentity;
use crate::utils::{generate_otp_code, normalize_email};
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// Codes are valid for exactly five minutes from issuance.
const OTP_TTL_MINUTES: i64 = 5;

#[derive(Clone)]
pub struct OtpService {
    pool: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
    resend_window_secs: i64,
}

impl OtpService {
    pub fn new(pool: DatabaseConnection, mailer: Arc<dyn Mailer>, resend_window_secs: i64) -> Self {
        Self {
            pool,
            mailer,
            resend_window_secs,
        }
    }

    /// Issues a fresh code for `email`:
    /// 1. Refuse outright when the mail channel is unconfigured.
    /// 2. Rate-probe the newest live code for the address.
    /// 3. Supersede every unused code and insert the new one, in a single
    ///    transaction.
    /// 4. Email the code after commit. The stored row stays valid if
    ///    delivery fails; a later re-issue supersedes it.
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> AppResult<otp::Model> {
        if !self.mailer.is_configured() {
            return Err(AppError::ConfigError(
                "Email provider is not configured".to_string(),
            ));
        }

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::ValidationError("Email is required".to_string()));
        }

        let now = Utc::now();

        let newest = otp::Entity::find()
            .filter(otp::Column::Email.eq(email.clone()))
            .filter(otp::Column::Used.eq(false))
            .filter(otp::Column::ExpiresAt.gt(now))
            .order_by_desc(otp::Column::CreatedAt)
            .one(&self.pool)
            .await?;

        if let Some(existing) = newest {
            let age = now.signed_duration_since(existing.created_at);
            if age < Duration::seconds(self.resend_window_secs) {
                return Err(AppError::RateLimited(format!(
                    "A code was sent recently; retry in {} seconds",
                    self.resend_window_secs - age.num_seconds()
                )));
            }
        }

        let code = generate_otp_code();
        let expires_at = now + Duration::minutes(OTP_TTL_MINUTES);

        // Supersession and insert commit together, so at most one live
        // code per email exists afterwards.
        let txn = self.pool.begin().await?;

        otp::Entity::update_many()
            .col_expr(otp::Column::Used, Expr::value(true))
            .filter(otp::Column::Email.eq(email.clone()))
            .filter(otp::Column::Used.eq(false))
            .exec(&txn)
            .await?;

        let model = otp::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            code: Set(code),
            purpose: Set(purpose),
            used: Set(false),
            created_at: Set(now),
            expires_at: Set(expires_at),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.mailer
            .send(
                &email,
                subject_for(&model.purpose),
                &otp_email_body(&model.code),
            )
            .await?;

        log::info!("OTP issued for {email} (purpose {})", model.purpose);
        Ok(model)
    }

    /// Verifies `code` for `email` and resolves the voter identity.
    ///
    /// The claim is a conditional update guarded on `used = false`; zero
    /// affected rows means a concurrent verification consumed the code
    /// first, which maps to `InvalidOrExpiredCode` exactly like a stale
    /// or never-issued code. Nothing else is written.
    pub async fn verify(&self, email: &str, code: &str) -> AppResult<VoterIdentity> {
        let email = normalize_email(email);
        let code = code.trim();
        if email.is_empty() || code.is_empty() {
            return Err(AppError::ValidationError(
                "Email and code are required".to_string(),
            ));
        }

        let now = Utc::now();

        let candidate = otp::Entity::find()
            .filter(otp::Column::Email.eq(email.clone()))
            .filter(otp::Column::Code.eq(code))
            .filter(otp::Column::Used.eq(false))
            .filter(otp::Column::ExpiresAt.gt(now))
            .order_by_desc(otp::Column::CreatedAt)
            .one(&self.pool)
            .await?
            .ok_or(AppError::InvalidOrExpiredCode)?;

        let claimed = otp::Entity::update_many()
            .col_expr(otp::Column::Used, Expr::value(true))
            .filter(otp::Column::Id.eq(candidate.id))
            .filter(otp::Column::Used.eq(false))
            .exec(&self.pool)
            .await?;

        if claimed.rows_affected != 1 {
            return Err(AppError::InvalidOrExpiredCode);
        }

        let voter = voters::Entity::find()
            .filter(voters::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?
            .ok_or(AppError::IdentityNotFound)?;

        log::info!("OTP verified for {email}");
        Ok(voter.into())
    }
}

fn subject_for(purpose: &OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Login => "Your UniVote login code",
        OtpPurpose::Verification => "Verify your UniVote email",
    }
}

fn otp_email_body(code: &str) -> String {
    format!(
        "<p>Your one-time passcode is <strong>{code}</strong>.</p>\
         <p>The code is valid for {OTP_TTL_MINUTES} minutes. If you did not request it, \
         you can ignore this email.</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::MockMailer;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn otp_row(email: &str, code: &str, age_secs: i64) -> otp::Model {
        let created_at = Utc::now() - Duration::seconds(age_secs);
        otp::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            code: code.to_string(),
            purpose: OtpPurpose::Login,
            used: false,
            created_at,
            expires_at: created_at + Duration::minutes(OTP_TTL_MINUTES),
        }
    }

    fn voter_row(email: &str) -> voters::Model {
        voters::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: "Ada Obi".to_string(),
            matric_number: "ENG/2021/044".to_string(),
            verified: true,
            has_voted: false,
            vote_token: None,
            created_at: Some(Utc::now()),
        }
    }

    fn service(db: MockDatabase, mailer: Arc<MockMailer>) -> OtpService {
        OtpService::new(db.into_connection(), mailer, 60)
    }

    #[tokio::test]
    async fn issue_emails_the_persisted_code() {
        let inserted = otp_row("voter@example.com", "004213", 0);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // rate probe finds nothing live
            .append_query_results([Vec::<otp::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![inserted]]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer.clone());

        let model = svc
            .issue("voter@example.com", OtpPurpose::Login)
            .await
            .unwrap();
        assert_eq!(model.code, "004213");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "voter@example.com");
        assert_eq!(sent[0].subject, "Your UniVote login code");
        assert!(sent[0].html.contains("004213"));
        assert!(sent[0].html.contains("5 minutes"));
    }

    #[tokio::test]
    async fn issue_normalizes_the_recipient_address() {
        let inserted = otp_row("voter@example.com", "117750", 0);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<otp::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![inserted]]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer.clone());

        svc.issue("  Voter@Example.COM  ", OtpPurpose::Verification)
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent[0].to, "voter@example.com");
        assert_eq!(sent[0].subject, "Verify your UniVote email");
    }

    #[tokio::test]
    async fn issue_rejects_blank_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer.clone());

        let err = svc.issue("   ", OtpPurpose::Login).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn issue_fails_before_store_access_when_unconfigured() {
        // No mock results are prepared: any store access would surface
        // as a database error instead of the expected config error.
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let mailer = Arc::new(MockMailer::unconfigured());
        let svc = service(db, mailer.clone());

        let err = svc
            .issue("voter@example.com", OtpPurpose::Login)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn issue_rate_limits_a_young_live_code() {
        let recent = otp_row("voter@example.com", "555001", 10);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![recent]]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer.clone());

        let err = svc
            .issue("voter@example.com", OtpPurpose::Login)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RateLimited(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn issue_supersedes_once_the_window_has_passed() {
        let stale = otp_row("voter@example.com", "555001", 120);
        let inserted = otp_row("voter@example.com", "862110", 0);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stale]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![inserted]]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer.clone());

        let model = svc
            .issue("voter@example.com", OtpPurpose::Login)
            .await
            .unwrap();
        assert_eq!(model.code, "862110");
        assert!(mailer.sent()[0].html.contains("862110"));
    }

    #[tokio::test]
    async fn issue_sends_nothing_when_persistence_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<otp::Model>::new()])
            .append_exec_errors([DbErr::Custom("supersede failed".to_string())]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer.clone());

        let err = svc
            .issue("voter@example.com", OtpPurpose::Login)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn issue_reports_delivery_failure_after_commit() {
        let inserted = otp_row("voter@example.com", "330976", 0);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<otp::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![inserted]]);

        let mailer = Arc::new(MockMailer::failing());
        let svc = service(db, mailer);

        let err = svc
            .issue("voter@example.com", OtpPurpose::Login)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DeliveryError(_)));
    }

    #[tokio::test]
    async fn verify_returns_the_voter_identity() {
        let candidate = otp_row("voter@example.com", "004213", 30);
        let voter = voter_row("voter@example.com");
        let voter_id = voter.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![candidate]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![voter]]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer);

        let identity = svc.verify("Voter@Example.com", "004213").await.unwrap();
        assert_eq!(identity.id, voter_id);
        assert_eq!(identity.email, "voter@example.com");
        assert_eq!(identity.full_name, "Ada Obi");
        assert!(identity.verified);
        assert!(!identity.has_voted);
    }

    #[tokio::test]
    async fn verify_rejects_unknown_or_consumed_codes() {
        // Consumed and never-issued codes both fall outside the
        // `used = false` candidate select.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<otp::Model>::new()]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer);

        let err = svc
            .verify("voter@example.com", "999999")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidOrExpiredCode));
    }

    #[tokio::test]
    async fn verify_treats_a_lost_claim_race_as_invalid() {
        let candidate = otp_row("voter@example.com", "004213", 30);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![candidate]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer);

        let err = svc
            .verify("voter@example.com", "004213")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidOrExpiredCode));
    }

    #[tokio::test]
    async fn verify_fails_when_no_voter_matches() {
        let candidate = otp_row("ghost@example.com", "004213", 30);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![candidate]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([Vec::<voters::Model>::new()]);

        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer);

        let err = svc
            .verify("ghost@example.com", "004213")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IdentityNotFound));
    }

    #[tokio::test]
    async fn verify_rejects_blank_inputs() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer);

        let err = svc.verify("", "123456").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let mailer = Arc::new(MockMailer::new());
        let svc = service(db, mailer);

        let err = svc.verify("voter@example.com", "   ").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
