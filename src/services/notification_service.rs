use crate::error::{AppError, AppResult};
use crate::external::Mailer;
use crate::models::EditorialNotificationRequest;
use crate::utils::normalize_email;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Emails an author about an editorial decision on their content.
    /// All five request fields are required; a fresh status picks the
    /// matching template.
    pub async fn send_editorial_notification(
        &self,
        request: EditorialNotificationRequest,
    ) -> AppResult<()> {
        if !self.mailer.is_configured() {
            return Err(AppError::ConfigError(
                "Email provider is not configured".to_string(),
            ));
        }

        let email = normalize_email(&request.email);
        if email.is_empty()
            || request.author_name.trim().is_empty()
            || request.content_title.trim().is_empty()
            || request.content_type.trim().is_empty()
            || request.status.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "email, authorName, contentTitle, contentType and status are required".to_string(),
            ));
        }

        let (subject, body) = editorial_template(
            request.author_name.trim(),
            request.content_title.trim(),
            request.content_type.trim(),
            request.status.trim(),
        );

        self.mailer.send(&email, &subject, &body).await?;

        log::info!(
            "Editorial notification ({}) sent to {email}",
            request.status.trim()
        );
        Ok(())
    }
}

/// Status-keyed subject and body. Statuses other than approved/rejected
/// fall back to a neutral update template.
fn editorial_template(
    author_name: &str,
    content_title: &str,
    content_type: &str,
    status: &str,
) -> (String, String) {
    match status {
        "approved" => (
            format!("Your {content_type} has been approved"),
            format!(
                "<p>Hi {author_name},</p>\
                 <p>Good news: your {content_type} <strong>{content_title}</strong> \
                 has been approved and is now published.</p>"
            ),
        ),
        "rejected" => (
            format!("Your {content_type} was not approved"),
            format!(
                "<p>Hi {author_name},</p>\
                 <p>Unfortunately your {content_type} <strong>{content_title}</strong> \
                 was not approved by the editorial team. You are welcome to revise \
                 and resubmit it.</p>"
            ),
        ),
        other => (
            format!("Update on your {content_type}"),
            format!(
                "<p>Hi {author_name},</p>\
                 <p>The status of your {content_type} <strong>{content_title}</strong> \
                 changed to <strong>{other}</strong>.</p>"
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::MockMailer;

    fn request(status: &str) -> EditorialNotificationRequest {
        EditorialNotificationRequest {
            email: "Author@Example.com".to_string(),
            author_name: "Ada Obi".to_string(),
            content_title: "Why I am running".to_string(),
            content_type: "article".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn approved_and_rejected_have_distinct_subjects() {
        let (approved, _) = editorial_template("Ada", "Title", "article", "approved");
        let (rejected, _) = editorial_template("Ada", "Title", "article", "rejected");
        let (other, body) = editorial_template("Ada", "Title", "article", "under_review");

        assert!(approved.contains("approved"));
        assert!(rejected.contains("not approved"));
        assert!(other.starts_with("Update"));
        assert!(body.contains("under_review"));
    }

    #[tokio::test]
    async fn sends_to_the_normalized_address() {
        let mailer = Arc::new(MockMailer::new());
        let svc = NotificationService::new(mailer.clone());

        svc.send_editorial_notification(request("approved"))
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "author@example.com");
        assert!(sent[0].subject.contains("approved"));
        assert!(sent[0].html.contains("Why I am running"));
    }

    #[tokio::test]
    async fn rejects_a_blank_field() {
        let mailer = Arc::new(MockMailer::new());
        let svc = NotificationService::new(mailer.clone());

        let mut req = request("approved");
        req.content_title = "   ".to_string();
        let err = svc.send_editorial_notification(req).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn fails_fast_when_unconfigured() {
        let mailer = Arc::new(MockMailer::unconfigured());
        let svc = NotificationService::new(mailer.clone());

        let err = svc
            .send_editorial_notification(request("approved"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[tokio::test]
    async fn surfaces_delivery_failures() {
        let mailer = Arc::new(MockMailer::failing());
        let svc = NotificationService::new(mailer);

        let err = svc
            .send_editorial_notification(request("rejected"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DeliveryError(_)));
    }
}
