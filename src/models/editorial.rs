use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire contract of `send-editorial-notification`; field names are
/// camelCase on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditorialNotificationRequest {
    #[schema(example = "author@example.com")]
    pub email: String,
    #[schema(example = "Ada Obi")]
    pub author_name: String,
    #[schema(example = "Why I am running")]
    pub content_title: String,
    #[schema(example = "article")]
    pub content_type: String,
    #[schema(example = "approved")]
    pub status: String,
}
