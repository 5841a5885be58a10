pub mod application_service;
pub mod audit_service;
pub mod auth_service;
pub mod eligibility_service;
pub mod notification_service;
pub mod otp_service;
pub mod position_service;
pub mod voter_service;

pub use application_service::*;
pub use audit_service::*;
pub use auth_service::*;
pub use eligibility_service::*;
pub use notification_service::*;
pub use otp_service::*;
pub use position_service::*;
pub use voter_service::*;
