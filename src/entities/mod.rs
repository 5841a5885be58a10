pub mod admins;
pub mod applications;
pub mod audit_logs;
pub mod otp_codes;
pub mod positions;
pub mod voters;

pub use admins as admin_entity;
pub use applications as application_entity;
pub use audit_logs as audit_log_entity;
pub use otp_codes as otp_code_entity;
pub use positions as position_entity;
pub use voters as voter_entity;

pub use applications::ApplicationStatus;
pub use otp_codes::OtpPurpose;
pub use positions::StringList;
