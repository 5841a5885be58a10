pub mod applications;
pub mod audit;
pub mod auth;
pub mod eligibility;
pub mod functions;
pub mod positions;
pub mod voters;

pub use applications::application_config;
pub use audit::audit_config;
pub use auth::auth_config;
pub use eligibility::eligibility_config;
pub use functions::functions_config;
pub use positions::position_config;
pub use voters::voter_config;
