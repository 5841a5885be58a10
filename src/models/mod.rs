pub mod application;
pub mod audit;
pub mod auth;
pub mod common;
pub mod editorial;
pub mod eligibility;
pub mod otp;
pub mod pagination;
pub mod position;
pub mod voter;

pub use application::*;
pub use audit::*;
pub use auth::*;
pub use common::*;
pub use editorial::*;
pub use eligibility::*;
pub use otp::*;
pub use pagination::*;
pub use position::*;
pub use voter::*;
