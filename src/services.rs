pub mod rbac_service;
pub mod validity_service;

pub use rbac_service::AuthorizationService;
pub use validity_service::ValidityClassifier;
