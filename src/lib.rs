// src/lib.rs

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Re-exportações principais, para os handlers consumirem direto da raiz
pub use common::error::AppError;
pub use config::CoreConfig;
pub use db::{GrantStore, RbacRepository};
pub use models::auth::{Role, SessionContext, UserStatus};
pub use models::cnpj::{Cnpj, CnpjError};
pub use models::permission_code::PermissionCode;
pub use models::validity::{Expirable, ValidityStatus};
pub use services::rbac_service::AuthorizationService;
pub use services::validity_service::ValidityClassifier;
