pub mod auth;
pub mod cnpj;
pub mod permission_code;
pub mod rbac;
pub mod registration;
pub mod validity;
