pub mod rbac_repo;
pub use rbac_repo::{GrantStore, RbacRepository};
