// src/db/rbac_repo.rs

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::rbac::{Permission, PermissionModule, UserPermissionGrant};

// Seam de persistência do registro de permissões. Os serviços dependem do
// trait, não do Postgres; os testes exercitam a mesma semântica com um
// store em memória.
#[async_trait]
pub trait GrantStore: Send + Sync {
    // Conjunto de códigos concedidos ao usuário. Vazio se nenhum grant.
    async fn grants_for(&self, user_id: Uuid) -> Result<HashSet<String>, AppError>;

    // Liga/desliga uma permissão. Idempotente: conceder o que já está
    // concedido (ou revogar o ausente) é no-op observável.
    async fn toggle(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
        granted: bool,
    ) -> Result<(), AppError>;

    async fn find_permission_by_code(&self, code: &str) -> Result<Option<Permission>, AppError>;

    // Catálogo completo, para a tela de administração e a validação de arranque.
    async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError>;

    async fn list_modules(&self) -> Result<Vec<PermissionModule>, AppError>;

    // Grants de um usuário com o timestamp, para auditoria na tela de admin.
    async fn list_grants(&self, user_id: Uuid) -> Result<Vec<UserPermissionGrant>, AppError>;
}

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantStore for RbacRepository {
    async fn grants_for(&self, user_id: Uuid) -> Result<HashSet<String>, AppError> {
        let codes: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT p.code
            FROM user_permissions up
            JOIN permissions p ON p.id = up.permission_id
            WHERE up.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(codes.into_iter().collect())
    }

    async fn toggle(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
        granted: bool,
    ) -> Result<(), AppError> {
        if granted {
            // A PK composta + ON CONFLICT serializa toggles concorrentes do
            // mesmo par e garante a idempotência sem linha duplicada.
            sqlx::query(
                r#"
                INSERT INTO user_permissions (user_id, permission_id, granted_at)
                VALUES ($1, $2, now())
                ON CONFLICT (user_id, permission_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(permission_id)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                "DELETE FROM user_permissions WHERE user_id = $1 AND permission_id = $2",
            )
            .bind(user_id)
            .bind(permission_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn find_permission_by_code(&self, code: &str) -> Result<Option<Permission>, AppError> {
        let permission = sqlx::query_as::<_, Permission>(
            "SELECT id, code, name, description, module_id FROM permissions WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(permission)
    }

    async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT id, code, name, description, module_id FROM permissions ORDER BY module_id, code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    async fn list_modules(&self) -> Result<Vec<PermissionModule>, AppError> {
        let modules = sqlx::query_as::<_, PermissionModule>(
            "SELECT id, name, description FROM permission_modules ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modules)
    }

    async fn list_grants(&self, user_id: Uuid) -> Result<Vec<UserPermissionGrant>, AppError> {
        let grants = sqlx::query_as::<_, UserPermissionGrant>(
            r#"
            SELECT user_id, permission_id, granted_at
            FROM user_permissions
            WHERE user_id = $1
            ORDER BY granted_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grants)
    }
}
