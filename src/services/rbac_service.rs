// src/services/rbac_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::GrantStore;
use crate::models::auth::{Role, SessionContext, UserStatus};
use crate::models::permission_code::PermissionCode;
use crate::models::rbac::{Permission, PermissionModule, UserPermissionGrant};

// Responde "o usuário U pode executar a ação que exige a permissão C?".
// A decisão em si é pura (só olha o SessionContext); o store entra para
// montar a sessão, alternar grants e validar o catálogo.
#[derive(Clone)]
pub struct AuthorizationService {
    store: Arc<dyn GrantStore>,
}

impl AuthorizationService {
    pub fn new(store: Arc<dyn GrantStore>) -> Self {
        Self { store }
    }

    // Negação é resultado normal (vira 403 no handler), nunca um erro.
    pub fn is_allowed(&self, session: &SessionContext, required: PermissionCode) -> bool {
        // Admin tem passe livre, com qualquer conjunto de grants.
        if session.role == Role::Admin {
            return true;
        }

        // Conta inativa nunca autoriza, independente dos grants.
        if session.status != UserStatus::Ativo {
            return false;
        }

        // Default-deny: sem grant explícito, negado. Pertencer ao módulo
        // não concede nada.
        session.has_grant(required)
    }

    // Variante para códigos que chegam como string. Código fora do catálogo
    // é erro de configuração do deploy: loga em error e nega (fail closed),
    // inclusive para admin.
    pub fn is_allowed_code(&self, session: &SessionContext, required: &str) -> bool {
        match PermissionCode::from_code(required) {
            Some(code) => self.is_allowed(session, code),
            None => {
                tracing::error!(
                    "Código de permissão desconhecido: '{}'; negando acesso",
                    required
                );
                false
            }
        }
    }

    // Monta o contexto de sessão explícito a partir do registro de grants.
    // É isto que o handler carrega pela requisição, no lugar do token
    // ambiente que cada tela lia por conta própria.
    pub async fn session_for(
        &self,
        user_id: Uuid,
        role: Role,
        status: UserStatus,
    ) -> Result<SessionContext, AppError> {
        let raw = self.store.grants_for(user_id).await?;

        let mut grants = HashSet::new();
        for code in raw {
            match PermissionCode::from_code(&code) {
                Some(parsed) => {
                    grants.insert(parsed);
                }
                // Grant órfão no banco: não entra na sessão, mas fica registrado.
                None => tracing::warn!("Grant com código fora do catálogo: '{}'", code),
            }
        }

        Ok(SessionContext {
            user_id,
            role,
            status,
            grants,
        })
    }

    // Liga/desliga uma permissão pelo código. Resolver o código contra o
    // catálogo vem primeiro: código desconhecido é UnknownPermission, não
    // um toggle silencioso no vazio.
    pub async fn toggle_by_code(
        &self,
        user_id: Uuid,
        code: &str,
        granted: bool,
    ) -> Result<Permission, AppError> {
        let permission = self
            .store
            .find_permission_by_code(code)
            .await?
            .ok_or_else(|| AppError::UnknownPermission(code.to_string()))?;

        self.store.toggle(user_id, permission.id, granted).await?;

        Ok(permission)
    }

    // Catálogo completo (para o frontend montar a tela de administração).
    pub async fn list_system_permissions(&self) -> Result<Vec<Permission>, AppError> {
        self.store.list_all_permissions().await
    }

    pub async fn list_modules(&self) -> Result<Vec<PermissionModule>, AppError> {
        self.store.list_modules().await
    }

    // Grants do usuário com o timestamp de concessão (auditoria da tela
    // de administração).
    pub async fn list_grants(&self, user_id: Uuid) -> Result<Vec<UserPermissionGrant>, AppError> {
        self.store.list_grants(user_id).await
    }

    // Checagem de arranque: a tabela `permissions` e o enum compilado
    // precisam concordar. Divergência derruba o boot, não uma requisição.
    pub async fn validate_catalog(&self) -> Result<(), AppError> {
        let stored: HashSet<String> = self
            .store
            .list_all_permissions()
            .await?
            .into_iter()
            .map(|p| p.code)
            .collect();

        let compiled: HashSet<String> = PermissionCode::ALL
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();

        let mut missing: Vec<String> = compiled.difference(&stored).cloned().collect();
        let mut unknown: Vec<String> = stored.difference(&compiled).cloned().collect();
        missing.sort();
        unknown.sort();

        if missing.is_empty() && unknown.is_empty() {
            tracing::info!("Catálogo de permissões validado ({} códigos)", compiled.len());
            Ok(())
        } else {
            tracing::error!(
                "Catálogo de permissões divergente: faltando {:?}, fora do catálogo {:?}",
                missing,
                unknown
            );
            Err(AppError::CatalogDrift { missing, unknown })
        }
    }
}
