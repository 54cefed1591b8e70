// src/models/auth.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::permission_code::PermissionCode;

// Papel fixo do usuário. `Admin` ignora o catálogo de permissões por completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tecnico,
    Cliente,
}

// Conta inativa nunca autoriza nada, independente dos grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Ativo,
    Inativo,
}

// Identidade explícita que o handler carrega para dentro do core.
// Substitui o token ambiente lido de storage global em cada tela: aqui nada
// vem de estado implícito, tudo chega por parâmetro.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub role: Role,
    pub status: UserStatus,
    pub grants: HashSet<PermissionCode>,
}

impl SessionContext {
    pub fn new(user_id: Uuid, role: Role, status: UserStatus) -> Self {
        Self {
            user_id,
            role,
            status,
            grants: HashSet::new(),
        }
    }

    pub fn with_grants(mut self, grants: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.grants = grants.into_iter().collect();
        self
    }

    pub fn has_grant(&self, code: PermissionCode) -> bool {
        self.grants.contains(&code)
    }
}
