// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O que sai do banco (Tabela permission_modules).
// Módulo é só agrupamento para a tela de administração; não concede nada.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionModule {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Certificados")]
    pub name: String,

    #[schema(example = "Certificados de calibração emitidos pelo laboratório")]
    pub description: Option<String>,
}

// O que sai do banco (Tabela permissions).
// `code` é o único valor checado programaticamente; `name`/`description`
// existem para exibição. Imutável depois de referenciada por um grant.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "certificates.view")]
    pub code: String,

    #[schema(example = "Visualizar certificados")]
    pub name: String,

    #[schema(example = "Permite consultar certificados de calibração")]
    pub description: Option<String>,

    #[schema(ignore)]
    pub module_id: Uuid,
}

// Linha da relação usuário <-> permissão. Presença = concedida; ausência =
// negada (default-deny). Nunca é atualizada in-place: ligar/desligar é
// insert/delete.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionGrant {
    pub user_id: Uuid,
    pub permission_id: Uuid,
    pub granted_at: DateTime<Utc>,
}

// Payload para ligar/desligar uma permissão de um usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TogglePermissionPayload {
    #[validate(length(min = 3, message = "Código de permissão inválido."))]
    #[schema(example = "certificates.delete")]
    pub code: String,

    #[schema(example = true)]
    pub granted: bool,
}
