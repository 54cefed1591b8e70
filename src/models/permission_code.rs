// src/models/permission_code.rs

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// Chave do módulo funcional ao qual cada permissão pertence.
// Módulo é agrupamento de exibição: pertencer a um módulo NÃO concede nada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKey {
    Clients,
    Suppliers,
    Certificates,
    Standards,
    Documents,
    Users,
}

impl ModuleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKey::Clients => "clients",
            ModuleKey::Suppliers => "suppliers",
            ModuleKey::Certificates => "certificates",
            ModuleKey::Standards => "standards",
            ModuleKey::Documents => "documents",
            ModuleKey::Users => "users",
        }
    }
}

// Catálogo FECHADO de permissões. Antes os códigos eram strings soltas
// ("clients.view") espalhadas pelas telas; um typo virava negação silenciosa.
// Agora o compilador conhece todos os códigos, e a tabela `permissions`
// precisa concordar com este enum (AuthorizationService::validate_catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionCode {
    ClientsView,
    ClientsCreate,
    ClientsEdit,
    ClientsDelete,
    SuppliersView,
    SuppliersCreate,
    SuppliersEdit,
    SuppliersDelete,
    CertificatesView,
    CertificatesCreate,
    CertificatesEdit,
    CertificatesDelete,
    StandardsView,
    StandardsCreate,
    StandardsEdit,
    StandardsDelete,
    DocumentsView,
    DocumentsCreate,
    DocumentsEdit,
    DocumentsDelete,
    UsersView,
    UsersCreate,
    UsersEdit,
    UsersDelete,
}

impl PermissionCode {
    // Tabela completa, na ordem do catálogo. Usada na validação de arranque
    // e no seed do banco.
    pub const ALL: [PermissionCode; 24] = [
        PermissionCode::ClientsView,
        PermissionCode::ClientsCreate,
        PermissionCode::ClientsEdit,
        PermissionCode::ClientsDelete,
        PermissionCode::SuppliersView,
        PermissionCode::SuppliersCreate,
        PermissionCode::SuppliersEdit,
        PermissionCode::SuppliersDelete,
        PermissionCode::CertificatesView,
        PermissionCode::CertificatesCreate,
        PermissionCode::CertificatesEdit,
        PermissionCode::CertificatesDelete,
        PermissionCode::StandardsView,
        PermissionCode::StandardsCreate,
        PermissionCode::StandardsEdit,
        PermissionCode::StandardsDelete,
        PermissionCode::DocumentsView,
        PermissionCode::DocumentsCreate,
        PermissionCode::DocumentsEdit,
        PermissionCode::DocumentsDelete,
        PermissionCode::UsersView,
        PermissionCode::UsersCreate,
        PermissionCode::UsersEdit,
        PermissionCode::UsersDelete,
    ];

    // Código estável, como fica na coluna `permissions.code`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionCode::ClientsView => "clients.view",
            PermissionCode::ClientsCreate => "clients.create",
            PermissionCode::ClientsEdit => "clients.edit",
            PermissionCode::ClientsDelete => "clients.delete",
            PermissionCode::SuppliersView => "suppliers.view",
            PermissionCode::SuppliersCreate => "suppliers.create",
            PermissionCode::SuppliersEdit => "suppliers.edit",
            PermissionCode::SuppliersDelete => "suppliers.delete",
            PermissionCode::CertificatesView => "certificates.view",
            PermissionCode::CertificatesCreate => "certificates.create",
            PermissionCode::CertificatesEdit => "certificates.edit",
            PermissionCode::CertificatesDelete => "certificates.delete",
            PermissionCode::StandardsView => "standards.view",
            PermissionCode::StandardsCreate => "standards.create",
            PermissionCode::StandardsEdit => "standards.edit",
            PermissionCode::StandardsDelete => "standards.delete",
            PermissionCode::DocumentsView => "documents.view",
            PermissionCode::DocumentsCreate => "documents.create",
            PermissionCode::DocumentsEdit => "documents.edit",
            PermissionCode::DocumentsDelete => "documents.delete",
            PermissionCode::UsersView => "users.view",
            PermissionCode::UsersCreate => "users.create",
            PermissionCode::UsersEdit => "users.edit",
            PermissionCode::UsersDelete => "users.delete",
        }
    }

    // Resolve um código vindo como string (payloads, rotas). `None` significa
    // código fora do catálogo; quem chama decide logar/negar.
    pub fn from_code(code: &str) -> Option<PermissionCode> {
        PermissionCode::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == code)
    }

    pub fn module(&self) -> ModuleKey {
        use PermissionCode::*;
        match self {
            ClientsView | ClientsCreate | ClientsEdit | ClientsDelete => ModuleKey::Clients,
            SuppliersView | SuppliersCreate | SuppliersEdit | SuppliersDelete => ModuleKey::Suppliers,
            CertificatesView | CertificatesCreate | CertificatesEdit | CertificatesDelete => {
                ModuleKey::Certificates
            }
            StandardsView | StandardsCreate | StandardsEdit | StandardsDelete => ModuleKey::Standards,
            DocumentsView | DocumentsCreate | DocumentsEdit | DocumentsDelete => ModuleKey::Documents,
            UsersView | UsersCreate | UsersEdit | UsersDelete => ModuleKey::Users,
        }
    }
}

impl fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionCode::from_code(s).ok_or_else(|| format!("código de permissão desconhecido: {s}"))
    }
}

// No JSON a permissão trafega como o próprio código ("certificates.view").
impl Serialize for PermissionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PermissionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PermissionCode::from_code(&raw)
            .ok_or_else(|| de::Error::custom(format!("código de permissão desconhecido: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigos_sao_unicos_e_estaveis() {
        let mut seen = std::collections::HashSet::new();
        for code in PermissionCode::ALL {
            assert!(seen.insert(code.as_str()), "código duplicado: {}", code);
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn round_trip_string() {
        for code in PermissionCode::ALL {
            assert_eq!(PermissionCode::from_code(code.as_str()), Some(code));
        }
    }

    #[test]
    fn codigo_fora_do_catalogo_nao_resolve() {
        assert_eq!(PermissionCode::from_code("clients.vieww"), None);
        assert_eq!(PermissionCode::from_code(""), None);
        assert!("reports.view".parse::<PermissionCode>().is_err());
    }

    #[test]
    fn prefixo_corresponde_ao_modulo() {
        for code in PermissionCode::ALL {
            let prefix = code.as_str().split('.').next().unwrap();
            assert_eq!(prefix, code.module().as_str());
        }
    }
}
