// src/common/error.rs

use thiserror::Error;

use crate::models::cnpj::CnpjError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Negação de autorização NÃO passa por aqui: é um `bool` normal dos serviços.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // CNPJ malformado ou com dígitos verificadores errados.
    // Erro recuperável, voltado ao usuário; vira 4xx no handler.
    #[error("Documento inválido: {0}")]
    Document(#[from] CnpjError),

    // Código de permissão fora do catálogo. Isso é erro de configuração
    // do deploy, nunca do usuário: loga e nega.
    #[error("Código de permissão desconhecido: {0}")]
    UnknownPermission(String),

    // A tabela `permissions` divergiu do enum compilado (checagem de arranque).
    #[error("Catálogo de permissões divergente (faltando no banco: {missing:?}, fora do catálogo: {unknown:?})")]
    CatalogDrift {
        missing: Vec<String>,
        unknown: Vec<String>,
    },

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    // Mapa campo -> mensagens de um erro de validação, pronto para o handler
    // montar o corpo da resposta 4xx. `None` para os demais erros, que só
    // carregam a mensagem simples.
    pub fn validation_details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(serde_json::json!(details))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registration::CustomerRegistrationPayload;
    use validator::Validate;

    #[test]
    fn erro_de_validacao_expoe_detalhes_por_campo() {
        let payload = CustomerRegistrationPayload {
            name: "M".into(),
            email: None,
            document_number: "11.222.333/0001-80".into(),
        };

        let error: AppError = payload.validate().unwrap_err().into();
        let details = error.validation_details().unwrap();

        assert!(details.get("name").is_some());
        let cnpj_messages = details.get("document_number").unwrap();
        assert_eq!(cnpj_messages[0], "CNPJ inválido.");
    }

    #[test]
    fn outros_erros_nao_tem_detalhes() {
        let error = AppError::UnknownPermission("reports.view".into());
        assert!(error.validation_details().is_none());
    }
}
