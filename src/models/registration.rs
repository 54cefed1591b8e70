// src/models/registration.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::cnpj::{self, validate_cnpj};

// Payload de cadastro de cliente/fornecedor. O CNPJ é validado ANTES de
// persistir; a consulta de enriquecimento na Receita é problema do caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRegistrationPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Metrologia Ltda")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "contato@metrologia.com.br")]
    pub email: Option<String>,

    #[validate(custom(function = "validate_cnpj", message = "CNPJ inválido."))]
    #[schema(example = "11.222.333/0001-81")]
    pub document_number: String,
}

// Resposta do gate de documento: o caller recebe {valid, formatted} e decide
// o que fazer. Entrada malformada nunca vira erro aqui.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCheck {
    pub valid: bool,

    #[schema(example = "11.222.333/0001-81")]
    pub formatted: Option<String>,
}

impl DocumentCheck {
    pub fn evaluate(input: &str) -> Self {
        Self {
            valid: cnpj::is_valid(input),
            formatted: cnpj::format(input).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_com_cnpj_valido_passa() {
        let payload = CustomerRegistrationPayload {
            name: "Metrologia Ltda".into(),
            email: Some("contato@metrologia.com.br".into()),
            document_number: "11.222.333/0001-81".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_com_cnpj_invalido_falha_no_campo_certo() {
        let payload = CustomerRegistrationPayload {
            name: "Metrologia Ltda".into(),
            email: None,
            document_number: "11.222.333/0001-80".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("document_number"));
    }

    #[test]
    fn gate_devolve_formatado_mesmo_sem_checksum() {
        let check = DocumentCheck::evaluate("11222333000199");
        assert!(!check.valid);
        assert_eq!(check.formatted.as_deref(), Some("11.222.333/0001-99"));
    }

    #[test]
    fn gate_sem_14_digitos_nao_formata() {
        let check = DocumentCheck::evaluate("123");
        assert!(!check.valid);
        assert!(check.formatted.is_none());
    }
}
