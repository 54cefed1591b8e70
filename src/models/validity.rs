// src/models/validity.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE validity_status do banco.
// `SemVencimento` é sinal de qualidade de dado: data ausente nunca vira
// "valido" por omissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "validity_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ValidityStatus {
    Valido,
    PrestesVencer,
    Vencido,
    SemVencimento,
}

// Entidade cujo `status` é DERIVADO da data de vencimento. A coluna
// persistida nunca é fonte de verdade: recalcule na leitura com
// ValidityClassifier::restamp antes de devolver ao caller.
pub trait Expirable {
    fn expiration_date(&self) -> Option<NaiveDate>;
    fn set_status(&mut self, status: ValidityStatus);
}

// --- ENTIDADES VENCÍVEIS ---
// Certificado, padrão e documento são estruturalmente idênticos para o
// cálculo de validade; só muda o nome do campo de data no documento.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: Uuid,
    pub client_id: Uuid,

    #[schema(example = "CERT-2026-0042")]
    pub certificate_number: String,

    pub expiration_date: Option<NaiveDate>,
    pub status: ValidityStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expirable for Certificate {
    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    fn set_status(&mut self, status: ValidityStatus) {
        self.status = status;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationStandard {
    pub id: Uuid,

    #[schema(example = "Micrômetro padrão 0-25mm")]
    pub name: String,

    pub serial_number: Option<String>,

    pub expiration_date: Option<NaiveDate>,
    pub status: ValidityStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expirable for CalibrationStandard {
    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    fn set_status(&mut self, status: ValidityStatus) {
        self.status = status;
    }
}

// Documentos da qualidade usam data de próxima revisão, mas a régua é a mesma.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,

    #[schema(example = "Procedimento de calibração de balanças")]
    pub title: String,

    #[schema(example = "POP-CAL-007")]
    pub code: Option<String>,

    pub next_review_date: Option<NaiveDate>,
    pub status: ValidityStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expirable for Document {
    fn expiration_date(&self) -> Option<NaiveDate> {
        self.next_review_date
    }

    fn set_status(&mut self, status: ValidityStatus) {
        self.status = status;
    }
}
