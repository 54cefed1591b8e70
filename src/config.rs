// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::services::validity_service::{ValidityClassifier, DEFAULT_WARNING_WINDOW_DAYS};

// Janela de aviso por tipo de entidade. A escolha de produto é uma régua
// única de 30 dias; deixar por tipo é configuração, não comportamento novo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningWindows {
    pub certificates: i64,
    pub standards: i64,
    pub documents: i64,
}

impl Default for WarningWindows {
    fn default() -> Self {
        Self {
            certificates: DEFAULT_WARNING_WINDOW_DAYS,
            standards: DEFAULT_WARNING_WINDOW_DAYS,
            documents: DEFAULT_WARNING_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub database_url: String,
    pub warning_windows: WarningWindows,
}

impl CoreConfig {
    // Carrega as configurações do ambiente (.env em desenvolvimento).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        Ok(Self {
            database_url,
            warning_windows: WarningWindows {
                certificates: window_from_env("CERT_WARNING_DAYS")?,
                standards: window_from_env("STANDARD_WARNING_DAYS")?,
                documents: window_from_env("DOCUMENT_WARNING_DAYS")?,
            },
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(db_pool)
    }

    pub fn certificate_classifier(&self) -> ValidityClassifier {
        ValidityClassifier::new(self.warning_windows.certificates)
    }

    pub fn standard_classifier(&self) -> ValidityClassifier {
        ValidityClassifier::new(self.warning_windows.standards)
    }

    pub fn document_classifier(&self) -> ValidityClassifier {
        ValidityClassifier::new(self.warning_windows.documents)
    }
}

fn window_from_env(key: &str) -> anyhow::Result<i64> {
    match env::var(key) {
        Ok(raw) => Ok(raw.parse()?),
        Err(env::VarError::NotPresent) => Ok(DEFAULT_WARNING_WINDOW_DAYS),
        Err(e) => Err(e.into()),
    }
}

// Inicializa o logger, no mesmo formato do binário que consome o core.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn janelas_padrao_sao_30_dias() {
        let windows = WarningWindows::default();
        assert_eq!(windows.certificates, 30);
        assert_eq!(windows.standards, 30);
        assert_eq!(windows.documents, 30);
    }

    #[test]
    fn classificadores_respeitam_as_janelas() {
        let config = CoreConfig {
            database_url: "postgres://localhost/calibra".into(),
            warning_windows: WarningWindows {
                certificates: 15,
                standards: 30,
                documents: 60,
            },
        };

        assert_eq!(config.certificate_classifier().warning_window_days(), 15);
        assert_eq!(config.standard_classifier().warning_window_days(), 30);
        assert_eq!(config.document_classifier().warning_window_days(), 60);
    }
}
