// src/services/validity_service.rs

use chrono::{Duration, NaiveDate, Utc};

use crate::models::validity::{Expirable, ValidityStatus};

// Janela padrão de aviso antes do vencimento, uniforme entre certificados,
// padrões e documentos. Configurável por tipo via CoreConfig.
pub const DEFAULT_WARNING_WINDOW_DAYS: i64 = 30;

// Classificador único de vencimento. Substitui os switches que cada tela
// recalculava por conta própria: certificado, padrão e documento agora usam
// exatamente a mesma régua de fronteira.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityClassifier {
    warning_window_days: i64,
}

impl Default for ValidityClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_WINDOW_DAYS)
    }
}

impl ValidityClassifier {
    pub fn new(warning_window_days: i64) -> Self {
        Self {
            warning_window_days,
        }
    }

    pub fn warning_window_days(&self) -> i64 {
        self.warning_window_days
    }

    // Função pura, sem estado escondido. Fronteiras fixadas como decisão de
    // produto: vencimento NO DIA da referência já conta como vencido; o
    // último dia da janela ainda conta como prestes a vencer.
    pub fn classify(&self, reference: NaiveDate, expiration: NaiveDate) -> ValidityStatus {
        if expiration <= reference {
            ValidityStatus::Vencido
        } else if expiration <= reference + Duration::days(self.warning_window_days) {
            ValidityStatus::PrestesVencer
        } else {
            ValidityStatus::Valido
        }
    }

    // Data ausente é sinal explícito, nunca "valido" por omissão.
    pub fn classify_opt(
        &self,
        reference: NaiveDate,
        expiration: Option<NaiveDate>,
    ) -> ValidityStatus {
        match expiration {
            Some(date) => self.classify(reference, date),
            None => ValidityStatus::SemVencimento,
        }
    }

    // Sempre relativo ao relógio atual. O resultado muda com o passar do
    // tempo: chame a cada leitura, nunca cacheie entre requisições.
    pub fn status_today(&self, expiration: Option<NaiveDate>) -> ValidityStatus {
        self.classify_opt(Utc::now().date_naive(), expiration)
    }

    // Recalcula o campo `status` derivado antes de devolver a entidade.
    // O valor persistido pode estar defasado; este é o único caminho que
    // mantém o invariante status == classify(hoje, vencimento).
    pub fn restamp<E: Expirable>(&self, entity: &mut E) {
        let status = self.status_today(entity.expiration_date());
        entity.set_status(status);
    }

    pub fn restamp_all<E: Expirable>(&self, entities: &mut [E]) {
        for entity in entities {
            self.restamp(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fronteiras_da_janela_de_30_dias() {
        let classifier = ValidityClassifier::default();
        let hoje = date(2026, 8, 28);

        assert_eq!(
            classifier.classify(hoje, hoje - Duration::days(1)),
            ValidityStatus::Vencido
        );
        assert_eq!(
            classifier.classify(hoje, hoje + Duration::days(30)),
            ValidityStatus::PrestesVencer
        );
        assert_eq!(
            classifier.classify(hoje, hoje + Duration::days(31)),
            ValidityStatus::Valido
        );
    }

    #[test]
    fn vencimento_no_dia_da_referencia_conta_como_vencido() {
        let classifier = ValidityClassifier::default();
        let hoje = date(2026, 8, 28);

        assert_eq!(classifier.classify(hoje, hoje), ValidityStatus::Vencido);
        assert_eq!(
            classifier.classify(hoje, hoje + Duration::days(1)),
            ValidityStatus::PrestesVencer
        );
    }

    #[test]
    fn status_nunca_regride_com_vencimento_mais_distante() {
        let classifier = ValidityClassifier::default();
        let hoje = date(2026, 8, 28);

        fn rank(status: ValidityStatus) -> u8 {
            match status {
                ValidityStatus::Vencido => 0,
                ValidityStatus::PrestesVencer => 1,
                ValidityStatus::Valido => 2,
                ValidityStatus::SemVencimento => unreachable!("datas presentes no teste"),
            }
        }

        let mut previous = rank(classifier.classify(hoje, hoje - Duration::days(60)));
        for offset in -59..=90i64 {
            let current = rank(classifier.classify(hoje, hoje + Duration::days(offset)));
            assert!(
                current >= previous,
                "regressão de status no offset {offset}"
            );
            previous = current;
        }
    }

    #[test]
    fn data_ausente_vira_sem_vencimento() {
        let classifier = ValidityClassifier::default();
        assert_eq!(
            classifier.classify_opt(date(2026, 8, 28), None),
            ValidityStatus::SemVencimento
        );
        assert_eq!(classifier.status_today(None), ValidityStatus::SemVencimento);
    }

    #[test]
    fn janela_configuravel_por_tipo() {
        let curta = ValidityClassifier::new(7);
        let hoje = date(2026, 8, 28);

        assert_eq!(
            curta.classify(hoje, hoje + Duration::days(7)),
            ValidityStatus::PrestesVencer
        );
        assert_eq!(
            curta.classify(hoje, hoje + Duration::days(8)),
            ValidityStatus::Valido
        );
    }

    #[test]
    fn restamp_sobrescreve_status_persistido_defasado() {
        use crate::models::validity::Certificate;
        use uuid::Uuid;

        // Certificado gravado como "valido" mas vencido há um ano.
        let mut cert = Certificate {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            certificate_number: "CERT-2025-0001".into(),
            expiration_date: Some(Utc::now().date_naive() - Duration::days(365)),
            status: ValidityStatus::Valido,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        ValidityClassifier::default().restamp(&mut cert);
        assert_eq!(cert.status, ValidityStatus::Vencido);

        cert.expiration_date = None;
        ValidityClassifier::default().restamp(&mut cert);
        assert_eq!(cert.status, ValidityStatus::SemVencimento);
    }
}
