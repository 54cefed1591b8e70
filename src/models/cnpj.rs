// src/models/cnpj.rs

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use validator::ValidationError;

// Falhas recuperáveis de validação de documento. Viram resposta 4xx no
// caller, nunca abortam a requisição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CnpjError {
    #[error("CNPJ deve conter exatamente 14 dígitos (recebidos: {0})")]
    InvalidLength(usize),

    #[error("Dígitos verificadores do CNPJ não conferem")]
    InvalidChecksum,
}

// Remove tudo que não for dígito ("11.222.333/0001-81" -> "11222333000181").
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid(input: &str) -> bool {
    Cnpj::parse(input).is_ok()
}

// Aplica a máscara NN.NNN.NNN/NNNN-NN sobre os 14 dígitos.
// Formatação NÃO roda o checksum: são operações independentes.
pub fn format(input: &str) -> Result<String, CnpjError> {
    let digits = normalize(input);
    if digits.len() != 14 {
        return Err(CnpjError::InvalidLength(digits.len()));
    }
    Ok(std::format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    ))
}

// Dígito verificador mod-11: pesos ciclam 2,3,...,9 a partir do dígito mais
// à direita, voltando a 2 depois do 9. Resto < 2 vira 0; senão 11 - resto.
fn check_digit(digits: &[u8]) -> u8 {
    let mut weight = 2u32;
    let mut sum = 0u32;
    for &d in digits.iter().rev() {
        sum += u32::from(d) * weight;
        weight = if weight == 9 { 2 } else { weight + 1 };
    }
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

// CNPJ canônico: 14 dígitos com os dois verificadores conferidos.
// Armazenado/exibido sempre na forma mascarada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnpj {
    digits: [u8; 14],
}

impl Cnpj {
    pub fn parse(input: &str) -> Result<Self, CnpjError> {
        let normalized = normalize(input);
        if normalized.len() != 14 {
            return Err(CnpjError::InvalidLength(normalized.len()));
        }

        let mut digits = [0u8; 14];
        for (i, b) in normalized.bytes().enumerate() {
            digits[i] = b - b'0';
        }

        // Sequências de um dígito repetido ("00000000000000" etc.) passam na
        // conta do mod-11, mas são inválidas por definição da Receita.
        if digits.iter().all(|&d| d == digits[0]) {
            return Err(CnpjError::InvalidChecksum);
        }

        // Primeiro verificador usa os 12 dígitos anteriores; o segundo usa 13
        // (os 12 mais o primeiro verificador).
        if check_digit(&digits[..12]) != digits[12] || check_digit(&digits[..13]) != digits[13] {
            return Err(CnpjError::InvalidChecksum);
        }

        Ok(Self { digits })
    }

    // Só os dígitos, sem máscara ("11222333000181").
    pub fn digits(&self) -> String {
        self.digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    // Forma canônica de armazenamento: "11.222.333/0001-81".
    pub fn formatted(&self) -> String {
        format(&self.digits()).expect("CNPJ canônico sempre tem 14 dígitos")
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cnpj {
    type Err = CnpjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cnpj::parse(s)
    }
}

// No JSON o CNPJ trafega como a string mascarada.
impl Serialize for Cnpj {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Cnpj {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Cnpj::parse(&raw).map_err(de::Error::custom)
    }
}

// Validador custom para `#[validate(custom(function = "validate_cnpj"))]`
// nos payloads de cadastro.
pub fn validate_cnpj(value: &str) -> Result<(), ValidationError> {
    match Cnpj::parse(value) {
        Ok(_) => Ok(()),
        Err(e) => {
            let mut err = ValidationError::new("cnpj");
            err.message = Some(e.to_string().into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_cnpj_valido_com_ou_sem_mascara() {
        assert!(is_valid("11222333000181"));
        assert!(is_valid("11.222.333/0001-81"));
        assert!(is_valid("00.000.000/0001-91"));
    }

    #[test]
    fn rejeita_checksum_errado() {
        assert!(!is_valid("11222333000182"));
        assert!(!is_valid("11222333000171"));
        assert_eq!(Cnpj::parse("11222333000180"), Err(CnpjError::InvalidChecksum));
    }

    #[test]
    fn rejeita_sequencias_de_digito_repetido() {
        for d in 0..=9u8 {
            let repeated: String = std::iter::repeat(char::from(b'0' + d)).take(14).collect();
            assert!(!is_valid(&repeated), "sequência {repeated} deveria ser inválida");
        }
    }

    #[test]
    fn rejeita_comprimento_errado() {
        assert!(!is_valid(""));
        assert!(!is_valid("1122233300018"));
        assert!(!is_valid("112223330001811"));
        assert_eq!(Cnpj::parse("123"), Err(CnpjError::InvalidLength(3)));
    }

    #[test]
    fn formatacao_independe_da_pontuacao_de_entrada() {
        let masked = format("11.222.333/0001-81").unwrap();
        let bare = format("11222333000181").unwrap();
        assert_eq!(masked, bare);
        assert_eq!(masked, "11.222.333/0001-81");
        assert_eq!(masked.len(), 18);
    }

    #[test]
    fn formatacao_nao_exige_checksum_valido() {
        // 14 dígitos com verificador errado formatam normalmente.
        assert_eq!(format("11222333000199").unwrap(), "11.222.333/0001-99");
    }

    #[test]
    fn formatacao_falha_sem_14_digitos() {
        assert_eq!(format("123"), Err(CnpjError::InvalidLength(3)));
    }

    #[test]
    fn round_trip_canonico() {
        let cnpj = Cnpj::parse(" 11 222 333 / 0001 - 81 ").unwrap();
        assert_eq!(cnpj.digits(), "11222333000181");
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
        assert_eq!(Cnpj::parse(&cnpj.formatted()).unwrap(), cnpj);
    }

    #[test]
    fn validador_custom_para_payloads() {
        assert!(validate_cnpj("11.222.333/0001-81").is_ok());
        assert!(validate_cnpj("00000000000000").is_err());
    }
}
