use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Tokens de moeda removidos antes da limpeza numérica.
///
/// A ordem importa: `soles` precisa sair antes de `sol`, e `s/.` antes de `s/`.
const CURRENCY_TOKENS: &[&str] = &["s/.", "s/", "soles", "sol"];

/// Representa o texto de um monto extraído de uma planilha de tarifas.
///
/// Os valores aparecem em formatos como:
/// - `S/ 25.00`
/// - `1.234,56`
/// - `12 soles`
///
/// Este wrapper guarda o texto original para exibição e centraliza a conversão
/// para `Decimal`, que nunca falha: qualquer texto ilegível vira zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvAmount(String);

impl CsvAmount {
    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Decimal {
        parse_amount(&self.0)
    }
}

impl From<String> for CsvAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<CsvAmount> for Decimal {
    fn from(amount: CsvAmount) -> Self {
        amount.parse()
    }
}

/// Converts a free-form currency string into a non-negative amount.
///
/// Commas become periods first, then every period except the last one is
/// dropped, so `"1.234,56"` and `"1,234.56"` both read as `1234.56`.
/// Returns zero for empty or unparseable input. `Decimal` holds at most 28
/// significant digits; a value whose whole part does not fit is logged and
/// also read as zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let mut s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    for token in CURRENCY_TOKENS {
        s = s.replace(token, "");
    }

    let cleaned: String = s
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Decimal::ZERO;
    }

    let normalized = match cleaned.rfind('.') {
        Some(last) => {
            let (whole, fraction) = cleaned.split_at(last);
            let whole = whole.replace('.', "");
            let whole = if whole.is_empty() { "0".to_string() } else { whole };
            if fraction.len() > 1 {
                format!("{whole}{fraction}")
            } else {
                whole
            }
        }
        None => cleaned,
    };

    match Decimal::from_str(&normalized) {
        Ok(amount) => amount,
        Err(e) => {
            warn!(raw, error = %e, "amount out of range, reading as zero");
            Decimal::ZERO
        }
    }
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
