use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::parsers::csv::prelude::*;

/// Origin tag that always sorts ahead of every other origin.
pub const TUPA_TAG: &str = "TUPA";

/// Country calling code prefixed to phone numbers in WhatsApp links.
pub const PHONE_COUNTRY_CODE: &str = "51";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub origin: String,
    pub responsible_unit: String,
    pub area: String,
    pub process: String,
    pub fee_label: String,
    pub amount_raw: String,
    pub amount: Decimal,
    pub requirements: String,
    pub email: String,
    pub phone: String,
}

impl FeeRecord {
    /// Maps an arbitrary header/value row into the fixed record shape.
    pub fn normalize(row: &RawRow) -> Self {
        let responsible_unit = row.get(Field::ResponsibleUnit).to_string();
        let area = match row.get(Field::Area) {
            "" => responsible_unit.clone(),
            area => area.to_string(),
        };
        let amount = CsvAmount::from(row.get(Field::Amount));

        FeeRecord {
            origin: row.get(Field::Origin).to_string(),
            responsible_unit,
            area,
            process: row.get(Field::Process).to_string(),
            fee_label: row.get(Field::FeeLabel).to_string(),
            amount: amount.parse(),
            amount_raw: amount.raw().to_string(),
            requirements: row.get(Field::Requirements).to_string(),
            email: row.get(Field::Email).to_string(),
            phone: row
                .get(Field::Phone)
                .chars()
                .filter(char::is_ascii_digit)
                .collect(),
        }
    }

    /// A record needs a process or a fee label to be worth listing.
    pub fn has_identity(&self) -> bool {
        !self.process.is_empty() || !self.fee_label.is_empty()
    }

    pub fn is_tupa(&self) -> bool {
        self.origin.trim().eq_ignore_ascii_case(TUPA_TAG)
    }

    /// Requirements split into bullet items on newlines and semicolons.
    pub fn requirement_items(&self) -> Vec<&str> {
        self.requirements
            .split(['\n', '\r', ';'])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Amount text as shown on cards, prefixed with the currency symbol once.
    pub fn display_amount(&self) -> String {
        let raw = self.amount_raw.trim();
        if raw.to_lowercase().starts_with("s/") {
            raw.to_string()
        } else {
            format!("S/ {raw}")
        }
    }

    pub fn mailto_url(&self) -> Option<String> {
        (!self.email.is_empty()).then(|| format!("mailto:{}", self.email))
    }

    pub fn whatsapp_url(&self) -> Option<String> {
        (!self.phone.is_empty())
            .then(|| format!("https://wa.me/{}{}", PHONE_COUNTRY_CODE, self.phone))
    }
}

impl From<RawRow> for FeeRecord {
    fn from(row: RawRow) -> Self {
        FeeRecord::normalize(&row)
    }
}

/// Normalizes one raw row; see [`FeeRecord::normalize`].
pub fn normalize(row: &RawRow) -> FeeRecord {
    FeeRecord::normalize(row)
}
