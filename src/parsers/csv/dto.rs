use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Canonical fee-record columns. Each one resolves from several spreadsheet
/// header spellings, since the sheet's column names drift between revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Origin,
    ResponsibleUnit,
    Area,
    Process,
    FeeLabel,
    Amount,
    Requirements,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Origin,
        Field::ResponsibleUnit,
        Field::Area,
        Field::Process,
        Field::FeeLabel,
        Field::Amount,
        Field::Requirements,
        Field::Email,
        Field::Phone,
    ];

    /// Accepted header names, already in [`header_key`] form, in lookup order.
    pub fn header_variants(self) -> &'static [&'static str] {
        match self {
            Field::Origin => &["tupa/tusne", "tupa / tusne", "tupa o tusne", "origen"],
            Field::ResponsibleUnit => &[
                "centro de costo",
                "centro de costos",
                "unidad responsable",
                "unidades responsables",
                "unidad",
            ],
            Field::Area => &[
                "área responsable de brindar el servicio",
                "area responsable de brindar el servicio",
                "área responsable",
                "area responsable",
                "área",
                "area",
            ],
            Field::Process => &["proceso", "procesos", "procedimiento"],
            Field::FeeLabel => &[
                "tarifa",
                "tarifas",
                "denominación de la tarifa",
                "denominacion de la tarifa",
                "concepto",
            ],
            Field::Amount => &["monto", "montos", "monto (s/)", "monto s/", "importe", "costo"],
            Field::Requirements => &["requisitos", "requisito"],
            Field::Email => &[
                "correo",
                "correo electrónico",
                "correo electronico",
                "email",
                "e-mail",
            ],
            Field::Phone => &[
                "n° celular",
                "nº celular",
                "n° de celular",
                "celular",
                "teléfono",
                "telefono",
            ],
        }
    }
}

/// Lower-cases a header name and collapses internal whitespace to single spaces.
pub fn header_key(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One spreadsheet row, keyed by normalized header name.
///
/// Absent columns and empty cells look the same from the outside: both
/// resolve to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    /// First non-empty trimmed value among the field's header variants.
    pub fn get(&self, field: Field) -> &str {
        field
            .header_variants()
            .iter()
            .filter_map(|variant| self.cells.get(*variant))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    pub fn has(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<HashMap<String, String>> for RawRow {
    fn from(row: HashMap<String, String>) -> Self {
        row.into_iter().collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cells: HashMap<String, String> = HashMap::new();
        for (header, value) in iter {
            let value = value.into();
            let slot = cells.entry(header_key(header.as_ref())).or_default();
            // Two headers can collapse to the same key; the first non-empty cell wins.
            if slot.trim().is_empty() {
                *slot = value;
            }
        }
        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Proceso", "proceso")]
    #[case("  Centro   de\tCosto ", "centro de costo")]
    #[case("ÁREA RESPONSABLE DE BRINDAR EL SERVICIO", "área responsable de brindar el servicio")]
    #[case("N° Celular", "n° celular")]
    #[case("", "")]
    fn test_header_key(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(header_key(input), expected);
    }

    #[test]
    fn test_header_variants_are_normalized() {
        for field in Field::ALL {
            for variant in field.header_variants() {
                assert_eq!(&header_key(variant), variant, "{field:?}");
            }
        }
    }

    #[rstest]
    #[case("TUPA/TUSNE")]
    #[case("Origen")]
    #[case("tupa  /  tusne")]
    fn test_get_resolves_origin_variants(#[case] header: &str) {
        let row: RawRow = [(header, "TUPA")].into_iter().collect();
        assert_eq!(row.get(Field::Origin), "TUPA");
    }

    #[test]
    fn test_get_takes_first_non_empty_variant() {
        let row: RawRow = [("Tarifa", "  "), ("Tarifas", " Copia simple ")]
            .into_iter()
            .collect();
        assert_eq!(row.get(Field::FeeLabel), "Copia simple");
    }

    #[test]
    fn test_get_missing_column_is_empty() {
        let row: RawRow = [("Proceso", "Matrícula")].into_iter().collect();
        assert_eq!(row.get(Field::Email), "");
        assert!(!row.has(Field::Email));
        assert!(row.has(Field::Process));
    }

    #[test]
    fn test_colliding_headers_keep_first_non_empty() {
        let row: RawRow = [("Monto", "10"), ("  monto ", "")].into_iter().collect();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get(Field::Amount), "10");
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("Correo Electrónico".to_string(), "mesa@uni.edu.pe".to_string());
        let row = RawRow::from(map);
        assert_eq!(row.get(Field::Email), "mesa@uni.edu.pe");
    }
}
