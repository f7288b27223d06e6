use serde::{Deserialize, Serialize};

/// A published spreadsheet tab holding the fee catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSource {
    pub sheet_id: String,
    pub gid: String,
}

impl SheetSource {
    pub fn new(sheet_id: &str, gid: &str) -> Self {
        Self {
            sheet_id: sheet_id.trim().to_string(),
            gid: gid.trim().to_string(),
        }
    }

    /// CSV export URL for this tab. Fetching it is up to the caller.
    pub fn csv_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.sheet_id, self.gid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_url() {
        let source = SheetSource::new(" 14_ROarwRyo5tsdjQZeMa ", "1276577330");
        assert_eq!(
            source.csv_url(),
            "https://docs.google.com/spreadsheets/d/14_ROarwRyo5tsdjQZeMa/export?format=csv&gid=1276577330"
        );
    }

    #[test]
    fn test_sheet_source_deserialize() {
        let source: SheetSource =
            serde_json::from_str(r#"{"sheet_id":"abc","gid":"0"}"#).unwrap();
        assert_eq!(source, SheetSource::new("abc", "0"));
        assert!(source.csv_url().ends_with("/d/abc/export?format=csv&gid=0"));
    }
}
