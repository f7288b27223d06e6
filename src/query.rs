//! Search, filter, order and paginate a loaded dataset.
//!
//! [`query`] is a pure function of the dataset and a [`QueryParams`] value;
//! the caller owns the current page and selections.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Dataset;
use crate::errors::CatalogResult;
use crate::types::FeeRecord;

pub const PAGE_SIZE: usize = 21;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub search_text: String,
    pub unit_filter: Option<String>,
    pub process_filter: Option<String>,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            unit_filter: None,
            process_filter: None,
            min_amount: Decimal::ZERO,
            max_amount: Decimal::MAX,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: &str) -> Self {
        self.search_text = text.to_string();
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit_filter = Some(unit.to_string());
        self
    }

    pub fn process(mut self, process: &str) -> Self {
        self.process_filter = Some(process.to_string());
        self
    }

    /// Endpoints may arrive in either order.
    pub fn amount_range(mut self, a: Decimal, b: Decimal) -> Self {
        self.min_amount = a;
        self.max_amount = b;
        self
    }

    /// Slider values; non-finite endpoints leave the current bound in place.
    pub fn amount_range_f64(mut self, a: f64, b: f64) -> Self {
        if let Some(a) = Decimal::from_f64(a) {
            self.min_amount = a;
        }
        if let Some(b) = Decimal::from_f64(b) {
            self.max_amount = b;
        }
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Range endpoints in ascending order.
    pub fn amount_bounds(&self) -> (Decimal, Decimal) {
        if self.min_amount <= self.max_amount {
            (self.min_amount, self.max_amount)
        } else {
            (self.max_amount, self.min_amount)
        }
    }

    fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

/// One page of results for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<FeeRecord>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Matches across all pages.
    pub total_items: usize,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn filter_matches(filter: Option<&str>, value: &str) -> bool {
    match filter {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

pub fn query(dataset: &Dataset, params: &QueryParams) -> Page {
    let records = dataset.records();

    // 1. search (or pass-through for short queries)
    let candidates: Vec<&FeeRecord> = dataset
        .index()
        .search(&params.search_text)
        .into_iter()
        .map(|hit| &records[hit.position])
        .collect();
    let searched = candidates.len();

    // 2. categorical filters, 3. amount range
    let (min, max) = params.amount_bounds();
    let mut results: Vec<&FeeRecord> = candidates
        .into_iter()
        .filter(|r| filter_matches(params.unit_filter.as_deref(), &r.responsible_unit))
        .filter(|r| filter_matches(params.process_filter.as_deref(), &r.process))
        .filter(|r| r.amount >= min && r.amount <= max)
        .collect();

    // 4. TUPA first; sort_by_key is stable
    results.sort_by_key(|r| !r.is_tupa());

    // 5. paginate
    let page_size = params.effective_page_size();
    let total_items = results.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = params.page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    debug!(
        search = %params.search_text,
        searched,
        total_items,
        page,
        total_pages,
        "catalog query"
    );

    Page {
        items: results[start..end].iter().map(|r| (*r).clone()).collect(),
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(origin: &str, fee_label: &str, process: &str, unit: &str, amount: &str) -> FeeRecord {
        FeeRecord {
            origin: origin.to_string(),
            responsible_unit: unit.to_string(),
            area: unit.to_string(),
            process: process.to_string(),
            fee_label: fee_label.to_string(),
            amount_raw: amount.to_string(),
            amount: dec(amount),
            requirements: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("TUSNE", "Carné de lector", "Biblioteca", "Biblioteca Central", "10.00"),
            record("TUPA", "Constancia de estudios", "Constancias", "Registros", "25.50"),
            record("Otro", "Alquiler de auditorio", "Servicios", "Administración", "300.00"),
            record("tupa", "Duplicado de carné", "Carnés", "Registros", "15.00"),
            record("TUSNE", "Examen de admisión", "Admisión", "Admisión", "250.00"),
        ])
    }

    fn labels(page: &Page) -> Vec<&str> {
        page.items.iter().map(|r| r.fee_label.as_str()).collect()
    }

    fn numbered(count: usize) -> Dataset {
        Dataset::new(
            (0..count)
                .map(|i| record("TUSNE", &format!("Tarifa {i}"), "Proceso", "Unidad", "1.00"))
                .collect(),
        )
    }

    #[test]
    fn test_default_query_orders_tupa_first() {
        let page = query(&dataset(), &QueryParams::new());

        assert_eq!(
            labels(&page),
            vec![
                "Constancia de estudios",
                "Duplicado de carné",
                "Carné de lector",
                "Alquiler de auditorio",
                "Examen de admisión",
            ]
        );
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn test_tupa_first_regardless_of_input_order() {
        let forward = Dataset::new(vec![
            record("Other", "Uno", "P", "U", "1"),
            record("TUPA", "Dos", "P", "U", "1"),
        ]);
        let backward = Dataset::new(vec![
            record("TUPA", "Dos", "P", "U", "1"),
            record("Other", "Uno", "P", "U", "1"),
        ]);

        assert_eq!(labels(&query(&forward, &QueryParams::new())), vec!["Dos", "Uno"]);
        assert_eq!(labels(&query(&backward, &QueryParams::new())), vec!["Dos", "Uno"]);
    }

    #[test]
    fn test_search_then_tupa_first() {
        let page = query(&dataset(), &QueryParams::new().search("carne"));
        assert_eq!(labels(&page), vec!["Duplicado de carné", "Carné de lector"]);
    }

    #[test]
    fn test_short_query_bypasses_search() {
        let data = dataset();
        let short = query(&data, &QueryParams::new().search("z"));
        let empty = query(&data, &QueryParams::new().search(""));
        assert_eq!(short, empty);
    }

    #[rstest]
    #[case(Some("Registros"), None, vec!["Constancia de estudios", "Duplicado de carné"])]
    #[case(Some("Registros"), Some("Carnés"), vec!["Duplicado de carné"])]
    #[case(None, Some("Admisión"), vec!["Examen de admisión"])]
    #[case(Some(""), Some(""), vec![
        "Constancia de estudios",
        "Duplicado de carné",
        "Carné de lector",
        "Alquiler de auditorio",
        "Examen de admisión",
    ])]
    #[case(Some("registros"), None, vec![])]
    fn test_categorical_filters(
        #[case] unit: Option<&str>,
        #[case] process: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let mut params = QueryParams::new();
        if let Some(unit) = unit {
            params = params.unit(unit);
        }
        if let Some(process) = process {
            params = params.process(process);
        }

        assert_eq!(labels(&query(&dataset(), &params)), expected);
    }

    #[rstest]
    #[case("10", "50", vec!["Constancia de estudios", "Duplicado de carné", "Carné de lector"])]
    #[case("50", "10", vec!["Constancia de estudios", "Duplicado de carné", "Carné de lector"])]
    #[case("250", "250", vec!["Examen de admisión"])]
    #[case("1000", "2000", vec![])]
    fn test_amount_range(#[case] a: &str, #[case] b: &str, #[case] expected: Vec<&str>) {
        let params = QueryParams::new().amount_range(dec(a), dec(b));
        assert_eq!(labels(&query(&dataset(), &params)), expected);
    }

    #[test]
    fn test_swapped_range_is_equivalent() {
        let data = dataset();
        let swapped = query(&data, &QueryParams::new().amount_range(dec("50"), dec("10")));
        let ordered = query(&data, &QueryParams::new().amount_range(dec("10"), dec("50")));
        assert_eq!(swapped, ordered);
    }

    #[test]
    fn test_amount_range_from_slider() {
        let params = QueryParams::new().amount_range_f64(20.0, f64::NAN);
        assert_eq!(params.amount_bounds(), (dec("20"), Decimal::MAX));

        let page = query(&dataset(), &params);
        assert_eq!(page.total_items, 3);
    }

    #[rstest]
    #[case(45, 1, 3, 1, 21)]
    #[case(45, 3, 3, 3, 3)]
    #[case(45, 0, 3, 1, 21)]
    #[case(45, 99, 3, 3, 3)]
    #[case(21, 2, 1, 1, 21)]
    #[case(22, 2, 2, 2, 1)]
    #[case(0, 5, 1, 1, 0)]
    fn test_pagination(
        #[case] count: usize,
        #[case] requested: usize,
        #[case] total_pages: usize,
        #[case] served: usize,
        #[case] items: usize,
    ) {
        let page = query(&numbered(count), &QueryParams::new().page(requested));

        assert_eq!(page.total_pages, total_pages);
        assert_eq!(page.page, served);
        assert_eq!(page.items.len(), items);
        assert_eq!(page.total_items, count);
    }

    #[test]
    fn test_pagination_slices_in_order() {
        let page = query(&numbered(30), &QueryParams::new().page(2));
        assert_eq!(page.items[0].fee_label, "Tarifa 21");
        assert_eq!(page.items.last().unwrap().fee_label, "Tarifa 29");
    }

    #[test]
    fn test_zero_page_size_falls_back_to_default() {
        let page = query(&numbered(30), &QueryParams::new().page_size(0));
        assert_eq!(page.items.len(), PAGE_SIZE);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_items_never_exceed_page_size_or_dataset() {
        for count in [0, 1, 20, 21, 22, 63, 64] {
            let data = numbered(count);
            for page in 0..5 {
                let result = query(&data, &QueryParams::new().page(page));
                assert!(result.items.len() <= PAGE_SIZE);
                assert!(result.items.len() <= data.len());
            }
        }
    }

    #[test]
    fn test_query_is_idempotent() {
        let data = dataset();
        let params = QueryParams::new()
            .search("constancia")
            .amount_range(dec("500"), dec("0"));
        assert_eq!(query(&data, &params), query(&data, &params));
    }

    #[test]
    fn test_page_to_json() {
        let page = query(&dataset(), &QueryParams::new().unit("Admisión"));
        let json = page.to_json().unwrap();

        assert!(json.contains("\"totalPages\":1"));
        assert!(json.contains("Examen de admisión"));
    }

    #[test]
    fn test_query_params_deserialize_with_defaults() {
        let params: QueryParams = serde_json::from_str(r#"{"searchText":"carne","page":2}"#).unwrap();
        assert_eq!(params.search_text, "carne");
        assert_eq!(params.page, 2);
        assert_eq!(params.page_size, PAGE_SIZE);
        assert_eq!(params.unit_filter, None);
    }
}
