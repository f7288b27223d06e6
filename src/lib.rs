//! Load, search and filter published fee catalogs (TUPA/TUSNE tariffs).
//!
//! ```rust,ignore
//! use tarifario::{CatalogBuilder, QueryParams};
//!
//! let catalog = CatalogBuilder::new()
//!     .content(&csv_content)
//!     .build();
//!
//! let page = catalog.query(&QueryParams::new().search("constancia").page(1))?;
//! ```

mod builder;
mod types;

pub mod catalog;
pub mod commission;
pub mod errors;
pub mod parsers;
pub mod query;
pub mod search;
pub mod source;

pub use builder::CatalogBuilder;
pub use catalog::{AmountBounds, Catalog, Dataset, FilterOptions};
pub use commission::{Channel, Estimate, estimate};
pub use errors::{CatalogError, CatalogResult};
pub use parsers::prelude::*;
pub use query::{PAGE_SIZE, Page, QueryParams, query};
pub use search::{FuzzyMatcher, Matcher, SearchIndex, SubstringMatcher};
pub use source::SheetSource;
pub use types::{FeeRecord, PHONE_COUNTRY_CODE, TUPA_TAG, normalize};
