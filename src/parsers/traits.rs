use crate::errors::CatalogResult;

pub trait Parser {
    type Output;

    fn parse(&self, content: &str) -> CatalogResult<Vec<Self::Output>>;

    fn is_supported(&self, filename: Option<&str>, content: &str) -> bool;
}
