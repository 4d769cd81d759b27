use thiserror::Error;

use crate::domain::product::ProductId;

/// Expected outcomes of catalog operations. None of these is fatal: the
/// interactive session renders each variant as a message and returns to the
/// menu.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("no product with id `{0}` exists in the catalog")]
    NotFound(ProductId),
    #[error("a product with id `{0}` already exists")]
    DuplicateId(ProductId),
    #[error("product id must not be empty")]
    EmptyId,
    #[error("product name must not be empty")]
    EmptyName,
    #[error("price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),
    #[error("insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock { requested: u32, available: u32 },
}

#[cfg(test)]
mod tests {
    use super::CatalogError;
    use crate::domain::product::ProductId;

    #[test]
    fn messages_name_the_offending_id() {
        let error = CatalogError::NotFound(ProductId::from("A1"));
        assert_eq!(error.to_string(), "no product with id `A1` exists in the catalog");

        let error = CatalogError::DuplicateId(ProductId::from("A1"));
        assert_eq!(error.to_string(), "a product with id `A1` already exists");
    }

    #[test]
    fn insufficient_stock_reports_both_quantities() {
        let error = CatalogError::InsufficientStock { requested: 20, available: 13 };
        assert_eq!(error.to_string(), "insufficient stock: requested 20, only 13 available");
    }
}
