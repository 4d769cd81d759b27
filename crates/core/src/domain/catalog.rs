use crate::domain::product::{Product, ProductId, ProductUpdate};
use crate::errors::CatalogError;

/// The full set of tracked products, unique by id, in insertion order.
///
/// Lookups are linear scans; the catalog is sized for a single operator's
/// inventory, not for indexing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.find(product_id).is_some()
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.product_id.as_str() == product_id)
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.product_id.as_str() == product_id)
    }

    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.contains(product.product_id.as_str()) {
            return Err(CatalogError::DuplicateId(product.product_id));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<Product, CatalogError> {
        let position = self
            .products
            .iter()
            .position(|product| product.product_id.as_str() == product_id)
            .ok_or_else(|| CatalogError::NotFound(ProductId::from(product_id)))?;
        Ok(self.products.remove(position))
    }

    /// Case-insensitive substring match over product names, in catalog order.
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Replaces a product's attributes all-or-nothing: the update is validated
    /// in full before the record mutates.
    pub fn update(&mut self, product_id: &str, update: ProductUpdate) -> Result<(), CatalogError> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| CatalogError::NotFound(ProductId::from(product_id)))?;
        product.apply_update(update)
    }

    pub fn stock_in(&mut self, product_id: &str, amount: u32) -> Result<u32, CatalogError> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| CatalogError::NotFound(ProductId::from(product_id)))?;
        product.stock_in(amount);
        Ok(product.quantity)
    }

    pub fn stock_out(&mut self, product_id: &str, amount: u32) -> Result<u32, CatalogError> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| CatalogError::NotFound(ProductId::from(product_id)))?;
        product.stock_out(amount)?;
        Ok(product.quantity)
    }
}
