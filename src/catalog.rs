//! Product catalog
//!
//! Loads the products CSV once per invocation and resolves free-text user
//! input to a unique product.

use std::collections::HashMap;

use tracing::warn;

use crate::error::Result;
use crate::models::Product;
use crate::store::CsvTable;

/// Header line of the products CSV
pub const PRODUCTS_HEADER: &str = "id,name,unit,kcal_per_100,prot_per_100,fiber_per_100,aliases";

/// Read-only product lookup with id and token indices
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
    by_token: HashMap<String, usize>,
}

impl ProductCatalog {
    /// Load from the products table; malformed rows are skipped, not fatal.
    pub fn load(table: &CsvTable) -> Result<Self> {
        Ok(Self::from_records(table.read_records()?))
    }

    fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut catalog = Self::default();
        for fields in records {
            match Product::from_record(&fields) {
                Ok(product) => catalog.insert(product),
                Err(err) => warn!("skipping product row: {err}"),
            }
        }
        catalog
    }

    fn insert(&mut self, product: Product) {
        let idx = self.products.len();
        self.by_id.insert(product.id.to_lowercase(), idx);

        // tokens: id + name + each alias
        self.by_token.insert(product.id.to_lowercase(), idx);
        self.by_token.insert(product.name.to_lowercase(), idx);
        for token in product.alias_tokens() {
            self.by_token.insert(token, idx);
        }

        self.products.push(product);
    }

    /// Products in catalog insertion order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact case-insensitive id lookup
    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.by_id
            .get(&id.to_lowercase())
            .map(|&idx| &self.products[idx])
    }

    /// Case-insensitive substring match against id, name or alias string,
    /// in insertion order.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.id.to_lowercase().contains(&needle)
                    || p.name.to_lowercase().contains(&needle)
                    || p.aliases_raw.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Map free-text input to exactly one product.
    ///
    /// Exact token match wins; otherwise a substring search must yield a
    /// single product. Empty input, no match and ambiguous matches all
    /// resolve to `None`.
    pub fn resolve(&self, input: &str) -> Option<&Product> {
        let key = input.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(&idx) = self.by_token.get(&key) {
            return Some(&self.products[idx]);
        }

        let matches = self.search(&key);
        match matches.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Append a validated product to the table.
    pub fn add(table: &CsvTable, product: &Product) -> Result<()> {
        table.append_record(&product.to_record())
    }
}
