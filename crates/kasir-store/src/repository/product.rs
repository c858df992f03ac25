//! # Product Repository
//!
//! Catalog operations over the products store.
//!
//! ## Key Operations
//! - Linear search across name, barcode and product number
//! - CRUD with typed patches
//! - Identity assignment (token id, sequential number, derived barcode)
//!
//! ## Identity Assignment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                How a New Product Gets Its Identity                      │
//! │                                                                         │
//! │  add(NewProduct { barcode: "", name: "Kopi Hitam", ... })              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  id              = "A1B2C3D4"      random 8-char token, immutable      │
//! │  product_number  = max(existing)+1 sequential, never reused            │
//! │  barcode         = "PRD000007"     derived, because none was given     │
//! │  created_at      = now (UTC)                                           │
//! │                                                                         │
//! │  Deleting product #7 later does NOT free number 7: the next add        │
//! │  still scans max(existing)+1, so barcodes never point at two           │
//! │  different products across time.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use kasir_core::validation::{validate_buy_price, validate_product_name, validate_sell_price};
use kasir_core::{Money, NewProduct, Product, ProductPatch, ValidationError};

use crate::error::StoreResult;
use crate::record::RecordStore;

/// Column order of the products store. Must match the serde field
/// order on [`Product`] - the round-trip test below pins this.
pub const PRODUCTS_HEADER: &[&str] = &[
    "id",
    "product_number",
    "barcode",
    "name",
    "category",
    "buy_price",
    "sell_price",
    "created_at",
    "updated_at",
];

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new("data/products.csv")?;
///
/// let kopi = repo.add(NewProduct { name: "Kopi Hitam".into(), .. })?;
/// let hits = repo.search("kopi")?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: RecordStore<Product>,
}

impl ProductRepository {
    /// Opens the repository, creating the store file if needed.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = RecordStore::new(path, PRODUCTS_HEADER);
        store.ensure_initialized()?;
        Ok(ProductRepository { store })
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Lists the whole catalog in on-disk order.
    pub fn list_all(&self) -> StoreResult<Vec<Product>> {
        self.store.load_all()
    }

    /// Count of products on file (for diagnostics and seeding).
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.store.load_all()?.len())
    }

    /// Gets a product by its opaque id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No such id
    pub fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.store.load_all()?.into_iter().find(|p| p.id == id))
    }

    /// Gets a product by exact barcode.
    pub fn get_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .find(|p| p.barcode == barcode))
    }

    /// Gets a product by its sequential business number.
    pub fn get_by_product_number(&self, number: u32) -> StoreResult<Option<Product>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .find(|p| p.product_number == number))
    }

    /// Searches the catalog.
    ///
    /// ## How It Works
    /// Case-insensitive substring match on name or barcode, or an exact
    /// match on the product number rendered as a string. Results keep
    /// on-disk order; an empty query returns the whole catalog.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Product>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_all();
        }

        debug!(query = %query, "Searching products");

        let needle = query.to_lowercase();
        let products = self
            .store
            .load_all()?
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.barcode.to_lowercase().contains(&needle)
                    || p.product_number.to_string() == needle
            })
            .collect();
        Ok(products)
    }

    /// Distinct non-empty categories, sorted.
    pub fn categories(&self) -> StoreResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .store
            .load_all()?
            .into_iter()
            .map(|p| p.category)
            .filter(|c| !c.trim().is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Maps product id → buy price, for profit reports.
    ///
    /// Line items whose product is missing from this map (deleted since
    /// the sale) are costed at zero by the report layer.
    pub fn buy_prices(&self) -> StoreResult<HashMap<String, Money>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .map(|p| (p.id, p.buy_price))
            .collect())
    }

    /// Adds a product to the catalog.
    ///
    /// ## Identity
    /// Assigns the opaque id, the next product number and, when the
    /// given barcode is empty, the derived `PRD{number:06}` barcode.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product with all fields filled in
    /// * `Err(StoreError::Validation)` - Bad name/prices, or duplicate barcode
    pub fn add(&self, new: NewProduct) -> StoreResult<Product> {
        validate_product_name(&new.name)?;
        validate_sell_price(new.sell_price)?;
        validate_buy_price(new.buy_price)?;

        let existing = self.store.load_all()?;
        let product_number = existing
            .iter()
            .map(|p| p.product_number)
            .max()
            .unwrap_or(0)
            + 1;

        let barcode = if new.barcode.trim().is_empty() {
            Product::derive_barcode(product_number)
        } else {
            new.barcode.trim().to_string()
        };
        if existing.iter().any(|p| p.barcode == barcode) {
            return Err(ValidationError::duplicate("barcode", barcode).into());
        }

        debug!(barcode = %barcode, name = %new.name, "Adding product");

        let now = Utc::now();
        let product = Product {
            id: Product::generate_id(),
            product_number,
            barcode,
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            buy_price: new.buy_price,
            sell_price: new.sell_price,
            created_at: now,
            updated_at: now,
        };
        self.store.append(&product)?;
        Ok(product)
    }

    /// Applies a typed patch to a product and rewrites the store.
    ///
    /// The patched record is re-validated with the same rules as
    /// [`add`](Self::add); `updated_at` is refreshed on success.
    ///
    /// ## Returns
    /// * `Ok(true)` - Product found and updated
    /// * `Ok(false)` - No product with that id
    pub fn update(&self, id: &str, patch: &ProductPatch) -> StoreResult<bool> {
        let mut products = self.store.load_all()?;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        patch.apply(product);
        // An emptied barcode falls back to the derived one, same as add.
        if product.barcode.trim().is_empty() {
            product.barcode = Product::derive_barcode(product.product_number);
        } else {
            product.barcode = product.barcode.trim().to_string();
        }
        validate_product_name(&product.name)?;
        validate_sell_price(product.sell_price)?;
        validate_buy_price(product.buy_price)?;
        product.updated_at = Utc::now();

        debug!(id = %id, "Updating product");
        self.store.rewrite_all(&products)?;
        Ok(true)
    }

    /// Removes a product from the catalog.
    ///
    /// Past sales keep their frozen name and price, so history is
    /// unaffected; only profit reports lose the buy price.
    ///
    /// ## Returns
    /// * `Ok(true)` - Product found and removed
    /// * `Ok(false)` - No product with that id
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut products = self.store.load_all()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }

        debug!(id = %id, "Deleting product");
        self.store.rewrite_all(&products)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::tempdir;

    fn new_product(barcode: &str, name: &str, buy: i64, sell: i64) -> NewProduct {
        NewProduct {
            barcode: barcode.to_string(),
            name: name.to_string(),
            category: "Minuman".to_string(),
            buy_price: Money::new(buy),
            sell_price: Money::new(sell),
        }
    }

    fn test_repo(dir: &tempfile::TempDir) -> ProductRepository {
        ProductRepository::new(dir.path().join("products.csv")).unwrap()
    }

    #[test]
    fn test_add_assigns_identity() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let kopi = repo.add(new_product("", "Kopi Hitam", 5_000, 8_000)).unwrap();
        assert_eq!(kopi.product_number, 1);
        assert_eq!(kopi.barcode, "PRD000001");
        assert_eq!(kopi.id.len(), 8);

        let teh = repo.add(new_product("", "Es Teh", 1_000, 4_000)).unwrap();
        assert_eq!(teh.product_number, 2);
        assert_eq!(teh.barcode, "PRD000002");
    }

    #[test]
    fn test_add_keeps_custom_barcode() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let p = repo
            .add(new_product(" 8991002 ", "Indomie Goreng", 2_500, 3_500))
            .unwrap();
        assert_eq!(p.barcode, "8991002");
    }

    #[test]
    fn test_add_rejects_duplicate_barcode() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        repo.add(new_product("8991002", "Indomie Goreng", 2_500, 3_500))
            .unwrap();
        let err = repo
            .add(new_product("8991002", "Indomie Rebus", 2_500, 3_500))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        assert!(repo.add(new_product("", "   ", 0, 8_000)).is_err());
        assert!(repo.add(new_product("", "Kopi", 0, 0)).is_err());
        assert!(repo.add(new_product("", "Kopi", -100, 8_000)).is_err());
        // Nothing was written by the rejected adds.
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_numbers_are_never_reused() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let kopi = repo.add(new_product("", "Kopi", 5_000, 8_000)).unwrap();
        let teh = repo.add(new_product("", "Teh", 1_000, 4_000)).unwrap();
        assert!(repo.delete(&teh.id).unwrap());

        let roti = repo.add(new_product("", "Roti", 4_000, 6_000)).unwrap();
        assert_eq!(roti.product_number, 3);
        assert_ne!(roti.barcode, teh.barcode);
        assert_eq!(kopi.product_number, 1);
    }

    #[test]
    fn test_lookups() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let kopi = repo.add(new_product("", "Kopi Hitam", 5_000, 8_000)).unwrap();
        // Round trip through the file yields a record equal to the one
        // handed back at creation, timestamps included.
        assert_eq!(repo.get_by_id(&kopi.id).unwrap().unwrap(), kopi);
        assert_eq!(
            repo.get_by_barcode("PRD000001").unwrap().unwrap().id,
            kopi.id
        );
        assert_eq!(
            repo.get_by_product_number(1).unwrap().unwrap().id,
            kopi.id
        );
        assert!(repo.get_by_id("MISSING1").unwrap().is_none());
    }

    #[test]
    fn test_search_matches_name_barcode_and_number() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        repo.add(new_product("", "Kopi Hitam", 5_000, 8_000)).unwrap();
        repo.add(new_product("", "Kopi Susu", 6_000, 10_000)).unwrap();
        repo.add(new_product("", "Es Teh Manis", 1_000, 4_000)).unwrap();

        assert_eq!(repo.search("KOPI").unwrap().len(), 2);
        assert_eq!(repo.search("prd000003").unwrap().len(), 1);
        // Number matches are exact string equality, not substring.
        let by_number = repo.search("2").unwrap();
        assert_eq!(by_number.len(), 1);
        assert_eq!(by_number[0].name, "Kopi Susu");
        assert!(repo.search("nasi").unwrap().is_empty());
        assert_eq!(repo.search("  ").unwrap().len(), 3);
    }

    #[test]
    fn test_categories_distinct_sorted() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let mut p = new_product("", "Kopi", 5_000, 8_000);
        p.category = "Minuman".to_string();
        repo.add(p).unwrap();
        let mut p = new_product("B1", "Roti", 4_000, 6_000);
        p.category = "Makanan".to_string();
        repo.add(p).unwrap();
        let mut p = new_product("B2", "Teh", 1_000, 4_000);
        p.category = "Minuman".to_string();
        repo.add(p).unwrap();
        let mut p = new_product("B3", "Permen", 100, 500);
        p.category = "  ".to_string();
        repo.add(p).unwrap();

        assert_eq!(repo.categories().unwrap(), vec!["Makanan", "Minuman"]);
    }

    #[test]
    fn test_update_applies_patch_and_revalidates() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let kopi = repo.add(new_product("", "Kopi", 5_000, 8_000)).unwrap();
        let patch = ProductPatch {
            name: Some("Kopi Tubruk".to_string()),
            sell_price: Some(Money::new(9_000)),
            ..ProductPatch::default()
        };
        assert!(repo.update(&kopi.id, &patch).unwrap());

        let stored = repo.get_by_id(&kopi.id).unwrap().unwrap();
        assert_eq!(stored.name, "Kopi Tubruk");
        assert_eq!(stored.sell_price, Money::new(9_000));
        assert_eq!(stored.created_at, kopi.created_at);
        assert!(stored.updated_at >= kopi.updated_at);

        // Unknown id reports false, not an error.
        assert!(!repo.update("MISSING1", &patch).unwrap());

        // A patch that breaks the rules is rejected.
        let bad = ProductPatch {
            sell_price: Some(Money::zero()),
            ..ProductPatch::default()
        };
        assert!(repo.update(&kopi.id, &bad).is_err());
    }

    #[test]
    fn test_update_rederives_emptied_barcode() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let p = repo.add(new_product("CUSTOM-1", "Kopi", 5_000, 8_000)).unwrap();
        let patch = ProductPatch {
            barcode: Some("  ".to_string()),
            ..ProductPatch::default()
        };
        assert!(repo.update(&p.id, &patch).unwrap());
        assert_eq!(
            repo.get_by_id(&p.id).unwrap().unwrap().barcode,
            "PRD000001"
        );
    }

    #[test]
    fn test_delete_removes_row() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let kopi = repo.add(new_product("", "Kopi", 5_000, 8_000)).unwrap();
        let teh = repo.add(new_product("", "Teh", 1_000, 4_000)).unwrap();

        assert!(repo.delete(&kopi.id).unwrap());
        assert!(!repo.delete(&kopi.id).unwrap());
        let remaining = repo.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, teh.id);
    }

    #[test]
    fn test_buy_prices_index() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);

        let kopi = repo.add(new_product("", "Kopi", 5_000, 8_000)).unwrap();
        let prices = repo.buy_prices().unwrap();
        assert_eq!(prices[&kopi.id], Money::new(5_000));
    }

    #[test]
    fn test_header_matches_record_layout() {
        let dir = tempdir().unwrap();
        let repo = test_repo(&dir);
        repo.add(new_product("", "Kopi", 5_000, 8_000)).unwrap();

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        let header = raw.lines().next().unwrap();
        assert_eq!(header, PRODUCTS_HEADER.join(","));
        // Prices are stored as bare integers.
        assert!(raw.lines().nth(1).unwrap().contains(",5000,8000,"));
    }
}
