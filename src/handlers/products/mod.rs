// handlers/products/mod.rs - /products routes
//
// Reads are public. Writes and the per-seller listing are keyed on the
// caller's `email` claim matching the product's `sellerEmail`.

pub mod list;
pub mod seller;
pub mod write;

pub use list::{get_product, list_by_category, list_products, search_products};
pub use seller::list_by_seller;
pub use write::{create_product, delete_product, update_product};
