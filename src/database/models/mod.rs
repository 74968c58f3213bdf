pub mod order;
pub mod product;
pub mod wishlist;

use serde::Serialize;

use crate::filter::JsonDocument;

pub use order::{CustomerContact, Order, ProductSnapshot};
pub use product::{Product, ProductUpdate};
pub use wishlist::{CustomerDetails, WishlistEntry};

/// Serialize a model into the document shape the store accepts.
pub fn to_document<T: Serialize>(model: &T) -> Result<JsonDocument, serde_json::Error> {
    match serde_json::to_value(model)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!("expected an object, got {}", other))),
    }
}
