mod auth;
mod categories;
mod client;
mod error;
mod normalize;
mod products;
pub mod storage;
mod types;

pub use auth::authenticate;
pub use categories::{delete_category, insert_category, list_categories, update_category};
pub use client::RemoteClient;
pub use error::RemoteError;
pub use normalize::{canonical_category, canonical_product};
pub use products::{
    category_has_products, delete_product_by_id, delete_product_by_model, insert_product,
    list_products, update_product,
};
pub use storage::{public_url, remove_objects, upload_object};
pub use types::{AdminUserRow, CategoryRef, CategoryRow, JoinedProductRow, ProductChanges, ProductInsert};
