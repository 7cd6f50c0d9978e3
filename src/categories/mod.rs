/**
 * Categories Module
 *
 * Catalog category tree: public reads, ADMIN-gated mutations.
 */

pub mod handlers;

pub use handlers::{
    create_category, delete_category, get_category, list_categories, update_category,
    CategoryResponse, CategoryTree, ListQuery,
};
