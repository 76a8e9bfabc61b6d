// Document catalog: industries, packs, inclusion rules.
// Lookups go through CatalogCache, built once at startup.

pub mod cache;
pub mod data;
pub mod handlers;
pub mod resolver;
