//! Database models and boundary DTOs

pub mod catalog;
pub mod category;
pub mod gebruiker;

pub use catalog::{
    CatalogItem, CatalogItemView, ImageSlot, ItemFields, KleurVariant, VariantDescriptor,
};
pub use category::Categorie;
pub use gebruiker::Gebruiker;
