//! Media module: upload image normalization

pub mod normalizer;

pub use normalizer::{ImageNormalizer, NormalizeError};
