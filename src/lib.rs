//! Sieraad Server - webwinkel voor handgemaakte sieraden
//!
//! De publieke kant serveert de catalogus (producten per categorie,
//! detailpagina's met kleurvarianten); de beveiligde kant is het
//! beheerdersgedeelte voor productbeheer en het profiel.
//!
//! # Modulestructuur
//!
//! ```text
//! src/
//! ├── core/          # configuratie, status, server
//! ├── auth/          # sessies (JWT-cookie), toegangscontrole
//! ├── api/           # HTTP-routes en handlers
//! ├── db/            # SQLite via sqlx: modellen en repositories
//! ├── media/         # normalisatie van geüploade afbeeldingen
//! └── utils/         # fouten, validatie, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod media;
pub mod utils;

pub use auth::{CurrentAdmin, SessionService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use media::ImageNormalizer;
pub use utils::{AppError, AppResponse, AppResult};
