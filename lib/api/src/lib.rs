//! # PsyReco API
//!
//! REST endpoints over the recommender:
//!
//! - `GET  /health` - service status and catalog size
//! - `GET  /books/{id}` - a catalog record
//! - `POST /analyze` - mood profile for free text
//! - `POST /recommend` - ranked books for free text or explicit tags

pub mod rest;

pub use rest::{configure, ApiError, AppState, RestApi};
