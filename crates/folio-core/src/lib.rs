//! # Folio Core
//!
//! The domain layer of the Folio content backend: posts made of structured
//! content blocks, the block-to-HTML renderer, slug assignment and the
//! post service. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod render;
pub mod services;
pub mod slug;
pub mod validation;

pub use error::DomainError;
