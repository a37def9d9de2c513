//! HTTP access to the Finnza backend.
//!
//! # Modules
//!
//! - `http` - `ApiClient`: headers, timeouts and error mapping
//! - `wire` - Response envelopes and DTOs
//! - `sources` - Omie and BomControle movement sources
//! - `movements` - Cache-aware movement service and page state
//! - `contracts` - Contract endpoints

pub mod contracts;
pub mod http;
pub mod movements;
pub mod sources;
pub mod wire;

pub use contracts::{ContractApi, ContractSearch};
pub use http::ApiClient;
pub use movements::{MovementRequest, MovementService, MovementView, MovementsPage};
pub use sources::{BomControleSource, MovementBatch, MovementQuery, MovementSource, OmieSource};
