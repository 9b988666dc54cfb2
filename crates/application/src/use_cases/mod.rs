//! Use cases
//!
//! Use cases orchestrate the rendering pipeline against the ports.

mod document_exchange;

pub use document_exchange::{DocumentExchange, DocumentExchangeInput, DocumentExchangeOutput};
