//! Service layer for Parley.
//!
//! Services are generic over the repository traits so the core crate never
//! depends on a concrete store.

pub mod messenger;
