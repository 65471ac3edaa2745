//! Data files for the tower: game configuration and actor name lists.
//!
//! Loaders read TOML/RON files into `tower-core` types. Content is consumed
//! when the world is set up and never appears in actor state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, NameLoader};
