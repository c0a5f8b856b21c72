//! Domain types for Bard

mod asset;
mod location;

pub use asset::{asset_name_from_track_id, AssetClass, AssetEntry};
pub use location::{LocationNode, LocationTree};
