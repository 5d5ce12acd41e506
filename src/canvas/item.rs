use serde::{Deserialize, Serialize};

use crate::asset::AssetHandle;

/// An asset placed on the silhouette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub asset_ref: AssetHandle,
    /// Top-left corner, canvas-local
    pub x: f32,
    pub y: f32,
    /// Side of the square the asset is drawn in
    pub size: f32,
    /// Paint and hit-test order, higher is in front
    pub stack_order: u64,
}
