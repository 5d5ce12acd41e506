// Size bounds hold for every placed item, whatever the configuration
pub const MIN_ITEM_SIZE: f32 = 40.0;
pub const MAX_ITEM_SIZE: f32 = 800.0;
pub const DEFAULT_ITEM_SIZE: f32 = 120.0;
/// Toolbar grow/shrink increment
pub const NUDGE_STEP: f32 = 16.0;

/// Clamp a size into `[MIN_ITEM_SIZE, MAX_ITEM_SIZE]`. NaN becomes the minimum.
pub fn clamp_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_ITEM_SIZE;
    }
    size.clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE)
}

/// Process-lifetime stacking counter. Values are never reused.
#[derive(Debug, Clone, Default)]
pub struct StackCounter {
    last: u64,
}

impl StackCounter {
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}
