use super::InputEvent;
use crate::error::TransitionError;
use crate::state::EditorContext;

/// Routes an input event to the interaction state machine.
///
/// Pointer-down checks the selected item's resize handle first, then item bodies
/// from front to back. A press on empty canvas changes nothing.
pub fn route_event(event: &InputEvent, ctx: &mut EditorContext) -> Result<(), TransitionError> {
    match event {
        InputEvent::PointerDown { location } => {
            if !location.is_in_canvas() {
                return Ok(());
            }
            let pos = location.canvas_local();
            if let Some(index) = ctx.composition.handle_at(pos) {
                ctx.pointer_down_on_handle(index, pos)
            } else if let Some(index) = ctx.composition.item_at(pos) {
                ctx.pointer_down_on_item(index)
            } else {
                Ok(())
            }
        }
        InputEvent::PointerMove { location } => ctx.pointer_move(location.canvas_local()),
        InputEvent::PointerUp => {
            ctx.pointer_up();
            Ok(())
        }
        InputEvent::AssetDropped { location, payload } => {
            let Some(asset_ref) = payload.clone() else {
                log::debug!("Drop without asset reference ignored");
                return Ok(());
            };
            if !location.canvas_rect.contains(location.position) {
                return Ok(());
            }
            ctx.drop_asset(asset_ref, location.canvas_local()).map(|_| ())
        }
    }
}
