use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Rect, pos2, vec2};
use siluet::event::{CanvasEvent, EditorEvent, EventHandler};
use siluet::{AssetHandle, Command, EditorContext, InputEvent, InputLocation, InteractionState};
use siluet::input::route_event;

// Canvas drawn away from the window origin so coordinate translation is exercised
fn canvas_rect() -> Rect {
    Rect::from_min_size(pos2(200.0, 100.0), vec2(320.0, 520.0))
}

fn at(local: Pos2) -> InputLocation {
    InputLocation::new(local + canvas_rect().min.to_vec2(), canvas_rect())
}

fn down(local: Pos2) -> InputEvent {
    InputEvent::PointerDown { location: at(local) }
}

fn moved(local: Pos2) -> InputEvent {
    InputEvent::PointerMove { location: at(local) }
}

fn drop(asset: &str, local: Pos2) -> InputEvent {
    InputEvent::AssetDropped {
        location: at(local),
        payload: Some(AssetHandle::new(asset)),
    }
}

fn run(ctx: &mut EditorContext, events: &[InputEvent]) {
    for event in events {
        route_event(event, ctx).unwrap();
    }
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<EditorEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

#[test]
fn test_drag_grabs_item_center() {
    let mut ctx = EditorContext::new();
    run(&mut ctx, &[drop("jupe.png", pos2(50.0, 50.0))]);
    let size = ctx.composition.items()[0].size;

    run(
        &mut ctx,
        &[
            down(pos2(60.0, 60.0)),
            moved(pos2(120.0, 70.0)),
            moved(pos2(200.0, 80.0)),
            InputEvent::PointerUp,
        ],
    );

    let item = &ctx.composition.items()[0];
    assert_eq!((item.x, item.y), (200.0 - size / 2.0, 80.0 - size / 2.0));
    assert_eq!((item.x, item.y), (140.0, 20.0));
    assert!(ctx.state().is_idle());
}

#[test]
fn test_moves_without_gesture_are_ignored() {
    let mut ctx = EditorContext::new();
    run(&mut ctx, &[drop("a.png", pos2(10.0, 10.0)), moved(pos2(300.0, 300.0))]);

    let item = &ctx.composition.items()[0];
    assert_eq!((item.x, item.y), (10.0, 10.0));
}

#[test]
fn test_handle_gesture_resizes_from_pointer_delta() {
    let mut ctx = EditorContext::new();
    run(&mut ctx, &[drop("a.png", pos2(50.0, 50.0))]);

    // Bottom-right corner of a 120 unit item placed at (50, 50)
    run(&mut ctx, &[down(pos2(170.0, 170.0))]);
    assert!(ctx.state().is_resizing());

    run(&mut ctx, &[moved(pos2(200.0, 190.0))]);
    assert_eq!(ctx.composition.items()[0].size, 150.0);

    run(&mut ctx, &[moved(pos2(-2000.0, 170.0))]);
    assert_eq!(ctx.composition.items()[0].size, 120.0);

    run(&mut ctx, &[moved(pos2(5000.0, 5000.0)), InputEvent::PointerUp]);
    assert_eq!(ctx.composition.items()[0].size, 800.0);
    assert_eq!(*ctx.state(), InteractionState::Idle);
}

#[test]
fn test_press_on_empty_canvas_keeps_selection() {
    let mut ctx = EditorContext::new();
    run(&mut ctx, &[drop("a.png", pos2(0.0, 0.0))]);
    run(&mut ctx, &[down(pos2(300.0, 500.0)), InputEvent::PointerUp]);

    assert_eq!(ctx.composition.selected(), Some(0));
    assert!(ctx.state().is_idle());
}

#[test]
fn test_drop_without_payload_or_outside_canvas_is_ignored() {
    let mut ctx = EditorContext::new();
    let events = [
        InputEvent::AssetDropped {
            location: at(pos2(10.0, 10.0)),
            payload: None,
        },
        drop("outside.png", pos2(-50.0, 10.0)),
        drop("", pos2(10.0, 10.0)),
    ];
    run(&mut ctx, &events);
    assert!(ctx.composition.is_empty());
}

#[test]
fn test_toolbar_rejected_mid_gesture() {
    let mut ctx = EditorContext::new();
    run(&mut ctx, &[drop("a.png", pos2(0.0, 0.0)), down(pos2(10.0, 10.0))]);
    assert!(ctx.state().is_dragging());

    assert!(!Command::grow().is_available(&ctx));
    assert!(Command::DeleteSelected.execute(&mut ctx).is_err());
    assert!(Command::Reset.execute(&mut ctx).is_err());
    assert_eq!(ctx.composition.len(), 1);

    run(&mut ctx, &[InputEvent::PointerUp]);
    Command::grow().execute(&mut ctx).unwrap();
    assert_eq!(ctx.composition.items()[0].size, 136.0);
}

#[test]
fn test_gesture_events_are_broadcast() {
    let mut ctx = EditorContext::new();
    let recorder = Recorder::default();
    ctx.event_bus.subscribe(Box::new(recorder.clone()));

    run(
        &mut ctx,
        &[
            drop("a.png", pos2(0.0, 0.0)),
            down(pos2(10.0, 10.0)),
            moved(pos2(100.0, 100.0)),
            InputEvent::PointerUp,
        ],
    );

    let events = recorder.0.borrow();
    assert!(events.contains(&EditorEvent::Canvas(CanvasEvent::ItemPlaced { index: 0 })));
    assert!(events.contains(&EditorEvent::Canvas(CanvasEvent::ItemMoved {
        index: 0,
        x: 40.0,
        y: 40.0,
    })));
    let state_changes = events
        .iter()
        .filter(|event| matches!(event, EditorEvent::StateChanged { .. }))
        .count();
    assert_eq!(state_changes, 2);
}
