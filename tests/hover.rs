use std::{cell::RefCell, rc::Rc};

use circe_wires::{
    surface::Target, EventKind, EventStatus, HeadlessSurface, Key, Orientation, PxPoint,
    RcRSurface, Wire, WireConfig, WireContext, WireError, WireEvent, WireRegistry,
};
use euclid::vec2;
use flagset::FlagSet;

fn setup(config: WireConfig) -> (Rc<RefCell<HeadlessSurface>>, Rc<WireRegistry>, Wire) {
    let surface = Rc::new(RefCell::new(HeadlessSurface::default()));
    let registry = Rc::new(WireRegistry::default());
    let ctx = WireContext::new(RcRSurface::new(surface.clone()), &registry, config);
    let wire = Wire::new(
        Orientation::HORIZONTAL,
        PxPoint::new(0, 100),
        PxPoint::new(100, 100),
        false,
        registry.allocate(),
        &ctx,
    );
    (surface, registry, wire)
}

#[test]
fn hover_attaches_three_listeners_once() {
    let (surface, _registry, mut wire) = setup(WireConfig::default());
    let el = Target::Element(wire.element().unwrap());
    assert_eq!(surface.borrow().listener_count(), 1);

    wire.on_mouse_over(PxPoint::new(10, 100)).unwrap();
    assert!(wire.is_hovering());
    assert_eq!(surface.borrow().listener_count(), 4);
    assert_eq!(
        surface.borrow().listeners_on(el),
        EventKind::MouseOver | EventKind::MouseLeave | EventKind::MouseMove
    );
    assert_eq!(
        surface.borrow().listeners_on(Target::Document),
        FlagSet::from(EventKind::KeyDown)
    );

    // a second mouse-over in the same session subscribes nothing new
    wire.on_mouse_over(PxPoint::new(20, 100)).unwrap();
    assert_eq!(surface.borrow().listener_count(), 4);

    wire.on_mouse_leave().unwrap();
    assert!(!wire.is_hovering());
    assert_eq!(surface.borrow().listener_count(), 1);
    assert_eq!(
        surface.borrow().listeners_on(el),
        FlagSet::from(EventKind::MouseOver)
    );
    assert_eq!(surface.borrow().listener_count_on(Target::Document), 0);
}

#[test]
fn repeated_hover_cycles_do_not_leak() {
    let (surface, _registry, mut wire) = setup(WireConfig::default());
    for i in 0..10 {
        wire.on_mouse_over(PxPoint::new(i, 100)).unwrap();
        assert_eq!(surface.borrow().listener_count(), 4);
        wire.on_mouse_leave().unwrap();
        assert_eq!(surface.borrow().listener_count(), 1);
    }
    // leaving again is a no-op
    wire.on_mouse_leave().unwrap();
    assert_eq!(surface.borrow().listener_count(), 1);
}

#[test]
fn tooltip_follows_cursor() {
    let config = WireConfig {
        tooltip_enter_offset: vec2(8, -8),
        ..WireConfig::default()
    };
    let (surface, _registry, mut wire) = setup(config);
    let tip = wire.tooltip().unwrap();
    wire.set_voltage(5.).unwrap();

    wire.on_mouse_over(PxPoint::new(10, 100)).unwrap();
    {
        let s = surface.borrow();
        let state = s.element(tip).unwrap();
        assert!(state.visible);
        assert_eq!(state.text, "DC: 5");
        assert_eq!(state.position, Some(PxPoint::new(18, 92)));
    }

    wire.on_mouse_move(PxPoint::new(60, 101)).unwrap();
    assert_eq!(
        surface.borrow().element(tip).unwrap().position,
        Some(PxPoint::new(70, 101))
    );

    wire.on_mouse_leave().unwrap();
    assert!(!surface.borrow().element(tip).unwrap().visible);
}

#[test]
fn delete_key_while_hovering_deletes() {
    let (surface, registry, mut wire) = setup(WireConfig::default());
    let (id, el, tip) = (wire.id(), wire.element().unwrap(), wire.tooltip().unwrap());

    assert_eq!(wire.on_key_down(&Key::Backspace), Ok(false));
    assert!(!wire.is_deleted());

    wire.on_mouse_over(PxPoint::new(10, 100)).unwrap();
    assert_eq!(wire.on_key_down(&Key::Char('d')), Ok(false));
    assert_eq!(wire.on_key_down(&Key::Backspace), Ok(true));

    assert!(wire.is_deleted());
    let s = surface.borrow();
    assert_eq!(s.element_count(), 0);
    assert_eq!(s.removal_count(el), 1);
    assert_eq!(s.removal_count(tip), 1);
    assert_eq!(s.listener_count(), 0);
    assert_eq!(registry.deregistrations(id), 1);
    assert!(registry.is_empty());
}

#[test]
fn configured_delete_keys() {
    let config = WireConfig {
        delete_keys: vec![Key::Delete],
        ..WireConfig::default()
    };
    let (_surface, _registry, mut wire) = setup(config);
    wire.on_mouse_over(PxPoint::new(10, 100)).unwrap();
    assert_eq!(wire.on_key_down(&Key::Backspace), Ok(false));
    assert_eq!(wire.on_key_down(&Key::Delete), Ok(true));
}

#[test]
fn events_reach_only_live_listeners() {
    let (surface, registry, mut wire) = setup(WireConfig::default());
    let id = wire.id();

    let moved = wire.handle_event(&WireEvent::MouseMove(PxPoint::new(5, 5)));
    assert_eq!(moved, Ok(EventStatus::Ignored));
    let key = wire.handle_event(&WireEvent::KeyDown(Key::Backspace));
    assert_eq!(key, Ok(EventStatus::Ignored));
    assert!(!wire.is_deleted());

    let over = wire.handle_event(&WireEvent::MouseOver(PxPoint::new(5, 100)));
    assert_eq!(over, Ok(EventStatus::Captured));
    let moved = wire.handle_event(&WireEvent::MouseMove(PxPoint::new(6, 100)));
    assert_eq!(moved, Ok(EventStatus::Captured));
    let key = wire.handle_event(&WireEvent::KeyDown(Key::Escape));
    assert_eq!(key, Ok(EventStatus::Ignored));
    let key = wire.handle_event(&WireEvent::KeyDown(Key::Backspace));
    assert_eq!(key, Ok(EventStatus::Captured));

    assert!(wire.is_deleted());
    assert_eq!(surface.borrow().listener_count(), 0);
    assert_eq!(registry.deregistrations(id), 1);
    assert_eq!(
        wire.handle_event(&WireEvent::MouseLeave),
        Err(WireError::Deleted(id))
    );
}

#[test]
fn delete_while_hovering_cleans_up_once() {
    let (surface, registry, mut wire) = setup(WireConfig::default());
    let (id, el) = (wire.id(), wire.element().unwrap());
    wire.on_mouse_over(PxPoint::new(10, 100)).unwrap();
    wire.delete().unwrap();
    assert_eq!(wire.delete(), Err(WireError::Deleted(id)));
    assert_eq!(wire.on_mouse_over(PxPoint::new(0, 0)), Err(WireError::Deleted(id)));

    let s = surface.borrow();
    assert_eq!(s.removal_count(el), 1);
    assert_eq!(s.listener_count(), 0);
    assert_eq!(registry.deregistrations(id), 1);
}
