//! Integration tests for actions running through `Scene::act`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use canopy_ui::action::{self, Action};
use canopy_ui::{Color, ComponentId, Easing, Scene, Touchable};

fn panel(scene: &mut Scene) -> ComponentId {
    let id = scene.create_component();
    scene.add_child(scene.root(), id).unwrap();
    scene.set_size(id, 100.0, 50.0).unwrap();
    id
}

/// Runs `frames` frames of `delta` seconds.
fn run_frames(scene: &mut Scene, frames: usize, delta: f32) {
    for _ in 0..frames {
        scene.act(delta);
    }
}

#[test]
fn test_slide_in_then_enable() {
    let mut scene = Scene::new(800.0, 600.0);
    let id = panel(&mut scene);
    scene.set_position(id, -100.0, 0.0).unwrap();
    scene.set_touchable(id, Touchable::Disabled).unwrap();

    let slide = action::move_to(0.0, 0.0, 0.5)
        .with_easing(Easing::Smooth)
        .then(action::touchable(Touchable::Enabled));
    scene.add_action(id, slide).unwrap();

    run_frames(&mut scene, 4, 0.125);
    let state = scene.component(id).unwrap();
    assert_eq!(state.x, 0.0);
    assert_eq!(state.touchable, Touchable::Disabled);

    scene.act(0.125);
    assert_eq!(scene.component(id).unwrap().touchable, Touchable::Enabled);
    assert!(!scene.has_actions(id));
}

#[test]
fn test_fade_out_and_remove() {
    let mut scene = Scene::new(800.0, 600.0);
    let id = panel(&mut scene);
    scene
        .add_action(
            id,
            action::fade_out(0.25).then(action::remove_component()),
        )
        .unwrap();

    scene.act(0.25);
    assert_eq!(scene.component(id).unwrap().color.a, 0.0);
    assert_eq!(scene.parent(id), Some(scene.root()));

    scene.act(0.016);
    assert!(scene.contains(id));
    assert_eq!(scene.parent(id), None);
}

#[test]
fn test_actions_run_parent_before_child() {
    let mut scene = Scene::new(800.0, 600.0);
    let parent = panel(&mut scene);
    let child = scene.create_component();
    scene.add_child(parent, child).unwrap();

    let order = Rc::new(RefCell::new(Vec::new()));
    for (id, name) in [(child, "child"), (parent, "parent")] {
        let order = Rc::clone(&order);
        scene
            .add_action(id, action::run(move |_| order.borrow_mut().push(name)))
            .unwrap();
    }

    scene.act(0.016);
    assert_eq!(*order.borrow(), ["parent", "child"]);
}

#[test]
fn test_detached_subtree_pauses() {
    let mut scene = Scene::new(800.0, 600.0);
    let id = panel(&mut scene);
    scene.add_action(id, action::move_by(10.0, 0.0, 1.0)).unwrap();

    scene.act(0.5);
    scene.remove_from_parent(id).unwrap();
    scene.act(0.5);
    assert_eq!(scene.component(id).unwrap().x, 5.0);

    scene.add_child(scene.root(), id).unwrap();
    scene.act(0.5);
    assert_eq!(scene.component(id).unwrap().x, 10.0);
}

#[test]
fn test_pulse_until_stopped() {
    let mut scene = Scene::new(800.0, 600.0);
    let id = panel(&mut scene);
    let pulse = action::forever(
        action::color_to(Color::RED, 0.1).then(action::color_to(Color::WHITE, 0.1)),
    );
    let handle = pulse.handle();
    let pulse = scene.add_action(id, pulse).unwrap();

    run_frames(&mut scene, 8, 0.05);
    assert!(scene.has_actions(id));

    handle.finish();
    run_frames(&mut scene, 8, 0.05);
    assert!(!scene.has_actions(id));
    assert!(!scene.remove_action(id, pulse));
    assert_eq!(scene.component(id).unwrap().color, Color::WHITE);
}

#[test]
fn test_delayed_callback_sees_scene() {
    let mut scene = Scene::new(800.0, 600.0);
    let id = panel(&mut scene);
    let width = Rc::new(Cell::new(0.0));
    let seen = Rc::clone(&width);
    scene
        .add_action(
            id,
            action::delay_then(
                0.2,
                action::run(move |ctx| {
                    if let Some(state) = ctx.state() {
                        seen.set(state.width);
                    }
                }),
            ),
        )
        .unwrap();

    scene.act(0.1);
    assert_eq!(width.get(), 0.0);
    scene.act(0.1);
    assert_eq!(width.get(), 100.0);
}
