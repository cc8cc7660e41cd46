//! Integration tests for buttons, button groups and skins.

use std::cell::RefCell;
use std::rc::Rc;

use canopy_ui::{
    Button, ButtonStyle, CommandBatch, ComponentId, Disableable, Drawable, DrawableId, Image,
    MouseButton, Scene, Skin, UiConfig, UiError,
};

const UP: DrawableId = DrawableId(1);
const DOWN: DrawableId = DrawableId(2);
const CHECKED: DrawableId = DrawableId(3);
const ICON: DrawableId = DrawableId(4);

fn skin() -> Skin {
    let mut skin = Skin::new();
    skin.add(
        "toggle",
        ButtonStyle::new(
            Some(Drawable::new(UP, 40.0, 20.0)),
            Some(Drawable::new(DOWN, 40.0, 20.0)),
            Some(Drawable::new(CHECKED, 40.0, 20.0)),
        ),
    );
    skin
}

/// Buttons laid out left to right, 50 units apart.
fn row(scene: &mut Scene, count: usize) -> Vec<ComponentId> {
    let skin = skin();
    let mut buttons = Vec::with_capacity(count);
    let mut x = 0.0;
    for _ in 0..count {
        let button = Button::from_skin(scene, &skin, "toggle").unwrap();
        scene.add_child(scene.root(), button).unwrap();
        scene.set_position(button, x, 0.0).unwrap();
        buttons.push(button);
        x += 50.0;
    }
    buttons
}

fn click(scene: &mut Scene, x: f32, y: f32) {
    scene.touch_down(x, y, 0, MouseButton::Left);
    scene.touch_up(x, y, 0, MouseButton::Left);
}

fn checked(scene: &Scene, button: ComponentId) -> bool {
    scene.widget::<Button>(button).unwrap().is_checked()
}

#[test]
fn test_radio_group_by_clicking() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 3);
    let group = scene.create_button_group();
    for &button in &buttons {
        scene.add_to_group(group, button).unwrap();
    }
    assert!(checked(&scene, buttons[0]));

    click(&mut scene, 60.0, 10.0);
    assert!(!checked(&scene, buttons[0]));
    assert!(checked(&scene, buttons[1]));

    // Clicking the checked button cannot uncheck the last one.
    click(&mut scene, 60.0, 10.0);
    assert!(checked(&scene, buttons[1]));
    assert_eq!(scene.button_group(group).unwrap().checked(), Some(buttons[1]));
}

#[test]
fn test_group_change_events_in_order() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 2);
    let group = scene.create_button_group();
    for &button in &buttons {
        scene.add_to_group(group, button).unwrap();
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    for &button in &buttons {
        let log = Rc::clone(&log);
        scene
            .on_change(button, move |event, _| log.borrow_mut().push(event.target))
            .unwrap();
    }

    click(&mut scene, 60.0, 10.0);
    assert_eq!(*log.borrow(), [Some(buttons[0]), Some(buttons[1])]);
}

#[test]
fn test_unlimited_group_checks_many() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 3);
    let group = scene.create_button_group();
    scene.set_max_check_count(group, None).unwrap();
    scene.set_min_check_count(group, 0).unwrap();
    for &button in &buttons {
        scene.add_to_group(group, button).unwrap();
    }
    assert!(!checked(&scene, buttons[0]));

    click(&mut scene, 10.0, 10.0);
    click(&mut scene, 110.0, 10.0);
    assert_eq!(
        scene.button_group(group).unwrap().all_checked(),
        &[buttons[0], buttons[2]]
    );

    scene.uncheck_all(group).unwrap();
    assert!(scene.button_group(group).unwrap().all_checked().is_empty());
}

#[test]
fn test_destroyed_button_leaves_stale_handle() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 1);
    scene.destroy(buttons[0]).unwrap();
    assert!(matches!(
        scene.widget::<Button>(buttons[0]),
        Err(UiError::ComponentNotFound(_))
    ));
}

#[test]
fn test_button_draws_state_backgrounds() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 1);
    let mut batch = CommandBatch::new();

    scene.draw(&mut batch);
    assert_eq!(batch.commands_for(UP).count(), 1);

    click(&mut scene, 10.0, 10.0);
    scene.act(1.0);
    batch.begin_frame();
    scene.draw(&mut batch);
    assert_eq!(batch.commands_for(UP).count(), 0);
    assert_eq!(batch.commands_for(CHECKED).count(), 1);

    scene
        .widget_mut::<Button>(buttons[0])
        .unwrap()
        .set_disabled(true);
    click(&mut scene, 10.0, 10.0);
    assert!(checked(&scene, buttons[0]));
}

#[test]
fn test_button_with_image_content() {
    let mut scene = Scene::new(400.0, 100.0);
    let image = Image::create(&mut scene, Drawable::new(ICON, 60.0, 30.0)).unwrap();
    let style = skin().get::<ButtonStyle>("toggle").unwrap().clone();
    let button = Button::create_with_child(&mut scene, image, style).unwrap();
    scene.add_child(scene.root(), button).unwrap();

    let state = scene.component(button).unwrap();
    assert_eq!((state.width, state.height), (60.0, 30.0));

    let mut batch = CommandBatch::new();
    scene.draw(&mut batch);
    assert_eq!(batch.commands_for(ICON).count(), 1);
}

#[test]
fn test_config_drives_click_threshold() {
    let config = UiConfig::from_toml_str("[click]\ntap_square_size = 0.0\n").unwrap();
    let mut scene = Scene::with_config(400.0, 100.0, config);
    let buttons = row(&mut scene, 1);

    // Released a hair outside: no tap square to forgive it.
    scene.touch_down(39.0, 10.0, 0, MouseButton::Left);
    scene.touch_up(41.0, 10.0, 0, MouseButton::Left);
    assert!(!checked(&scene, buttons[0]));
}

#[test]
fn test_cancelled_check_restores_group() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 2);
    let group = scene.create_button_group();
    for &button in &buttons {
        scene.add_to_group(group, button).unwrap();
    }
    let veto = scene
        .on_change(buttons[1], |event, _| event.cancel())
        .unwrap();

    click(&mut scene, 60.0, 10.0);
    assert!(checked(&scene, buttons[0]));
    assert!(!checked(&scene, buttons[1]));
    let g = scene.button_group(group).unwrap();
    assert_eq!(g.all_checked(), &[buttons[0]]);
    assert_eq!(g.buttons(), buttons.as_slice());

    assert!(scene.remove_listener(buttons[1], veto));
    click(&mut scene, 60.0, 10.0);
    assert!(!checked(&scene, buttons[0]));
    assert!(checked(&scene, buttons[1]));
    let g = scene.button_group(group).unwrap();
    assert_eq!(g.all_checked(), &[buttons[1]]);
    assert_eq!(g.buttons(), buttons.as_slice());
}

#[test]
fn test_cancelled_uncheck_keeps_button_checked_in_group() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 2);
    let group = scene.create_button_group();
    scene.set_min_check_count(group, 0).unwrap();
    for &button in &buttons {
        scene.add_to_group(group, button).unwrap();
    }
    click(&mut scene, 10.0, 10.0);
    scene
        .on_change(buttons[0], |event, _| event.cancel())
        .unwrap();

    click(&mut scene, 10.0, 10.0);
    assert!(checked(&scene, buttons[0]));
    assert_eq!(scene.button_group(group).unwrap().all_checked(), &[buttons[0]]);
}

#[test]
fn test_destroyed_button_leaves_group() {
    let mut scene = Scene::new(400.0, 100.0);
    let buttons = row(&mut scene, 3);
    let group = scene.create_button_group();
    for &button in &buttons {
        scene.add_to_group(group, button).unwrap();
    }

    scene.destroy(buttons[0]).unwrap();
    let g = scene.button_group(group).unwrap();
    assert_eq!(g.buttons(), &buttons[1..]);
    assert!(g.all_checked().is_empty());

    click(&mut scene, 110.0, 10.0);
    assert_eq!(scene.button_group(group).unwrap().checked(), Some(buttons[2]));
}
