//! Headless contract every assignment honours

use std::time::Duration;

use xr_scenes::assignments::{self, ASSIGNMENT_NAMES};
use xr_scenes::gfx::engine::{Engine, HeadlessEngine};
use xr_scenes::gfx::scene::Scene;
use xr_scenes::{RunnerConfig, XrApp, XrRunner};

fn create(name: &str, engine: &HeadlessEngine) -> Scene {
    let mut app = assignments::by_name(name).unwrap();
    pollster::block_on(app.create_scene(engine))
}

fn names(scene: &Scene) -> (Vec<String>, Vec<String>, Vec<String>) {
    (
        scene.cameras().iter().map(|c| c.name.clone()).collect(),
        scene.lights().iter().map(|l| l.name.clone()).collect(),
        scene.meshes().iter().map(|m| m.name.clone()).collect(),
    )
}

#[test]
fn every_assignment_has_camera_light_and_mesh() {
    let engine = HeadlessEngine::default();
    for name in ASSIGNMENT_NAMES {
        let scene = create(name, &engine);
        assert!(!scene.cameras().is_empty(), "{name} has no camera");
        assert!(!scene.lights().is_empty(), "{name} has no light");
        assert!(!scene.meshes().is_empty(), "{name} has no mesh");
        assert!(scene.active_camera().is_some(), "{name} has no active camera");
    }
}

#[test]
fn hello_xr_exposes_named_objects() {
    let engine = HeadlessEngine::default();
    let scene = create("hello-xr", &engine);

    assert!(scene.get_mesh_by_name("sphere").is_some());
    assert!(scene.get_mesh_by_name("hello plane").is_some());

    let texture = scene.get_texture_by_name("hello texture").unwrap();
    let text = texture.get_control_by_name("hello text").unwrap();
    assert_eq!(text.text(), "Hello, XR!");
}

#[test]
fn creating_twice_yields_the_same_names() {
    let engine = HeadlessEngine::default();
    for name in ASSIGNMENT_NAMES {
        let mut app = assignments::by_name(name).unwrap();
        let first = pollster::block_on(app.create_scene(&engine));
        let second = pollster::block_on(app.create_scene(&engine));
        assert_eq!(names(&first), names(&second), "{name} changed between scenes");
    }
}

#[test]
fn update_with_zero_delta_right_after_creation() {
    for name in ASSIGNMENT_NAMES {
        let mut engine = HeadlessEngine::default();
        let mut app = assignments::by_name(name).unwrap();
        let mut scene = pollster::block_on(app.create_scene(&engine));
        assert_eq!(engine.delta_time(), Duration::ZERO);
        app.update_scene(&mut scene, &engine);
        app.update_scene(&mut scene, &engine);

        engine.step_by(Duration::from_millis(16));
        app.update_scene(&mut scene, &engine);
    }
}

#[test]
fn headless_runs_keep_the_scene() {
    let mut config = RunnerConfig::default();
    config.headless.frames = 5;

    for name in ASSIGNMENT_NAMES {
        let app = assignments::with_config(name, &config).unwrap();
        let mut runner = XrRunner::new(app, config.clone());
        let scene = runner.run_headless();
        assert!(scene.statistics().mesh_count > 0, "{name} lost its meshes");
    }
}
