//! Airport scene state and its node hierarchy.
//!
//! Everything the frame depends on lives in [`SceneState`]; callers pass it by
//! reference instead of reading globals.

use std::f32::consts::PI;

use crate::{
    Quat, Vec3,
    camera::Camera,
    error::CoreResult,
    hierarchy::SceneTree,
    transform::Transform,
    vec3,
};

/// Scene meshes in draw order. Node mesh slots index into this list.
pub const AIRPORT_MESHES: [&str; 7] = [
    "dassault_falcon2.obj",
    "hi_ace.obj",
    "terminal.obj",
    "tower.obj",
    "tower_windows.obj",
    "tower_roof.obj",
    "dish.obj",
];

/// Radians per second the radar dish turns.
pub const DISH_SPIN_RATE: f32 = 2.0;

#[derive(Clone, Debug)]
pub struct SceneState {
    pub camera: Camera,
    flashlight_on: bool,
    elapsed: f32,
    pub falcon_altitude: f32,
    pub falcon_pitch: f32,
    pub falcon_z: f32,
    pub hi_ace_z: f32,
}

impl SceneState {
    pub fn new(aspect: f32) -> Self {
        Self {
            camera: Camera::new_perspective(
                vec3(0.0, 0.3, 15.0),
                PI,
                0.0,
                60f32.to_radians(),
                0.1,
                1000.0,
                aspect,
            ),
            flashlight_on: true,
            elapsed: 0.0,
            falcon_altitude: 5.0,
            falcon_pitch: -2f32.to_radians(),
            falcon_z: 150.0,
            hi_ace_z: 14.0,
        }
    }

    #[inline]
    pub fn flashlight_on(&self) -> bool {
        self.flashlight_on
    }

    pub fn toggle_flashlight(&mut self) -> bool {
        self.flashlight_on = !self.flashlight_on;
        log::debug!("Flashlight {}", if self.flashlight_on { "on" } else { "off" });
        self.flashlight_on
    }

    /// Flashlight position and direction follow the camera.
    pub fn flashlight(&self) -> (Vec3, Vec3) {
        (self.camera.position, self.camera.direction())
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    #[inline]
    pub fn dish_angle(&self) -> f32 {
        self.elapsed * DISH_SPIN_RATE
    }
}

/// Build the airport hierarchy for the given state.
///
/// The terminal parents the tower, its windows, its roof and the dish; the
/// falcon and the van are independent roots.
pub fn airport_tree(state: &SceneState) -> CoreResult<SceneTree> {
    let mut tree = SceneTree::new();

    tree.add_root("ground", Transform::identity(), None)?;
    tree.add_root(
        "falcon",
        Transform::from_translation(vec3(0.0, state.falcon_altitude, state.falcon_z)).with_rotation(
            Quat::from_rotation_y(PI) * Quat::from_rotation_x(state.falcon_pitch),
        ),
        Some(0),
    )?;
    tree.add_root(
        "hi_ace",
        Transform::from_translation(vec3(-2.0, 0.19, state.hi_ace_z)).with_uniform_scale(1.2),
        Some(1),
    )?;

    let terminal = tree.add_root(
        "terminal",
        Transform::from_translation(vec3(-0.5, 0.0, 0.2)),
        Some(2),
    )?;
    tree.add_child(terminal, "tower", Transform::identity(), Some(3))?;
    tree.add_child(terminal, "tower_windows", Transform::identity(), Some(4))?;
    tree.add_child(terminal, "tower_roof", Transform::identity(), Some(5))?;
    tree.add_child(
        terminal,
        "dish",
        Transform::from_translation(vec3(-12.85, 3.51, 1.51))
            .with_rotation(Quat::from_rotation_y(state.dish_angle())),
        Some(6),
    )?;

    Ok(tree)
}
