// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera controllers for viewing an assembled scene.
//!
//! The top-down camera looks straight down and only pans and zooms. The
//! first-person camera walks at a fixed eye height with pointer-lock look.
//! Both are advanced by the host once per frame with the elapsed time;
//! headings use the scene convention `atan2(dz, dx)`.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CameraConfig;
use crate::coords::{rotation_to_scene, CoordinateConverter};
use crate::types::{CameraPlacement, Point3D, SceneBounds};

/// Active view mode; serialized as `topdown` / `firstperson`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    #[default]
    TopDown,
    FirstPerson,
}

impl CameraMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CameraMode::TopDown => "topdown",
            CameraMode::FirstPerson => "firstperson",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orthographic frustum half-extents around the view center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoFrustum {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

// ---------------------------------------------------------------------------
// Top-down
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TopDownCamera {
    target: Point3D,
    /// Scene extent visible across the shorter viewport side at zoom 1
    view_size: f64,
    zoom: f64,
    fov: f64,
    min_zoom: f64,
    max_zoom: f64,
    margin: f64,
}

impl TopDownCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let (min_zoom, max_zoom) = if config.min_zoom <= config.max_zoom {
            (config.min_zoom, config.max_zoom)
        } else {
            (config.max_zoom, config.min_zoom)
        };
        Self {
            target: Point3D::default(),
            view_size: 2.0 * config.framing_margin.max(1.0),
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            fov: config.fov.to_radians(),
            min_zoom,
            max_zoom,
            margin: config.framing_margin,
        }
    }

    /// Center on `bounds` and fit its larger side plus the framing margin.
    /// Resets zoom.
    pub fn frame(&mut self, bounds: &SceneBounds) {
        self.target = Point3D::new(bounds.center_x, 0.0, bounds.center_z);
        self.view_size = (bounds.max_extent() + 2.0 * self.margin).max(f64::EPSILON);
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        debug!(view_size = self.view_size, "top-down camera framed");
    }

    /// Pan by a scene-space offset
    pub fn pan(&mut self, dx: f64, dz: f64) {
        self.target.x += dx;
        self.target.z += dz;
    }

    /// Pan by a screen-space drag; `viewport_height` in pixels
    pub fn pan_pixels(&mut self, dx: f64, dy: f64, viewport_height: f64) {
        if viewport_height <= 0.0 {
            return;
        }
        let feet_per_pixel = self.visible_extent() / viewport_height;
        // Screen up is scene -Z
        self.pan(-dx * feet_per_pixel, -dy * feet_per_pixel);
    }

    /// Multiply the zoom, clamped to the configured range
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.set_zoom(self.zoom * factor);
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn target(&self) -> Point3D {
        self.target
    }

    /// Scene extent currently visible across the shorter viewport side
    pub fn visible_extent(&self) -> f64 {
        self.view_size / self.zoom
    }

    pub fn ortho_frustum(&self, aspect: f64) -> OrthoFrustum {
        let half = self.visible_extent() / 2.0;
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        let (half_w, half_h) = if aspect >= 1.0 {
            (half * aspect, half)
        } else {
            (half, half / aspect)
        };
        OrthoFrustum {
            left: -half_w,
            right: half_w,
            top: half_h,
            bottom: -half_h,
        }
    }

    /// Height above the target at which a perspective camera sees the
    /// visible extent
    pub fn perspective_distance(&self) -> f64 {
        (self.visible_extent() / 2.0) / (self.fov / 2.0).tan()
    }

    pub fn position(&self) -> Point3D {
        self.target.with_y(self.perspective_distance())
    }

    /// Always straight down
    pub fn direction(&self) -> (f64, f64, f64) {
        (0.0, -1.0, 0.0)
    }
}

// ---------------------------------------------------------------------------
// First-person
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    /// WASD and arrow keys, by DOM key code or character
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" | "w" | "W" => Some(MoveKey::Forward),
            "KeyS" | "ArrowDown" | "s" | "S" => Some(MoveKey::Backward),
            "KeyA" | "ArrowLeft" | "a" | "A" => Some(MoveKey::Left),
            "KeyD" | "ArrowRight" | "d" | "D" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Held keys and look deltas accumulated since the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub look_dx: f64,
    pub look_dy: f64,
}

impl InputState {
    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    pub fn release_all(&mut self) {
        *self = InputState::default();
    }

    pub fn is_moving(&self) -> bool {
        self.forward != self.backward || self.left != self.right
    }

    /// (forward, strafe right) in {-1, 0, 1}
    fn axes(&self) -> (f64, f64) {
        let axis = |pos: bool, neg: bool| f64::from(pos as i8 - neg as i8);
        (axis(self.forward, self.backward), axis(self.right, self.left))
    }
}

/// Planar position and velocity of the walker
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub x: f64,
    pub z: f64,
    pub velocity_x: f64,
    pub velocity_z: f64,
}

/// Advance `motion` by `dt` seconds. Held keys drive the velocity at
/// `speed` relative to `yaw`; with no keys held it decays by
/// `exp(-damping * dt)`.
pub fn integrate_motion(
    motion: Motion,
    yaw: f64,
    input: &InputState,
    dt: f64,
    speed: f64,
    damping: f64,
) -> Motion {
    if !(dt > 0.0) {
        return motion;
    }

    let (forward, strafe) = input.axes();
    let (velocity_x, velocity_z) = if forward != 0.0 || strafe != 0.0 {
        let (sin, cos) = yaw.sin_cos();
        // Right of heading h is heading h + 90°
        let dx = forward * cos - strafe * sin;
        let dz = forward * sin + strafe * cos;
        let len = dx.hypot(dz);
        (dx / len * speed, dz / len * speed)
    } else {
        let decay = (-damping.max(0.0) * dt).exp();
        let (vx, vz) = (motion.velocity_x * decay, motion.velocity_z * decay);
        if vx.hypot(vz) < 1e-4 {
            (0.0, 0.0)
        } else {
            (vx, vz)
        }
    };

    Motion {
        x: motion.x + velocity_x * dt,
        z: motion.z + velocity_z * dt,
        velocity_x,
        velocity_z,
    }
}

#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    motion: Motion,
    eye_height: f64,
    yaw: f64,
    pitch: f64,
    fov: f64,
    speed: f64,
    sensitivity: f64,
    damping: f64,
    pointer_locked: bool,
    lock_requested: bool,
    input: InputState,
}

impl FirstPersonCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            motion: Motion::default(),
            eye_height: config.eye_height,
            yaw: 0.0,
            pitch: 0.0,
            fov: config.fov,
            speed: config.move_speed,
            sensitivity: config.look_sensitivity,
            damping: config.damping,
            pointer_locked: false,
            lock_requested: false,
            input: InputState::default(),
        }
    }

    /// Seed position, facing, field of view and eye height from a placement
    /// made in the editor
    pub fn from_placement(
        placement: &CameraPlacement,
        converter: &CoordinateConverter,
        config: &CameraConfig,
    ) -> Self {
        let mut camera = Self::new(config);
        if let Some(h) = placement.height.filter(|h| *h > 0.0) {
            camera.eye_height = h;
        }
        if let Some(fov) = placement.fov.filter(|f| *f > 0.0 && *f < 180.0) {
            camera.fov = fov;
        }
        let p = converter.to_scene(placement.position, camera.eye_height);
        camera.motion.x = p.x;
        camera.motion.z = p.z;
        camera.yaw = rotation_to_scene(placement.rotation);
        camera
    }

    /// Place at a scene XZ point facing `yaw`, stopping any motion
    pub fn place(&mut self, x: f64, z: f64, yaw: f64) {
        self.motion = Motion {
            x,
            z,
            ..Motion::default()
        };
        self.yaw = yaw;
        self.pitch = 0.0;
    }

    /// Look lock only engages after an explicit click
    pub fn request_pointer_lock(&mut self) {
        self.lock_requested = true;
    }

    /// Host reports the outcome of a lock request or a lost lock
    pub fn on_pointer_lock_change(&mut self, locked: bool) {
        let locked = locked && self.lock_requested;
        if !locked {
            self.input.release_all();
            self.lock_requested = false;
        }
        self.pointer_locked = locked;
    }

    pub fn release_pointer_lock(&mut self) {
        self.on_pointer_lock_change(false);
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Returns whether the key was consumed
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        match MoveKey::from_code(code) {
            Some(key) if self.pointer_locked || !pressed => {
                self.input.set_key(key, pressed);
                true
            }
            _ => false,
        }
    }

    /// Accumulate look deltas in pixels; ignored without pointer lock
    pub fn handle_mouse_move(&mut self, dx: f64, dy: f64) {
        if self.pointer_locked {
            self.input.look_dx += dx;
            self.input.look_dy += dy;
        }
    }

    /// Apply this frame's look deltas and movement
    pub fn update(&mut self, dt: f64) {
        self.yaw = (self.yaw + self.input.look_dx * self.sensitivity)
            .rem_euclid(std::f64::consts::TAU);
        self.pitch =
            (self.pitch - self.input.look_dy * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.input.look_dx = 0.0;
        self.input.look_dy = 0.0;

        self.motion = integrate_motion(
            self.motion,
            self.yaw,
            &self.input,
            dt,
            self.speed,
            self.damping,
        );
    }

    pub fn position(&self) -> Point3D {
        Point3D::new(self.motion.x, self.eye_height, self.motion.z)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.motion.velocity_x, self.motion.velocity_z)
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Vertical field of view, degrees
    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Unit view direction
    pub fn direction(&self) -> (f64, f64, f64) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        (cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Token returned by [`CameraController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ModeListener = Box<dyn FnMut(CameraMode)>;

/// Owns both cameras and routes input to the active one
pub struct CameraController {
    mode: CameraMode,
    pub top_down: TopDownCamera,
    pub first_person: FirstPersonCamera,
    listeners: Vec<(SubscriptionId, ModeListener)>,
    next_id: u64,
    last_bounds: Option<SceneBounds>,
}

impl fmt::Debug for CameraController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraController")
            .field("mode", &self.mode)
            .field("top_down", &self.top_down)
            .field("first_person", &self.first_person)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CameraController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            mode: CameraMode::TopDown,
            top_down: TopDownCamera::new(config),
            first_person: FirstPersonCamera::new(config),
            listeners: Vec::new(),
            next_id: 0,
            last_bounds: None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn subscribe(&mut self, listener: impl FnMut(CameraMode) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the id is unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Switch view. Every call notifies subscribers, including a switch to
    /// the mode already active. Entering top-down refits it to the latest
    /// framed bounds.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode == CameraMode::TopDown {
            self.first_person.release_pointer_lock();
            if self.mode != CameraMode::TopDown {
                if let Some(bounds) = self.last_bounds {
                    self.top_down.frame(&bounds);
                }
            }
        }
        self.mode = mode;
        debug!(%mode, "camera mode changed");
        for (_, listener) in &mut self.listeners {
            listener(mode);
        }
    }

    pub fn toggle(&mut self) -> CameraMode {
        let next = match self.mode {
            CameraMode::TopDown => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::TopDown,
        };
        self.set_mode(next);
        next
    }

    /// Refit the top-down view to new scene bounds
    pub fn frame(&mut self, bounds: &SceneBounds) {
        self.last_bounds = Some(*bounds);
        self.top_down.frame(bounds);
    }

    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        self.mode == CameraMode::FirstPerson && self.first_person.handle_key(code, pressed)
    }

    pub fn handle_mouse_move(&mut self, dx: f64, dy: f64) {
        if self.mode == CameraMode::FirstPerson {
            self.first_person.handle_mouse_move(dx, dy);
        }
    }

    pub fn update(&mut self, dt: f64) {
        if self.mode == CameraMode::FirstPerson {
            self.first_person.update(dt);
        }
    }

    /// Eye position of the active camera
    pub fn position(&self) -> Point3D {
        match self.mode {
            CameraMode::TopDown => self.top_down.position(),
            CameraMode::FirstPerson => self.first_person.position(),
        }
    }
}
