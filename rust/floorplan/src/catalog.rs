// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lookup tables for everything the editor names by a type string:
//! furniture, door and window styles, and room finish palettes.
//!
//! Each table has an explicit default entry; unknown strings resolve to it.
//! Builders return primitives in item-local coordinates: origin on the floor
//! at the footprint center, local X along the width, local Z along the depth
//! with the back at `-depth / 2`.

use serde::{Deserialize, Serialize};

use crate::scene::{Dimensions, Primitive};
use crate::types::{Point3D, RoomFinish};

/// Linear RGB, 0..1
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub opacity: f32,
}

impl Material {
    pub const fn new(color: Color, roughness: f32) -> Self {
        Self {
            color,
            roughness,
            opacity: 1.0,
        }
    }

    pub const fn translucent(color: Color, roughness: f32, opacity: f32) -> Self {
        Self {
            color,
            roughness,
            opacity,
        }
    }
}

pub const DEFAULT_WALL: Material = Material::new(Color::hex(0xf2efe9), 0.9);
pub const DEFAULT_FLOOR: Material = Material::new(Color::hex(0xc8b08a), 0.7);
pub const GROUND: Material = Material::new(Color::hex(0x8f9a7e), 1.0);
pub const FRAME: Material = Material::new(Color::hex(0xfafafa), 0.6);
pub const DOOR_PANEL: Material = Material::new(Color::hex(0x8b5a2b), 0.6);
pub const GLASS: Material = Material::translucent(Color::hex(0xbfe3f2), 0.05, 0.35);
pub const METAL: Material = Material::new(Color::hex(0xb8bcc2), 0.3);
pub const PORCELAIN: Material = Material::new(Color::hex(0xffffff), 0.2);

// ---------------------------------------------------------------------------
// Finish palettes
// ---------------------------------------------------------------------------

/// Wall and floor materials for one room
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    pub wall: Material,
    pub floor: Material,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: DEFAULT_WALL,
            floor: DEFAULT_FLOOR,
        }
    }
}

/// (vibe, wall, floor, floor roughness)
const VIBES: &[(&str, u32, u32, f32)] = &[
    ("modern", 0xf4f4f4, 0x9e9e9e, 0.4),
    ("warm", 0xf3e5d0, 0xa0714f, 0.6),
    ("scandinavian", 0xfbfaf7, 0xe0cda9, 0.65),
    ("industrial", 0xb7b2ab, 0x6e6a66, 0.85),
    ("coastal", 0xeaf3f5, 0xd8c8a8, 0.7),
];

/// (tier, shade factor, roughness delta)
const TIERS: &[(&str, f32, f32)] = &[
    ("budget", 0.92, 0.15),
    ("standard", 1.0, 0.0),
    ("premium", 1.04, -0.15),
];

/// Palette for a room finish; unknown or missing finishes use the default.
pub fn palette_for(finish: Option<&RoomFinish>) -> Palette {
    let Some(finish) = finish else {
        return Palette::default();
    };

    let vibe = finish.vibe.trim().to_ascii_lowercase();
    let Some(&(_, wall, floor, floor_roughness)) = VIBES.iter().find(|(name, ..)| *name == vibe)
    else {
        return Palette::default();
    };

    let tier = finish.tier.trim().to_ascii_lowercase();
    let (shade, roughness_delta) = TIERS
        .iter()
        .find(|(name, ..)| *name == tier)
        .map(|&(_, shade, delta)| (shade, delta))
        .unwrap_or((1.0, 0.0));

    let adjust = |color: u32, roughness: f32| {
        Material::new(
            Color::hex(color).scaled(shade),
            (roughness + roughness_delta).clamp(0.05, 1.0),
        )
    };

    Palette {
        wall: adjust(wall, DEFAULT_WALL.roughness),
        floor: adjust(floor, floor_roughness),
    }
}

// ---------------------------------------------------------------------------
// Furniture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureKind {
    Bed,
    Sofa,
    Table,
    Chair,
    Toilet,
    Sink,
    Bathtub,
    Shower,
    Refrigerator,
    Stove,
    #[default]
    Generic,
}

/// Catalog entry: height in feet, base color and part builder
pub struct FurnitureSpec {
    pub kind: FurnitureKind,
    pub height: f64,
    pub color: Color,
    build: fn(&Dimensions, Material) -> Vec<Primitive>,
}

impl std::fmt::Debug for FurnitureSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FurnitureSpec")
            .field("kind", &self.kind)
            .field("height", &self.height)
            .field("color", &self.color)
            .finish()
    }
}

impl FurnitureSpec {
    /// Parts for an item of the given footprint at this entry's height
    pub fn build(&self, width: f64, depth: f64) -> Vec<Primitive> {
        let dims = Dimensions::new(width, self.height, depth);
        (self.build)(&dims, Material::new(self.color, 0.7))
    }
}

static FURNITURE: &[FurnitureSpec] = &[
    FurnitureSpec { kind: FurnitureKind::Bed, height: 2.0, color: Color::hex(0xd9d4cc), build: bed },
    FurnitureSpec { kind: FurnitureKind::Sofa, height: 2.8, color: Color::hex(0x6b7b8c), build: sofa },
    FurnitureSpec { kind: FurnitureKind::Table, height: 2.5, color: Color::hex(0x9c6b3f), build: table },
    FurnitureSpec { kind: FurnitureKind::Chair, height: 3.0, color: Color::hex(0x7a5230), build: chair },
    FurnitureSpec { kind: FurnitureKind::Toilet, height: 2.5, color: Color::hex(0xffffff), build: toilet },
    FurnitureSpec { kind: FurnitureKind::Sink, height: 3.0, color: Color::hex(0xe8e4dc), build: sink },
    FurnitureSpec { kind: FurnitureKind::Bathtub, height: 1.8, color: Color::hex(0xfafafa), build: bathtub },
    FurnitureSpec { kind: FurnitureKind::Shower, height: 7.0, color: Color::hex(0xeeeeee), build: shower },
    FurnitureSpec { kind: FurnitureKind::Refrigerator, height: 6.0, color: Color::hex(0xd0d3d6), build: refrigerator },
    FurnitureSpec { kind: FurnitureKind::Stove, height: 3.0, color: Color::hex(0x3c3c3c), build: stove },
    FurnitureSpec { kind: FurnitureKind::Generic, height: 2.0, color: Color::hex(0xa0a0a0), build: generic },
];

/// Type string → kind; extra spellings the editor has used map onto the
/// same entries.
const FURNITURE_NAMES: &[(&str, FurnitureKind)] = &[
    ("bed", FurnitureKind::Bed),
    ("sofa", FurnitureKind::Sofa),
    ("couch", FurnitureKind::Sofa),
    ("table", FurnitureKind::Table),
    ("desk", FurnitureKind::Table),
    ("chair", FurnitureKind::Chair),
    ("toilet", FurnitureKind::Toilet),
    ("sink", FurnitureKind::Sink),
    ("vanity", FurnitureKind::Sink),
    ("bathtub", FurnitureKind::Bathtub),
    ("tub", FurnitureKind::Bathtub),
    ("shower", FurnitureKind::Shower),
    ("refrigerator", FurnitureKind::Refrigerator),
    ("fridge", FurnitureKind::Refrigerator),
    ("stove", FurnitureKind::Stove),
    ("range", FurnitureKind::Stove),
    ("oven", FurnitureKind::Stove),
];

impl FurnitureKind {
    pub fn from_type(furniture_type: &str) -> Self {
        let key = furniture_type.trim().to_ascii_lowercase();
        FURNITURE_NAMES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, kind)| kind)
            .unwrap_or_default()
    }

    pub fn spec(self) -> &'static FurnitureSpec {
        FURNITURE
            .iter()
            .find(|s| s.kind == self)
            .unwrap_or(&FURNITURE[FURNITURE.len() - 1])
    }
}

/// Catalog entry for an editor type string
pub fn furniture_spec(furniture_type: &str) -> &'static FurnitureSpec {
    FurnitureKind::from_type(furniture_type).spec()
}

fn part(x: f64, y: f64, z: f64, w: f64, h: f64, d: f64, material: Material) -> Primitive {
    // (x, z) footprint center, y bottom
    Primitive::Box {
        center: Point3D::new(x, y + h / 2.0, z),
        size: Dimensions::new(w, h, d),
        rotation_y: 0.0,
        material,
    }
}

fn post(x: f64, y: f64, z: f64, radius: f64, h: f64, material: Material) -> Primitive {
    Primitive::Cylinder {
        center: Point3D::new(x, y + h / 2.0, z),
        radius,
        height: h,
        material,
    }
}

fn generic(d: &Dimensions, m: Material) -> Vec<Primitive> {
    vec![part(0.0, 0.0, 0.0, d.width, d.height, d.depth, m)]
}

fn bed(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let frame_h = d.height * 0.35;
    let mattress_h = d.height * 0.3;
    let back = -d.depth / 2.0;
    let linen = Material::new(Color::hex(0xf7f5f0), 0.9);
    vec![
        part(0.0, 0.0, 0.0, d.width, frame_h, d.depth, m),
        part(0.0, frame_h, 0.02 * d.depth, d.width * 0.96, mattress_h, d.depth * 0.94, linen),
        part(0.0, 0.0, back + 0.1, d.width, d.height * 1.5, 0.2, m),
        part(0.0, frame_h + mattress_h, back + d.depth * 0.12, d.width * 0.7, 0.3, d.depth * 0.12, linen),
    ]
}

fn sofa(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let seat_h = d.height * 0.45;
    let arm_w = (d.width * 0.1).min(0.6);
    let back_d = d.depth * 0.25;
    vec![
        part(0.0, 0.0, 0.0, d.width, seat_h, d.depth, m),
        part(0.0, 0.0, -d.depth / 2.0 + back_d / 2.0, d.width, d.height, back_d, m),
        part(-d.width / 2.0 + arm_w / 2.0, 0.0, 0.0, arm_w, d.height * 0.65, d.depth, m),
        part(d.width / 2.0 - arm_w / 2.0, 0.0, 0.0, arm_w, d.height * 0.65, d.depth, m),
    ]
}

/// Four legs inset from the footprint corners
fn legs(d: &Dimensions, height: f64, m: Material) -> [Primitive; 4] {
    let r = (d.width.min(d.depth) * 0.04).max(0.05);
    let (x, z) = (d.width / 2.0 - 2.0 * r, d.depth / 2.0 - 2.0 * r);
    [
        post(-x, 0.0, -z, r, height, m),
        post(x, 0.0, -z, r, height, m),
        post(x, 0.0, z, r, height, m),
        post(-x, 0.0, z, r, height, m),
    ]
}

fn table(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let top = 0.15;
    let mut parts = vec![part(0.0, d.height - top, 0.0, d.width, top, d.depth, m)];
    parts.extend(legs(d, d.height - top, m));
    parts
}

fn chair(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let seat_y = d.height * 0.5;
    let seat_t = 0.15;
    let mut parts = vec![
        part(0.0, seat_y - seat_t, 0.0, d.width, seat_t, d.depth, m),
        part(0.0, seat_y, -d.depth / 2.0 + seat_t / 2.0, d.width, d.height - seat_y, seat_t, m),
    ];
    parts.extend(legs(d, seat_y - seat_t, m));
    parts
}

fn toilet(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let tank_d = d.depth * 0.3;
    let bowl_r = (d.width.min(d.depth * 0.7)) / 2.0;
    let bowl_z = -d.depth / 2.0 + tank_d + bowl_r;
    vec![
        part(0.0, 0.0, -d.depth / 2.0 + tank_d / 2.0, d.width, d.height, tank_d, m),
        post(0.0, 0.0, bowl_z, bowl_r, d.height * 0.6, m),
        post(0.0, d.height * 0.6, bowl_z, bowl_r * 1.02, 0.08, PORCELAIN),
    ]
}

fn sink(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let cabinet_h = d.height * 0.9;
    vec![
        part(0.0, 0.0, 0.0, d.width, cabinet_h, d.depth, m),
        part(0.0, cabinet_h, 0.0, d.width * 0.6, d.height - cabinet_h, d.depth * 0.6, PORCELAIN),
        post(0.0, d.height, -d.depth * 0.4, 0.05, 0.6, METAL),
    ]
}

fn bathtub(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let water = Material::translucent(Color::hex(0x9fd3e6), 0.05, 0.6);
    vec![
        part(0.0, 0.0, 0.0, d.width, d.height, d.depth, m),
        part(0.0, d.height - 0.3, 0.0, d.width * 0.85, 0.05, d.depth * 0.8, water),
    ]
}

fn shower(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let tray_h = 0.3;
    let glass_t = 0.05;
    vec![
        part(0.0, 0.0, 0.0, d.width, tray_h, d.depth, m),
        part(0.0, tray_h, d.depth / 2.0 - glass_t / 2.0, d.width, d.height - tray_h, glass_t, GLASS),
        part(d.width / 2.0 - glass_t / 2.0, tray_h, 0.0, glass_t, d.height - tray_h, d.depth, GLASS),
        post(0.0, d.height - 0.8, -d.depth / 2.0 + 0.3, 0.2, 0.1, METAL),
    ]
}

fn refrigerator(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let front = d.depth / 2.0;
    let freezer_y = d.height * 0.65;
    vec![
        part(0.0, 0.0, 0.0, d.width, d.height, d.depth, m),
        part(0.0, freezer_y, front, d.width * 0.98, 0.03, 0.02, METAL),
        post(d.width * 0.4, d.height * 0.3, front + 0.08, 0.04, d.height * 0.3, METAL),
    ]
}

fn stove(d: &Dimensions, m: Material) -> Vec<Primitive> {
    let top = 0.05;
    let burner = Material::new(Color::hex(0x1a1a1a), 0.5);
    let r = (d.width.min(d.depth) * 0.15).max(0.1);
    let (x, z) = (d.width / 4.0, d.depth / 4.0);
    vec![
        part(0.0, 0.0, 0.0, d.width, d.height - top, d.depth, m),
        part(0.0, d.height - top, 0.0, d.width, top, d.depth, METAL),
        post(-x, d.height, -z, r, 0.03, burner),
        post(x, d.height, -z, r, 0.03, burner),
        post(x, d.height, z, r, 0.03, burner),
        post(-x, d.height, z, r, 0.03, burner),
    ]
}

// ---------------------------------------------------------------------------
// Doors and windows
// ---------------------------------------------------------------------------
//
// Fixture parts use wall-local coordinates: origin at the opening's bottom
// center, X along the wall, Z across its thickness.

const FRAME_WIDTH: f64 = 0.15;
const PANEL_THICKNESS: f64 = 0.15;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DoorStyle {
    #[default]
    Single,
    Double,
    Sliding,
    Pocket,
}

const DOOR_NAMES: &[(&str, DoorStyle)] = &[
    ("single", DoorStyle::Single),
    ("double", DoorStyle::Double),
    ("french", DoorStyle::Double),
    ("sliding", DoorStyle::Sliding),
    ("pocket", DoorStyle::Pocket),
];

impl DoorStyle {
    pub fn from_type(door_type: &str) -> Self {
        let key = door_type.trim().to_ascii_lowercase();
        DOOR_NAMES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, style)| style)
            .unwrap_or_default()
    }

    /// Frame and panels for an opening of `width` x `height` in a wall of
    /// `thickness`
    pub fn parts(self, width: f64, height: f64, thickness: f64) -> Vec<Primitive> {
        let mut parts = door_frame(width, height, thickness);
        let inner_w = (width - 2.0 * FRAME_WIDTH).max(FRAME_WIDTH);
        let panel_h = (height - FRAME_WIDTH).max(FRAME_WIDTH);

        match self {
            DoorStyle::Single => {
                parts.push(part(0.0, 0.0, 0.0, inner_w, panel_h, PANEL_THICKNESS, DOOR_PANEL));
            }
            DoorStyle::Double => {
                let leaf = inner_w / 2.0 - 0.01;
                for x in [-inner_w / 4.0, inner_w / 4.0] {
                    parts.push(part(x, 0.0, 0.0, leaf, panel_h, PANEL_THICKNESS, DOOR_PANEL));
                }
            }
            DoorStyle::Sliding => {
                let leaf = inner_w * 0.55;
                let offset = PANEL_THICKNESS * 0.6;
                parts.push(part(-inner_w / 2.0 + leaf / 2.0, 0.0, -offset, leaf, panel_h, PANEL_THICKNESS * 0.5, GLASS));
                parts.push(part(inner_w / 2.0 - leaf / 2.0, 0.0, offset, leaf, panel_h, PANEL_THICKNESS * 0.5, GLASS));
            }
            DoorStyle::Pocket => {
                // Leaf mostly slid into the wall; only its edge shows
                parts.push(part(-inner_w / 2.0 + 0.1, 0.0, 0.0, 0.2, panel_h, PANEL_THICKNESS, DOOR_PANEL));
            }
        }

        parts
    }
}

fn door_frame(width: f64, height: f64, thickness: f64) -> Vec<Primitive> {
    let depth = thickness + 0.05;
    let x = width / 2.0 - FRAME_WIDTH / 2.0;
    vec![
        part(-x, 0.0, 0.0, FRAME_WIDTH, height, depth, FRAME),
        part(x, 0.0, 0.0, FRAME_WIDTH, height, depth, FRAME),
        part(0.0, height - FRAME_WIDTH, 0.0, width, FRAME_WIDTH, depth, FRAME),
    ]
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WindowStyle {
    #[default]
    Standard,
    Casement,
    Picture,
    Sliding,
}

const WINDOW_NAMES: &[(&str, WindowStyle)] = &[
    ("standard", WindowStyle::Standard),
    ("double-hung", WindowStyle::Standard),
    ("casement", WindowStyle::Casement),
    ("picture", WindowStyle::Picture),
    ("fixed", WindowStyle::Picture),
    ("sliding", WindowStyle::Sliding),
];

impl WindowStyle {
    pub fn from_type(window_type: &str) -> Self {
        let key = window_type.trim().to_ascii_lowercase();
        WINDOW_NAMES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, style)| style)
            .unwrap_or_default()
    }

    /// Frame and glazing for an opening of `width` x `height`; the origin
    /// is the bottom of the opening, not the floor.
    pub fn parts(self, width: f64, height: f64, thickness: f64) -> Vec<Primitive> {
        let depth = thickness + 0.05;
        let x = width / 2.0 - FRAME_WIDTH / 2.0;
        let inner_w = (width - 2.0 * FRAME_WIDTH).max(FRAME_WIDTH);
        let inner_h = (height - 2.0 * FRAME_WIDTH).max(FRAME_WIDTH);

        let mut parts = vec![
            part(0.0, 0.0, 0.0, width, FRAME_WIDTH, depth, FRAME),
            part(0.0, height - FRAME_WIDTH, 0.0, width, FRAME_WIDTH, depth, FRAME),
            part(-x, FRAME_WIDTH, 0.0, FRAME_WIDTH, inner_h, depth, FRAME),
            part(x, FRAME_WIDTH, 0.0, FRAME_WIDTH, inner_h, depth, FRAME),
        ];

        match self {
            WindowStyle::Standard => {
                parts.push(part(0.0, FRAME_WIDTH, 0.0, inner_w, inner_h, 0.05, GLASS));
                parts.push(part(0.0, height / 2.0 - 0.05, 0.0, inner_w, 0.1, 0.1, FRAME));
            }
            WindowStyle::Casement => {
                parts.push(part(0.0, FRAME_WIDTH, 0.0, inner_w, inner_h, 0.05, GLASS));
                parts.push(part(0.0, FRAME_WIDTH, 0.0, 0.1, inner_h, 0.1, FRAME));
            }
            WindowStyle::Picture => {
                parts.push(part(0.0, FRAME_WIDTH, 0.0, inner_w, inner_h, 0.05, GLASS));
            }
            WindowStyle::Sliding => {
                let pane = inner_w * 0.55;
                parts.push(part(-inner_w / 2.0 + pane / 2.0, FRAME_WIDTH, -0.04, pane, inner_h, 0.04, GLASS));
                parts.push(part(inner_w / 2.0 - pane / 2.0, FRAME_WIDTH, 0.04, pane, inner_h, 0.04, GLASS));
            }
        }

        parts
    }
}
