//! Scene and interaction engine for a 2D tabletop battle map.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! scene (image assets, placed sprites, the grid, elevation terrain and
//! walls), translates raw pointer, wheel and key events into scene mutations
//! and camera changes, and draws everything onto a 2D canvas. The host
//! JavaScript layer wires DOM events to the engine, feeds it decoded images
//! and persists the JSON snapshots it produces.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Scene store: assets, sprites, grid, terrain, walls, selection |
//! | [`snapshot`] | Versioned JSON save/load |
//! | [`asset`] | Image assets and the decoding capability |
//! | [`sprite`] | Placed sprites, transforms and drag drafts |
//! | [`grid`] | Grid settings |
//! | [`terrain`] | Sparse elevation/terrain cells and brushes |
//! | [`wall`] | Wall segments on grid corners |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`geometry`] | Snapping, angle and distance helpers |
//! | [`input`] | Input event types, UI state and the gesture state machine |
//! | [`hit`] | Hit-testing against sprites and selection handles |
//! | [`drag`] | Move/resize/rotate geometry for sprite drags |
//! | [`render`] | Scene rendering over a [`render::Surface`] |
//! | [`config`] | Editor tunables from env or JSON |
//! | [`error`] | Scene error type with stable codes |
//! | [`consts`] | Shared numeric constants (zoom limits, handle sizes, etc.) |

pub mod asset;
pub mod camera;
pub mod config;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod snapshot;
pub mod sprite;
pub mod terrain;
pub mod wall;
