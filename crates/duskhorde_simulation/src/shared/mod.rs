//! Общие capabilities: camera basis и aim resolver

pub mod aim;
pub mod camera;

pub use aim::{project_ray_onto_plane, resolve_aim_targets, CursorRay};
pub use camera::{CameraBasis, CameraRig};
