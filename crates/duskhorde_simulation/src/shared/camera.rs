//! Camera basis provider
//!
//! Host владеет камерой; симуляция видит только forward/right, которые
//! переводят оси input'а в мировое направление движения.

use bevy::prelude::*;

/// Базис камеры (значение, передаётся в контроллер по ссылке)
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl CameraBasis {
    /// Базис, спроецированный на плоскость земли
    ///
    /// Вырожденный forward (камера смотрит строго вниз, basis не задан)
    /// заменяется текущим facing персонажа — движение не должно ломаться
    /// из-за деградировавшей камеры.
    pub fn ground_basis(&self, fallback_forward: Vec3) -> (Vec3, Vec3) {
        let forward = Vec3::new(self.forward.x, 0.0, self.forward.z)
            .try_normalize()
            .unwrap_or(fallback_forward);
        let right = Vec3::new(self.right.x, 0.0, self.right.z)
            .try_normalize()
            .unwrap_or_else(|| forward.cross(Vec3::Y));
        (forward, right)
    }
}

/// Resource: текущий базис камеры (host обновляет перед тиком)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraRig {
    pub basis: CameraBasis,
}
