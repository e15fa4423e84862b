//! Orbit camera policy.
//!
//! The backend owns the actual orbit controls; the scene host decides each
//! frame whether auto-rotation is on. It is off while parts are still being
//! revealed so the viewer is not disoriented mid-assembly.

use assembly_types::AssemblyStatus;
use render_backend::{CameraSettings, Vec3};

use crate::config::CameraConfig;

/// Orbit camera around the assembly's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    config: CameraConfig,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Initial eye distance from the target, clamped to the zoom range.
    pub fn distance(&self) -> f64 {
        let p = self.config.position;
        let t = self.config.target;
        let d = ((p.x - t.x).powi(2) + (p.y - t.y).powi(2) + (p.z - t.z).powi(2)).sqrt();
        d.clamp(self.config.min_distance, self.config.max_distance)
    }

    /// Eye position, moved along the view ray if it lies outside the zoom range.
    pub fn eye(&self) -> Vec3 {
        let p = self.config.position;
        let t = self.config.target;
        let raw = ((p.x - t.x).powi(2) + (p.y - t.y).powi(2) + (p.z - t.z).powi(2)).sqrt();
        if raw == 0.0 {
            return t.offset(0.0, 0.0, self.distance());
        }
        let k = self.distance() / raw;
        Vec3::new(
            t.x + (p.x - t.x) * k,
            t.y + (p.y - t.y) * k,
            t.z + (p.z - t.z) * k,
        )
    }

    /// Auto-rotation is enabled in every status except `Assembling`.
    pub fn auto_rotate_for(status: AssemblyStatus) -> bool {
        !status.is_assembling()
    }

    /// Settings for a frame rendered while the session is in `status`.
    pub fn settings(&self, status: AssemblyStatus) -> CameraSettings {
        CameraSettings {
            position: self.eye(),
            target: self.config.target,
            fov_degrees: self.config.fov_degrees,
            min_distance: self.config.min_distance,
            max_distance: self.config.max_distance,
            enable_pan: self.config.enable_pan,
            auto_rotate: Self::auto_rotate_for(status),
            auto_rotate_speed: self.config.auto_rotate_speed,
        }
    }
}
