//! DrawListBackend: collects each frame as a serializable draw list for a
//! host renderer to apply, and picks parts by ray casting against it.
//!
//! The host owns the real scene graph and orbit controls. It reads the
//! presented draw list after each frame and reports its current eye position
//! and viewport so picking matches what is on screen.

use crate::traits::{PointerPicking, RenderBackend};
use crate::types::*;

type V3 = [f64; 3];

fn sub(a: V3, b: V3) -> V3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: V3, b: V3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: V3, b: V3) -> V3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: V3) -> Option<V3> {
    let len = dot(v, v).sqrt();
    (len > 1e-12).then(|| [v[0] / len, v[1] / len, v[2] / len])
}

/// Rotate a point about the Y axis.
fn rotate_y(p: V3, angle: f64) -> V3 {
    let (s, c) = angle.sin_cos();
    [p[0] * c + p[2] * s, p[1], -p[0] * s + p[2] * c]
}

/// A pick ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: V3,
    pub direction: V3,
}

impl Ray {
    /// Ray from `eye` toward `target` through a normalized device coordinate.
    pub fn through_ndc(eye: V3, target: V3, fov_degrees: f64, aspect: f64, ndc: [f64; 2]) -> Option<Ray> {
        let forward = normalize(sub(target, eye))?;
        let right = normalize(cross(forward, [0.0, 1.0, 0.0])).unwrap_or([1.0, 0.0, 0.0]);
        let up = cross(right, forward);
        let half = (fov_degrees.to_radians() / 2.0).tan();
        let (sx, sy) = (ndc[0] * half * aspect, ndc[1] * half);
        let direction = normalize([
            forward[0] + right[0] * sx + up[0] * sy,
            forward[1] + right[1] * sx + up[1] * sy,
            forward[2] + right[2] * sx + up[2] * sy,
        ])?;
        Some(Ray {
            origin: eye,
            direction,
        })
    }

    /// Distance along the ray to the nearest intersection with a sphere.
    pub fn hit_sphere(&self, center: V3, radius: f64) -> Option<f64> {
        let oc = sub(self.origin, center);
        let b = dot(oc, self.direction);
        let c = dot(oc, oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
    }
}

/// Render backend for hosts that apply draw lists themselves.
#[derive(Debug, Clone)]
pub struct DrawListBackend {
    open: Option<DrawList>,
    presented: Option<DrawList>,
    aspect: f64,
    eye: Option<Vec3>,
}

impl DrawListBackend {
    pub fn new() -> Self {
        Self {
            open: None,
            presented: None,
            aspect: 1.0,
            eye: None,
        }
    }

    /// Record the host viewport size, used for picking.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Report where the host's orbit controls currently put the eye. Without
    /// it, picking uses the frame's configured camera position.
    pub fn set_eye(&mut self, eye: Option<Vec3>) {
        self.eye = eye;
    }

    /// The most recently presented frame.
    pub fn presented(&self) -> Option<&DrawList> {
        self.presented.as_ref()
    }

    fn open_frame(&mut self) -> Result<&mut DrawList, BackendError> {
        self.open.as_mut().ok_or(BackendError::FrameNotStarted)
    }
}

impl Default for DrawListBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for DrawListBackend {
    fn begin_frame(&mut self, frame: &FrameInfo) -> Result<(), BackendError> {
        if self.open.is_some() {
            return Err(BackendError::FrameAlreadyStarted);
        }
        self.open = Some(DrawList::new(*frame));
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraSettings) -> Result<(), BackendError> {
        self.open_frame()?.camera = Some(*camera);
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &MeshDraw) -> Result<(), BackendError> {
        self.open_frame()?.meshes.push(mesh.clone());
        Ok(())
    }

    fn draw_label(&mut self, label: &LabelDraw) -> Result<(), BackendError> {
        self.open_frame()?.labels.push(label.clone());
        Ok(())
    }

    fn draw_overlay(&mut self, overlay: &OverlayDraw) -> Result<(), BackendError> {
        self.open_frame()?.overlays.push(overlay.clone());
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), BackendError> {
        let frame = self.open.take().ok_or(BackendError::FrameNotStarted)?;
        self.presented = Some(frame);
        Ok(())
    }
}

impl PointerPicking for DrawListBackend {
    /// Nearest part whose bounding sphere the pointer ray hits. Fixtures are
    /// not interactive and never picked.
    fn pick(&self, ndc: [f64; 2]) -> Option<MeshTag> {
        let frame = self.presented.as_ref()?;
        let camera = frame.camera?;
        let eye = self.eye.unwrap_or(camera.position);
        let ray = Ray::through_ndc(
            eye.to_array(),
            camera.target.to_array(),
            camera.fov_degrees,
            self.aspect,
            ndc,
        )?;

        frame
            .meshes
            .iter()
            .filter(|m| matches!(m.tag, MeshTag::Part { .. }))
            .filter_map(|m| {
                let center = rotate_y(m.position.to_array(), frame.info.group_rotation_y);
                let radius = m.primitive.bounding_radius() * m.scale;
                ray.hit_sphere(center, radius).map(|t| (t, m.tag))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, tag)| tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::part_primitive;

    fn frame_info(rotation: f64) -> FrameInfo {
        FrameInfo {
            elapsed_secs: 0.0,
            group_rotation_y: rotation,
            lights: LightRig {
                ambient_intensity: 0.4,
                directional: DirectionalLight {
                    position: Vec3::new(10.0, 10.0, 5.0),
                    intensity: 1.0,
                    cast_shadow: true,
                },
                point: PointLight {
                    position: Vec3::new(-10.0, -10.0, -5.0),
                    intensity: 0.5,
                    color: ColorToken::rgb(0x4a, 0x90, 0xd9),
                },
            },
        }
    }

    fn camera() -> CameraSettings {
        CameraSettings {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
            min_distance: 3.0,
            max_distance: 20.0,
            enable_pan: false,
            auto_rotate: false,
            auto_rotate_speed: 0.5,
        }
    }

    fn part_at(index: usize, position: Vec3) -> MeshDraw {
        MeshDraw {
            tag: MeshTag::Part { index },
            primitive: part_primitive(ShapeKind::Sphere, 1.0),
            position,
            rotation: [0.0; 3],
            scale: 1.0,
            material: MaterialParams::new(ColorToken::rgb(0, 0, 0), 0.6, 0.3),
        }
    }

    fn present(backend: &mut DrawListBackend, rotation: f64, meshes: &[MeshDraw]) {
        backend.begin_frame(&frame_info(rotation)).unwrap();
        backend.set_camera(&camera()).unwrap();
        for m in meshes {
            backend.draw_mesh(m).unwrap();
        }
        backend.end_frame().unwrap();
    }

    #[test]
    fn presented_frame_replaces_previous() {
        let mut backend = DrawListBackend::new();
        assert!(backend.presented().is_none());
        present(&mut backend, 0.0, &[part_at(0, Vec3::ZERO)]);
        present(&mut backend, 0.0, &[]);
        assert!(backend.presented().unwrap().meshes.is_empty());
    }

    #[test]
    fn center_ray_hits_centered_part() {
        let mut backend = DrawListBackend::new();
        present(&mut backend, 0.0, &[part_at(0, Vec3::ZERO)]);
        assert_eq!(backend.pick([0.0, 0.0]), Some(MeshTag::Part { index: 0 }));
        assert_eq!(backend.pick([0.9, 0.9]), None);
    }

    #[test]
    fn pick_selects_by_screen_height() {
        let mut backend = DrawListBackend::new();
        present(
            &mut backend,
            0.0,
            &[part_at(0, Vec3::new(0.0, 2.0, 0.0)), part_at(1, Vec3::new(0.0, -2.0, 0.0))],
        );
        let ndc_y = 2.0 / (10.0 * (22.5f64).to_radians().tan());
        assert_eq!(backend.pick([0.0, ndc_y]), Some(MeshTag::Part { index: 0 }));
        assert_eq!(backend.pick([0.0, -ndc_y]), Some(MeshTag::Part { index: 1 }));
    }

    #[test]
    fn nearest_part_wins() {
        let mut backend = DrawListBackend::new();
        present(
            &mut backend,
            0.0,
            &[part_at(0, Vec3::new(0.0, 0.0, -3.0)), part_at(1, Vec3::new(0.0, 0.0, 3.0))],
        );
        assert_eq!(backend.pick([0.0, 0.0]), Some(MeshTag::Part { index: 1 }));
    }

    #[test]
    fn group_rotation_moves_off_axis_parts() {
        let mut backend = DrawListBackend::new();
        // Quarter turn swings (2, 0, 0) to (0, 0, -2), back onto the view axis.
        present(
            &mut backend,
            std::f64::consts::FRAC_PI_2,
            &[part_at(0, Vec3::new(2.0, 0.0, 0.0))],
        );
        assert_eq!(backend.pick([0.0, 0.0]), Some(MeshTag::Part { index: 0 }));
    }

    #[test]
    fn reported_eye_overrides_camera() {
        let mut backend = DrawListBackend::new();
        present(&mut backend, 0.0, &[part_at(0, Vec3::new(0.0, 2.0, 0.0))]);
        backend.set_eye(Some(Vec3::new(0.0, 0.0, -10.0)));
        let ndc_y = 2.0 / (10.0 * (22.5f64).to_radians().tan());
        assert_eq!(backend.pick([0.0, ndc_y]), Some(MeshTag::Part { index: 0 }));
        assert_eq!(backend.pick([0.0, -ndc_y]), None);
    }

    #[test]
    fn fixtures_are_not_pickable() {
        let mut backend = DrawListBackend::new();
        let mut plate = part_at(0, Vec3::ZERO);
        plate.tag = MeshTag::BasePlate;
        present(&mut backend, 0.0, &[plate]);
        assert_eq!(backend.pick([0.0, 0.0]), None);
    }
}
