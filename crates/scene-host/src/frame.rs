//! Turns a session snapshot into a frame plan. Pure; no backend access.

use std::f64::consts::FRAC_PI_2;

use assembly_engine::SessionView;
use assembly_types::{AssemblyStatus, VisualPart};
use render_backend::primitives::part_primitive;
use render_backend::{
    FrameInfo, LabelDraw, MaterialParams, MeshDraw, MeshTag, OverlayDraw, Primitive, Vec3,
};

use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::motion;
use crate::types::FramePlan;

/// Text of the progress badge, e.g. `装配中 67%`.
pub fn overlay_text(progress_pct: f64) -> String {
    format!("装配中 {}%", progress_pct.round() as i64)
}

/// The badge is shown only while parts are still appearing.
pub fn shows_overlay(view: &SessionView) -> bool {
    view.status == AssemblyStatus::Assembling && view.progress_pct < 100.0
}

pub fn plan_frame(
    config: &SceneConfig,
    camera: &OrbitCamera,
    view: &SessionView,
    elapsed_secs: f64,
) -> FramePlan {
    let info = FrameInfo {
        elapsed_secs,
        group_rotation_y: motion::group_rotation_y(elapsed_secs, &config.motion),
        lights: config.lights,
    };

    let mut parts = Vec::new();
    let mut labels = Vec::new();
    for part in view.visible_parts() {
        let mesh = part_mesh(config, part, elapsed_secs);
        if part.highlighted {
            labels.push(LabelDraw {
                tag: mesh.tag,
                anchor: mesh
                    .position
                    .offset(0.0, config.highlight.label_offset_y * mesh.scale, 0.0),
                text: part.spec.label_text(),
            });
        }
        parts.push(mesh);
    }

    let overlay = shows_overlay(view).then(|| OverlayDraw {
        anchor: config.overlay_anchor,
        text: overlay_text(view.progress_pct),
    });

    FramePlan {
        info,
        camera: camera.settings(view.status),
        fixtures: fixtures(config),
        parts,
        labels,
        overlay,
    }
}

fn fixtures(config: &SceneConfig) -> Vec<MeshDraw> {
    let plate = &config.base_plate;
    let shaft = &config.shaft;
    vec![
        MeshDraw {
            tag: MeshTag::BasePlate,
            primitive: Primitive::Disc {
                radius: plate.radius,
                segments: 32,
            },
            position: Vec3::new(0.0, plate.y, 0.0),
            // Lay the disc flat.
            rotation: [-FRAC_PI_2, 0.0, 0.0],
            scale: 1.0,
            material: MaterialParams::new(
                plate.material.color,
                plate.material.metalness,
                plate.material.roughness,
            ),
        },
        MeshDraw {
            tag: MeshTag::Shaft,
            primitive: Primitive::Cylinder {
                radius_top: shaft.radius,
                radius_bottom: shaft.radius,
                height: shaft.height,
                radial_segments: 16,
            },
            position: Vec3::new(0.0, shaft.y, 0.0),
            rotation: [0.0; 3],
            scale: 1.0,
            material: MaterialParams::new(
                shaft.material.color,
                shaft.material.metalness,
                shaft.material.roughness,
            ),
        },
    ]
}

fn part_mesh(config: &SceneConfig, part: &VisualPart, t: f64) -> MeshDraw {
    let color = part.archetype.color;
    let mut material = MaterialParams::new(color, config.part_metalness, config.part_roughness);
    let mut scale = 1.0;
    if part.highlighted {
        material.emissive = Some(color);
        material.emissive_intensity = config.highlight.emissive_intensity;
        scale = config.highlight.scale_factor;
    }

    MeshDraw {
        tag: MeshTag::Part { index: part.index },
        primitive: part_primitive(part.archetype.shape, part.scale),
        position: part
            .position
            .offset(0.0, motion::float_offset_y(t, &config.motion), 0.0),
        rotation: motion::part_rotation(t, &config.motion),
        scale,
        material,
    }
}
