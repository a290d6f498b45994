//! Draws a scene's GUI textures with imgui
//!
//! Mesh-bound textures follow the screen position of their mesh and are
//! hidden while the mesh is hidden or behind the camera. Fullscreen textures
//! place each control at the anchor given by its alignment.

use cgmath::{Matrix4, Vector3, Vector4};

use crate::gfx::scene::Scene;

use super::controls::{Control, HorizontalAlign, VerticalAlign};
use super::gui_texture::GuiTarget;
use super::manager::BASE_FONT_SIZE;

const EDGE_MARGIN: f32 = 12.0;

/// Maps a world point to pixel coordinates (origin top-left)
///
/// Returns `None` for points at or behind the camera plane.
pub fn project_to_screen(view_proj: Matrix4<f32>, point: Vector3<f32>, width: f32, height: f32) -> Option<[f32; 2]> {
    let clip = view_proj * Vector4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    Some([(ndc_x * 0.5 + 0.5) * width, (0.5 - ndc_y * 0.5) * height])
}

/// Window position and pivot for a fullscreen control anchor
fn anchor(h_align: HorizontalAlign, v_align: VerticalAlign, size: [f32; 2]) -> ([f32; 2], [f32; 2]) {
    let (x, px) = match h_align {
        HorizontalAlign::Left => (EDGE_MARGIN, 0.0),
        HorizontalAlign::Center => (size[0] * 0.5, 0.5),
        HorizontalAlign::Right => (size[0] - EDGE_MARGIN, 1.0),
    };
    let (y, py) = match v_align {
        VerticalAlign::Top => (EDGE_MARGIN, 0.0),
        VerticalAlign::Center => (size[1] * 0.5, 0.5),
        VerticalAlign::Bottom => (size[1] - EDGE_MARGIN, 1.0),
    };
    ([x, y], [px, py])
}

fn control_alignment(control: &Control) -> (HorizontalAlign, VerticalAlign) {
    match control {
        Control::TextBlock(text) => (text.h_align, text.v_align),
        Control::Button(button) => (button.h_align, button.v_align),
    }
}

/// Emits the imgui widgets for one control; fires button observers on press
fn draw_control(ui: &imgui::Ui, control: &mut Control) {
    match control {
        Control::TextBlock(text) => {
            ui.set_window_font_scale(text.font_size / BASE_FONT_SIZE);
            ui.text_colored(text.color, &text.text);
            ui.set_window_font_scale(1.0);
        }
        Control::Button(button) => {
            let _text = ui.push_style_color(imgui::StyleColor::Text, button.color);
            let _background = ui.push_style_color(imgui::StyleColor::Button, button.background);
            if ui.button(format!("{}##{}", button.text, button.name)) {
                log::debug!("Button '{}' clicked", button.name);
                button.click();
            }
        }
    }
}

/// Builds imgui windows for every GUI texture in `scene`
pub fn draw_scene_gui(ui: &imgui::Ui, scene: &mut Scene, view_proj: Matrix4<f32>, display_size: [f32; 2]) {
    // Screen anchors for mesh-bound textures, resolved before borrowing textures mutably
    let mesh_anchors: Vec<Option<[f32; 2]>> = scene
        .textures()
        .iter()
        .map(|texture| match texture.target {
            GuiTarget::Mesh { mesh, .. } => {
                let mesh = scene.mesh(mesh);
                if !mesh.visible {
                    return None;
                }
                project_to_screen(view_proj, mesh.world_position(), display_size[0], display_size[1])
            }
            GuiTarget::Fullscreen => None,
        })
        .collect();

    for (index, texture) in scene.textures_mut().iter_mut().enumerate() {
        let bg_alpha = texture.background.map_or(0.0, |color| color[3]);

        match texture.target {
            GuiTarget::Mesh { .. } => {
                let Some(position) = mesh_anchors[index] else {
                    continue;
                };
                ui.window(format!("##gui-{}-{}", index, texture.name))
                    .position(position, imgui::Condition::Always)
                    .position_pivot([0.5, 0.5])
                    .always_auto_resize(true)
                    .no_decoration()
                    .bg_alpha(bg_alpha)
                    .build(|| {
                        for control in texture.controls_mut().iter_mut().filter(|c| c.is_visible()) {
                            draw_control(ui, control);
                        }
                    });
            }
            GuiTarget::Fullscreen => {
                let name = texture.name.clone();
                let mut stacked: Vec<((HorizontalAlign, VerticalAlign), f32)> = Vec::new();

                for (slot, control) in texture.controls_mut().iter_mut().enumerate() {
                    if !control.is_visible() {
                        continue;
                    }
                    let alignment = control_alignment(control);
                    let (mut position, pivot) = anchor(alignment.0, alignment.1, display_size);

                    // Controls sharing an anchor stack away from the edge
                    let offset = stacked.iter().filter(|(a, _)| *a == alignment).map(|(_, h)| h).sum::<f32>();
                    position[1] += if pivot[1] >= 1.0 { -offset } else { offset };
                    stacked.push((alignment, BASE_FONT_SIZE + 2.0 * EDGE_MARGIN));

                    ui.window(format!("##gui-{}-{}-{}", index, name, slot))
                        .position(position, imgui::Condition::Always)
                        .position_pivot(pivot)
                        .always_auto_resize(true)
                        .no_decoration()
                        .bg_alpha(bg_alpha)
                        .build(|| draw_control(ui, control));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{Camera, SceneCamera};
    use crate::ui::controls::{Button, TextBlock};
    use cgmath::SquareMatrix;

    #[test]
    fn test_identity_projection_maps_ndc_to_pixels() {
        let vp = Matrix4::identity();
        assert_eq!(project_to_screen(vp, Vector3::new(0.0, 0.0, 0.0), 800.0, 600.0), Some([400.0, 300.0]));
        assert_eq!(project_to_screen(vp, Vector3::new(1.0, 1.0, 0.0), 800.0, 600.0), Some([800.0, 0.0]));
        assert_eq!(project_to_screen(vp, Vector3::new(-1.0, -1.0, 0.0), 800.0, 600.0), Some([0.0, 600.0]));
    }

    #[test]
    fn test_points_behind_camera_are_hidden() {
        let camera = SceneCamera::free("camera", Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 0.0));
        let vp = camera.build_view_projection_matrix();

        let front = project_to_screen(vp, Vector3::new(0.0, 0.0, 0.0), 100.0, 100.0).unwrap();
        assert!((front[0] - 50.0).abs() < 1e-3);
        assert!((front[1] - 50.0).abs() < 1e-3);
        assert!(project_to_screen(vp, Vector3::new(0.0, 0.0, 10.0), 100.0, 100.0).is_none());
    }

    #[test]
    fn test_text_block_scale_does_not_leak() {
        let mut ctx = imgui::Context::create();
        ctx.set_ini_filename(None);
        ctx.io_mut().display_size = [800.0, 600.0];
        ctx.fonts().build_rgba32_texture();

        let mut title = Control::from(TextBlock::new("title", "Big").with_font_size(BASE_FONT_SIZE * 2.0));
        let mut button = Control::from(Button::new("button", "Press"));

        let ui = &*ctx.new_frame();
        ui.window("controls").build(|| {
            let base = ui.current_font_size();
            draw_control(ui, &mut title);
            assert_eq!(ui.current_font_size(), base);
            draw_control(ui, &mut button);
            assert_eq!(ui.current_font_size(), base);
        });
        ctx.render();
    }

    #[test]
    fn test_anchor_pivots_follow_alignment() {
        let (pos, pivot) = anchor(HorizontalAlign::Center, VerticalAlign::Bottom, [800.0, 600.0]);
        assert_eq!(pos, [400.0, 600.0 - EDGE_MARGIN]);
        assert_eq!(pivot, [0.5, 1.0]);

        let (pos, pivot) = anchor(HorizontalAlign::Left, VerticalAlign::Top, [800.0, 600.0]);
        assert_eq!(pos, [EDGE_MARGIN, EDGE_MARGIN]);
        assert_eq!(pivot, [0.0, 0.0]);
    }
}
