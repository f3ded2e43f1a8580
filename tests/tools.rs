use egui::{Color32, Vec2, pos2};
use image::{Rgba, RgbaImage};
use layered_paint::event::{ColorChanged, SelectionRequested, ToolChanged, UndoRequest, WidthChanged};
use layered_paint::geometry::PixelRect;
use layered_paint::raster::{OUTLINE, TRANSPARENT};
use layered_paint::{EditorConfig, EditorContext, ToolKind};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn create_test_editor(width: u32, height: u32) -> EditorContext {
    init_logging();
    let editor = EditorContext::new(EditorConfig::default()).unwrap();
    editor.new_workspace(width, height).unwrap();
    editor
}

fn base_of(editor: &EditorContext) -> RgbaImage {
    editor.workspaces().active().unwrap().base().clone()
}

fn effects_of(editor: &EditorContext) -> RgbaImage {
    editor.workspaces().active().unwrap().effects().clone()
}

fn undo_depth(editor: &EditorContext) -> usize {
    editor.workspaces().active().unwrap().history().undo_depth()
}

fn is_blank(image: &RgbaImage) -> bool {
    image.pixels().all(|p| *p == TRANSPARENT)
}

#[test]
fn test_pencil_stroke_uses_shared_style() {
    let editor = create_test_editor(32, 32);
    editor.post(ColorChanged { color: Color32::RED });
    editor.post(WidthChanged { width: 3 });

    editor.pointer_down(pos2(5.0, 5.0));
    editor.pointer_dragged(pos2(10.0, 5.0));
    editor.pointer_up(pos2(10.0, 5.0));

    let base = base_of(&editor);
    assert_eq!(*base.get_pixel(5, 5), RED);
    assert_eq!(*base.get_pixel(4, 4), RED);
    assert_eq!(*base.get_pixel(8, 6), RED);
    assert_eq!(*base.get_pixel(11, 5), RED);
    assert_eq!(*base.get_pixel(12, 5), TRANSPARENT);
    assert_eq!(*base.get_pixel(8, 7), TRANSPARENT);
    assert!(is_blank(&effects_of(&editor)));

    let workspaces = editor.workspaces();
    let workspace = workspaces.active().unwrap();
    assert!(workspace.is_dirty());
    assert_eq!(workspace.history().undo_depth(), 1);
}

#[test]
fn test_one_snapshot_per_gesture() {
    let editor = create_test_editor(16, 16);

    editor.pointer_down(pos2(1.0, 1.0));
    for x in 2..8 {
        editor.pointer_dragged(pos2(x as f32, 1.0));
    }
    editor.pointer_up(pos2(8.0, 1.0));
    assert_eq!(undo_depth(&editor), 1);

    editor.pointer_down(pos2(1.0, 4.0));
    editor.pointer_up(pos2(3.0, 4.0));
    assert_eq!(undo_depth(&editor), 2);

    editor.post(UndoRequest);
    let base = base_of(&editor);
    assert_eq!(*base.get_pixel(5, 1), BLACK);
    assert_eq!(*base.get_pixel(2, 4), TRANSPARENT);
}

#[test]
fn test_eraser_clears_to_transparent() {
    let editor = create_test_editor(8, 8);
    {
        let mut workspaces = editor.workspaces_mut();
        let base = workspaces.active_mut().unwrap().canvas_mut().base_mut();
        *base = RgbaImage::from_pixel(8, 8, RED);
    }
    editor.post(ToolChanged { tool: ToolKind::Eraser });

    editor.pointer_down(pos2(3.0, 3.0));
    editor.pointer_dragged(pos2(5.0, 3.0));
    editor.pointer_up(pos2(5.0, 3.0));

    let base = base_of(&editor);
    for x in 3..=5 {
        assert_eq!(*base.get_pixel(x, 3), TRANSPARENT);
    }
    assert_eq!(*base.get_pixel(3, 4), RED);
}

#[test]
fn test_marquee_lifts_on_release_only() {
    let editor = create_test_editor(64, 64);
    editor.post(ToolChanged { tool: ToolKind::Marquee });

    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_dragged(pos2(25.0, 25.0));
    assert_eq!(undo_depth(&editor), 0);
    assert!(editor.workspaces().active().unwrap().selection().is_none());
    // Marquee outline while dragging
    assert_eq!(*effects_of(&editor).get_pixel(10, 10), OUTLINE);

    editor.pointer_up(pos2(30.0, 30.0));

    let workspaces = editor.workspaces();
    let workspace = workspaces.active().unwrap();
    let selection = workspace.selection().unwrap();
    assert_eq!(selection.bounds(), PixelRect::new(10, 10, 20, 20));
    assert_eq!(workspace.history().undo_depth(), 0);
}

#[test]
fn test_marquee_outline_uses_configured_dash_length() {
    init_logging();
    let config = EditorConfig {
        dash_length: 2,
        ..EditorConfig::default()
    };
    let editor = EditorContext::new(config).unwrap();
    editor.new_workspace(64, 64).unwrap();
    editor.post(ToolChanged { tool: ToolKind::Marquee });

    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_dragged(pos2(30.0, 30.0));

    let effects = effects_of(&editor);
    assert_eq!(*effects.get_pixel(10, 10), OUTLINE);
    assert_eq!(*effects.get_pixel(11, 10), OUTLINE);
    assert_eq!(*effects.get_pixel(12, 10), TRANSPARENT);
    assert_eq!(*effects.get_pixel(14, 10), OUTLINE);
}

#[test]
fn test_marquee_drawn_backwards_is_normalized() {
    let editor = create_test_editor(64, 64);
    editor.post(ToolChanged { tool: ToolKind::Marquee });

    editor.pointer_down(pos2(30.0, 40.0));
    editor.pointer_up(pos2(10.0, 20.0));

    let workspaces = editor.workspaces();
    let selection = workspaces.active().unwrap().selection().unwrap();
    assert_eq!(selection.bounds(), PixelRect::new(10, 20, 20, 20));
}

#[test]
fn test_move_tool_drags_selection_until_tool_switch() {
    let editor = create_test_editor(32, 32);
    {
        let mut workspaces = editor.workspaces_mut();
        let base = workspaces.active_mut().unwrap().canvas_mut().base_mut();
        base.put_pixel(12, 12, RED);
    }
    editor.post(SelectionRequested {
        bounds: egui::Rect::from_min_max(pos2(10.0, 10.0), pos2(20.0, 20.0)),
    });
    editor.post(ToolChanged { tool: ToolKind::Move });

    editor.pointer_down(pos2(15.0, 15.0));
    editor.pointer_dragged(pos2(18.0, 15.0));
    editor.pointer_up(pos2(20.0, 17.0));

    {
        let workspaces = editor.workspaces();
        let selection = workspaces.active().unwrap().selection().unwrap();
        assert_eq!(selection.offset(), Vec2::new(5.0, 2.0));
    }
    // Selecting and dragging are not pixel edits of their own
    assert_eq!(undo_depth(&editor), 0);

    editor.post(ToolChanged { tool: ToolKind::Pencil });

    let base = base_of(&editor);
    assert!(editor.workspaces().active().unwrap().selection().is_none());
    assert_eq!(*base.get_pixel(17, 14), RED);
    assert_eq!(*base.get_pixel(12, 12), TRANSPARENT);
    assert!(is_blank(&effects_of(&editor)));
}

#[test]
fn test_line_previews_then_commits() {
    let editor = create_test_editor(16, 16);
    editor.post(ToolChanged { tool: ToolKind::Line });

    editor.pointer_down(pos2(2.0, 2.0));
    editor.pointer_dragged(pos2(8.0, 2.0));
    assert_eq!(*effects_of(&editor).get_pixel(5, 2), BLACK);
    assert_eq!(*base_of(&editor).get_pixel(5, 2), TRANSPARENT);

    editor.pointer_dragged(pos2(2.0, 8.0));
    // Only the latest preview is shown
    assert_eq!(*effects_of(&editor).get_pixel(5, 2), TRANSPARENT);
    assert_eq!(*effects_of(&editor).get_pixel(2, 5), BLACK);

    editor.pointer_up(pos2(2.0, 8.0));
    assert!(is_blank(&effects_of(&editor)));
    assert_eq!(*base_of(&editor).get_pixel(2, 5), BLACK);
    assert_eq!(undo_depth(&editor), 1);
}

#[test]
fn test_rectangle_outline_leaves_interior() {
    let editor = create_test_editor(16, 16);
    editor.post(ToolChanged { tool: ToolKind::Rectangle });

    editor.pointer_down(pos2(2.0, 2.0));
    editor.pointer_up(pos2(10.0, 8.0));

    let base = base_of(&editor);
    assert_eq!(*base.get_pixel(2, 2), BLACK);
    assert_eq!(*base.get_pixel(10, 5), BLACK);
    assert_eq!(*base.get_pixel(6, 8), BLACK);
    assert_eq!(*base.get_pixel(6, 5), TRANSPARENT);
}

#[test]
fn test_tool_switch_mid_gesture_drops_preview() {
    let editor = create_test_editor(16, 16);
    editor.post(ToolChanged { tool: ToolKind::Line });

    editor.pointer_down(pos2(2.0, 2.0));
    editor.pointer_dragged(pos2(8.0, 8.0));
    assert!(!is_blank(&effects_of(&editor)));

    editor.post(ToolChanged { tool: ToolKind::Pencil });
    assert!(!editor.tools().gesture_in_progress());
    assert!(is_blank(&effects_of(&editor)));

    // The release belongs to the abandoned gesture
    editor.pointer_up(pos2(9.0, 9.0));
    assert!(is_blank(&base_of(&editor)));
}

#[test]
fn test_pan_moves_view_without_touching_pixels() {
    let editor = create_test_editor(16, 16);
    editor.post(ToolChanged { tool: ToolKind::Pan });

    editor.pointer_down(pos2(0.0, 0.0));
    editor.pointer_dragged(pos2(5.0, 3.0));
    editor.pointer_up(pos2(7.0, 4.0));

    assert_eq!(editor.tools().view_offset(), Vec2::new(7.0, 4.0));
    assert!(is_blank(&base_of(&editor)));
    assert_eq!(undo_depth(&editor), 0);
    assert!(!editor.workspaces().active().unwrap().is_dirty());
}

#[test]
fn test_zero_width_is_ignored() {
    let editor = create_test_editor(4, 4);
    editor.post(WidthChanged { width: 0 });
    assert_eq!(editor.tools().style().width, 1);

    editor.post(WidthChanged { width: 4 });
    editor.post(ColorChanged { color: Color32::BLUE });
    let tools = editor.tools();
    assert_eq!(tools.style().width, 4);
    assert_eq!(tools.style().color, Color32::BLUE);
}

#[test]
fn test_pointer_without_workspace_is_ignored() {
    init_logging();
    let editor = EditorContext::new(EditorConfig::default()).unwrap();
    editor.pointer_down(pos2(1.0, 1.0));
    editor.pointer_dragged(pos2(2.0, 2.0));
    editor.pointer_up(pos2(3.0, 3.0));
    assert!(!editor.tools().gesture_in_progress());
}
