use super::*;

#[test]
fn sketch_starts_desaturated_and_ends_in_color() {
    let start = sketch_to_color(150, FrameIndex(0));
    assert_eq!(start.grayscale, 100.0);
    assert_eq!(start.contrast, 150.0);
    assert_eq!(start.brightness, 90.0);
    assert_eq!(start.sepia, 30.0);
    assert_eq!(start.scale, 1.05);
    assert_eq!(start.opacity, 0.0);

    let end = sketch_to_color(150, FrameIndex(150));
    assert_eq!(end.grayscale, 0.0);
    assert_eq!(end.contrast, 100.0);
    assert_eq!(end.brightness, 100.0);
    assert_eq!(end.sepia, 0.0);
    assert_eq!(end.scale, 1.0);
    assert_eq!(end.opacity, 1.0);

    assert_eq!(sketch_to_color(150, FrameIndex(75)).scale, 1.08);
}

#[test]
fn sketch_filter_css() {
    let start = sketch_to_color(150, FrameIndex(0));
    assert_eq!(start.filter, "grayscale(100%) contrast(150%) brightness(90%) sepia(30%)");
    let end = sketch_to_color(150, FrameIndex(149));
    assert_eq!(end.filter, "grayscale(0%) contrast(100%) brightness(100%) sepia(0%)");
}

#[test]
fn particle_grid_is_row_major_with_unit_orders() {
    let field = ParticleField::derive(12);
    assert_eq!(field.grid_size(), 12);
    assert_eq!(field.cells().len(), 144);
    assert_eq!((field.cells()[13].x, field.cells()[13].y), (1, 1));
    for c in field.cells() {
        assert!((0.0..1.0).contains(&c.appear_order));
    }
    assert_eq!(field, ParticleField::derive(12));
}

#[test]
fn particles_assemble_over_the_clip() {
    let field = ParticleField::derive(4);
    let first = field.frame(150, FrameIndex(0));
    assert_eq!(first.progress, 0.0);
    assert_eq!(first.final_image_opacity, 0.0);
    assert!(first.cells.iter().all(|c| c.opacity == 0.0 && c.scale == 0.8));

    let done = field.frame(150, FrameIndex(120));
    assert_eq!(done.progress, 1.0);
    assert!(done.cells.iter().all(|c| c.opacity == 1.0 && c.scale == 1.0));

    assert_eq!(field.frame(150, FrameIndex(150)).final_image_opacity, 1.0);
}

#[test]
fn particle_grid_side_is_capped() {
    let field = ParticleField::derive(u32::MAX);
    assert_eq!(field.grid_size(), MAX_GRID_SIZE);
    assert_eq!(field.cells().len(), (MAX_GRID_SIZE * MAX_GRID_SIZE) as usize);
}

#[test]
fn brush_grows_then_unmasks() {
    let start = brush_reveal(150, FrameIndex(0));
    assert_eq!(start.circle_size, 0.0);
    assert_eq!(start.background_opacity, 0.0);
    assert!(!start.show_full_image);
    assert!(!start.edge_glow);

    let mid = brush_reveal(150, FrameIndex(30));
    assert!(mid.edge_glow);
    assert!(mid.circle_size > 10.0 && mid.circle_size < 140.0);

    assert!(!brush_reveal(150, FrameIndex(135)).show_full_image);
    let end = brush_reveal(150, FrameIndex(136));
    assert!(end.show_full_image);
    assert_eq!(end.circle_size, 150.0);
    assert_eq!(end.background_opacity, 0.3);
    assert!(!end.edge_glow);
}

#[test]
fn reveal_props_defaults() {
    let props: ImageRevealProps = serde_json::from_str(r#"{"src":"/data/media/a.png"}"#).unwrap();
    assert_eq!(props.duration_in_frames, 150);
    assert_eq!(props.grid_size, 12);
}
