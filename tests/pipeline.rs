use russclip::camera::Control;
use russclip::clipper::Frustum;
use russclip::culling::faces_viewer;
use russclip::prelude::*;
use russclip::scene::cube_template;
use russclip::sorting::depth_sort;

fn single_cube_engine(eye: Vec3) -> Engine {
    let mut scene = Scene::new();
    let cube = scene.add_template(cube_template());
    scene.add_object(Vec3::new(-50.0, 0.0, 70.0), cube);

    let mut engine = Engine::new(RenderConfig::default(), scene).unwrap();
    engine.camera_mut().set_position(eye);
    engine
}

fn colors_on_screen(frame: &FrameBuffer) -> Vec<u8> {
    let mut colors: Vec<u8> = (1..=255).filter(|&c| frame.count_color(c) > 0).collect();
    colors.sort_unstable_by(|a, b| b.cmp(a));
    colors
}

#[test]
fn eye_level_with_the_cube_sees_near_and_right_faces() {
    let mut engine = single_cube_engine(Vec3::ZERO);
    let stats = engine.render_frame(&[]);

    // The eye is between the top and bottom planes, so both face away
    assert_eq!(stats.polygons, 6);
    assert_eq!(stats.culled, 4);
    assert_eq!(stats.clipped, 0);
    assert_eq!(stats.drawn, 2);
    assert_eq!(colors_on_screen(engine.framebuffer()), vec![15, 14]);
}

#[test]
fn eye_below_the_cube_also_sees_its_bottom() {
    let mut engine = single_cube_engine(Vec3::new(0.0, -15.0, 0.0));
    let stats = engine.render_frame(&[]);

    assert_eq!(stats.culled, 3);
    assert_eq!(stats.drawn, 3);
    assert_eq!(colors_on_screen(engine.framebuffer()), vec![15, 14, 10]);
}

#[test]
fn cube_straddling_the_left_edge_is_cut_at_column_zero() {
    let mut engine = single_cube_engine(Vec3::ZERO);
    engine.render_frame(&[]);
    let frame = engine.framebuffer();

    // The near face's left edge lies exactly on the left frustum plane
    let row = frame.row(frame.height() / 2).unwrap();
    assert_eq!(row[0], 15);
    assert_eq!(row[frame.width() as usize - 1], 0);
}

#[test]
fn demo_scene_renders_from_the_start_position() {
    let mut engine = Engine::new(RenderConfig::default(), Scene::demo()).unwrap();
    let stats = engine.render_frame(&[]);

    assert_eq!(stats.objects, 13);
    assert_eq!(stats.polygons, 12 * 6 + 1);
    assert_eq!(stats.culled + stats.clipped + stats.drawn, stats.polygons);
    assert!(stats.drawn > 0);
    // The floor fills the lower half of the screen
    assert_eq!(engine.framebuffer().get_pixel(160, 235), Some(1));
}

#[test]
fn walking_forward_changes_the_picture() {
    let mut engine = Engine::new(RenderConfig::default(), Scene::demo()).unwrap();
    engine.render_frame(&[]);
    let before = engine.framebuffer().clone();

    engine.render_frame(&[Control::Accelerate, Control::Accelerate]);
    assert!(engine.camera().position().z > 0.0);
    assert_ne!(engine.framebuffer(), &before);
}

#[test]
fn clipped_polygons_stay_in_front_of_the_eye_while_flying_around() {
    let scene = Scene::demo();
    let mut camera = Camera::default();
    let projection = Projection::new(320, 240, 2.0);
    let script = [
        Control::Accelerate,
        Control::YawRight,
        Control::PitchDown,
        Control::RollLeft,
        Control::MoveUp,
        Control::YawRight,
        Control::Accelerate,
        Control::PitchUp,
    ];

    for step in 0..40 {
        camera.update(&[script[step % script.len()]]);
        let frustum = Frustum::new(&camera, &projection);

        for entry in depth_sort(scene.objects(), camera.position()) {
            let object = scene.objects()[entry.index];
            let template = scene.template(object.template).unwrap();
            for polygon in template.polygons() {
                let placed = polygon.translated(object.center);
                if !faces_viewer(&placed, camera.position()) {
                    continue;
                }
                if let Some(clipped) = frustum.clip(&placed) {
                    assert!((3..=8).contains(&clipped.len()));
                    for &v in &clipped.vertices {
                        assert!(camera.to_view(v).z > 0.0);
                    }
                }
            }
        }
    }
}

#[test]
fn painter_order_draws_near_objects_last() {
    // A small marker in front of a cube; the nearer one must win the center pixel
    let mut scene = Scene::new();
    let cube = scene.add_template(cube_template());
    let near_face = scene.add_template(PolygonTemplate::new(
        "marker",
        vec![Polygon::new(
            200,
            &[
                Vec3::new(-2.0, 2.0, 0.0),
                Vec3::new(2.0, 2.0, 0.0),
                Vec3::new(2.0, -2.0, 0.0),
                Vec3::new(-2.0, -2.0, 0.0),
            ],
        )],
    ));
    scene.add_object(Vec3::new(0.0, 0.0, 30.0), near_face);
    scene.add_object(Vec3::new(0.0, 0.0, 80.0), cube);

    let mut engine = Engine::new(RenderConfig::default(), scene).unwrap();
    let stats = engine.render_frame(&[]);

    assert_eq!(stats.drawn, 2);
    assert_eq!(engine.framebuffer().get_pixel(160, 120), Some(200));
    assert!(engine.framebuffer().count_color(15) > 0);
}
