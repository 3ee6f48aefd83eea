//! Scene description: shared polygon templates placed at world-space centers.
//!
//! A [`Scene`] owns a table of [`PolygonTemplate`]s and a list of
//! [`SceneObject`]s that refer to them by [`TemplateId`]. The scene is
//! immutable once handed to the engine; [`Scene::validate`] checks every
//! capacity the pipeline relies on before the first frame.

use log::info;

use crate::config::ConfigError;
use crate::geometry::{Point3, Polygon, MAX_TEMPLATE_VERTS, MIN_POLY_VERTS};
use crate::math::Vec3;

/// Index into a scene's template table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TemplateId(pub usize);

/// A convex object in object-local space: a list of flat-colored polygons.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonTemplate {
    name: String,
    polygons: Vec<Polygon>,
}

impl PolygonTemplate {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        Self {
            name: name.into(),
            polygons,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

/// One placed instance of a template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub center: Point3,
    pub template: TemplateId,
}

impl SceneObject {
    pub fn new(center: Point3, template: TemplateId) -> Self {
        Self { center, template }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    templates: Vec<PolygonTemplate>,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template and returns the id objects use to refer to it.
    pub fn add_template(&mut self, template: PolygonTemplate) -> TemplateId {
        self.templates.push(template);
        TemplateId(self.templates.len() - 1)
    }

    pub fn add_object(&mut self, center: Point3, template: TemplateId) {
        self.objects.push(SceneObject::new(center, template));
    }

    pub fn templates(&self) -> &[PolygonTemplate] {
        &self.templates
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn template(&self, id: TemplateId) -> Option<&PolygonTemplate> {
        self.templates.get(id.0)
    }

    /// Total polygon count over all placed objects.
    pub fn polygon_count(&self) -> usize {
        self.objects
            .iter()
            .filter_map(|o| self.template(o.template))
            .map(|t| t.polygons().len())
            .sum()
    }

    /// Checks that every polygon fits the clipper's vertex budget and that
    /// every object refers to an existing template.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (t, template) in self.templates.iter().enumerate() {
            for (p, polygon) in template.polygons().iter().enumerate() {
                if !(MIN_POLY_VERTS..=MAX_TEMPLATE_VERTS).contains(&polygon.len()) {
                    return Err(ConfigError::PolygonArity {
                        template: t,
                        polygon: p,
                        vertices: polygon.len(),
                    });
                }
            }
        }

        for (o, object) in self.objects.iter().enumerate() {
            if self.template(object.template).is_none() {
                return Err(ConfigError::UnknownTemplate {
                    object: o,
                    template: object.template.0,
                });
            }
        }

        Ok(())
    }

    /// The demo world: twelve cubes scattered around the origin above a large
    /// floor tile.
    pub fn demo() -> Self {
        let mut scene = Self::new();
        let cube = scene.add_template(cube_template());
        let floor = scene.add_template(floor_template());

        for center in CUBE_CENTERS {
            scene.add_object(center, cube);
        }
        scene.add_object(FLOOR_CENTER, floor);

        info!(
            "demo scene: {} objects, {} polygons",
            scene.objects().len(),
            scene.polygon_count()
        );
        scene
    }
}

const CUBE_HALF_SIZE: f64 = 10.0;

const CUBE_CENTERS: [Vec3; 12] = [
    Vec3::new(-50.0, 0.0, 70.0),
    Vec3::new(0.0, 20.0, 70.0),
    Vec3::new(50.0, 0.0, 70.0),
    Vec3::new(-50.0, 0.0, -70.0),
    Vec3::new(0.0, 20.0, -70.0),
    Vec3::new(50.0, 30.0, -70.0),
    Vec3::new(-50.0, 15.0, 0.0),
    Vec3::new(50.0, 15.0, 0.0),
    Vec3::new(0.0, 50.0, 0.0),
    Vec3::new(-100.0, 100.0, 115.0),
    Vec3::new(-100.0, 150.0, 120.0),
    Vec3::new(100.0, 200.0, 100.0),
];

// The floor tile sits 9980 units above its center, so its world height is -20
const FLOOR_CENTER: Vec3 = Vec3::new(0.0, -10000.0, 0.0);
const FLOOR_LOCAL_HEIGHT: f64 = 9980.0;
const FLOOR_HALF_SIZE: f64 = 200.0;
const FLOOR_COLOR: u8 = 1;

/// An axis-aligned cube with a differently colored face on each side.
///
/// Faces are wound clockwise when seen from outside, in the order near (-Z),
/// right (+X), far (+Z), left (-X), top (+Y), bottom (-Y), with colors 15
/// down to 10.
pub fn cube_template() -> PolygonTemplate {
    let h = CUBE_HALF_SIZE;
    let v = |x: f64, y: f64, z: f64| Vec3::new(x * h, y * h, z * h);

    let faces: [(u8, [Point3; 4]); 6] = [
        (15, [v(-1., 1., -1.), v(1., 1., -1.), v(1., -1., -1.), v(-1., -1., -1.)]),
        (14, [v(1., 1., -1.), v(1., 1., 1.), v(1., -1., 1.), v(1., -1., -1.)]),
        (13, [v(1., 1., 1.), v(-1., 1., 1.), v(-1., -1., 1.), v(1., -1., 1.)]),
        (12, [v(-1., 1., 1.), v(-1., 1., -1.), v(-1., -1., -1.), v(-1., -1., 1.)]),
        (11, [v(-1., 1., -1.), v(-1., 1., 1.), v(1., 1., 1.), v(1., 1., -1.)]),
        (10, [v(-1., -1., -1.), v(1., -1., -1.), v(1., -1., 1.), v(-1., -1., 1.)]),
    ];

    PolygonTemplate::new(
        "cube",
        faces
            .iter()
            .map(|(color, verts)| Polygon::new(*color, verts))
            .collect(),
    )
}

/// A single upward-facing square, far below its object center.
pub fn floor_template() -> PolygonTemplate {
    let (h, y) = (FLOOR_HALF_SIZE, FLOOR_LOCAL_HEIGHT);
    PolygonTemplate::new(
        "floor",
        vec![Polygon::new(
            FLOOR_COLOR,
            &[
                Vec3::new(-h, y, -h),
                Vec3::new(-h, y, h),
                Vec3::new(h, y, h),
                Vec3::new(h, y, -h),
            ],
        )],
    )
}
