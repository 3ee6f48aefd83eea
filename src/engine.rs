//! Core rendering engine.
//!
//! The [`Engine`] owns the camera, the frame buffer and the per-frame scratch
//! storage, and borrows nothing: the scene is moved in at construction and is
//! never mutated afterwards. Each call to [`Engine::render_frame`] runs the
//! whole pipeline for one frame:
//!
//! 1. update the camera from this frame's controls
//! 2. clear the frame buffer to the background index
//! 3. rebuild projection and frustum ([`FrameContext`])
//! 4. sort objects back to front
//! 5. per polygon: place, cull, clip, move to view space, project, rasterize

use std::fmt;

use log::{info, trace, warn};

use crate::camera::{Basis, Camera, Control};
use crate::clipper::Frustum;
use crate::config::{ConfigError, RenderConfig};
use crate::culling::faces_viewer;
use crate::math::Vec3;
use crate::projection::Projection;
use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer};
use crate::scene::Scene;
use crate::sorting::{depth_sort_into, DepthEntry};

/// Receives each finished frame.
///
/// The frame is lent immutably, so the engine cannot draw into it until
/// `present` returns.
pub trait Presenter {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), String>;
}

/// Everything derived from the camera once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub eye: Vec3,
    pub basis: Basis,
    pub projection: Projection,
    pub frustum: Frustum,
}

impl FrameContext {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let projection = Projection::new(width, height, camera.field_of_view());
        Self {
            eye: camera.position(),
            basis: *camera.basis(),
            projection,
            frustum: Frustum::new(camera, &projection),
        }
    }

    /// Transforms a world-space point into view space.
    #[inline]
    pub fn to_view(&self, point: Vec3) -> Vec3 {
        self.basis.rotate(point - self.eye)
    }
}

/// Per-frame pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects: usize,
    /// Polygons that entered the pipeline.
    pub polygons: usize,
    pub culled: usize,
    /// Polygons rejected by the frustum.
    pub clipped: usize,
    pub drawn: usize,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} objects, {} polygons: {} culled, {} clipped, {} drawn",
            self.objects, self.polygons, self.culled, self.clipped, self.drawn
        )
    }
}

pub struct Engine {
    config: RenderConfig,
    scene: Scene,
    camera: Camera,
    framebuffer: FrameBuffer,
    rasterizer: ScanlineRasterizer,
    draw_order: Vec<DepthEntry>,
}

impl Engine {
    /// Validates `config` and `scene` and allocates the frame buffer.
    ///
    /// The camera starts at the origin looking along +Z.
    pub fn new(config: RenderConfig, scene: Scene) -> Result<Self, ConfigError> {
        config.validate()?;
        scene.validate()?;
        let framebuffer = FrameBuffer::new(config.width, config.height)?;

        info!(
            "engine ready: {}x{}, fov {}, {} objects",
            config.width,
            config.height,
            config.field_of_view,
            scene.objects().len()
        );

        Ok(Self {
            camera: Camera::default().with_field_of_view(config.field_of_view),
            draw_order: Vec::with_capacity(scene.objects().len()),
            rasterizer: ScanlineRasterizer::new(),
            framebuffer,
            scene,
            config,
        })
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advances the camera and draws one frame into the frame buffer.
    pub fn render_frame(&mut self, controls: &[Control]) -> FrameStats {
        self.camera.update(controls);
        self.framebuffer.clear(self.config.background);

        let ctx = FrameContext::new(
            &self.camera,
            self.framebuffer.width(),
            self.framebuffer.height(),
        );

        depth_sort_into(self.scene.objects(), ctx.eye, &mut self.draw_order);

        let mut stats = FrameStats {
            objects: self.draw_order.len(),
            ..FrameStats::default()
        };

        for entry in &self.draw_order {
            let Some(object) = self.scene.objects().get(entry.index) else {
                continue;
            };
            let Some(template) = self.scene.template(object.template) else {
                continue;
            };

            for polygon in template.polygons() {
                stats.polygons += 1;

                let placed = polygon.translated(object.center);
                if !faces_viewer(&placed, ctx.eye) {
                    stats.culled += 1;
                    continue;
                }

                let Some(clipped) = ctx.frustum.clip(&placed) else {
                    stats.clipped += 1;
                    continue;
                };

                let view = clipped.map_vertices(|v| ctx.to_view(v));
                let screen = ctx.projection.project(&view);
                self.rasterizer.fill_polygon(&screen, &mut self.framebuffer);
                stats.drawn += 1;
            }
        }

        trace!("frame: {stats}");
        stats
    }

    /// Renders one frame and hands it to `presenter`.
    pub fn run_frame<P: Presenter>(
        &mut self,
        controls: &[Control],
        presenter: &mut P,
    ) -> Result<FrameStats, String> {
        let stats = self.render_frame(controls);
        presenter.present(&self.framebuffer)?;
        Ok(stats)
    }

    /// Resizes the frame buffer. Projection follows on the next frame.
    ///
    /// An invalid size is rejected and the current size is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        match self.framebuffer.resize(width, height) {
            Ok(()) => {
                self.framebuffer.clear(self.config.background);
                self.config.width = width;
                self.config.height = height;
                info!("resized to {width}x{height}");
                Ok(())
            }
            Err(e) => {
                warn!("ignoring resize to {width}x{height}: {e}");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}
