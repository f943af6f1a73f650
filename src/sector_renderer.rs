//! Sector walls as unfilled slabs (perspective) or a top-down outline.
//!
//! Camera-space X is depth and Y is lateral offset. A wall edge spans
//! `centre.y ± view_height / depth` vertically, and its column is
//! `centre.x + lateral * view_width / depth`.

use crate::camera::Camera;
use crate::display::{Colour, Display};
use crate::geometry::Point2F;
use crate::maths::{clamp_depth, map};
use crate::sector::{MAX_POINTS, Sector};
use crate::settings::RenderSettings;

/// Depth an endpoint behind the camera is pulled forward to.
const NEAR_DEPTH: f32 = 1.0;

/// Rows a slab edge may extend past the panel before it is cut.
const VLINE_OVERSCAN: f32 = 1.0;

/// Screen dimensions as the projection sees them.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Integer half-dimensions, as the panel addresses pixels.
    pub centre: Point2F,
}

impl Viewport {
    pub fn of<D: Display + ?Sized>(display: &D) -> Self {
        let (w, h) = (display.width(), display.height());
        Self {
            width: f32::from(w),
            height: f32::from(h),
            centre: Point2F::new(f32::from(w / 2), f32::from(h / 2)),
        }
    }
}

/// One projected wall endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabEdge {
    pub column: f32,
    pub top: f32,
    pub bottom: f32,
    pub half_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSlab {
    pub start: SlabEdge,
    pub end: SlabEdge,
}

/// Pulls `p`, an endpoint of edge `a -> b`, onto the edge's `depth = 1`
/// crossing when it is nearer than `epsilon` (at or behind the camera).
#[inline]
fn near_clip(p: Point2F, a: Point2F, b: Point2F, epsilon: f32) -> Point2F {
    if p.x >= epsilon {
        return p;
    }
    Point2F::new(NEAR_DEPTH, map(NEAR_DEPTH, a.x, b.x, a.y, b.y))
}

#[inline]
fn project_point(p: Point2F, viewport: &Viewport, epsilon: f32) -> SlabEdge {
    let depth = clamp_depth(p.x, epsilon);
    let screen_x = p.y * (viewport.width / depth);
    let half_height = viewport.height / depth;
    SlabEdge {
        column: viewport.centre.x + screen_x,
        top: viewport.centre.y - half_height,
        bottom: viewport.centre.y + half_height,
        half_height,
    }
}

/// Projects a camera-space edge `a -> b`. `None` when both endpoints are
/// nearer than `epsilon`, which counts as behind the camera.
pub fn project_edge(a: Point2F, b: Point2F, viewport: &Viewport, epsilon: f32) -> Option<WallSlab> {
    // NaN depths count as behind
    let ahead = |p: Point2F| p.x >= epsilon;
    if !ahead(a) && !ahead(b) {
        return None;
    }
    let start = near_clip(a, a, b, epsilon);
    let end = near_clip(b, a, b, epsilon);
    Some(WallSlab {
        start: project_point(start, viewport, epsilon),
        end: project_point(end, viewport, epsilon),
    })
}

/// Float to panel coordinate. Saturates; NaN becomes 0.
#[inline]
pub(crate) fn px(v: f32) -> i16 {
    v as i16
}

/// Start row and length of an edge's vertical line, cut to the panel so
/// tall slabs cannot overflow the `i16` length.
fn vline_span(edge: &SlabEdge, viewport: &Viewport) -> (i16, i16) {
    let top = px(edge.top.max(-VLINE_OVERSCAN));
    let bottom = px(edge.bottom.min(viewport.height + VLINE_OVERSCAN));
    (top, bottom.saturating_sub(top))
}

/// Draws every wall of `sector` as a slab silhouette, then the crosshair.
pub fn render_3d<D: Display + ?Sized>(
    display: &mut D,
    camera: &Camera,
    sector: &Sector<'_>,
    settings: &RenderSettings,
) {
    let transform = camera.transform();
    let mut transformed = [Point2F::default(); MAX_POINTS];
    for (slot, point) in transformed.iter_mut().zip(sector.points()) {
        *slot = transform.apply(point);
    }

    let viewport = Viewport::of(display);

    for (i, j) in sector.edges() {
        let a = transformed[usize::from(i)];
        let b = transformed[usize::from(j)];
        let Some(slab) = project_edge(a, b, &viewport, settings.depth_epsilon) else {
            continue;
        };
        let (s, e) = (slab.start, slab.end);

        display.draw_line(px(s.column), px(s.top), px(e.column), px(e.top));
        display.draw_line(px(s.column), px(s.bottom), px(e.column), px(e.bottom));
        for edge in [&s, &e] {
            let (top, length) = vline_span(edge, &viewport);
            display.draw_fast_vline(px(edge.column), top, length);
        }

        if settings.label_vertices {
            if let Some(point) = sector.raw_point(i) {
                let top = px(s.top);
                display.set_cursor(px(s.column), top.saturating_sub(8));
                display.print(format_args!("{}", point.x));
                display.set_cursor(px(s.column), top);
                display.print(format_args!("{}", point.y));
            }
        }
    }

    display.draw_pixel(
        px(viewport.centre.x),
        px(viewport.centre.y),
        Colour::White,
    );
}

/// Unrotated top-down outline centred on the camera, plus a heading tick.
pub fn render_2d<D: Display + ?Sized>(
    display: &mut D,
    camera: &Camera,
    sector: &Sector<'_>,
    settings: &RenderSettings,
) {
    let centre = Viewport::of(display).centre;

    let mut transformed = [Point2F::default(); MAX_POINTS];
    for (slot, point) in transformed.iter_mut().zip(sector.points()) {
        *slot = centre + (point - camera.position);
    }

    for (i, j) in sector.edges() {
        let a = transformed[usize::from(i)];
        let b = transformed[usize::from(j)];
        display.draw_line(px(a.x), px(a.y), px(b.x), px(b.y));
    }

    let end = centre + camera.direction() * settings.heading_length;
    display.draw_line(px(centre.x), px(centre.y), px(end.x), px(end.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::recording::{Call, RecordingDisplay};
    use crate::framebuffer::FrameBuffer;
    use crate::maths::DEPTH_EPSILON;
    use std::f32::consts::FRAC_PI_2;

    const SQUARE: [u8; 9] = [4, 10, 10, 10, 11, 11, 11, 11, 10];
    const EPS: f32 = 1e-3;

    fn viewport() -> Viewport {
        Viewport::of(&RecordingDisplay::new(128, 64))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn point_ahead_projects_to_centre_column() {
        let vp = viewport();
        for d in [0.5_f32, 1.0, 4.0, 64.0] {
            let edge = project_point(Point2F::new(d, 0.0), &vp, 1e-3);
            assert_eq!(edge.column, vp.centre.x);
        }
    }

    #[test]
    fn near_edge_of_square_is_symmetric_slab() {
        let camera = Camera::new(Point2F::new(10.0, 15.0), -FRAC_PI_2);
        let a = camera.world_to_camera(Point2F::new(10.0, 11.0));
        let b = camera.world_to_camera(Point2F::new(11.0, 11.0));
        assert!(close(a.x, 4.0) && close(b.x, 4.0));

        let slab = project_edge(a, b, &viewport(), 1e-3).unwrap();
        for edge in [slab.start, slab.end] {
            assert!(close(edge.half_height, 64.0 / 4.0));
            assert!(close(edge.top + edge.bottom, 64.0));
        }
        assert!(close(slab.start.column, 64.0));
        assert!(close(slab.end.column, 64.0 + 128.0 / 4.0));
    }

    #[test]
    fn farther_walls_are_shorter() {
        let vp = viewport();
        let near = project_point(Point2F::new(2.0, 0.0), &vp, 1e-3);
        let far = project_point(Point2F::new(8.0, 0.0), &vp, 1e-3);
        assert!(far.half_height < near.half_height);
        assert!(close(near.half_height, 32.0));
        assert!(close(far.half_height, 8.0));
    }

    #[test]
    fn behind_camera_edge_is_rejected() {
        let vp = viewport();
        assert!(project_edge(Point2F::new(0.0, 1.0), Point2F::new(-3.0, 2.0), &vp, 1e-3).is_none());
    }

    #[test]
    fn behind_endpoint_is_clipped_to_unit_depth() {
        let vp = viewport();
        let slab = project_edge(Point2F::new(-1.0, 0.0), Point2F::new(3.0, 4.0), &vp, 1e-3).unwrap();
        // lateral at depth 1 along the edge is 2
        assert!(close(slab.start.half_height, vp.height));
        assert!(close(slab.start.column, vp.centre.x + 2.0 * vp.width));
        assert!(close(slab.end.half_height, vp.height / 3.0));
    }

    #[test]
    fn endpoint_nearer_than_epsilon_is_clipped_like_behind() {
        let vp = viewport();
        let epsilon = 0.01;
        let slab = project_edge(Point2F::new(0.005, 0.5), Point2F::new(2.0, 0.0), &vp, epsilon).unwrap();
        assert!(slab.start.half_height.is_finite());
        assert!(close(slab.start.half_height, vp.height));
        // lateral at depth 1 along the edge
        let lateral = map(1.0, 0.005, 2.0, 0.5, 0.0);
        assert!((slab.start.column - (vp.centre.x + lateral * vp.width)).abs() < 0.01);
        assert!(close(slab.end.half_height, vp.height / 2.0));
    }

    #[test]
    fn edge_entirely_inside_epsilon_is_rejected() {
        let vp = viewport();
        let epsilon = 0.01;
        assert!(project_edge(Point2F::new(0.005, 0.5), Point2F::new(1e-9, -2.0), &vp, epsilon).is_none());
        assert!(project_edge(Point2F::new(f32::NAN, 0.0), Point2F::new(-1.0, 1.0), &vp, epsilon).is_none());
    }

    #[test]
    fn very_near_wall_fills_its_column() {
        // one endpoint just past the default epsilon, the other well ahead
        let mut fb = FrameBuffer::new();
        let vp = Viewport::of(&fb);
        let a = Point2F::new(0.0015, 0.0);
        let b = Point2F::new(2.0, 1.0);
        let slab = project_edge(a, b, &vp, DEPTH_EPSILON).unwrap();
        assert!(slab.start.half_height > 32_000.0);

        let (top, length) = vline_span(&slab.start, &vp);
        fb.draw_fast_vline(px(slab.start.column), top, length);
        let lit = (0..64).filter(|&y| fb.pixel(64, y)).count();
        assert_eq!(lit, 64);
    }

    #[test]
    fn vline_span_matches_slab_when_on_screen() {
        let vp = viewport();
        let edge = project_point(Point2F::new(4.0, 0.0), &vp, 1e-3);
        assert_eq!(vline_span(&edge, &vp), (16, 32));
    }

    #[test]
    fn render_3d_draws_four_primitives_per_visible_edge() {
        let sector = Sector::from_bytes(&SQUARE).unwrap();
        let camera = Camera::new(Point2F::new(10.0, 15.0), -FRAC_PI_2);
        let mut display = RecordingDisplay::new(128, 64);
        render_3d(&mut display, &camera, &sector, &RenderSettings::default());

        // all four walls are in front of the camera
        assert_eq!(display.lines().len(), 8);
        let vlines = display
            .calls
            .iter()
            .filter(|c| matches!(c, Call::VLine(..)))
            .count();
        assert_eq!(vlines, 8);
        assert_eq!(display.calls.last(), Some(&Call::Pixel(64, 32, Colour::White)));
    }

    #[test]
    fn sector_behind_camera_only_draws_crosshair() {
        let sector = Sector::from_bytes(&SQUARE).unwrap();
        // looking away from the square
        let camera = Camera::new(Point2F::new(10.0, 15.0), FRAC_PI_2);
        let mut display = RecordingDisplay::new(128, 64);
        render_3d(&mut display, &camera, &sector, &RenderSettings::default());
        assert_eq!(display.calls, vec![Call::Pixel(64, 32, Colour::White)]);
    }

    #[test]
    fn handles_every_point_count() {
        let camera = Camera::new(Point2F::new(0.0, 0.0), 0.0);
        for count in 0..=Sector::MAX_POINTS as u8 {
            let mut data = vec![count];
            for k in 0..count {
                data.extend([20 + k, 3 * k]);
            }
            let sector = Sector::from_bytes(&data).unwrap();

            let mut display = RecordingDisplay::new(128, 64);
            render_3d(&mut display, &camera, &sector, &RenderSettings::default());
            assert_eq!(display.calls.len(), 4 * usize::from(count) + 1);

            let mut display = RecordingDisplay::new(128, 64);
            render_2d(&mut display, &camera, &sector, &RenderSettings::default());
            assert_eq!(display.lines().len(), usize::from(count) + 1);
        }
    }

    #[test]
    fn labels_print_start_vertex() {
        let sector = Sector::from_bytes(&SQUARE).unwrap();
        let camera = Camera::new(Point2F::new(10.0, 15.0), -FRAC_PI_2);
        let settings = RenderSettings {
            label_vertices: true,
            ..RenderSettings::default()
        };
        let mut display = RecordingDisplay::new(128, 64);
        render_3d(&mut display, &camera, &sector, &settings);

        let prints: Vec<_> = display
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(prints.len(), 8);
        assert_eq!(&prints[..2], &["10", "10"]);
    }

    #[test]
    fn overhead_outline_is_translated_only() {
        let sector = Sector::from_bytes(&SQUARE).unwrap();
        let camera = Camera::new(Point2F::new(10.0, 10.0), 0.0);
        let mut display = RecordingDisplay::new(128, 64);
        render_2d(&mut display, &camera, &sector, &RenderSettings::default());

        let lines = display.lines();
        assert_eq!(lines[0], (64, 32, 64, 33));
        assert_eq!(lines[1], (64, 33, 65, 33));
        assert_eq!(lines[3], (65, 32, 64, 32));
        // heading tick along +X
        assert_eq!(lines[4], (64, 32, 68, 32));
    }
}
