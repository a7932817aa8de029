//! Off-screen rendering of a sampled surface.
//!
//! The renderer rasterizes the triangulated grid with an orthographic camera
//! and a depth buffer, colors each fragment by height with a viridis-style
//! ramp, and shades it with two-sided diffuse lighting (the strip has no
//! consistent outside). The result is an [`image::RgbImage`].
//!
//! # Example
//!
//! ```no_run
//! use mobius::render::{render_to_file, RenderOptions};
//! use mobius::strip::MobiusStrip;
//!
//! let strip = MobiusStrip::new(1.0, 0.5, 60).unwrap();
//! render_to_file(strip.mesh(), &RenderOptions::default(), "mobius.png").unwrap();
//! ```

use std::path::Path;

use image::{Rgb, RgbImage};
use nalgebra::{Point2, Vector3};

use crate::error::{MobiusError, Result};
use crate::mesh::GridMesh;

/// Samples of the viridis colormap, evenly spaced over `[0, 1]`.
const VIRIDIS: [[f64; 3]; 9] = [
    [0.267, 0.005, 0.329],
    [0.283, 0.141, 0.458],
    [0.254, 0.265, 0.530],
    [0.207, 0.372, 0.553],
    [0.164, 0.471, 0.558],
    [0.128, 0.567, 0.551],
    [0.135, 0.659, 0.518],
    [0.267, 0.749, 0.441],
    [0.993, 0.906, 0.144],
];

/// Camera and output settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Camera elevation above the xy-plane, in degrees.
    pub elevation: f64,
    /// Camera azimuth around the z-axis, in degrees.
    pub azimuth: f64,
    /// Fraction of the image left empty on each side.
    pub margin: f64,
    /// Background color.
    pub background: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            elevation: 20.0,
            azimuth: 45.0,
            margin: 0.05,
            background: [255, 255, 255],
        }
    }
}

impl RenderOptions {
    /// Set the output size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the camera direction in degrees.
    pub fn with_view(mut self, elevation: f64, azimuth: f64) -> Self {
        self.elevation = elevation;
        self.azimuth = azimuth;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(MobiusError::invalid_param("width", self.width, "must be positive"));
        }
        if self.height == 0 {
            return Err(MobiusError::invalid_param("height", self.height, "must be positive"));
        }
        if !self.elevation.is_finite() {
            return Err(MobiusError::invalid_param("elevation", self.elevation, "must be finite"));
        }
        if !self.azimuth.is_finite() {
            return Err(MobiusError::invalid_param("azimuth", self.azimuth, "must be finite"));
        }
        if !(0.0..0.5).contains(&self.margin) {
            return Err(MobiusError::invalid_param("margin", self.margin, "must be in [0, 0.5)"));
        }
        Ok(())
    }
}

/// Orthonormal view basis: screen right, screen up, toward the viewer.
struct Camera {
    right: Vector3<f64>,
    up: Vector3<f64>,
    forward: Vector3<f64>,
}

impl Camera {
    fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let (se, ce) = elevation_deg.to_radians().sin_cos();
        let (sa, ca) = azimuth_deg.to_radians().sin_cos();
        Self {
            right: Vector3::new(-sa, ca, 0.0),
            up: Vector3::new(-se * ca, -se * sa, ce),
            forward: Vector3::new(ce * ca, ce * sa, se),
        }
    }
}

/// Render the mesh to an RGB image.
pub fn render(mesh: &GridMesh, options: &RenderOptions) -> Result<RgbImage> {
    options.validate()?;

    let (w, h) = (options.width, options.height);
    let mut image = RgbImage::from_pixel(w, h, Rgb(options.background));

    let (vertices, faces) = mesh.triangulate();
    if faces.is_empty() {
        return Ok(image);
    }

    let camera = Camera::new(options.elevation, options.azimuth);
    let screen: Vec<(Point2<f64>, f64)> = vertices
        .iter()
        .map(|p| {
            let c = p.coords;
            (Point2::new(c.dot(&camera.right), c.dot(&camera.up)), c.dot(&camera.forward))
        })
        .collect();

    // Fit the projected extent into the image with a uniform scale.
    let (mut lo, mut hi) = (Point2::new(f64::MAX, f64::MAX), Point2::new(f64::MIN, f64::MIN));
    for (s, _) in &screen {
        lo = lo.inf(s);
        hi = hi.sup(s);
    }
    let usable_w = w as f64 * (1.0 - 2.0 * options.margin);
    let usable_h = h as f64 * (1.0 - 2.0 * options.margin);
    let extent = hi - lo;
    let scale = (usable_w / extent.x.max(f64::EPSILON)).min(usable_h / extent.y.max(f64::EPSILON));
    let center = nalgebra::center(&lo, &hi);
    let to_pixel = |s: &Point2<f64>| {
        Point2::new(
            0.5 * w as f64 + (s.x - center.x) * scale,
            0.5 * h as f64 - (s.y - center.y) * scale,
        )
    };
    let pixels: Vec<Point2<f64>> = screen.iter().map(|(s, _)| to_pixel(s)).collect();

    let Some((bbox_min, bbox_max)) = mesh.bounding_box() else {
        return Ok(image);
    };
    let (z_min, z_span) = (bbox_min.z, bbox_max.z - bbox_min.z);
    let mut depth = vec![f64::NEG_INFINITY; (w as usize) * (h as usize)];

    for f in &faces {
        let [a, b, c] = *f;
        let normal = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
        let Some(normal) = normal.try_normalize(f64::EPSILON) else {
            continue;
        };
        let light = 0.35 + 0.65 * normal.dot(&camera.forward).abs();

        let (pa, pb, pc) = (pixels[a], pixels[b], pixels[c]);
        let area = edge(&pa, &pb, &pc);
        if area.abs() < 1e-12 {
            continue;
        }

        let x0 = pa.x.min(pb.x).min(pc.x).floor().max(0.0) as u32;
        let y0 = pa.y.min(pb.y).min(pc.y).floor().max(0.0) as u32;
        let x1 = (pa.x.max(pb.x).max(pc.x).ceil() as u32).min(w - 1);
        let y1 = (pa.y.max(pb.y).max(pc.y).ceil() as u32).min(h - 1);

        for py in y0..=y1 {
            for px in x0..=x1 {
                let p = Point2::new(px as f64 + 0.5, py as f64 + 0.5);
                let wa = edge(&pb, &pc, &p) / area;
                let wb = edge(&pc, &pa, &p) / area;
                let wc = edge(&pa, &pb, &p) / area;
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }

                let d = wa * screen[a].1 + wb * screen[b].1 + wc * screen[c].1;
                let slot = &mut depth[py as usize * w as usize + px as usize];
                if d <= *slot {
                    continue;
                }
                *slot = d;

                let z = wa * vertices[a].z + wb * vertices[b].z + wc * vertices[c].z;
                let t = if z_span > 0.0 { (z - z_min) / z_span } else { 0.5 };
                image.put_pixel(px, py, shade(colormap(t), light));
            }
        }
    }

    Ok(image)
}

/// Render the mesh and write it to `path`; the image format follows the extension.
pub fn render_to_file<P: AsRef<Path>>(
    mesh: &GridMesh,
    options: &RenderOptions,
    path: P,
) -> Result<()> {
    let image = render(mesh, options)?;
    image.save(path.as_ref())?;
    tracing::info!(path = %path.as_ref().display(), width = options.width, height = options.height, "rendered strip");
    Ok(())
}

/// Twice the signed area of `(a, b, p)`.
#[inline]
fn edge(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Linear interpolation in [`VIRIDIS`]; `t` is clamped to `[0, 1]`.
fn colormap(t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let i = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let f = t - i as f64;
    let (c0, c1) = (VIRIDIS[i], VIRIDIS[i + 1]);
    [
        c0[0] + f * (c1[0] - c0[0]),
        c0[1] + f * (c1[1] - c0[1]),
        c0[2] + f * (c1[2] - c0[2]),
    ]
}

fn shade(rgb: [f64; 3], light: f64) -> Rgb<u8> {
    let channel = |c: f64| (c * light * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([channel(rgb[0]), channel(rgb[1]), channel(rgb[2])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::StripParams;

    fn strip_mesh() -> GridMesh {
        GridMesh::sample(&StripParams::new(1.0, 0.5), 40).unwrap()
    }

    fn covered(image: &RgbImage, background: [u8; 3]) -> usize {
        image.pixels().filter(|p| p.0 != background).count()
    }

    #[test]
    fn test_render_dimensions_and_coverage() {
        let opts = RenderOptions::default().with_size(200, 150);
        let image = render(&strip_mesh(), &opts).unwrap();
        assert_eq!(image.dimensions(), (200, 150));

        // Corners stay background thanks to the margin.
        assert_eq!(image.get_pixel(0, 0).0, opts.background);
        assert_eq!(image.get_pixel(199, 149).0, opts.background);

        let total = 200 * 150;
        let drawn = covered(&image, opts.background);
        assert!(drawn > total / 20, "only {drawn} pixels drawn");
        assert!(drawn < total, "strip should not fill the frame");
    }

    #[test]
    fn test_top_view_leaves_hole_open() {
        // Looking straight down, the center of the ring is empty.
        let opts = RenderOptions::default()
            .with_size(101, 101)
            .with_view(90.0, 0.0)
            .with_background([0, 0, 0]);
        let image = render(&strip_mesh(), &opts).unwrap();
        assert_eq!(image.get_pixel(50, 50).0, [0, 0, 0]);
        assert!(covered(&image, [0, 0, 0]) > 0);
    }

    #[test]
    fn test_render_rejects_bad_options() {
        let mesh = strip_mesh();
        let err = render(&mesh, &RenderOptions::default().with_size(0, 10)).unwrap_err();
        assert!(err.is_invalid_parameter());
        let err = render(&mesh, &RenderOptions::default().with_view(f64::NAN, 0.0)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_render_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        let opts = RenderOptions::default().with_size(64, 48);
        render_to_file(&strip_mesh(), &opts, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_colormap_endpoints() {
        let close = |a: [f64; 3], b: [f64; 3]| a.iter().zip(&b).all(|(x, y)| (x - y).abs() < 1e-12);
        assert!(close(colormap(0.0), VIRIDIS[0]));
        assert!(close(colormap(1.0), VIRIDIS[VIRIDIS.len() - 1]));
        assert!(close(colormap(-3.0), VIRIDIS[0]));
        assert!(close(colormap(7.5), VIRIDIS[VIRIDIS.len() - 1]));
    }
}
