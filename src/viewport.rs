//! Maps pixels of the output raster to points on the complex plane.
//!
//! The viewport is described the way the parameter file describes it:
//! a center, a zoom level (the half-width of the visible region), and
//! a width:height aspect ratio.  The raster's height falls out of the
//! aspect ratio and the per-pixel step rather than being specified.

use num::Complex;

/// Converts a center/zoom/aspect viewport description into per-pixel
/// complex coordinates.
#[derive(Debug)]
pub struct Viewport {
    width: usize,
    height: usize,
    origin: Complex<f64>,
    step: f64,
}

impl Viewport {
    /// Constructor.  Validates the description and precomputes the
    /// sampling grid; fails on viewports that would contain no pixels.
    pub fn new(
        center: Complex<f64>,
        zoom: f64,
        aspect: f64,
        width: usize,
    ) -> Result<Viewport, String> {
        if width == 0 {
            return Err("The output image must be at least one pixel wide.".to_string());
        }
        if zoom <= 0.0 {
            return Err("The zoom level must be positive.".to_string());
        }
        if aspect <= 0.0 {
            return Err("The aspect ratio must be positive.".to_string());
        }

        // Raster rows grow downward, so flip the imaginary axis to
        // keep +im at the top of the image.
        let center = Complex::new(center.re, -center.im);

        let xmin = center.re - zoom;
        let xmax = center.re + zoom;
        let ymin = center.im - zoom / aspect;
        let ymax = center.im + zoom / aspect;

        let step = (xmax - xmin) / (width as f64);
        let height = ((ymax - ymin) / step) as usize;
        if height == 0 {
            return Err("The aspect ratio leaves no room for a single row of pixels.".to_string());
        }

        // Sample each pixel at its center rather than its corner.
        Ok(Viewport {
            width,
            height,
            origin: Complex::new(xmin + step / 2.0, ymin + step / 2.0),
            step,
        })
    }

    /// Width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the raster in pixels, derived from the aspect ratio.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels.  Used to size output buffers.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false by construction; the conventional companion to
    /// `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The complex coordinate sampled for the pixel at
    /// `(column, row)`.
    pub fn pixel_to_point(&self, column: usize, row: usize) -> Complex<f64> {
        Complex::new(
            self.origin.re + (column as f64) * self.step,
            self.origin.im + (row as f64) * self.step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_shapes() {
        let center = Complex::new(0.0, 0.0);
        assert!(Viewport::new(center, 2.0, 1.0, 0).is_err());
        assert!(Viewport::new(center, 0.0, 1.0, 64).is_err());
        assert!(Viewport::new(center, -1.0, 1.0, 64).is_err());
        assert!(Viewport::new(center, 2.0, 0.0, 64).is_err());
        assert!(Viewport::new(center, 2.0, -4.0, 64).is_err());
        // An aspect ratio wider than the image leaves no rows at all.
        assert!(Viewport::new(center, 2.0, 1000.0, 4).is_err());
    }

    #[test]
    fn single_pixel_viewport_samples_the_center() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 2.0, 1.0, 1).unwrap();
        assert_eq!(vp.width(), 1);
        assert_eq!(vp.height(), 1);
        assert_eq!(vp.pixel_to_point(0, 0), Complex::new(0.0, 0.0));
    }

    #[test]
    fn square_viewport_derives_a_square_raster() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 2.0, 1.0, 64).unwrap();
        println!("{:?}", vp);
        assert_eq!(vp.height(), 64);
        assert_eq!(vp.len(), 64 * 64);
    }

    #[test]
    fn aspect_ratio_shrinks_the_height() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 2.0, 2.0, 4).unwrap();
        assert_eq!(vp.height(), 2);
        assert_eq!(vp.pixel_to_point(0, 0), Complex::new(-1.5, -0.5));
        assert_eq!(vp.pixel_to_point(3, 1), Complex::new(1.5, 0.5));
    }

    #[test]
    fn imaginary_axis_is_flipped_for_raster_order() {
        // A center above the real axis lands below it internally, so
        // the top raster row holds the most-positive imaginary values
        // once the flip in the output convention is accounted for.
        let vp = Viewport::new(Complex::new(0.0, 1.0), 2.0, 2.0, 4).unwrap();
        assert_eq!(vp.pixel_to_point(0, 0).im, -1.5);
        assert_eq!(vp.pixel_to_point(0, 1).im, -0.5);
    }

    #[test]
    fn pixel_centers_sit_half_a_step_inside_the_bounds() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 2.0, 1.0, 4).unwrap();
        assert_eq!(vp.pixel_to_point(0, 0), Complex::new(-1.5, -1.5));
        assert_eq!(vp.pixel_to_point(3, 3), Complex::new(1.5, 1.5));
    }
}
