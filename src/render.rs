// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel loop.
//!
//! Walks the raster, classifies the point under each pixel, and
//! resolves the escape count to an RGB color.  Every pixel is an
//! independent pure function of its coordinate, so the threaded
//! variant just hands disjoint row bands of the output buffer to
//! scoped workers; there is nothing to lock.

extern crate crossbeam;

use itertools::iproduct;

use coloring::{Coloring, Palette};
use escape::Fractal;
use params::RenderJob;
use viewport::Viewport;

/// Renders one job: a viewport, a map, and a coloring policy over a
/// fixed palette.
pub struct Renderer {
    viewport: Viewport,
    fractal: Fractal,
    exponent: u32,
    max_iterations: u32,
    coloring: Coloring,
    palette: Palette,
}

impl Renderer {
    /// Binds a parsed job to a loaded palette.  Fails when the
    /// viewport is degenerate or the coloring configuration is
    /// invalid (a smooth request with an exponent below 2, or a
    /// palette too small to cycle).
    pub fn new(job: &RenderJob, palette: Palette) -> Result<Renderer, String> {
        let viewport = Viewport::new(job.center, job.zoom, job.aspect, job.width)?;
        let coloring = Coloring::new(job.smooth, job.exponent, palette.len(), job.max_iterations)?;
        Ok(Renderer {
            viewport,
            fractal: job.fractal,
            exponent: job.exponent,
            max_iterations: job.max_iterations,
            coloring,
            palette,
        })
    }

    /// Width of the output raster in pixels.
    pub fn width(&self) -> usize {
        self.viewport.width()
    }

    /// Height of the output raster in pixels.
    pub fn height(&self) -> usize {
        self.viewport.height()
    }

    fn pixel(&self, column: usize, row: usize) -> [u8; 3] {
        let z = self.viewport.pixel_to_point(column, row);
        let escape = self.fractal.escape_time(z, self.exponent, self.max_iterations);
        self.palette.color(self.coloring.index(&escape))
    }

    /// Renders the whole raster into a row-major RGB buffer, three
    /// bytes per pixel.
    pub fn render(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.viewport.len() * 3);
        for (row, column) in iproduct!(0..self.viewport.height(), 0..self.viewport.width()) {
            pixels.extend_from_slice(&self.pixel(column, row));
        }
        pixels
    }

    /// Renders with `threads` workers, each owning a band of whole
    /// rows.  Output is identical to `render`.
    pub fn render_threaded(&self, threads: usize) -> Vec<u8> {
        let mut pixels = vec![0 as u8; self.viewport.len() * 3];
        let row_bytes = self.viewport.width() * 3;
        let band_rows = self.viewport.height() / threads + 1;
        {
            let bands: Vec<(usize, &mut [u8])> =
                pixels.chunks_mut(band_rows * row_bytes).enumerate().collect();
            crossbeam::scope(|spawner| {
                for (band_index, band) in bands {
                    spawner.spawn(move |_| {
                        let top = band_index * band_rows;
                        for (i, pixel) in band.chunks_mut(3).enumerate() {
                            let row = top + i / self.viewport.width();
                            let column = i % self.viewport.width();
                            pixel.copy_from_slice(&self.pixel(column, row));
                        }
                    });
                }
            })
            .unwrap();
        }
        pixels
    }
}
