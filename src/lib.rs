#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Multibrot renderer
//!
//! An escape-time fractal takes a point on the complex plane and
//! feeds it through an iterated map, measuring how quickly the orbit
//! of that point goes to infinity.  Points whose orbits never leave a
//! fixed radius are members of the set and painted with a reserved
//! color; for everything else the iteration count at which the orbit
//! escaped picks a color from a palette, cycling when the palette is
//! shorter than the iteration bound.
//!
//! Five maps are supported: the multibrot (`z^d + c`, the Mandelbrot
//! set when `d` is 2), the Julia set (`z^d + K` for a constant `K`),
//! the burning ship (real and imaginary parts folded positive before
//! each power), the multibrot of the inverted plane (`(1/z)^d + 1/c`),
//! and a continuous extension of the Collatz map.  Raising `z` to an
//! integer power is done by direct binomial expansion rather than
//! repeated multiplication; see the `zpow` module.
//!
//! Iteration counts quantize harshly, so each map also supports a
//! smooth ("normalized iteration count") coloring mode that uses the
//! escaped orbit's magnitude to interpolate a fractional count before
//! the palette lookup.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
extern crate num;

pub mod coloring;
pub mod escape;
pub mod params;
pub mod render;
pub mod viewport;
pub mod zpow;

pub use coloring::{Coloring, Palette, MAX_COLORS};
pub use escape::{Escape, Fractal};
pub use params::{ParamError, RenderJob};
pub use render::Renderer;
pub use viewport::Viewport;
pub use zpow::{z_pow, MAX_EXPONENT};
