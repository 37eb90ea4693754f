//! Maps escape counts to palette indices.
//!
//! Index 0 of the palette is reserved for points classified as in-set;
//! escaped points cycle through the remaining colors.  With smooth
//! coloring enabled the raw integer count is first replaced by a
//! normalized-iteration-count estimate, which uses the escaped orbit's
//! magnitude to interpolate a fractional count and so removes the
//! banding that integer counts produce.

use escape::Escape;

/// Hard cap on the palette size.  A palette image wider than this is
/// truncated; the cap matters only for the modulo cycling, which gets
/// slower to perceive as palettes grow, not for correctness.
pub const MAX_COLORS: usize = 12_800;

/// An ordered sequence of RGB colors.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Builds a palette from an ordered list of RGB triples.  At least
    /// two colors are required, since index 0 is reserved for the set
    /// itself and the escape cycle needs something left to cycle
    /// through.  Anything past `MAX_COLORS` is dropped.
    pub fn new(mut colors: Vec<[u8; 3]>) -> Result<Palette, String> {
        if colors.len() < 2 {
            return Err(
                "A palette needs at least two colors: one for the set and one for everything else."
                    .to_string(),
            );
        }
        colors.truncate(MAX_COLORS);
        Ok(Palette { colors })
    }

    /// The number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for the conventional pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The RGB triple at `index`.
    pub fn color(&self, index: usize) -> [u8; 3] {
        self.colors[index]
    }
}

/// The escape-count → palette-index policy for one render.
///
/// Built once, before the pixel loop, which is also where the
/// configuration that would poison the smooth formula gets rejected.
#[derive(Copy, Clone, Debug)]
pub struct Coloring {
    smooth: bool,
    exponent: u32,
    num_colors: usize,
    max_iterations: u32,
}

impl Coloring {
    /// Validates and freezes the coloring configuration.
    ///
    /// Smooth coloring divides by `ln d`, so exponents below 2 are a
    /// configuration error here rather than a NaN at render time.
    pub fn new(
        smooth: bool,
        exponent: u32,
        num_colors: usize,
        max_iterations: u32,
    ) -> Result<Coloring, String> {
        if smooth && exponent < 2 {
            return Err(
                "Smooth coloring divides by ln(d) and needs an exponent of at least 2.".to_string(),
            );
        }
        if num_colors < 2 {
            return Err("The coloring cycle needs at least two colors.".to_string());
        }
        Ok(Coloring {
            smooth,
            exponent,
            num_colors,
            max_iterations,
        })
    }

    /// The palette index for one escape result.  0 exactly when the
    /// point never escaped.
    pub fn index(&self, escape: &Escape) -> usize {
        if escape.count == 0 {
            return 0;
        }

        let n = if self.smooth {
            // nic = n + (ln ln 81 - ln ln |z|) / ln d, rescaled from
            // iteration space into palette space.  Escaped orbits have
            // |z| > 2, keeping the inner logarithms defined.
            let nic = f64::from(escape.count)
                + ((81.0_f64).ln().ln() - escape.z.norm().ln().ln())
                    / f64::from(self.exponent).ln();
            (nic * self.num_colors as f64 / f64::from(self.max_iterations)) as i64
        } else {
            i64::from(escape.count)
        };

        // The Euclidean remainder keeps the cycle inside
        // [1, num_colors - 1] even when the smoothed count truncates
        // to zero or below, so escaped points can never collide with
        // the reserved in-set index.
        n.rem_euclid(self.num_colors as i64 - 1) as usize + 1
    }
}
