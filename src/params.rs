//! Render-job parameter files.
//!
//! A job is one small text file of whitespace-separated fields,
//! conventionally one per line, in this order:
//!
//! ```text
//! exponent        degree of the iterated power map
//! center x
//! center y
//! zoom            half-width of the viewport
//! aspect          width:height ratio
//! width           horizontal size of the output in pixels
//! iterations      iteration bound
//! output          name of the output image (include the extension)
//! palette         name of the palette image (include the extension)
//! fractal         m - multibrot        j - Julia
//!                 s - burning ship     u - multibrot inversion
//!                 c - Collatz
//!                 a capital letter turns on smooth coloring
//! Re(K) Im(K)     the Julia constant, for j/J only
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use failure::Error;
use num::Complex;

use escape::Fractal;
use zpow::MAX_EXPONENT;

/// Everything the driver needs to render one image.
#[derive(Debug)]
pub struct RenderJob {
    /// Degree of the iterated power map.
    pub exponent: u32,
    /// Center of the viewport.
    pub center: Complex<f64>,
    /// Half-width of the viewport.
    pub zoom: f64,
    /// Width:height ratio of the viewport.
    pub aspect: f64,
    /// Horizontal size of the output raster, in pixels.
    pub width: usize,
    /// Iteration bound for the escape loops.
    pub max_iterations: u32,
    /// Path the output image is written to.
    pub output: String,
    /// Path of the palette image.
    pub palette: String,
    /// Which map classifies the points.
    pub fractal: Fractal,
    /// Smooth (normalized iteration count) coloring.
    pub smooth: bool,
}

/// What can go wrong while reading a parameter file.
#[derive(Debug, Fail)]
pub enum ParamError {
    /// The file ran out of tokens before all fields were read.
    #[fail(display = "the parameter file ended before the {} field", _0)]
    Missing(&'static str),
    /// A field was present but would not parse.
    #[fail(display = "could not parse the {} field {:?}", _0, _1)]
    Invalid(&'static str, String),
    /// A field that must be positive was zero or negative.
    #[fail(display = "the {} field must be positive", _0)]
    NotPositive(&'static str),
    /// The exponent exceeds what the binomial expansion can compute.
    #[fail(display = "the exponent field must be at most {}", _0)]
    ExponentTooLarge(u32),
    /// The fractal letter was not one of m, j, s, u, or c.
    #[fail(display = "unknown fractal letter {:?} (expected m, j, s, u, or c)", _0)]
    UnknownFractal(String),
}

fn field<'a, T, I>(tokens: &mut I, name: &'static str) -> Result<T, ParamError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let raw = tokens.next().ok_or(ParamError::Missing(name))?;
    T::from_str(raw).map_err(|_| ParamError::Invalid(name, raw.to_string()))
}

impl FromStr for RenderJob {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<RenderJob, ParamError> {
        let mut tokens = s.split_whitespace();

        let exponent: u32 = field(&mut tokens, "exponent")?;
        if exponent > MAX_EXPONENT {
            return Err(ParamError::ExponentTooLarge(MAX_EXPONENT));
        }

        let center = Complex::new(
            field(&mut tokens, "center x")?,
            field(&mut tokens, "center y")?,
        );

        let zoom: f64 = field(&mut tokens, "zoom")?;
        if zoom <= 0.0 {
            return Err(ParamError::NotPositive("zoom"));
        }

        let aspect: f64 = field(&mut tokens, "aspect")?;
        if aspect <= 0.0 {
            return Err(ParamError::NotPositive("aspect"));
        }

        let width: usize = field(&mut tokens, "width")?;
        if width == 0 {
            return Err(ParamError::NotPositive("width"));
        }

        let max_iterations: u32 = field(&mut tokens, "iterations")?;
        if max_iterations == 0 {
            return Err(ParamError::NotPositive("iterations"));
        }

        let output: String = field(&mut tokens, "output")?;
        let palette: String = field(&mut tokens, "palette")?;

        let letter = tokens.next().ok_or(ParamError::Missing("fractal"))?;
        let smooth = letter.chars().all(|c| c.is_uppercase());
        let fractal = match letter.to_lowercase().as_str() {
            "m" => Fractal::Multibrot,
            "j" => Fractal::Julia(Complex::new(
                field(&mut tokens, "Re(K)")?,
                field(&mut tokens, "Im(K)")?,
            )),
            "s" => Fractal::BurningShip,
            "u" => Fractal::InversionMultibrot,
            "c" => Fractal::Collatz,
            _ => return Err(ParamError::UnknownFractal(letter.to_string())),
        };

        Ok(RenderJob {
            exponent,
            center,
            zoom,
            aspect,
            width,
            max_iterations,
            output,
            palette,
            fractal,
            smooth,
        })
    }
}

impl RenderJob {
    /// Reads and parses the parameter file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RenderJob, Error> {
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        Ok(text.parse()?)
    }
}
