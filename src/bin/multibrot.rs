extern crate clap;
extern crate failure;
extern crate image;
extern crate multibrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::{err_msg, Error};
use multibrot::{Palette, RenderJob, Renderer};
use std::str::FromStr;
use std::time::Instant;

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const PARAMS: &str = "params";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("multibrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Multibrot, Julia, burning ship, and Collatz escape-time renderer")
        .arg(
            Arg::with_name(PARAMS)
                .required(true)
                .takes_value(true)
                .help("Parameter file describing the render job"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the pixel loop"),
        )
        .get_matches()
}

/// The palette is the top row of an image, read left to right.
fn read_palette(path: &str) -> Result<Palette, Error> {
    let img = image::open(path)?.to_rgb();
    let colors = (0..img.width()).map(|x| img.get_pixel(x, 0).0).collect();
    Palette::new(colors).map_err(err_msg)
}

fn write_image(path: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    image::save_buffer(
        path,
        pixels,
        bounds.0 as u32,
        bounds.1 as u32,
        image::ColorType::RGB(8),
    )
}

fn run() -> Result<(), Error> {
    let matches = args();
    let threads = usize::from_str(matches.value_of(THREADS).unwrap())
        .expect("Could not parse thread count.");

    let job = RenderJob::load(matches.value_of(PARAMS).unwrap())?;
    let palette = read_palette(&job.palette)?;
    let renderer = Renderer::new(&job, palette).map_err(err_msg)?;

    let start = Instant::now();
    let pixels = if threads > 1 {
        renderer.render_threaded(threads)
    } else {
        renderer.render()
    };
    write_image(&job.output, &pixels, (renderer.width(), renderer.height()))?;

    println!("Render time: {} seconds", start.elapsed().as_secs());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
