//! Mobius CLI - build, measure, render and export Möbius strips.
//!
//! Usage: mobius <COMMAND> [OPTIONS]
//!
//! Run `mobius --help` for available commands.
//!
//! # Logging
//!
//! Use `-v` / `-vv` / `-vvv` or set `RUST_LOG` (for example
//! `RUST_LOG=mobius=debug`) to see integrator diagnostics on stderr.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mobius::algo::QuadratureOptions;
use mobius::io;
use mobius::render::{self, RenderOptions};
use mobius::strip::MobiusStrip;

#[derive(Parser)]
#[command(name = "mobius")]
#[command(author, version, about = "Möbius strip geometry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct StripArgs {
    /// Distance from the central axis to the strip's midline
    #[arg(short, long, default_value = "1.0")]
    radius: f64,

    /// Full width of the strip
    #[arg(short, long, default_value = "0.5")]
    width: f64,

    /// Samples per parametric axis of the mesh
    #[arg(short = 'n', long, default_value = "30")]
    resolution: usize,
}

impl StripArgs {
    fn build(&self) -> mobius::error::Result<MobiusStrip> {
        MobiusStrip::new(self.radius, self.width, self.resolution)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute surface area and edge length
    Measure {
        #[command(flatten)]
        strip: StripArgs,

        /// Absolute error tolerance of the integrator
        #[arg(long, default_value = "1.49e-8")]
        abs_tol: f64,

        /// Relative error tolerance of the integrator
        #[arg(long, default_value = "1.49e-8")]
        rel_tol: f64,

        /// Maximum interval subdivisions per integral
        #[arg(long, default_value = "50")]
        max_subdivisions: usize,

        /// Also report the length of the complete boundary curve
        #[arg(long)]
        full_boundary: bool,

        /// Evaluate quadrature nodes in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Render the strip to an image file
    Render {
        #[command(flatten)]
        strip: StripArgs,

        /// Output image (PNG)
        #[arg(short, long, default_value = "mobius.png")]
        output: PathBuf,

        /// Image size as WIDTHxHEIGHT
        #[arg(long, default_value = "1200x800", value_parser = parse_size)]
        size: (u32, u32),

        /// Camera elevation in degrees
        #[arg(long, default_value = "20")]
        elevation: f64,

        /// Camera azimuth in degrees
        #[arg(long, default_value = "45")]
        azimuth: f64,
    },

    /// Export the triangulated mesh (OBJ, STL or PLY by extension)
    Export {
        #[command(flatten)]
        strip: StripArgs,

        /// Output mesh file
        output: PathBuf,
    },
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("invalid width '{w}': {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("invalid height '{h}': {e}"))?;
    Ok((w, h))
}

fn init_tracing(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "mobius=info",
            2 => "mobius=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Measure {
            strip,
            abs_tol,
            rel_tol,
            max_subdivisions,
            full_boundary,
            parallel,
        } => {
            let options = QuadratureOptions::default()
                .with_abs_tol(abs_tol)
                .with_rel_tol(rel_tol)
                .with_max_subdivisions(max_subdivisions)
                .with_parallel(parallel);
            cmd_measure(&strip, &options, full_boundary)?;
        }

        Commands::Render {
            strip,
            output,
            size,
            elevation,
            azimuth,
        } => {
            let options = RenderOptions::default()
                .with_size(size.0, size.1)
                .with_view(elevation, azimuth);
            cmd_render(&strip, &options, &output)?;
        }

        Commands::Export { strip, output } => {
            cmd_export(&strip, &output)?;
        }
    }

    Ok(())
}

fn cmd_measure(
    args: &StripArgs,
    options: &QuadratureOptions,
    full_boundary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let strip = args.build()?;

    println!("Radius: {}", strip.radius());
    println!("Width: {}", strip.width());

    let start = Instant::now();
    let area = strip.surface_area_with(options)?;
    let edge = strip.edge_length_with(options)?;
    let elapsed = start.elapsed();

    println!("Surface Area: {:.4}", area.value);
    println!("Edge Length: {:.4}", edge.value);

    if full_boundary {
        let boundary = strip.boundary_length_with(options)?;
        println!("Boundary Length: {:.4}", boundary.value);
    }

    println!(
        "Error estimates: area {:.1e}, edge {:.1e} ({:.2?})",
        area.error, edge.error, elapsed
    );

    Ok(())
}

fn cmd_render(
    args: &StripArgs,
    options: &RenderOptions,
    output: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let strip = args.build()?;

    let start = Instant::now();
    render::render_to_file(strip.mesh(), options, output)?;
    println!(
        "Saved: {} ({}x{}, R={}, w={}, {:.2?})",
        output.display(),
        options.width,
        options.height,
        strip.radius(),
        strip.width(),
        start.elapsed()
    );

    Ok(())
}

fn cmd_export(args: &StripArgs, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let strip = args.build()?;
    let (rows, cols) = strip.mesh().shape();

    io::save(strip.mesh(), output)?;
    println!(
        "Saved: {} ({} vertices, {} triangles)",
        output.display(),
        rows * cols,
        2 * (rows - 1) * (cols - 1)
    );
    if let Some((min, max)) = strip.mesh().bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480"), Ok((640, 480)));
        assert_eq!(parse_size("10X20"), Ok((10, 20)));
        assert!(parse_size("640").is_err());
        assert!(parse_size("ax480").is_err());
    }

    #[test]
    fn test_measure_defaults() {
        let cli = Cli::try_parse_from(["mobius", "measure"]).unwrap();
        match cli.command {
            Commands::Measure { strip, max_subdivisions, .. } => {
                assert_eq!(strip.radius, 1.0);
                assert_eq!(strip.width, 0.5);
                assert_eq!(strip.resolution, 30);
                assert_eq!(max_subdivisions, 50);
            }
            _ => panic!("expected measure"),
        }
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("strip.obj");
        let args = StripArgs {
            radius: 1.0,
            width: 0.5,
            resolution: 8,
        };
        cmd_export(&args, &output).unwrap();
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn test_export_rejects_degenerate_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let args = StripArgs {
            radius: 1.0,
            width: 0.5,
            resolution: 1,
        };
        assert!(cmd_export(&args, &dir.path().join("strip.obj")).is_err());
    }
}
