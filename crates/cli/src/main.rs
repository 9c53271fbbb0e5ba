#![deny(unsafe_code)]
//! CLI binary for the charge-field sandbox.
//!
//! Subcommands:
//! - `render <scene>`: draw a scene and write a PNG
//! - `probe <scene> --x --y`: field vector and potential at a point
//! - `trace <scene>`: field lines, equipotentials, heatmap and zero contour
//! - `schema`: configuration keys with their ranges and defaults

mod error;
mod scene;

use charge_field_core::sampler::DEFAULT_STRIDE;
use charge_field_core::{
    sample_heatmap, trace_equipotentials, trace_field_lines, DVec2, FieldConfig, FieldEvaluator,
};
use charge_field_render::render_scene;
use clap::{Parser, Subcommand};
use error::CliError;
use scene::load_scene;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "charge-field", about = "2D electrostatics sandbox CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a scene file to a PNG snapshot.
    Render {
        /// Scene file (JSON).
        scene: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,

        /// Force the potential heatmap on regardless of the scene's layers.
        #[arg(long)]
        heatmap: bool,
    },
    /// Evaluate the field and potential at one display-space point.
    Probe {
        /// Scene file (JSON).
        scene: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Trace field lines, equipotentials, the potential heatmap and its zero contour.
    Trace {
        /// Scene file (JSON).
        scene: PathBuf,

        /// Heatmap lattice spacing.
        #[arg(long, default_value_t = DEFAULT_STRIDE)]
        stride: usize,
    },
    /// Print the configuration schema.
    Schema,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = FieldConfig::schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(keys) = schema.as_object() {
                for (name, entry) in keys {
                    println!(
                        "  {name:<22} {} (default {}, range {}..={})",
                        entry["description"].as_str().unwrap_or_default(),
                        entry["default"],
                        entry["min"],
                        entry["max"],
                    );
                }
            }
        }
        Command::Render {
            scene,
            output,
            heatmap,
        } => {
            let mut loaded = load_scene(&scene)?;
            loaded.layers.heatmap |= heatmap;

            let raster = render_scene(
                &loaded.store,
                &loaded.config,
                loaded.layers,
                &loaded.theme,
                loaded.bounds,
            )?;
            charge_field_render::snapshot::write_png(&raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "scene": scene.display().to_string(),
                    "width": raster.width(),
                    "height": raster.height(),
                    "charges": loaded.store.len(),
                    "config": loaded.config.to_json(),
                    "layers": loaded.layers.to_json(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} charges ({}x{}, {} px/m) -> {}",
                    loaded.store.len(),
                    raster.width(),
                    raster.height(),
                    loaded.config.scale.pixels_per_unit(),
                    output.display()
                );
            }
        }
        Command::Probe { scene, x, y } => {
            let loaded = load_scene(&scene)?;
            let point = DVec2::new(x, y);
            if !point.is_finite() {
                return Err(CliError::Input(format!("probe point ({x}, {y}) is not finite")));
            }
            let eval = FieldEvaluator::new(&loaded.store, loaded.config.scale);
            let field = eval.field_at(point);
            let potential = eval.potential_at(point);

            if cli.json {
                let info = serde_json::json!({
                    "point": point,
                    "field": field,
                    "field_magnitude": field.length(),
                    "potential": potential,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "E = ({:.4e}, {:.4e}) N/C  |E| = {:.4e} N/C  V = {:.4e} V",
                    field.x,
                    field.y,
                    field.length(),
                    potential
                );
            }
        }
        Command::Trace { scene, stride } => {
            let loaded = load_scene(&scene)?;
            let field_lines = trace_field_lines(&loaded.store, &loaded.config, loaded.bounds);
            let equipotentials =
                trace_equipotentials(&loaded.store, &loaded.config, loaded.bounds);
            let eval = FieldEvaluator::new(&loaded.store, loaded.config.scale);
            let heatmap = sample_heatmap(&eval, loaded.bounds, stride)?;
            let zero_contour = heatmap.zero_contour();

            if cli.json {
                let info = serde_json::json!({
                    "config": loaded.config.to_json(),
                    "field_lines": field_lines,
                    "equipotentials": equipotentials,
                    "heatmap": heatmap,
                    "zero_contour": zero_contour,
                });
                println!("{}", serde_json::to_string(&info)?);
            } else {
                let points: usize = field_lines
                    .iter()
                    .chain(&equipotentials)
                    .map(|line| line.len())
                    .sum();
                eprintln!(
                    "traced {} field lines, {} equipotentials ({points} points), \
                     {}x{} heatmap, {} zero-contour segments",
                    field_lines.len(),
                    equipotentials.len(),
                    heatmap.cols(),
                    heatmap.rows(),
                    zero_contour.len()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
