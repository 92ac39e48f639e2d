use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glint_renderer::{average_diff, read_image, render, render_sequential, save_image, Scene};
use std::path::PathBuf;
use std::time::Instant;

mod scene;

use scene::{SceneDescription, PRESETS};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Recursive Whitted-style ray tracer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene file or built-in preset to an image
    Render {
        /// JSON scene description
        #[arg(short, long, conflicts_with = "preset")]
        scene: Option<PathBuf>,

        /// Built-in scene (see `glint presets`)
        #[arg(short, long, default_value = "reflection")]
        preset: String,

        /// Output image; .ppm is written as ASCII P3, other extensions by format
        #[arg(short, long, default_value = "output.ppm")]
        output: PathBuf,

        /// Override the maximum number of reflection bounces (capped at 64)
        #[arg(long)]
        max_depth: Option<u32>,

        /// Override the image width
        #[arg(long)]
        width: Option<u32>,

        /// Override the image height
        #[arg(long)]
        height: Option<u32>,

        /// Render on the calling thread instead of in parallel buckets
        #[arg(long)]
        sequential: bool,
    },
    /// List built-in scenes
    Presets,
    /// Print the average per-pixel difference between two images
    Diff {
        expected: PathBuf,
        actual: PathBuf,

        /// Fail if the average difference is at or above this value
        #[arg(long)]
        tolerance: Option<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            preset,
            output,
            max_depth,
            width,
            height,
            sequential,
        } => {
            let mut description = match scene {
                Some(path) => {
                    let json = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read scene {}", path.display()))?;
                    SceneDescription::from_json(&json)
                        .with_context(|| format!("Failed to parse scene {}", path.display()))?
                }
                None => match SceneDescription::preset(&preset) {
                    Some(description) => description,
                    None => bail!("Unknown preset '{}', try `glint presets`", preset),
                },
            };

            if let Some(width) = width {
                description.camera.width = width;
            }
            if let Some(height) = height {
                description.camera.height = height;
            }
            if let Some(max_depth) = max_depth {
                description.render.max_depth = Some(max_depth);
            }

            // Validate everything before any pixel is traced
            let camera = description.build_camera().context("Invalid camera")?;
            let objects = description.build_objects().context("Invalid scene object")?;
            let config = description.render_config();
            let world: Scene = objects.iter().map(|object| &**object).collect();

            log::info!(
                "Rendering {} objects at {}x{}, max depth {}",
                world.len(),
                camera.image_width,
                camera.image_height,
                config.max_depth
            );

            let start = Instant::now();
            let image = if sequential {
                render_sequential(&camera, &world, &config)
            } else {
                render(&camera, &world, &config)
            };
            log::info!("Render finished in {:?}", start.elapsed());

            save_image(&image, &output)
                .with_context(|| format!("Failed to save {}", output.display()))?;
            log::info!("Saved to {}", output.display());
        }
        Commands::Presets => {
            for (name, summary) in PRESETS {
                println!("{:<12} {}", name, summary);
            }
        }
        Commands::Diff {
            expected,
            actual,
            tolerance,
        } => {
            let expected_image = read_image(&expected)
                .with_context(|| format!("Failed to load {}", expected.display()))?;
            let actual_image = read_image(&actual)
                .with_context(|| format!("Failed to load {}", actual.display()))?;

            let diff = average_diff(&expected_image, &actual_image)?;
            println!("{:.4}", diff);

            if let Some(tolerance) = tolerance {
                if diff >= tolerance {
                    bail!("Average difference {:.4} exceeds tolerance {}", diff, tolerance);
                }
            }
        }
    }

    Ok(())
}
