#![deny(unsafe_code)]
//! CLI binary for the particle-field animation engine.
//!
//! Subcommands:
//! - `render <engine>`: run an engine N frames, write a PNG
//! - `snapshot <engine>`: run an engine N frames, print the snapshot as JSON
//! - `replay <seed.json>`: re-render a saved seed
//! - `list`: print available engines

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use particle_field_core::color::Srgb;
use particle_field_core::{Engine, Seed};
use particle_field_engines::raster::RenderStyle;
use particle_field_engines::EngineKind;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Particle field animation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an engine for N frames and write a PNG of the last one.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Also write the run as a replayable seed file.
        #[arg(long)]
        save_seed: Option<PathBuf>,
    },
    /// Run an engine for N frames and print the snapshot as JSON.
    Snapshot {
        #[command(flatten)]
        field: FieldArgs,
    },
    /// Render a seed file written by `render --save-seed`.
    Replay {
        /// Seed file path.
        seed_file: PathBuf,

        #[command(flatten)]
        style: StyleArgs,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available engines.
    List,
}

#[derive(Args)]
struct FieldArgs {
    /// Engine name (e.g. "constellation").
    engine: String,

    /// Surface width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Surface height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 300)]
    steps: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Pointer position held for the whole run.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pointer: Option<Vec<f64>>,

    /// Engine parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl FieldArgs {
    fn to_seed(&self) -> Result<Seed, CliError> {
        let mut seed = Seed::new(&self.engine, self.width, self.height, self.seed);
        seed.steps = self.steps;
        seed.params = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        seed.pointer = match self.pointer.as_deref() {
            None => None,
            Some(&[x, y]) => Some([x, y]),
            Some(_) => return Err(CliError::Input("--pointer takes X and Y".into())),
        };
        Ok(seed)
    }
}

#[derive(Args)]
struct StyleArgs {
    /// Particle color as #rrggbb.
    #[arg(long, default_value = "#00d4ff")]
    color: String,

    /// Edge color as #rrggbb (defaults to the particle color).
    #[arg(long)]
    edge_color: Option<String>,

    /// Background color as #rrggbb.
    #[arg(long, default_value = "#0a0a0f")]
    background: String,
}

impl StyleArgs {
    fn to_style(&self) -> Result<RenderStyle, CliError> {
        let particle = Srgb::from_hex(&self.color)?;
        let edge = match &self.edge_color {
            Some(hex) => Srgb::from_hex(hex)?,
            None => particle,
        };
        let background = Srgb::from_hex(&self.background)?;
        Ok(RenderStyle {
            particle,
            edge,
            background,
        })
    }
}

/// Builds the seed's engine and runs it for `seed.steps` frames.
fn simulate(seed: &Seed) -> Result<EngineKind, CliError> {
    seed.validate()?;
    let mut engine = EngineKind::from_name(
        &seed.engine,
        seed.width as f64,
        seed.height as f64,
        seed.seed,
        &seed.params,
    )?;
    if let Some([x, y]) = seed.pointer {
        engine.set_pointer(x, y);
    }
    log::info!(
        "simulating {} ({}x{}, {} particles) for {} steps",
        seed.engine,
        seed.width,
        seed.height,
        engine.snapshot().len(),
        seed.steps
    );
    (0..seed.steps).try_for_each(|_| engine.step())?;
    Ok(engine)
}

fn render(
    seed: &Seed,
    style: &RenderStyle,
    output: &Path,
    json: bool,
) -> Result<(), CliError> {
    let engine = simulate(seed)?;
    let snapshot = engine.snapshot();
    particle_field_engines::snapshot::write_png(&snapshot, style, output)?;

    if json {
        let info = serde_json::json!({
            "engine": seed.engine,
            "width": seed.width,
            "height": seed.height,
            "steps": seed.steps,
            "seed": seed.seed,
            "particles": snapshot.len(),
            "edges": snapshot.edges.len(),
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} ({}x{}, {} steps, seed {}) -> {}",
            seed.engine,
            seed.width,
            seed.height,
            seed.steps,
            seed.seed,
            output.display()
        );
    }
    Ok(())
}

fn read_seed(path: &Path) -> Result<Seed, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                let mut schemas = serde_json::Map::new();
                for name in engines {
                    let engine = EngineKind::from_name(name, 0.0, 0.0, 0, &serde_json::json!({}))?;
                    schemas.insert(name.to_string(), engine.param_schema());
                }
                let info = serde_json::json!({ "engines": schemas });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            field,
            style,
            output,
            save_seed,
        } => {
            let seed = field.to_seed()?;
            let style = style.to_style()?;
            render(&seed, &style, &output, cli.json)?;
            if let Some(path) = save_seed {
                fs::write(&path, serde_json::to_string_pretty(&seed)?)?;
                log::info!("wrote seed to {}", path.display());
            }
        }
        Command::Snapshot { field } => {
            let seed = field.to_seed()?;
            let engine = simulate(&seed)?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        Command::Replay {
            seed_file,
            style,
            output,
        } => {
            let seed = read_seed(&seed_file)?;
            let style = style.to_style()?;
            render(&seed, &style, &output, cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("particle-field").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn render_args_become_seed() {
        let cli = parse(&[
            "render",
            "constellation",
            "-W",
            "320",
            "-H",
            "200",
            "--steps",
            "5",
            "--pointer",
            "-10",
            "20.5",
            "--params",
            r#"{"count": 9}"#,
        ]);
        let Command::Render { field, .. } = cli.command else {
            panic!("expected render");
        };
        let seed = field.to_seed().unwrap();
        assert_eq!(seed.engine, "constellation");
        assert_eq!((seed.width, seed.height, seed.steps), (320, 200, 5));
        assert_eq!(seed.pointer, Some([-10.0, 20.5]));
        assert_eq!(seed.params["count"], 9);
    }

    #[test]
    fn bad_params_json_is_input_error() {
        let cli = parse(&["snapshot", "starfield", "--params", "{nope"]);
        let Command::Snapshot { field } = cli.command else {
            panic!("expected snapshot");
        };
        assert_eq!(field.to_seed().unwrap_err().exit_code(), 12);
    }

    #[test]
    fn style_defaults_and_bad_color() {
        let cli = parse(&["render", "starfield"]);
        let Command::Render { style, .. } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(style.to_style().unwrap(), RenderStyle::default());

        let cli = parse(&["render", "starfield", "--background", "dusk"]);
        let Command::Render { style, .. } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(style.to_style().unwrap_err().exit_code(), 12);
    }

    #[test]
    fn simulate_runs_requested_steps() {
        let mut seed = Seed::new("constellation", 200, 100, 3);
        seed.steps = 4;
        seed.pointer = Some([100.0, 50.0]);
        let engine = simulate(&seed).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.len(), 20);
        assert_eq!(snap.pointer.map(|p| p.to_array()), Some([100.0, 50.0]));
    }

    #[test]
    fn simulate_rejects_zero_size_and_unknown_engine() {
        assert_eq!(
            simulate(&Seed::new("starfield", 0, 10, 1)).unwrap_err().exit_code(),
            10
        );
        assert_eq!(
            simulate(&Seed::new("aurora", 10, 10, 1)).unwrap_err().exit_code(),
            10
        );
    }

    #[test]
    fn render_then_replay_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("frame.seed.json");
        let png_path = dir.path().join("frame.png");

        let mut seed = Seed::new("starfield", 48, 32, 11);
        seed.steps = 3;
        fs::write(&seed_path, serde_json::to_string(&seed).unwrap()).unwrap();

        let restored = read_seed(&seed_path).unwrap();
        assert_eq!(restored, seed);
        render(&restored, &RenderStyle::default(), &png_path, false).unwrap();
        assert!(png_path.exists());
    }

    #[test]
    fn read_seed_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(read_seed(&missing).unwrap_err().exit_code(), 11);

        let garbage = dir.path().join("bad.json");
        fs::write(&garbage, "{\"engine\": 3}").unwrap();
        assert_eq!(read_seed(&garbage).unwrap_err().exit_code(), 12);
    }
}
