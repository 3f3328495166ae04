//! iconset CLI - app icon set generator
//!
//! Analyzes an image for a background color suggestion and renders the full
//! icon set to a directory of PNG files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use iconset_renderer::{IconPipeline, IconRegistry, RenderOptions, SourceMime};

/// Generate app icons, favicons, logos and splash screens from one image.
#[derive(Parser, Debug)]
#[command(name = "iconset")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the suggested background color as JSON
    Analyze {
        /// Source image (PNG, JPEG or SVG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Declared MIME type (detected from the extension by default)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Render every icon into a directory
    Generate {
        /// Source image (PNG, JPEG or SVG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory, created if missing
        #[arg(short, long, value_name = "DIR", default_value = "icons")]
        out: PathBuf,

        /// Splash screen background as #RRGGBB
        #[arg(short, long, default_value = "#ffffff")]
        background: String,

        /// Also render the full splash screen
        #[arg(long)]
        splash: bool,

        /// Print the generated {name, size, url} list as JSON
        #[arg(long)]
        json: bool,

        /// Declared MIME type (detected from the extension by default)
        #[arg(long)]
        mime: Option<String>,
    },

    /// List the built-in icon specs
    Specs,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let pipeline = IconPipeline::new();

    match args.command {
        Command::Analyze { input, mime } => {
            let mime = resolve_mime(&input, mime)?;
            let bytes = fs::read(&input)?;
            let result = pipeline.analyze(&bytes, &mime)?;
            println!("{}", result.to_json_pretty()?);
        }
        Command::Generate {
            input,
            out,
            background,
            splash,
            json,
            mime,
        } => {
            let mime = resolve_mime(&input, mime)?;
            let bytes = fs::read(&input)?;
            let options = RenderOptions::new()
                .with_background_color(background)
                .with_splash(splash);

            let rendered = pipeline.render(&bytes, &mime, &options)?;
            fs::create_dir_all(&out)?;
            for icon in &rendered {
                let path = out.join(format!("{}.png", icon.name()));
                fs::write(&path, icon.png())?;
                eprintln!("  {} -> {}", icon.spec().size_description(), path.display());
            }

            if json {
                let icons = iconset_renderer::assemble::assemble(rendered);
                println!("{}", serde_json::to_string_pretty(&icons)?);
            }
        }
        Command::Specs => {
            for spec in IconRegistry::standard().iter() {
                let note = if spec.inclusion.admits(false) { "" } else { " [--splash]" };
                println!(
                    "{:<20} {:>4}x{:<4} {:?} ({}){note}",
                    spec.name,
                    spec.width,
                    spec.height,
                    spec.category,
                    spec.strategy.name()
                );
            }
        }
    }

    Ok(())
}

/// Uses the explicit MIME type if given, otherwise the file extension.
fn resolve_mime(input: &Path, explicit: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(mime) = explicit {
        return Ok(mime);
    }
    input
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceMime::from_extension)
        .map(|mime| mime.as_str().to_string())
        .ok_or_else(|| format!("cannot infer image type of {:?}; pass --mime", input).into())
}
