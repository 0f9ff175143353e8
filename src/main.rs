//! sdf-generator: converts a glyph or sprite mask into a signed distance field texture.
//!
//! ```text
//! sdf-generator [OPTIONS] <INPUT> <OUTPUT>
//! ```
//!
//! Both paths are resolved against `--base-dir`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sdf_generator::config::SdfConfig;
use sdf_generator::pipeline;

/// Generate a signed distance field texture from a mask image.
///
/// Fully transparent pixels are outside of the shape,
/// all other pixels use their red channel as the mask intensity.
#[derive(Parser)]
#[command(name = "sdf-generator", version)]
struct Cli {
    /// Input image, relative to the base directory.
    input: PathBuf,

    /// Output image, relative to the base directory. The extension selects the format.
    output: PathBuf,

    /// Directory both paths are joined against.
    #[arg(short, long, default_value = ".")]
    base_dir: PathBuf,

    /// Join the output path against this directory instead of the base directory.
    #[arg(long)]
    output_base: Option<PathBuf>,

    /// Half-width of the square window scanned around every pixel.
    #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    search_radius: Option<u32>,

    /// Width of the output image in pixels.
    #[arg(short = 'w', long, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    target_width: Option<u32>,

    /// Compute the fields on a single thread.
    #[arg(long)]
    sequential: bool,

    /// JSON file with default parameters, overridden by the flags above.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log more details, repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn sdf_config(&self) -> sdf_generator::Result<SdfConfig> {
        let mut config = match &self.config {
            Some(path) => SdfConfig::from_json_file(path)?,
            None => SdfConfig::default(),
        };

        if let Some(search_radius) = self.search_radius {
            config.search_radius = search_radius;
        }

        if let Some(target_width) = self.target_width {
            config.target_width = target_width;
        }

        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = pipeline::resolve_paths(&cli.base_dir, &cli.input, &cli.output, cli.output_base.as_deref());

    let result = cli.sdf_config().and_then(|config| {
        log::debug!("{:?}", config);
        pipeline::run(&paths, &config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // printed directly, so the reason survives `RUST_LOG=off`
            eprintln!("{}", failure_message(&error));
            ExitCode::FAILURE
        }
    }
}

fn failure_message(error: &sdf_generator::SdfError) -> String {
    format!("error: {}", error)
}
