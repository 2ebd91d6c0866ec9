use clap::Parser;
use simple_scale::config::{self, ConfigError, Gravity, OutputFormat, Quality, Settings};
use simple_scale::{batch, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simple-scale")]
#[command(about = "Convert and resize JPEG, PNG and WebP images to JPEG or PNG")]
#[command(long_about = "\
Convert and resize JPEG, PNG and WebP images to JPEG or PNG

INPUT may be a single image or a directory. For a directory, every top-level
.jpg, .jpeg, .png and .webp file is processed; everything else is skipped.

With --width, images are scaled to that width and the height follows the
aspect ratio. With --height as well, images still taller than that after
scaling are cropped to it, keeping the part selected by --crop.

Output files keep the input name with the new extension:

  simple-scale photos/ -o web/ -w 1280 -h 720 -t jpg -q 85
  photos/dawn.png  →  web/dawn.jpg   (1280 wide, at most 720 high)

If INPUT is a file and --output has an extension, --output is used as the
output file name.

Exit status: 0 on success, 1 if any file failed, 2 on a fatal error.

Run 'simple-scale --print-config' for a documented simple-scale.toml.")]
#[command(version, disable_help_flag = true)]
struct Cli {
    /// Image file or directory of images
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Output directory, or output file when INPUT is a file
    #[arg(short, long, required_unless_present = "print_config")]
    output: Option<PathBuf>,

    /// Output format [default: jpg]
    #[arg(short = 't', long = "type", value_enum)]
    format: Option<OutputFormat>,

    /// JPEG quality, 1-100 [default: 80]
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Scale to this width, keeping the aspect ratio (0 = keep size)
    #[arg(short, long)]
    width: Option<u32>,

    /// After scaling, crop to this height if the image is taller
    #[arg(short = 'h', long)]
    height: Option<u32>,

    /// Which part to keep when cropping [default: top]
    #[arg(long, value_enum)]
    crop: Option<Gravity>,

    /// Maximum parallel workers [default: number of CPU cores]
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Read defaults from a TOML file (flags override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a stock simple-scale.toml with all options documented
    #[arg(long)]
    print_config: bool,

    /// Print help (-h is --height)
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let settings = resolve_settings(&cli)?;
    let (Some(input), Some(output_path)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        return Err("INPUT and --output are required".into());
    };

    init_thread_pool(&settings.processing);
    let scale = settings.scale_config();
    log::debug!("running with {scale:?}");

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_process_event(&event);
        }
    });
    let result = batch::run(input, output_path, &scale, Some(tx));
    printer.join().map_err(|_| "output thread panicked")?;

    let summary = result?;
    output::print_summary(&summary);

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Stock defaults, then the `--config` file, then command-line flags.
fn resolve_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Settings::default(),
    };

    if let Some(format) = cli.format {
        settings.output.format = format;
    }
    if let Some(quality) = cli.quality {
        settings.output.quality = Quality::new(quality);
    }
    if let Some(width) = cli.width {
        settings.scale.width = Some(width);
    }
    if let Some(height) = cli.height {
        settings.scale.height = Some(height);
    }
    if let Some(crop) = cli.crop {
        settings.scale.crop = crop;
    }
    if let Some(threads) = cli.threads {
        settings.processing.max_processes = Some(threads);
    }

    settings.validate()?;
    Ok(settings)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; `--threads` can only lower it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
