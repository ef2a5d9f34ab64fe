//! Treemark CLI
//!
//! Usage:
//!   treemark [OPTIONS] [FILE]
//!
//! Options:
//!   -W, --width <PX>     Canvas width
//!   -H, --height <PX>    Canvas height
//!   -p, --padding <PX>   Canvas padding
//!   -d, --debug          Dump the scene outline to stderr
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use treemark::mark::file::load_mark;
use treemark::{render_with_config, AxesConfig, RenderConfig};

#[derive(Parser)]
#[command(name = "treemark")]
#[command(about = "Render a laid-out tree (TOML) into a scene graph outline")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(short = 'W', long, default_value_t = 400.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value_t = 400.0)]
    height: f64,

    /// Padding between the canvas edge and the tree
    #[arg(short, long, default_value_t = 20.0)]
    padding: f64,

    /// Debug mode: dump the scene outline to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let _ = env_logger::builder().format_timestamp(None).try_init();

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mark = match load_mark(&source) {
        Ok(mark) => mark,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };
    log::info!("loaded {} nodes from {}", mark.nnodes(), filename);

    let config = RenderConfig::new()
        .with_axes(
            AxesConfig::default()
                .with_size(cli.width, cli.height)
                .with_padding(cli.padding),
        )
        .with_debug(cli.debug);

    match render_with_config(&mark, config) {
        Ok(scene) => {
            print!("{}", scene.outline());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
