//! Folio - page through markdown files as rendered PDF pages in the terminal.
//!
//! # Usage
//!
//! ```bash
//! folio README.md
//! folio --watch README.md
//! folio --page-width 1600 --log-file folio.log
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use folio::app::App;
use folio::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// View markdown files as typeset PDF pages in the terminal
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Markdown file to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Re-render the open file when it changes on disk
    #[arg(short, long)]
    watch: bool,

    /// Show a text summary instead of page images
    #[arg(long)]
    no_images: bool,

    /// Force image rendering to use half-cell fallback mode
    #[arg(long)]
    force_half_cell: bool,

    /// wkhtmltopdf executable to lay out pages with
    #[arg(long, value_name = "PATH")]
    wkhtmltopdf: Option<PathBuf>,

    /// Directory containing the pdfium shared library
    #[arg(long, value_name = "PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Width of rendered page images in pixels
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    page_width: Option<u32>,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_images_enabled(!effective.no_images)
        .with_force_half_cell(effective.force_half_cell)
        .with_wkhtmltopdf(effective.wkhtmltopdf)
        .with_pdfium_library(effective.pdfium_lib)
        .with_page_width(effective.page_width);

    app.run().context("Application error")
}
