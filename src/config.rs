//! Saved command-line defaults.
//!
//! A config file is a list of the same flags `folio` accepts, one or more
//! per line, with `#` comments. The global file is read first, then a local
//! `.foliorc` in the working directory, then the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_images: bool,
    pub force_half_cell: bool,
    pub wkhtmltopdf: Option<PathBuf>,
    pub pdfium_lib: Option<PathBuf>,
    pub page_width: Option<u32>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; switches are or-ed and `other` wins for values.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_images: self.no_images || other.no_images,
            force_half_cell: self.force_half_cell || other.force_half_cell,
            wkhtmltopdf: other
                .wkhtmltopdf
                .clone()
                .or_else(|| self.wkhtmltopdf.clone()),
            pdfium_lib: other.pdfium_lib.clone().or_else(|| self.pdfium_lib.clone()),
            page_width: other.page_width.or(self.page_width),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("folio").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("folio")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("folio").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("folio").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".foliorc")
}

/// Read flags from `path`; a missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# folio defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_images {
        lines.push("--no-images".to_string());
    }
    if flags.force_half_cell {
        lines.push("--force-half-cell".to_string());
    }
    if let Some(program) = &flags.wkhtmltopdf {
        lines.push(format!("--wkhtmltopdf {}", program.display()));
    }
    if let Some(dir) = &flags.pdfium_lib {
        lines.push(format!("--pdfium-lib {}", dir.display()));
    }
    if let Some(width) = flags.page_width {
        lines.push(format!("--page-width {width}"));
    }
    if let Some(log) = &flags.log_file {
        lines.push(format!("--log-file {}", log.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
///
/// Returns an error if the file exists and cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the saveable flags out of raw arguments.
///
/// Unknown tokens, positional arguments and malformed values are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--wkhtmltopdf" | "--pdfium-lib" | "--page-width" | "--log-file"
        );
        let value = if takes_value && inline.is_none() {
            let next = tokens.get(i + 1).cloned();
            if next.is_some() {
                i += 1;
            }
            next
        } else {
            inline
        };

        match name {
            "--watch" | "-w" => flags.watch = true,
            "--no-images" => flags.no_images = true,
            "--force-half-cell" => flags.force_half_cell = true,
            "--wkhtmltopdf" => flags.wkhtmltopdf = value.map(PathBuf::from),
            "--pdfium-lib" => flags.pdfium_lib = value.map(PathBuf::from),
            "--page-width" => {
                flags.page_width = value
                    .and_then(|v| v.parse::<u32>().ok())
                    .filter(|w| *w > 0);
            }
            "--log-file" => flags.log_file = value.map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}
