use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use notestack::app::App;
use notestack::config::AppConfig;
use notestack::notify::{NoteOptions, Notifier};
use notestack::tui;

/// notestack - stacking toast notifications in the terminal
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Corner the notes stack in: bottomLeft, bottomRight, topLeft or topRight
    #[arg(long)]
    corner: Option<String>,

    /// Cells between the stack and the left/right edge
    #[arg(long, value_name = "CELLS")]
    horizontal_padding: Option<i32>,

    /// Rows between the stack and the top/bottom edge
    #[arg(long, value_name = "ROWS")]
    vertical_padding: Option<i32>,

    /// Stacking order for notes
    #[arg(long)]
    z_index: Option<i32>,

    /// Fade notes out after this many milliseconds
    #[arg(long, value_name = "MS")]
    fadeout: Option<u64>,

    /// Emit a timestamped note every few seconds
    #[arg(long)]
    feed: bool,

    /// Show a note at startup, e.g. --note "warning=Check this"
    #[arg(long = "note", value_name = "KIND=TEXT", value_parser = parse_note)]
    notes: Vec<(String, String)>,

    /// Write logs to this file instead of the cache directory
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Overrides config values with the ones given on the command line.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(corner) = &self.corner {
            config.notifier.corner = Some(corner.clone());
        }
        if let Some(padding) = self.horizontal_padding {
            config.notifier.horizontal_padding = Some(padding);
        }
        if let Some(padding) = self.vertical_padding {
            config.notifier.vertical_padding = Some(padding);
        }
        if let Some(z_index) = self.z_index {
            config.notifier.z_index = Some(z_index);
        }
        if let Some(fadeout) = self.fadeout {
            config.default_fadeout_ms = Some(fadeout);
        }
    }
}

/// Splits `KIND=TEXT`. The kind name is checked when the note is shown.
fn parse_note(value: &str) -> Result<(String, String), String> {
    let (kind, text) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=TEXT, got '{value}'"))?;
    let kind = kind.trim();
    if kind.is_empty() {
        return Err(format!("missing note kind in '{value}'"));
    }
    Ok((kind.to_string(), text.to_string()))
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("notestack")
        .join("notestack.log")
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_tracing(&log_path)?;

    let mut config = AppConfig::load()?;
    cli.apply(&mut config);
    let notifier_config = config.notifier_config()?;

    if cli.save_config {
        let path = config.save()?;
        println!("Saved config to {}", path.display());
    }

    tracing::info!(corner = %notifier_config.corner, feed = cli.feed, "starting notestack");

    let mut terminal = tui::init()?;

    let result = async {
        let viewport = tui::viewport(&terminal)?;
        let mut app = App::new(Notifier::new(notifier_config, viewport), config.default_fadeout());
        let now = Instant::now();
        for (kind, text) in &cli.notes {
            app.show_named(kind, NoteOptions::message(text.as_str()), now)?;
        }
        if cli.feed {
            app.start_feed();
        }
        app.run(&mut terminal).await
    }
    .await;

    tui::restore()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::warning("warning=Check this", "warning", "Check this")]
    #[case::keeps_equals("info=a=b", "info", "a=b")]
    #[case::trims_kind(" DANGER =down", "DANGER", "down")]
    fn test_parse_note(#[case] input: &str, #[case] kind: &str, #[case] text: &str) {
        assert_eq!(parse_note(input).unwrap(), (kind.to_string(), text.to_string()));
    }

    #[rstest]
    #[case::no_separator("warning")]
    #[case::empty_kind("=boom")]
    fn test_parse_note_rejects(#[case] input: &str) {
        assert!(parse_note(input).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "notestack",
            "--corner",
            "topRight",
            "--vertical-padding",
            "3",
            "--fadeout",
            "2500",
            "--note",
            "success=Saved",
            "--note",
            "info=Hello",
        ]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.notifier.corner.as_deref(), Some("topRight"));
        assert_eq!(config.notifier.vertical_padding, Some(3));
        assert_eq!(config.notifier.horizontal_padding, AppConfig::default().notifier.horizontal_padding);
        assert_eq!(config.default_fadeout_ms, Some(2500));
        assert_eq!(cli.notes.len(), 2);
    }

    #[test]
    fn test_cli_rejects_unknown_corner_through_config() {
        let cli = Cli::parse_from(["notestack", "--corner", "center"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(config.notifier_config().is_err());
    }

    #[test]
    fn test_cli_rejects_negative_padding_through_config() {
        let cli = Cli::parse_from(["notestack", "--vertical-padding=-2147483648"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        let err = config.notifier_config().unwrap_err();
        assert!(format!("{err:?}").contains("verticalPadding must not be negative"));
    }
}
