#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use formloom_core::{BuilderList, FieldDefinition, PALETTE, markup};
use formloom_tui::{Program, ProgramConfig};

use crate::app::FormBuilder;
use crate::error::{AppError, Result};
use crate::logging;

/// What to print to stdout once the TUI exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmitMode {
    #[default]
    None,
    /// The generated HTML markup.
    Markup,
    /// The field list as pretty-printed JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "formloom",
    about = "Build an HTML form in the terminal: pick fields, edit, reorder, copy the markup",
    version
)]
pub struct Cli {
    /// Print the final form after exit.
    #[arg(long, value_enum, default_value_t = EmitMode::None)]
    pub emit: EmitMode,

    /// Run inline with this many rows instead of the alternate screen.
    #[arg(long = "inline-height", value_name = "ROWS")]
    pub inline_height: Option<u16>,

    /// Do not enable mouse capture.
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,

    /// Write tracing output to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Pre-populate the form with palette keys, e.g. `userName,dropdown`.
    #[arg(long, value_delimiter = ',', value_name = "KEYS")]
    pub seed: Vec<String>,
}

/// Application settings that live outside the program runtime.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub emit: EmitMode,
    pub seed: Vec<&'static FieldDefinition>,
}

impl Cli {
    pub fn program_config(&self) -> ProgramConfig {
        let config = match self.inline_height {
            Some(rows) => ProgramConfig::inline(rows.max(1)),
            None => ProgramConfig::fullscreen(),
        };
        if self.no_mouse {
            config
        } else {
            config.with_mouse()
        }
    }

    pub fn app_config(&self) -> Result<AppConfig> {
        Ok(AppConfig {
            emit: self.emit,
            seed: resolve_seed(&self.seed)?,
        })
    }
}

/// Map palette keys to definitions; unknown keys are a usage error.
pub fn resolve_seed(keys: &[String]) -> Result<Vec<&'static FieldDefinition>> {
    keys.iter()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .map(|key| {
            FieldDefinition::by_key(key).ok_or_else(|| AppError::UnknownPaletteKey {
                key: key.to_string(),
                expected: PALETTE
                    .iter()
                    .map(|def| def.key)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        })
        .collect()
}

/// Write the final form to `out` according to `mode`.
pub fn emit(mode: EmitMode, list: &BuilderList, out: &mut impl Write) -> Result<()> {
    match mode {
        EmitMode::None => return Ok(()),
        EmitMode::Markup => {
            let markup = markup::generate(list.fields());
            if !markup.is_empty() {
                writeln!(out, "{markup}")?;
            }
        }
        EmitMode::Json => {
            serde_json::to_writer_pretty(&mut *out, list.fields())?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let app_config = cli.app_config()?;
    logging::init(cli.log_file.as_deref())?;

    let config = cli.program_config();
    tracing::info!(
        mode = ?config.screen_mode,
        mouse = config.mouse,
        seeded = app_config.seed.len(),
        "starting form builder"
    );

    let model = FormBuilder::with_fields(app_config.seed.iter().copied());
    let mut program = Program::with_config(model, config);
    program.run()?;
    let list = program.into_model().into_builder();
    tracing::info!(fields = list.len(), "form builder exited");

    emit(app_config.emit, &list, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formloom_tui::ScreenMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("formloom").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_fullscreen_with_mouse() {
        let cli = parse(&[]);
        assert_eq!(cli.emit, EmitMode::None);
        let config = cli.program_config();
        assert_eq!(config.screen_mode, ScreenMode::AltScreen);
        assert!(config.mouse);
    }

    #[test]
    fn inline_height_and_no_mouse() {
        let config = parse(&["--inline-height", "12", "--no-mouse"]).program_config();
        assert_eq!(config.screen_mode, ScreenMode::Inline { ui_height: 12 });
        assert!(!config.mouse);
    }

    #[test]
    fn seed_keys_resolve_in_order() {
        let cli = parse(&["--seed", "dropdown,userName", "--emit", "json"]);
        let app = cli.app_config().unwrap();
        assert_eq!(app.emit, EmitMode::Json);
        let keys: Vec<_> = app.seed.iter().map(|def| def.key).collect();
        assert_eq!(keys, ["dropdown", "userName"]);
    }

    #[test]
    fn unknown_seed_key_is_usage_error() {
        let err = parse(&["--seed", "email,slider"]).app_config().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        match err {
            AppError::UnknownPaletteKey { key, expected } => {
                assert_eq!(key, "slider");
                assert!(expected.starts_with("userName, email"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_emit_mode_is_rejected_by_clap() {
        assert!(Cli::try_parse_from(["formloom", "--emit", "yaml"]).is_err());
    }

    #[test]
    fn emit_none_writes_nothing() {
        let mut list = BuilderList::new();
        list.add(&PALETTE[0], None);
        let mut out = Vec::new();
        emit(EmitMode::None, &list, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn emit_markup_matches_generator() {
        let mut list = BuilderList::new();
        list.add(&PALETTE[0], None);
        list.add(&PALETTE[7], None);
        let mut out = Vec::new();
        emit(EmitMode::Markup, &list, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n", markup::generate(list.fields())));
    }

    #[test]
    fn emit_markup_for_empty_list_writes_nothing() {
        let mut out = Vec::new();
        emit(EmitMode::Markup, &BuilderList::new(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
