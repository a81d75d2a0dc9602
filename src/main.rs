//! Command line entry point: translates a key using the translation files of a project.

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use i18n_translator::config::SettingsManager;
use i18n_translator::indexer::load_translation_table;
use i18n_translator::{
    Substitutions,
    Translator,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Project directory containing translation files (and optionally `.i18n-translator.json`)
    dir: PathBuf,
    /// Translation key
    key: String,
    /// Substitutions as `name=value`
    #[arg(value_parser = parse_substitution)]
    substitutions: Vec<(String, String)>,
    /// Language to use instead of the host locale
    #[arg(long)]
    lang: Option<String>,
    /// Print the resolved configuration as JSON before the translation
    #[arg(long)]
    show_config: bool,
}

/// `name=value` を分解する
fn parse_substitution(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// 設定と翻訳ファイルを読み込み、翻訳結果を出力する
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings_manager = SettingsManager::new();
    settings_manager.load_settings(Some(&cli.dir))?;
    let settings = settings_manager.get_settings();

    let table = load_translation_table(&cli.dir, settings)?;
    let mut builder = Translator::builder().settings(settings).translations(table);
    if let Some(lang) = cli.lang {
        builder = builder.language(lang);
    }
    let translator = builder.build();

    let mut stdout = io::stdout().lock();
    if cli.show_config {
        writeln!(stdout, "{}", serde_json::to_string(&translator.configuration())?)?;
    }

    let substitutions: Substitutions<()> = cli.substitutions.into_iter().collect();
    let translation = translator.translate(cli.key.as_str(), Some(&substitutions));
    writeln!(stdout, "{}", translation.render_with(|()| String::new()))?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
