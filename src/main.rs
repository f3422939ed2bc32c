use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cedict::{translit, Config, Dict};

/// CC-CEDICT Chinese-English dictionary lookup and transliteration.
///
/// Hanzi input is transliterated to pinyin; anything else searches the
/// dictionary by English meaning.
#[derive(Debug, Parser)]
#[command(name = "cedict", version)]
struct Cli {
    /// Query text, joined with spaces
    text: Vec<String>,

    /// Load a local dictionary file (.txt or .txt.gz) instead of
    /// downloading the latest archive
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Save the populated dictionary to a file (.gz compresses)
    #[arg(long)]
    save: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print matching entries as JSON
    #[arg(long)]
    json: bool,

    /// Keep numbered-tone pinyin in transliterations
    #[arg(long)]
    numbered: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_toml(path)?,
        None => Config::default(),
    };

    let dict: Arc<Dict> = match cli.dict.as_ref().or(config.dict.as_ref()) {
        Some(path) => Arc::new(Dict::load(path)?),
        None => Dict::global(),
    };
    dict.ready()?;

    if let Some(path) = &cli.save {
        dict.save(path)?;
        eprintln!("saved {} entries to {}", dict.metadata()?.entries, path.display());
    }

    let text = cli.text.join(" ");
    if text.is_empty() {
        return Ok(());
    }

    if translit::is_hanzi(&text) {
        if cli.numbered || config.numbered_tones {
            println!("{}", dict.hanzi_to_pinyin(&text)?);
        } else {
            println!("{}", dict.transliterate(&text)?);
        }
        return Ok(());
    }

    let results = dict.entries_by_meaning(&text)?;
    let shown: Vec<_> = results.into_iter().take(config.max_results).collect();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        for entry in shown {
            println!("{}", entry.marshal());
        }
    }
    Ok(())
}
