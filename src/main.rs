use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use text_similarity::{
    Document, EngineConfig, LegacyDecoder, LossyUtf8Decoder, Result, SimilarityEngine, TextDecoder,
    UnicodeWordTokenizer, Utf8Decoder, Weighting,
};

/// Score the similarity of two text documents
#[derive(Debug, Parser)]
#[command(name = "textsim", version)]
struct Cli {
    /// first document
    doc_a: PathBuf,
    /// second document
    doc_b: PathBuf,

    /// TOML engine config
    #[arg(long)]
    config: Option<PathBuf>,
    /// dictionary directory holding stop_words.utf8 and idf.utf8
    #[arg(long, conflicts_with = "config")]
    dict: Option<PathBuf>,
    /// stopword resource, overrides config / dict
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// idf resource, overrides config / dict
    #[arg(long)]
    idf: Option<PathBuf>,
    /// terms taken from each document
    #[arg(long)]
    top_k: Option<usize>,
    /// raw | tfidf
    #[arg(long)]
    weighting: Option<Weighting>,
    /// replace invalid UTF-8 instead of failing
    #[arg(long)]
    lossy: bool,
    /// decode documents from a legacy encoding label, e.g. gbk
    #[arg(long, conflicts_with = "lossy")]
    encoding: Option<String>,
    /// print every stage of the comparison
    #[arg(long)]
    explain: bool,
    /// debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match (&self.config, &self.dict) {
            (Some(path), _) => EngineConfig::load(path)?,
            (None, Some(dir)) => EngineConfig::from_dict_dir(dir),
            (None, None) => EngineConfig::default(),
        };
        if let Some(path) = &self.stopwords {
            config.stopwords_path = path.clone();
        }
        if let Some(path) = &self.idf {
            config.idf_path = path.clone();
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if let Some(weighting) = self.weighting {
            config.weighting = weighting;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.engine_config()?;
    let start = Instant::now();
    let engine = SimilarityEngine::from_config(&config, UnicodeWordTokenizer)?;
    log::debug!("engine ready in {:?}", start.elapsed());

    let legacy;
    let decoder: &dyn TextDecoder = match &cli.encoding {
        Some(label) => {
            legacy = LegacyDecoder::for_label(label)?;
            &legacy
        }
        None if cli.lossy => &LossyUtf8Decoder,
        None => &Utf8Decoder,
    };
    let doc_a = Document::from_path(&cli.doc_a, decoder)?;
    let doc_b = Document::from_path(&cli.doc_b, decoder)?;

    let start = Instant::now();
    if cli.explain {
        let report = engine.analyze(&doc_a, &doc_b)?;
        println!("{report}");
    } else {
        let score = engine.similarity_documents(&doc_a, &doc_b)?;
        println!("{score:.6}");
    }
    log::debug!("compared in {:?}", start.elapsed());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[error] {err}");
            ExitCode::FAILURE
        }
    }
}
