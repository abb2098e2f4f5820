use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thai_segment::{DEFAULT_ENGINE, Dictionary, DictionarySegmenter};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use thaifreq::{AppState, DEFAULT_MIN_FREQ, Pipeline, PipelineOptions, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "thaifreq")]
#[command(about = "Build word-frequency tables from Thai text")]
struct Cli {
    /// Word list for the dictionary segmenter (one word per line).
    #[arg(long, global = true)]
    dict: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count, filter and normalize tokens of the given files (stdin if none).
    Count {
        #[command(flatten)]
        pipeline: PipelineArgs,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(long, short)]
        output: Option<PathBuf>,
        files: Vec<PathBuf>,
    },
    /// Print the cleaned, segmented tokens of each document.
    Tokenize {
        #[command(flatten)]
        pipeline: PipelineArgs,
        files: Vec<PathBuf>,
    },
    /// Serve the pipeline over HTTP.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// Keep numbers as a `<NUM>` placeholder instead of dropping them.
    #[arg(long)]
    keep_numerals: bool,
    #[arg(long)]
    engine: Option<String>,
    #[arg(long)]
    min_freq: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Tsv,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let segmenter = load_segmenter(cli.dict)?;

    match cli.command {
        Commands::Count {
            pipeline,
            format,
            output,
            files,
        } => {
            let options = pipeline.resolve();
            let documents = read_documents(&files)?;
            let report = Pipeline::new(&segmenter, options).run(&documents)?;
            let out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path)
                        .with_context(|| format!("create output {}", path.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };
            write_report(&report, format, out)?;
            if let Some(path) = output {
                info!("wrote {} entries to {}", report.entries.len(), path.display());
            }
        }
        Commands::Tokenize { pipeline, files } => {
            let pipeline = Pipeline::new(&segmenter, pipeline.resolve());
            let mut out = io::stdout().lock();
            for doc in read_documents(&files)? {
                writeln!(out, "{}", pipeline.tokenize(&doc)?.join("|"))?;
            }
        }
        Commands::Serve {
            host,
            port,
            pipeline,
        } => {
            let config = ServeConfig::load(host, port, pipeline.resolve());
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(serve(config, segmenter))?;
        }
    }
    Ok(())
}

impl PipelineArgs {
    /// Flags first, then `THAIFREQ_*` environment variables, then defaults.
    fn resolve(self) -> PipelineOptions {
        let engine = self
            .engine
            .or_else(|| env::var("THAIFREQ_ENGINE").ok())
            .unwrap_or_else(|| DEFAULT_ENGINE.to_string());
        let min_freq = self
            .min_freq
            .or_else(|| {
                env::var("THAIFREQ_MIN_FREQ")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
            })
            .unwrap_or(DEFAULT_MIN_FREQ);
        PipelineOptions {
            keep_numerals: self.keep_numerals,
            engine,
            min_freq,
        }
    }
}

#[derive(Debug, Clone)]
struct ServeConfig {
    host: String,
    port: u16,
    max_text_bytes: usize,
    defaults: PipelineOptions,
}

impl ServeConfig {
    fn load(host: Option<String>, port: Option<u16>, defaults: PipelineOptions) -> Self {
        let host = host
            .or_else(|| env::var("HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port
            .or_else(|| env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()))
            .unwrap_or(DEFAULT_PORT);
        let max_text_bytes = env::var("MAX_TEXT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_TEXT_BYTES);
        Self {
            host,
            port,
            max_text_bytes,
            defaults,
        }
    }
}

async fn serve(config: ServeConfig, segmenter: DictionarySegmenter) -> Result<()> {
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "default engine {} (min_freq {}, keep_numerals {})",
        config.defaults.engine, config.defaults.min_freq, config.defaults.keep_numerals
    );

    let state = AppState {
        segmenter: Arc::new(segmenter),
        defaults: config.defaults,
        max_text_bytes: config.max_text_bytes,
    };
    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_segmenter(cli_dict: Option<PathBuf>) -> Result<DictionarySegmenter> {
    let start = Instant::now();
    let dict = match cli_dict.or_else(|| env::var("THAIFREQ_DICT").ok().map(PathBuf::from)) {
        Some(path) => Dictionary::from_file(&path)?,
        None => Dictionary::embedded()?,
    };
    info!(
        "dictionary ready with {} words in {} ms",
        dict.len(),
        start.elapsed().as_millis()
    );
    Ok(DictionarySegmenter::new(dict))
}

/// One document per file, or all of stdin when no file is given.
fn read_documents(files: &[PathBuf]) -> Result<Vec<String>> {
    if files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(vec![text]);
    }
    files.iter().map(|path| read_document(path)).collect()
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn write_report(report: &thaifreq::FrequencyReport, format: Format, mut out: impl Write) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
            out.flush()?;
        }
        Format::Tsv => report.write_tsv(out)?,
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
