use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::AlignedVec;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use svo_conll::{ConllReader, LabelScheme};
use svo_extractor::{ExtractorConfig, SvoExtractor};
use svo_protocol::Corpus;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "svo",
    author,
    version,
    about = "Extracts subject-verb-object constructs from dependency parses"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract constructs and print one JSON report per sentence
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// JSON extractor configuration
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Additional label the object search may descend through (repeatable)
        #[arg(long = "skip", value_name = "LABEL")]
        skip: Vec<String>,

        /// Override the object search depth
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Print a single indented JSON array instead of JSON lines
        #[arg(long)]
        pretty: bool,
    },
    /// Compile a corpus into a binary rkyv archive
    Pack {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Corpus file (.json, .conll, .conllu or .rkyv)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Input format; guessed from the extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Dependency labels of CoNLL input follow Universal Dependencies v2
    #[arg(long)]
    ud: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Conll,
    Archive,
}

impl Format {
    fn guess(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "conll" | "conllu" | "conllx" => Some(Self::Conll),
            "rkyv" => Some(Self::Archive),
            _ => None,
        }
    }
}

fn load_corpus(args: &InputArgs) -> anyhow::Result<Corpus> {
    let path = &args.input;
    let format = match args.format.or_else(|| Format::guess(path)) {
        Some(format) => format,
        None => bail!("cannot tell the format of {:?}; pass --format", path),
    };
    info!(?path, ?format, "reading corpus");

    let corpus = match format {
        Format::Json => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {:?}", path))?
        }
        Format::Conll => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            let scheme = if args.ud { LabelScheme::UniversalV2 } else { LabelScheme::Clear };
            Corpus::new(ConllReader::new(scheme).read(&text)?)
        }
        Format::Archive => {
            let raw = fs::read(path).with_context(|| format!("reading {:?}", path))?;
            // Archives must be read from aligned memory
            let mut bytes = AlignedVec::with_capacity(raw.len());
            bytes.extend_from_slice(&raw);
            rkyv::from_bytes::<Corpus>(&bytes)
                .map_err(|e| anyhow!("invalid archive {:?}: {:?}", path, e))?
        }
    };

    if corpus.version != Corpus::CURRENT_VERSION {
        warn!(version = corpus.version, "corpus version differs from {}", Corpus::CURRENT_VERSION);
    }
    Ok(corpus)
}

fn load_config(
    path: Option<&Path>,
    skip: Vec<String>,
    max_depth: Option<usize>,
) -> anyhow::Result<ExtractorConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            ExtractorConfig::from_json(&text)?
        }
        None => ExtractorConfig::default(),
    };
    config = config.with_skippable(skip);
    if let Some(depth) = max_depth {
        config.max_search_depth = depth;
    }
    Ok(config)
}

fn extract(corpus: &Corpus, extractor: &SvoExtractor, pretty: bool) -> anyhow::Result<()> {
    let mut reports = Vec::with_capacity(corpus.sentences.len());
    let mut skipped = 0usize;

    for record in &corpus.sentences {
        match extractor.analyze(record) {
            Ok(report) => reports.push(report),
            Err(err) => {
                warn!(sentence = %record.id, error = %err, "skipping malformed sentence");
                skipped += 1;
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &reports)?;
        writeln!(out)?;
    } else {
        for report in &reports {
            serde_json::to_writer(&mut out, report)?;
            writeln!(out)?;
        }
    }

    let constructs: usize = reports.iter().map(|r| r.constructs.len()).sum();
    info!(sentences = reports.len(), skipped, constructs, "extraction finished");
    Ok(())
}

fn pack(corpus: &Corpus, output: &Path) -> anyhow::Result<()> {
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(corpus)
        .map_err(|e| anyhow!("serializing corpus: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(output, &bytes).with_context(|| format!("writing {:?}", output))?;
    info!(?output, sentences = corpus.sentences.len(), bytes = bytes.len(), "archive written");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract { input, config, skip, max_depth, pretty } => {
            let corpus = load_corpus(&input)?;
            let config = load_config(config.as_deref(), skip, max_depth)?;
            extract(&corpus, &SvoExtractor::new(config), pretty)
        }
        Command::Pack { input, output } => {
            let corpus = load_corpus(&input)?;
            pack(&corpus, &output)
        }
    }
}
