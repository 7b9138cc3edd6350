//! annota - outline note annotation tool

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use flexi_logger::{Logger, LoggerHandle};
use log::{info, warn};

use annota::{
    Error, Exporter, Importer, MarkdownExporter, NodeAnnotator, OutlineBuilder, SeparatorConfig,
    SeparatorOverrides,
};

#[derive(Parser)]
#[command(name = "annota")]
#[command(version, about = "Parse inline and detailed notes from outline text", long_about = None)]
#[command(after_help = "EXAMPLES:
    annota notes.md                 Print the annotated tree as JSON
    annota -f outline notes.md      Rewrite the outline in canonical form
    annota --note '::' notes.md     Use '::' as the inline-note separator
    annota --check notes.md         Verify that export and re-import agree")]
struct Cli {
    /// Input outline file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// JSON file with separator overrides ({"node", "note", "noteBlock", "escape"})
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Node-item marker (default "-")
    #[arg(long, value_name = "MARKER")]
    node: Option<String>,

    /// Inline-note separator (default ":")
    #[arg(long, value_name = "MARKER")]
    note: Option<String>,

    /// Detailed-note block marker (default ">")
    #[arg(long, value_name = "MARKER")]
    note_block: Option<String>,

    /// Escape token (default "\")
    #[arg(long, value_name = "MARKER")]
    escape: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Verify the export/re-import round trip instead of printing
    #[arg(long)]
    check: bool,

    /// Log debug details to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Annotated tree as JSON
    Json,
    /// Canonical outline text
    Outline,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logger(&cli) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(cli: &Cli) -> annota::Result<LoggerHandle> {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    Logger::try_with_env_or_str(level)
        .map_err(|e| Error::Logger(e.to_string()))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|e| Error::Logger(e.to_string()))
}

fn load_config(cli: &Cli) -> annota::Result<SeparatorConfig> {
    let from_file = match &cli.config {
        Some(path) => SeparatorOverrides::from_json(&std::fs::read_to_string(path)?)?,
        None => SeparatorOverrides::default(),
    };
    let from_flags = SeparatorOverrides {
        node: cli.node.clone(),
        note: cli.note.clone(),
        note_block: cli.note_block.clone(),
        escape: cli.escape.clone(),
    };
    Ok(SeparatorConfig::from_overrides(from_file.merge(from_flags)))
}

/// Returns `Ok(false)` when a round-trip check fails.
fn run(cli: &Cli) -> annota::Result<bool> {
    let config = load_config(cli)?;
    let builder = OutlineBuilder::new(config.clone());
    let annotator = NodeAnnotator::new(config.clone());
    let exporter = MarkdownExporter::new(config);

    let source = builder.import_file(&cli.input)?;
    let tree = annotator.annotate(&source);
    info!(
        "event=annotated input={} nodes={}",
        cli.input.display(),
        tree.node_count()
    );

    if cli.check {
        return Ok(check_round_trip(cli, &builder, &annotator, &exporter, &tree));
    }

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &tree)?;
            writeln!(out)?;
        }
        Format::Outline => exporter.export(&tree, &mut out)?,
    }
    out.flush()?;

    Ok(true)
}

fn check_round_trip(
    cli: &Cli,
    builder: &OutlineBuilder,
    annotator: &NodeAnnotator,
    exporter: &MarkdownExporter,
    tree: &annota::AnnotatedNode,
) -> bool {
    let text = exporter.export_to_string(tree);
    let reparsed = annotator.annotate(&builder.import(&text));

    if reparsed == *tree {
        if !cli.quiet {
            println!(
                "{}: round trip ok ({} nodes)",
                cli.input.display(),
                tree.node_count()
            );
        }
        return true;
    }

    let again = exporter.export_to_string(&reparsed);
    let line = text
        .lines()
        .zip(again.lines())
        .position(|(a, b)| a != b)
        .map(|i| i + 1)
        .unwrap_or_else(|| text.lines().count().min(again.lines().count()) + 1);
    warn!("event=round_trip_mismatch line={line}");
    eprintln!(
        "{}: round trip mismatch near exported line {line}",
        cli.input.display()
    );
    false
}
