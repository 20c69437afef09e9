//! Convert CoNLL dependency annotations to tree drawings.
//!
//! Usage:
//!   dependency2tree input.conll -o trees.dot            - one DOT file per sentence
//!   dependency2tree input.conll -l -o trees.tex -c      - one LaTeX document, compiled

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::iter;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use deptree_render::{
    Block, Converter, Document, ErrorPolicy, LabelPosition, Mode, RenderConfig,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod error;
use error::CliError;

mod output;

#[derive(Debug, Parser)]
#[command(name = "dependency2tree", version, about = "Draw dependency trees from CoNLL files")]
struct Cli {
    /// CoNLL input file (standard input when absent)
    input: Option<PathBuf>,

    /// Output file (standard output when absent); in graphviz mode the
    /// sentence number is added to the file name
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output mode: latex or graphviz
    #[arg(short, long, default_value_t = Mode::Graphviz)]
    mode: Mode,

    /// Shortcut for --mode latex
    #[arg(short, long, conflicts_with = "mode")]
    latex: bool,

    /// Include morphological features
    #[arg(long)]
    feats: bool,

    /// Reduce the spacing between nodes
    #[arg(long)]
    compact: bool,

    /// Relation label position: head, middle or dependent
    #[arg(long, value_name = "POSITION", default_value_t = LabelPosition::Middle)]
    label_position: LabelPosition,

    /// Skip multiword token ranges such as 3-4
    #[arg(long)]
    ignore_double_indices: bool,

    /// Report invalid sentences and continue with the next one
    #[arg(long)]
    skip_invalid: bool,

    /// Run the compile command on the output
    #[arg(short, long, requires = "output")]
    compile: bool,

    /// Compile command (default: lualatex for latex, dot for graphviz)
    #[arg(long, value_name = "CMD")]
    cmd: Option<String>,

    /// Image format passed to dot -T
    #[arg(short = 'f', long, value_name = "FMT", default_value = "svg")]
    img_format: String,

    /// Log progress to standard error
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            mode: if self.latex { Mode::Latex } else { self.mode },
            compact: self.compact,
            show_features: self.feats,
            label_position: self.label_position,
        }
    }

    fn compile_command(&self, mode: Mode) -> Option<&str> {
        if !self.compile {
            return None;
        }

        Some(self.cmd.as_deref().unwrap_or(match mode {
            Mode::Latex => "lualatex",
            Mode::Graphviz => "dot",
        }))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("dependency2tree: {}", err);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.render_config();
    debug!(?config, "rendering configuration");

    let policy = if cli.skip_invalid {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };
    let converter = Converter::new(config)
        .policy(policy)
        .ignore_multiword(cli.ignore_double_indices);

    let output = match &cli.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            converter.convert(BufReader::new(file))?
        }
        None => converter.convert(io::stdin().lock())?,
    };

    if !output.skipped().is_empty() {
        warn!("skipped {} invalid sentence(s)", output.skipped().len());
    }

    let compile = cli.compile_command(config.mode);
    match (output.into_document(), &cli.output) {
        (Document::Latex(document), Some(path)) => {
            output::write_document(path, &document, compile)
        }
        (Document::Graphviz(graphs), Some(path)) => output::write_graphs(
            path,
            &graphs,
            compile.map(|command| (command, cli.img_format.as_str())),
        ),
        (Document::Latex(document), None) => print(iter::once(document.as_str())),
        (Document::Graphviz(graphs), None) => print(graphs.iter().map(Block::text)),
    }
}

fn print<'a, I>(blocks: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = &'a str>,
{
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let write_err = |source| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source,
    };

    for (idx, block) in blocks.into_iter().enumerate() {
        if idx > 0 {
            writeln!(stdout).map_err(write_err)?;
        }
        stdout.write_all(block.as_bytes()).map_err(write_err)?;
    }

    stdout.flush().map_err(write_err)
}
