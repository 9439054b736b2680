use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sillage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scene headlessly and print each node's style per tick.
    Simulate(SimulateArgs),
    /// Print preset effects as JSON.
    Presets(PresetsArgs),
    /// Count rows of a JSON table matching `column=value`.
    Count(CountArgs),
    /// Ask a generator for a consultation; prints the apology on failure.
    Consult(GenerateArgs),
    /// Ask a generator for a description; prints nothing on failure.
    Describe(GenerateArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Css)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Css,
    Json,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Only this preset.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct CountArgs {
    /// JSON array of row objects.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Table name the rows are served as.
    #[arg(long, default_value = "rows")]
    table: String,

    /// Queried table; defaults to `--table`.
    #[arg(long)]
    query: Option<String>,

    /// Predicate, e.g. `active=true`.
    #[arg(long)]
    filter: String,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Generator program; reads the prompt on stdin, writes the response to stdout.
    #[arg(long)]
    program: PathBuf,

    /// Program argument (repeatable).
    #[arg(long = "arg", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Prompt text.
    #[arg(long)]
    prompt: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Presets(args) => cmd_presets(args),
        Command::Count(args) => cmd_count(args),
        Command::Consult(args) => cmd_generate(args, true),
        Command::Describe(args) => cmd_generate(args, false),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SILLAGE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_scene_json(path: &Path) -> anyhow::Result<sillage::SceneSpec> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: sillage::SceneSpec =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let report = sillage::run_scene(&scene)
        .with_context(|| format!("run scene '{}'", args.in_path.display()))?;

    match args.format {
        Format::Css => print!("{}", report.to_css()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let presets = match args.name.as_deref() {
        Some(name) => vec![
            sillage::Preset::from_name(name)
                .with_context(|| format!("unknown preset '{name}'"))?,
        ],
        None => sillage::Preset::ALL.to_vec(),
    };

    let specs = presets
        .into_iter()
        .map(|p| p.spec())
        .collect::<sillage::SillageResult<Vec<_>>>()?;
    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}

fn cmd_count(args: CountArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read rows '{}'", args.in_path.display()))?;
    let table = sillage::JsonTable::from_json(args.table.clone(), &json)
        .with_context(|| "parse rows JSON")?;
    let filter: sillage::Filter = args.filter.parse()?;

    let query = args.query.as_deref().unwrap_or(&args.table);
    println!("{}", sillage::report_count(&table, query, &filter));
    Ok(())
}

fn cmd_generate(args: GenerateArgs, consultation: bool) -> anyhow::Result<()> {
    let generator = sillage::CommandGenerator::new(args.program, args.args)?;
    if consultation {
        println!("{}", sillage::consult(&generator, &args.prompt));
    } else if let Some(text) = sillage::describe(&generator, &args.prompt) {
        println!("{text}");
    }
    Ok(())
}
