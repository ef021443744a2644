use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scenegen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate `<Class>.h` and `<Class>.cpp` from a scene graph.
    Generate(GenerateArgs),
    /// Print the planned node table.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input scene graph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Codegen config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the generated class name.
    #[arg(long)]
    class_name: Option<String>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input scene graph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<scenegen::SceneGraph> {
    let f = File::open(path).with_context(|| format!("open scene graph '{}'", path.display()))?;
    let r = BufReader::new(f);
    let graph: scenegen::SceneGraph =
        serde_json::from_reader(r).with_context(|| "parse scene graph JSON")?;
    Ok(graph)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let graph = read_scene_json(&args.in_path)?;

    let mut config = match &args.config {
        Some(path) => scenegen::CodegenConfig::from_path(path)?,
        None => scenegen::CodegenConfig::default(),
    };
    if let Some(name) = args.class_name {
        config.class_name = name;
    }

    let generated = scenegen::generate_cppwinrt(&graph, &config)
        .with_context(|| format!("generate from '{}'", args.in_path.display()))?;
    let packaged = generated.package();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (name, text) in [
        (&packaged.header_name, &packaged.header),
        (&packaged.source_name, &packaged.source),
    ] {
        let path = args.out_dir.join(name);
        std::fs::write(&path, text).with_context(|| format!("write '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    let fp = generated.fingerprint();
    eprintln!("fingerprint {:016x}{:016x}", fp.hi, fp.lo);
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let graph = read_scene_json(&args.in_path)?;
    graph.validate()?;
    let mut registry = scenegen::walk(&graph)?;
    scenegen::plan_storage(&mut registry);
    print!("{}", scenegen::dump(&registry));
    Ok(())
}
