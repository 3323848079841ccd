use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use blendshape_baker::config::{get_config, set_config};
use blendshape_baker::io::{load_mesh, save_mesh};
use blendshape_baker::selection::{filter_indices, find_containing, find_exact, resolve_bulk};
use blendshape_baker::{BakeEntries, Baker, Mesh};

#[derive(Parser, Debug)]
#[command(
    name = "blendshape-baker",
    version,
    about = "Rescale BlendShapes so that the new 100% equals an old percentage"
)]
struct Cli {
    /// Enable per-BlendShape debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List BlendShapes of a mesh
    List {
        path: PathBuf,
        /// Substring or `*` wildcard filter
        #[arg(long)]
        filter: Option<String>,
    },
    /// Bake one mesh
    Bake {
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Bake several meshes with the same selection
    Batch {
        inputs: Vec<PathBuf>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct SelectionArgs {
    /// `index=percent` (percent optional)
    #[arg(long = "index")]
    indices: Vec<String>,
    /// `name=percent`, exact name match (percent optional)
    #[arg(long = "name")]
    names: Vec<String>,
    /// Add every BlendShape whose name contains this text
    #[arg(long = "contains")]
    contains: Vec<String>,
    /// Add every BlendShape matching this wildcard / substring filter
    #[arg(long = "match")]
    patterns: Vec<String>,
    /// File with names separated by newlines, commas, semicolons or tabs
    #[arg(long)]
    names_file: Option<PathBuf>,
    /// Percent used where none is given (new 100% = old x%)
    #[arg(long)]
    percent: Option<f32>,
    /// Apply this percent to every entry after selection
    #[arg(long)]
    all_percent: Option<f32>,
    /// Output mesh name suffix
    #[arg(long)]
    suffix: Option<String>,
}

fn parse_percent(text: &str) -> Result<f32> {
    let value: f32 = text
        .trim()
        .parse()
        .with_context(|| format!("invalid percent '{}'", text))?;
    if !value.is_finite() {
        bail!("invalid percent '{}'", text);
    }
    Ok(value)
}

/// `key=percent` → (key, Some(percent))；没有 `=` 时 percent 为 None
fn split_assignment(text: &str) -> Result<(String, Option<f32>)> {
    match text.rsplit_once('=') {
        Some((key, pct)) => Ok((key.trim().to_string(), Some(parse_percent(pct)?))),
        None => Ok((text.trim().to_string(), None)),
    }
}

/// 添加单个条目；重复索引带显式比例时以后者为准
fn add_assigned(
    entries: &mut BakeEntries,
    index: usize,
    names: &[String],
    pct: Option<f32>,
    default_percent: f32,
) {
    if entries.add(index, names, pct.unwrap_or(default_percent)) {
        return;
    }
    if let Some(pct) = pct {
        log::warn!(
            "BlendShape {} ({}) selected more than once, using {}%",
            index,
            names[index],
            pct
        );
        entries.set_percent(index, pct);
    }
}

fn build_entries(mesh: &Mesh, args: &SelectionArgs, default_percent: f32) -> Result<BakeEntries> {
    let names = mesh.blend_shape_names();
    let mut entries = BakeEntries::new();

    for item in &args.indices {
        let (key, pct) = split_assignment(item)?;
        let index: usize = key
            .parse()
            .with_context(|| format!("invalid index '{}'", key))?;
        if index >= names.len() {
            bail!(
                "index {} out of range (0~{})",
                index,
                names.len().saturating_sub(1)
            );
        }
        add_assigned(&mut entries, index, &names, pct, default_percent);
    }

    for item in &args.names {
        let (name, pct) = split_assignment(item)?;
        let index = find_exact(&names, &name)
            .ok_or_else(|| anyhow!("BlendShape \"{}\" not found", name))?;
        add_assigned(&mut entries, index, &names, pct, default_percent);
    }

    for needle in &args.contains {
        let found = find_containing(&names, needle)?;
        entries.add_all(found, &names, default_percent);
    }

    for pattern in &args.patterns {
        let found = filter_indices(&names, pattern)?;
        if found.is_empty() {
            log::warn!("'{}' matched no BlendShape", pattern);
        }
        entries.add_all(found, &names, default_percent);
    }

    if let Some(path) = &args.names_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let (found, missing) = resolve_bulk(&names, &text);
        let added = entries.add_all(found, &names, default_percent);
        if !missing.is_empty() {
            log::warn!(
                "{} names not found ({}); added {}",
                missing.len(),
                missing.join(", "),
                added
            );
        }
    }

    if let Some(pct) = args.all_percent {
        entries.set_all_percent(pct);
    }

    Ok(entries)
}

fn apply_config(cli_debug: bool, args: &SelectionArgs) -> Result<f32> {
    let mut config = get_config();
    if let Some(pct) = args.percent {
        if !pct.is_finite() {
            bail!("invalid percent {}", pct);
        }
        config.default_percent = pct;
    }
    if let Some(suffix) = &args.suffix {
        config.output_suffix = suffix.clone();
    }
    config.debug_log = cli_debug;
    let default_percent = config.default_percent;
    set_config(config);
    Ok(default_percent)
}

/// 本次运行内唯一的输出路径：重名时依次尝试 `name_1.json`、`name_2.json`……
fn unique_output_path(out_dir: &Path, mesh_name: &str, used: &mut HashSet<PathBuf>) -> PathBuf {
    let mut path = out_dir.join(format!("{}.json", mesh_name));
    let mut n = 1;
    while used.contains(&path) {
        path = out_dir.join(format!("{}_{}.json", mesh_name, n));
        n += 1;
    }
    used.insert(path.clone());
    path
}

#[derive(Debug, Default)]
struct BatchOutcome {
    written: Vec<PathBuf>,
    failed: Vec<(PathBuf, String)>,
}

/// 批量烘焙；单个 Mesh 的读取、选择、烘焙或写出失败只记入 `failed`
fn run_batch(
    inputs: &[PathBuf],
    out_dir: &Path,
    selection: &SelectionArgs,
    default_percent: f32,
    baker: &Baker,
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    let mut sources = Vec::with_capacity(inputs.len());
    let mut jobs = Vec::with_capacity(inputs.len());

    for path in inputs {
        let prepared = load_mesh(path).map_err(anyhow::Error::from).and_then(|mesh| {
            let entries = build_entries(&mesh, selection, default_percent)?;
            let scale_map = entries.to_scale_map(mesh.blend_shape_count());
            Ok((mesh, scale_map))
        });
        match prepared {
            Ok(job) => {
                sources.push(path);
                jobs.push(job);
            }
            Err(e) => {
                eprintln!("{}: {:#}", path.display(), e);
                outcome.failed.push((path.clone(), format!("{:#}", e)));
            }
        }
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut used = HashSet::new();
    for (path, result) in sources.into_iter().zip(baker.bake_batch(&jobs)) {
        let written = result.map_err(anyhow::Error::from).and_then(|(baked, report)| {
            let out = unique_output_path(out_dir, &baked.name, &mut used);
            save_mesh(&out, &baked)?;
            println!("{} -> {}  [{}]", path.display(), out.display(), report.summary());
            Ok(out)
        });
        match written {
            Ok(out) => outcome.written.push(out),
            Err(e) => {
                eprintln!("{}: {:#}", path.display(), e);
                outcome.failed.push((path.clone(), format!("{:#}", e)));
            }
        }
    }
    Ok(outcome)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.cmd {
        Command::List { path, filter } => {
            let mesh = load_mesh(&path)?;
            let names = mesh.blend_shape_names();
            let indices = filter_indices(&names, filter.as_deref().unwrap_or(""))?;
            println!(
                "Mesh: {}    Vertices: {}    BlendShapes: {}",
                mesh.name,
                mesh.vertex_count(),
                mesh.blend_shape_count()
            );
            for i in indices {
                println!(
                    "{:03}  {}  ({} frames)",
                    i,
                    names[i],
                    mesh.blend_shape_frame_count(i)?
                );
            }
        }
        Command::Bake { input, out, selection } => {
            let default_percent = apply_config(cli.debug, &selection)?;
            let mesh = load_mesh(&input)?;
            let entries = build_entries(&mesh, &selection, default_percent)?;

            let (baked, report) = Baker::new().bake_entries(&mesh, &entries)?;
            save_mesh(&out, &baked)?;
            println!("Wrote {}", out.display());
            println!("Scale: {}", report.summary());
        }
        Command::Batch { inputs, out_dir, selection } => {
            if inputs.is_empty() {
                bail!("no input meshes");
            }
            let default_percent = apply_config(cli.debug, &selection)?;
            let outcome = run_batch(&inputs, &out_dir, &selection, default_percent, &Baker::new())?;
            if !outcome.failed.is_empty() {
                bail!("{} of {} meshes failed", outcome.failed.len(), inputs.len());
            }
        }
    }
    Ok(())
}
