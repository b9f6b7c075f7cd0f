use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use coatl_core::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct ItemSummary<'a> {
    kind: ItemKind,
    name: &'a str,
    mode: DisplayMode,
    geometry: Geometry,
}

#[derive(Serialize)]
struct LoadedSummary<'a> {
    path: &'a Path,
    window: Geometry,
    items: Vec<ItemSummary<'a>>,
    warnings: &'a [LoadWarning],
}

#[derive(Serialize)]
struct FailureSummary<'a> {
    path: &'a Path,
    error: String,
    manifest: &'a ManifestDiagnostic,
}

#[derive(Serialize)]
struct OpenSummary<'a> {
    loaded: Vec<LoadedSummary<'a>>,
    failures: Vec<FailureSummary<'a>>,
}

fn cli() -> Command {
    Command::new("coatl")
        .version(coatl_core::VERSION)
        .about("Inspect and create coatl workspace files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Workspace configuration (TOML)"),
        )
        .subcommand(
            Command::new("open")
                .about("Load workspace files and report their contents")
                .arg(
                    Arg::new("paths")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Main .cl files to open"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("manifest")
                .about("Show a workspace's dependency manifest and check it")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Main .cl file or its .cld manifest"),
                ),
        )
        .subcommand(
            Command::new("demo")
                .about("Create and save a sample workspace")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Where to save; .cl is appended if missing"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => WorkspaceConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WorkspaceConfig::default(),
    };

    match matches.subcommand() {
        Some(("open", args)) => open(args, config),
        Some(("manifest", args)) => manifest(args),
        Some(("demo", args)) => demo(args, config),
        _ => Ok(()),
    }
}

fn open(args: &ArgMatches, config: WorkspaceConfig) -> Result<()> {
    let paths: Vec<&PathBuf> = args.get_many::<PathBuf>("paths").into_iter().flatten().collect();
    let engine = PersistenceEngine::from_config(config);
    let report = engine.open_many(paths);

    if args.get_flag("json") {
        let summary = OpenSummary {
            loaded: report.loaded.iter().map(summarize).collect(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureSummary {
                    path: &f.path,
                    error: f.error.to_string(),
                    manifest: &f.manifest,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for loaded in &report.loaded {
            print_loaded(loaded);
        }
        for failure in &report.failures {
            print_failure(failure);
        }
    }

    if !report.is_complete() {
        bail!(
            "{} of {} files failed to open",
            report.failures.len(),
            report.attempted()
        );
    }
    Ok(())
}

fn summarize(loaded: &LoadedWorkspace) -> LoadedSummary<'_> {
    let ws = &loaded.workspace;
    let items = ItemKind::ALL
        .into_iter()
        .flat_map(move |kind| {
            ws.registry(kind).list().map(move |e| ItemSummary {
                kind,
                name: e.name(),
                mode: e.placement().mode(),
                geometry: e.placement().geometry(),
            })
        })
        .collect();
    LoadedSummary {
        path: &loaded.path,
        window: ws.window_geometry(),
        items,
        warnings: &loaded.warnings,
    }
}

fn print_loaded(loaded: &LoadedWorkspace) {
    let summary = summarize(loaded);
    println!("{}", summary.path.display());
    println!("  Window: {}", summary.window);
    for item in &summary.items {
        println!(
            "  {:<8} {:<24} {:<10} {}",
            item.kind.as_str(),
            item.name,
            item.mode.as_str(),
            item.geometry
        );
    }
    for warning in summary.warnings {
        println!("  warning: {warning}");
    }
    println!();
}

fn print_failure(failure: &OpenFailure) {
    println!("{}", failure.path.display());
    println!("  error: {}", failure.error);
    match &failure.manifest {
        ManifestDiagnostic::Declared(deps) => {
            println!("  manifest declares:");
            for (package, version) in deps {
                println!("    {package} {version}");
            }
        }
        ManifestDiagnostic::Unavailable(reason) => {
            println!("  dependency information unavailable: {reason}");
        }
    }
    println!();
}

fn manifest(args: &ArgMatches) -> Result<()> {
    let Some(path) = args.get_one::<PathBuf>("path") else {
        bail!("missing path");
    };
    let manifest_path = if path.extension().is_some_and(|e| e == MANIFEST_EXTENSION) {
        path.clone()
    } else {
        manifest_path_for(path)
    };

    let manifest = read_manifest(&manifest_path)
        .with_context(|| format!("reading {}", manifest_path.display()))?;
    println!("{}", manifest_path.display());
    println!("  Saved: {}", manifest.saved_at.to_rfc3339());
    if let Some(checksum) = &manifest.state_checksum {
        println!("  State checksum: {checksum}");
    }
    for (package, version) in &manifest.dependencies {
        println!("  {package} {version}");
    }

    let mismatches = validate(&Environment::installed(), &manifest);
    if mismatches.is_empty() {
        println!("All dependencies match the installed environment");
    } else {
        for mismatch in &mismatches {
            println!("  mismatch: {mismatch}");
        }
    }
    Ok(())
}

fn demo(args: &ArgMatches, config: WorkspaceConfig) -> Result<()> {
    let Some(path) = args.get_one::<PathBuf>("path") else {
        bail!("missing path");
    };

    let mut ws = WorkspaceController::new(config);
    let graph = ws.new_graph(None)?.name().to_string();
    ws.update_item(ItemKind::Graph, &graph, |item| {
        if let Item::Graph(g) = item {
            g.set_title("Sine");
            g.set_axis_labels("t", "sin(t)");
            let mut series = Series::new("sin");
            for step in 0..=20 {
                let t = f64::from(step) * 0.314_159;
                series = series.with_point(t, t.sin());
            }
            g.add_series(series);
        }
    })?;

    let browser = BrowserItem::new("samples")
        .with_source("samples.csv")
        .with_requirement("csv-reader", "0.3");
    ws.add_item(ItemKind::Browser, Item::from(browser), "samples", None)?;
    ws.set_active(ItemKind::Graph, &graph)?;

    let paths = ws.save_as(path)?;
    println!("Saved {} and {}", paths.main.display(), paths.manifest.display());
    Ok(())
}
