//! Replay a captured scene snapshot through the binding collector and export pipeline.
//!
//! Examples:
//!   inputmap-dump dump --scene ".\\scene.json"
//!   inputmap-dump dump --scene ".\\scene.json" --out ".\\dumps" --force
//!   inputmap-dump table --file "%APPDATA%\\inputmap-dump\\modified_bindings.json"
//!   inputmap-dump summary --scene ".\\scene.json" --json
//!   inputmap-dump rebind --scene ".\\scene.json" --asset Controls --map UI --action NextRound --path "<Keyboard>/k"
//!
//! Notes:
//! - Without --out / --sentinel the per-user data dir is used.
//! - `dump` does nothing once the sentinel exists, unless --force is given.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};

use inputmap_core::prelude::*;

// ───────────────────────────── CLI Args ─────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "inputmap-dump",
    version,
    about = "Discover, dump and rebind input binding assets"
)]
struct Args {
    /// Optional JSON config (output dir, sentinel, depth, UI root markers, groups)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect binding assets from a scene snapshot and write a timestamped document
    Dump {
        /// Scene snapshot JSON [REQUIRED]
        #[arg(short, long)]
        scene: PathBuf,

        /// Directory for timestamped documents
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Sentinel file whose presence suppresses export
        #[arg(long)]
        sentinel: Option<PathBuf>,

        /// Hierarchy scan depth below each UI root
        #[arg(long)]
        max_depth: Option<usize>,

        /// Export even if the sentinel exists
        #[arg(short, long)]
        force: bool,
    },

    /// Print action -> (keyboard, gamepad) for a written document
    Table {
        /// Display document (sentinel) or export document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print binder statistics and asset provenance for a scene snapshot
    Summary {
        #[arg(short, long)]
        scene: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Override one binding of an action, then print the asset's table
    Rebind {
        #[arg(short, long)]
        scene: PathBuf,

        #[arg(long)]
        asset: String,

        #[arg(long)]
        map: String,

        #[arg(long)]
        action: String,

        /// Binding index within the action
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// New control path, e.g. "<Keyboard>/k"
        #[arg(long)]
        path: String,

        /// Interaction spec, e.g. "hold(duration=1.0)"
        #[arg(long, default_value = "")]
        interactions: String,
    },
}

// ───────────────────────────── Logger ─────────────────────────────

#[derive(Clone)]
struct StderrLogger {
    verbose: bool,
}

impl CoreLog for StderrLogger {
    fn info(&self, msg: &str) {
        println!("INFO:  {msg}");
    }
    fn warn(&self, msg: &str) {
        eprintln!("WARN:  {msg}");
    }
    fn error(&self, msg: &str) {
        eprintln!("ERROR: {msg}");
    }
    fn debug(&self, msg: &str) {
        if self.verbose {
            println!("DEBUG: {msg}");
        }
    }
}

// ───────────────────────────── main ─────────────────────────────

fn main() -> Result<(), String> {
    let args = Args::parse();

    let core_log: Arc<dyn CoreLog> = Arc::new(StderrLogger {
        verbose: args.verbose,
    });

    let mut config = match args.config.as_ref() {
        Some(path) => DumpConfig::load(path)?,
        None => DumpConfig::default(),
    };

    match args.command {
        Command::Dump {
            scene,
            out,
            sentinel,
            max_depth,
            force,
        } => {
            if out.is_some() {
                config.output_dir = out;
            }
            if sentinel.is_some() {
                config.sentinel_path = sentinel;
            }
            if let Some(depth) = max_depth {
                config.max_depth = depth;
            }
            let graph = load_scene(&scene, &core_log)?;
            match ExportPipeline::new(config, core_log.clone())
                .force(force)
                .run(&graph)
            {
                ExportOutcome::Skipped => core_log.info("Nothing to do (sentinel present)"),
                ExportOutcome::Written {
                    document, assets, ..
                } => core_log.info(&format!("✅ Wrote {assets} asset(s) to {}", document.display())),
                ExportOutcome::Failed(e) => return Err(e),
            }
        }

        Command::Table { file } => {
            let content =
                fs::read_to_string(&file).map_err(|e| format!("read {}: {e}", file.display()))?;
            for (title, asset) in display_assets(&content, &core_log) {
                println!("{title}");
                print_table(&BindingTable::from_display(&asset, &config));
            }
        }

        Command::Summary { scene, json } => {
            let graph = load_scene(&scene, &core_log)?;
            let mut collector = Collector::with_config(core_log.clone(), &config);
            collector.collect(&graph);
            let summary = collector.summary();
            if json {
                let text = serde_json::to_string_pretty(&summary)
                    .map_err(|e| format!("serialize summary: {e}"))?;
                println!("{text}");
            } else {
                print_summary(&summary);
            }
        }

        Command::Rebind {
            scene,
            asset,
            map,
            action,
            index,
            path,
            interactions,
        } => {
            let graph = load_scene(&scene, &core_log)?;
            let handle = graph
                .asset(&asset)
                .ok_or_else(|| format!("asset '{asset}' not in {}", scene.display()))?;
            let target = handle
                .action(&map, &action)
                .ok_or_else(|| format!("action '{map}/{action}' not in asset '{asset}'"))?;
            let ov = Override::new(target, index, path, interactions);
            if !apply_rebind(&ov, &core_log) {
                return Err(format!("rebind {map}/{action}[{index}] failed"));
            }
            let display = DisplayAsset::from(&handle.snapshot());
            print_table(&BindingTable::from_display(&display, &config));
        }
    }
    Ok(())
}

// ───────────────────────────── helpers ─────────────────────────────

fn load_scene(path: &Path, logger: &Arc<dyn CoreLog>) -> Result<SceneGraph, String> {
    let graph = SceneGraph::load(path)?;
    logger.info(&format!(
        "Scene snapshot: {} ({} assets)",
        path.display(),
        graph.assets().count()
    ));
    Ok(graph)
}

/// An export document lists several assets under `items`; a sentinel holds one.
fn display_assets(content: &str, logger: &Arc<dyn CoreLog>) -> Vec<(String, DisplayAsset)> {
    match decode_document(content) {
        Ok(doc) if !doc.items.is_empty() => doc
            .items
            .iter()
            .map(|item| {
                (
                    format!("{} ({})", item.data.name, item.source),
                    DisplayAsset::from(&item.data),
                )
            })
            .collect(),
        _ => {
            let asset = decode_display(content, logger);
            vec![(asset.name.clone(), asset)]
        }
    }
}

fn print_table(table: &BindingTable) {
    match table {
        BindingTable::NoData => println!("  (no data)"),
        BindingTable::Rows(rows) => {
            let width = rows
                .iter()
                .map(|r| r.map.len() + r.action.len() + 1)
                .max()
                .unwrap_or(0)
                .max(6);
            println!("  {:<width$}  {:<20}  {}", "Action", "Keyboard", "Gamepad");
            for r in rows {
                let name = format!("{}/{}", r.map, r.action);
                println!("  {name:<width$}  {:<20}  {}", r.keyboard, r.gamepad);
            }
        }
    }
}

fn print_summary(s: &CollectionSummary) {
    println!(
        "ButtonActionBinder: {} (active {}, inactive {})",
        s.buttons.total, s.buttons.active, s.buttons.inactive
    );
    println!(
        "ToggleActionBinder: {} (active {}, inactive {})",
        s.toggles.total, s.toggles.active, s.toggles.inactive
    );
    for d in &s.binders {
        let state = if d.active { "Active" } else { "Inactive" };
        println!(
            "  [{state}] {} on {}  control={}  action={}",
            d.kind,
            d.owner,
            d.control.as_deref().unwrap_or("-"),
            d.action.as_deref().unwrap_or("-")
        );
    }
    println!("Assets ({}):", s.sources.len());
    for src in &s.sources {
        println!("  {src}");
    }
}
