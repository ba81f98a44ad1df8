use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use card_packer_core::prelude::*;
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "card-packer",
    about = "Pack padded cards into a fixed-width strip",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place cards from a JSON/YAML spec file
    Place(PlaceArgs),
    /// Generate and place a built-in demo card set
    Demo(DemoArgs),
}

#[derive(Parser, Debug, Clone)]
struct PlaceArgs {
    /// Input spec file (.json, .yaml or .yml)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Layout base name (files will be name.json/name.png)
    #[arg(short, long, default_value = "layout", help_heading = "Input/Output")]
    name: String,

    // Space (each overrides the spec file)
    /// Strip width
    #[arg(long, help_heading = "Space")]
    width: Option<f64>,
    /// Clearance above the first row
    #[arg(long, help_heading = "Space")]
    top_padding: Option<f64>,
    /// Clearance inside each vertical edge
    #[arg(long, help_heading = "Space")]
    side_padding: Option<f64>,
    /// Strategy: bl | bottomleft | tr | topright
    #[arg(long, help_heading = "Space")]
    strategy: Option<String>,
    /// Snap placed movable cards to this grid
    #[arg(long, help_heading = "Space")]
    snap_grid: Option<f64>,

    // Export
    /// Metadata format: json-array | json (alias) | json-hash
    #[arg(long, default_value = "json-array", help_heading = "Export")]
    metadata: String,
    /// Layout-only: export metadata without PNG previews
    #[arg(long, default_value_t = false, help_heading = "Export")]
    layout_only: bool,
    /// Also render declared initial positions (before placement)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    before: bool,
    /// Units-to-pixels scale for PNG previews
    #[arg(long, default_value_t = 1.0, help_heading = "Export")]
    scale: f64,
    /// Export layout stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
struct DemoArgs {
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Layout base name
    #[arg(short, long, default_value = "demo", help_heading = "Input/Output")]
    name: String,
    /// Generate this many random cards instead of the built-in set
    #[arg(long, help_heading = "Demo")]
    count: Option<usize>,
    /// Seed for random card generation
    #[arg(long, default_value_t = 42, help_heading = "Demo")]
    seed: u64,
    /// Strategy: bl | bottomleft | tr | topright
    #[arg(long, default_value = "bl", help_heading = "Space")]
    strategy: String,
    /// Snap placed movable cards to this grid
    #[arg(long, help_heading = "Space")]
    snap_grid: Option<f64>,
    /// Units-to-pixels scale for PNG previews
    #[arg(long, default_value_t = 1.0, help_heading = "Export")]
    scale: f64,
}

// --- Spec file model ---

#[derive(Debug, Default, Deserialize)]
struct SpaceSection {
    width: Option<f64>,
    top_padding: Option<f64>,
    side_padding: Option<f64>,
    strategy: Option<String>,
    snap_grid: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PosEntry {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct CardEntry {
    id: String,
    width: f64,
    height: f64,
    #[serde(default)]
    padding: f64,
    #[serde(default)]
    fixed: bool,
    /// Required for fixed cards; for movable cards this is a display-only
    /// initial position used by --before.
    #[serde(default)]
    pos: Option<PosEntry>,
}

#[derive(Debug, Deserialize)]
struct LayoutSpecFile {
    #[serde(default)]
    space: SpaceSection,
    cards: Vec<CardEntry>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Place(args) => run_place(args),
        Commands::Demo(args) => run_demo(args),
    };
    if let Err(e) = result {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

fn run_place(args: PlaceArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.input)?;
    let space = merge_space(&spec.space, &args)?;
    space
        .validate()
        .with_context(|| "invalid space parameters")?;

    let (movable, pinned, initial) = build_inputs(&spec)?;
    info!(
        "placing {} movable / {} pinned cards into a {}-wide strip",
        movable.len(),
        pinned.len(),
        space.width
    );

    if args.before {
        let preview = initial_layout(&movable, &pinned, &initial, &space);
        let path = args.out_dir.join(format!("{}_initial.png", args.name));
        save_png(&preview, args.scale, &path)?;
    }

    let layout = place_cards(movable, pinned, &space)?;
    report_and_write(&layout, &args.out_dir, &args.name, &args.metadata, args.scale, args.layout_only)?;

    if let Some(path) = &args.export_stats {
        let json = serde_json::to_string_pretty(&layout.stats())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn run_demo(args: DemoArgs) -> anyhow::Result<()> {
    let space = SpaceConfig {
        width: 500.0,
        top_padding: 50.0,
        side_padding: 20.0,
        strategy: parse_strategy(&args.strategy)?,
        snap_grid: args.snap_grid,
    };

    let movable = match args.count {
        Some(n) => random_cards(n, args.seed)?,
        None => builtin_cards()?,
    };
    let pinned = vec![PinnedCard::new(
        Card::new("F0".to_string(), 100.0, 60.0, 5.0)?,
        Point::new(75.0, 60.0),
    )];

    // staggered initial positions, display-only
    let initial: Vec<(String, PosEntry)> = movable
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let x = space.side_padding + c.padding() + (i % 4) as f64 * 20.0;
            let y = space.top_padding + c.padding() + (i / 4) as f64 * 20.0;
            (c.key().clone(), PosEntry { x, y })
        })
        .collect();

    let preview = initial_layout(&movable, &pinned, &initial, &space);
    let path = args.out_dir.join(format!("{}_initial.png", args.name));
    save_png(&preview, args.scale, &path)?;

    let layout = place_cards(movable, pinned, &space)?;
    report_and_write(&layout, &args.out_dir, &args.name, "json-array", args.scale, false)?;
    Ok(())
}

fn load_spec(path: &Path) -> anyhow::Result<LayoutSpecFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let spec = match ext.as_str() {
        "json" => serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?,
        other => bail!("unsupported spec extension: {other:?} (use .json, .yaml or .yml)"),
    };
    Ok(spec)
}

fn merge_space(section: &SpaceSection, args: &PlaceArgs) -> anyhow::Result<SpaceConfig> {
    let mut cfg = SpaceConfig::default();
    if let Some(v) = section.width {
        cfg.width = v;
    }
    if let Some(v) = section.top_padding {
        cfg.top_padding = v;
    }
    if let Some(v) = section.side_padding {
        cfg.side_padding = v;
    }
    if let Some(s) = &section.strategy {
        cfg.strategy = parse_strategy(s)?;
    }
    if let Some(v) = section.snap_grid {
        cfg.snap_grid = Some(v);
    }

    if let Some(v) = args.width {
        cfg.width = v;
    }
    if let Some(v) = args.top_padding {
        cfg.top_padding = v;
    }
    if let Some(v) = args.side_padding {
        cfg.side_padding = v;
    }
    if let Some(s) = &args.strategy {
        cfg.strategy = parse_strategy(s)?;
    }
    if let Some(v) = args.snap_grid {
        cfg.snap_grid = Some(v);
    }
    Ok(cfg)
}

fn parse_strategy(s: &str) -> anyhow::Result<Strategy> {
    Strategy::from_str(s).map_err(|_| anyhow::anyhow!("unknown strategy: {s:?}"))
}

type Initial = Vec<(String, PosEntry)>;

fn build_inputs(spec: &LayoutSpecFile) -> anyhow::Result<(Vec<Card>, Vec<PinnedCard>, Initial)> {
    let mut movable = Vec::new();
    let mut pinned = Vec::new();
    let mut initial = Vec::new();
    for entry in &spec.cards {
        let card = Card::new(entry.id.clone(), entry.width, entry.height, entry.padding)?;
        if entry.fixed {
            let Some(pos) = entry.pos else {
                bail!("fixed card {:?} must declare a pos", entry.id);
            };
            pinned.push(PinnedCard::new(card, Point::new(pos.x, pos.y)));
        } else {
            if let Some(pos) = entry.pos {
                initial.push((entry.id.clone(), pos));
            }
            movable.push(card);
        }
    }
    Ok((movable, pinned, initial))
}

/// Builds a display-only layout from declared initial positions; cards
/// without one are left out. The engine never reads these positions.
fn initial_layout(
    movable: &[Card],
    pinned: &[PinnedCard],
    initial: &Initial,
    space: &SpaceConfig,
) -> Layout {
    let mut placed: Vec<PlacedCard> = pinned.iter().cloned().map(|p| PlacedCard {
        pos: p.pos(),
        card: p.card().clone(),
        pinned: true,
    }).collect();
    for card in movable {
        if let Some((_, pos)) = initial.iter().find(|(id, _)| id == card.key()) {
            placed.push(PlacedCard {
                card: card.clone(),
                pos: Point::new(pos.x, pos.y),
                pinned: false,
            });
        }
    }
    let extent = placed
        .iter()
        .map(|p| p.effective_region().bottom())
        .fold(space.top_bound(), f64::max);
    Layout {
        placed,
        extent,
        unplaced: vec![],
        space: space.clone(),
    }
}

fn report_and_write(
    layout: &Layout,
    out_dir: &Path,
    name: &str,
    metadata: &str,
    scale: f64,
    layout_only: bool,
) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let value = match metadata {
        "json" | "json-array" => to_json(layout),
        "json-hash" => to_json_hash(layout),
        other => bail!("unknown metadata format: {other:?}"),
    };
    let json_path = out_dir.join(format!("{name}.json"));
    fs::write(&json_path, serde_json::to_string_pretty(&value)?)
        .with_context(|| format!("writing {}", json_path.display()))?;
    info!("wrote {}", json_path.display());

    if !layout_only {
        let png_path = out_dir.join(format!("{name}.png"));
        save_png(layout, scale, &png_path)?;
    }

    for card in &layout.unplaced {
        warn!("unplaced: {}", card.key());
    }
    info!("{}", layout.stats().summary());
    Ok(())
}

fn save_png(layout: &Layout, scale: f64, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let opts = RenderOptions {
        scale,
        ..Default::default()
    };
    let img = render_layout(layout, &opts);
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn builtin_cards() -> anyhow::Result<Vec<Card>> {
    let sizes: [(&str, f64, f64); 13] = [
        ("M1", 50.0, 80.0),
        ("M2", 70.0, 50.0),
        ("M3", 120.0, 90.0),
        ("M4", 60.0, 60.0),
        ("M5", 90.0, 40.0),
        ("M6", 150.0, 70.0),
        ("M7", 40.0, 100.0),
        ("M8", 80.0, 80.0),
        ("M9", 200.0, 50.0),
        ("M10", 30.0, 120.0),
        ("M11", 480.0, 30.0),
        ("M12", 50.0, 50.0),
        ("M13", 75.0, 75.0),
    ];
    sizes
        .iter()
        .map(|(id, w, h)| Ok(Card::new(id.to_string(), *w, *h, 5.0)?))
        .collect()
}

fn random_cards(n: usize, seed: u64) -> anyhow::Result<Vec<Card>> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let paddings = [0.0, 5.0];
    (0..n)
        .map(|i| {
            let w = rng.gen_range(30..=200) as f64;
            let h = rng.gen_range(30..=120) as f64;
            let p = paddings[rng.gen_range(0..paddings.len())];
            Ok(Card::new(format!("R{}", i), w, h, p)?)
        })
        .collect()
}
