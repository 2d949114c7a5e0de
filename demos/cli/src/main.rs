use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;

use tileviz::{
    color::ColorTable,
    grid::Region,
    paint::{ColorMode, PaintOptions},
    scene::{OutputFormat, SceneConfig, SliceSpacing},
    tiling::{TileCoord, TilingFamily},
};

/// Draws tiled iteration spaces
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Color table (`name #hex r,g,b` triples); uses the SVG colors if unset
    #[clap(long, global = true)]
    colors: Option<PathBuf>,

    /// Log every visited point
    #[clap(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Draw time slices side by side in an SVG image
    Svg {
        #[clap(flatten)]
        settings: SceneSettings,
    },
    /// Write a POV-Ray scene with one sphere per point
    Pov {
        #[clap(flatten)]
        settings: SceneSettings,
    },
}

#[derive(ValueEnum, Copy, Clone)]
enum Tiling {
    Diamonds,
    Pipelined,
    DiamondPrisms,
}

impl From<Tiling> for TilingFamily {
    fn from(t: Tiling) -> Self {
        match t {
            Tiling::Diamonds => Self::Diamonds,
            Tiling::Pipelined => Self::Pipelined,
            Tiling::DiamondPrisms => Self::DiamondPrisms,
        }
    }
}

#[derive(ValueEnum, Copy, Clone)]
enum SpacingApproach {
    Normal,
    HalfRadius,
}

#[derive(ValueEnum, Copy, Clone)]
enum Color {
    Wave,
    Cycle,
    Hash,
}

impl From<Color> for ColorMode {
    fn from(c: Color) -> Self {
        match c {
            Color::Wave => Self::Wave,
            Color::Cycle => Self::Cycle,
            Color::Hash => Self::Hash,
        }
    }
}

#[derive(Parser)]
struct SceneSettings {
    /// Tiling family
    #[clap(short, long, value_enum, default_value_t = Tiling::Diamonds)]
    tiling: Tiling,

    /// Tile size
    #[clap(short = 'k', long, default_value_t = 15)]
    tau: i64,

    /// Number of time steps
    #[clap(
        short = 'T',
        long,
        default_value_t = 4,
        value_parser = clap::value_parser!(u16).range(1..=30)
    )]
    time_steps: u16,

    /// Spatial extent; both axes cover `[0, N]`
    #[clap(
        short = 'N',
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u16).range(1..=75)
    )]
    size: u16,

    /// First time slice to draw
    #[clap(short, long, default_value_t = 1)]
    start: usize,

    /// Last time slice to draw (defaults to the number of time steps)
    #[clap(short, long)]
    end: Option<usize>,

    /// How to pick the distance between slices
    #[clap(
        short = 'g',
        long,
        value_enum,
        default_value_t = SpacingApproach::Normal
    )]
    grid_spacing_approach: SpacingApproach,

    /// Exact distance between slices, in pixels (overrides `-g`)
    #[clap(
        short = 'p',
        long,
        value_parser = clap::value_parser!(u16).range(1..=1000)
    )]
    grid_spacing: Option<u16>,

    /// Distance between cell centers, in pixels
    #[clap(
        short,
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u16).range(1..=100)
    )]
    cell_spacing: u16,

    /// Cell radius, in pixels
    #[clap(
        short = 'r',
        long,
        default_value_t = 20,
        value_parser = clap::value_parser!(u16).range(1..=100)
    )]
    cell_radius: u16,

    /// Label each point with its tile coordinate
    #[clap(short, long)]
    label: bool,

    /// With `--one-tile`, only label points in that tile
    #[clap(long)]
    filter_labels: bool,

    /// Color policy
    #[clap(long, value_enum, default_value_t = Color::Wave)]
    color: Color,

    /// Palette step when the tile changes (for `--color cycle`)
    #[clap(
        short = 'i',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=10)
    )]
    color_step: u8,

    /// Only color the tile with this coordinate, e.g. `-1,0,-1`
    #[clap(long, allow_hyphen_values = true)]
    one_tile: Option<TileCoord>,

    /// Highlight region `x1,y1,x2,y2` in every drawn slice
    #[clap(long)]
    highlight: Option<Region>,

    /// Output file (defaults to a name built from the parameters)
    #[clap(short, long)]
    out: Option<PathBuf>,
}

impl SceneSettings {
    fn scene(&self) -> SceneConfig {
        let approach = self.grid_spacing_approach;
        let slice_spacing = match (self.grid_spacing, approach) {
            (Some(p), _) => SliceSpacing::Exact(p.into()),
            (None, SpacingApproach::Normal) => SliceSpacing::Normal,
            (None, SpacingApproach::HalfRadius) => SliceSpacing::HalfRadius,
        };
        SceneConfig {
            family: self.tiling.into(),
            tau: self.tau,
            time_steps: self.time_steps.into(),
            size: self.size.into(),
            start: self.start,
            end: self.end,
            slice_spacing,
            cell_spacing: self.cell_spacing.into(),
            cell_radius: self.cell_radius.into(),
            color: self.color.into(),
            color_step: self.color_step.into(),
            paint: PaintOptions {
                label: self.label,
                filter_labels: self.filter_labels,
                only_tile: self.one_tile.clone(),
            },
            highlight: self.highlight,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

fn run(
    settings: &SceneSettings,
    format: OutputFormat,
    colors: &ColorTable,
) -> Result<()> {
    let cfg = settings.scene();
    cfg.validate()?;

    let start = Instant::now();
    let grid = cfg.paint()?;
    info!("Painted grid in {:?}", start.elapsed());

    let path = settings
        .out
        .clone()
        .unwrap_or_else(|| cfg.file_name(format).into());
    info!("Generating file {path:?}");
    let file = std::fs::File::create(&path)
        .with_context(|| format!("could not create {path:?}"))?;
    let mut out = BufWriter::new(file);
    cfg.write(&grid, format, colors, &mut out)
        .with_context(|| format!("could not write {path:?}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .init();

    let colors = match &args.colors {
        Some(path) => ColorTable::load(path)?,
        None => ColorTable::builtin(),
    };
    info!("Using {} colors", colors.len());

    match &args.cmd {
        Command::Svg { settings } => run(settings, OutputFormat::Svg, &colors),
        Command::Pov { settings } => run(settings, OutputFormat::Pov, &colors),
    }
}
