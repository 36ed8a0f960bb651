use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use cytostage_catalog::belt_gt2;
use cytostage_io::{
    DEFAULT_TESSELLATION_TOLERANCE, export_obj, export_step, export_stl, write_bom,
    write_manifest,
};
use cytostage_model::{CompositePart, PartElement};
use cytostage_parts::{
    Axis, Side, StageConfig, alu_extrusion, base_layout, bearing_house, belt_clamp,
    belt_tensioner, cage_cube_block, cage_cube_mount, central_slider, end_slider, epi_layout,
    idle_pulley_holder, nema_holder, shaft_holder, stage_layout,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "cytostage")]
#[command(about = "Parametric cytometer-stage part generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Generate {
        #[command(subcommand)]
        command: GenerateCommand,
    },
    Layout(LayoutArgs),
}

#[derive(Subcommand)]
enum GenerateCommand {
    EndSlider(EndSliderArgs),
    CentralSlider(RodArgs),
    BearingHouse(RodArgs),
    ShaftHolder(ShaftHolderArgs),
    Extrusion(ExtrusionArgs),
    NemaHolder(NemaHolderArgs),
    BeltClamp(OutArgs),
    BeltTensioner(OutArgs),
    PulleyHolder(OutArgs),
    CageMount(CageMountArgs),
    CageCube(OutArgs),
}

#[derive(Args)]
struct EndSliderArgs {
    #[arg(long, default_value_t = 8.0)]
    slide_rod: f64,
    #[arg(long, default_value_t = 8.0)]
    hold_rod: f64,
    #[arg(long, default_value_t = 60.0)]
    sep: f64,
    #[arg(long, default_value = "left")]
    side: String,
    /// Skip the belt-clamp cavity.
    #[arg(long)]
    no_belt: bool,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct RodArgs {
    #[arg(long, default_value_t = 8.0)]
    rod: f64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct ShaftHolderArgs {
    #[arg(long, default_value_t = 8.0)]
    rod: f64,
    #[arg(long, default_value_t = 25.0)]
    height: f64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct ExtrusionArgs {
    #[arg(long, default_value_t = 20.0)]
    side: f64,
    #[arg(long)]
    length: f64,
    #[arg(long, default_value = "x")]
    axis: String,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct NemaHolderArgs {
    #[arg(long, default_value_t = 17)]
    nema: u32,
    #[arg(long, default_value_t = 20.0)]
    profile: f64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct CageMountArgs {
    #[arg(long, default_value_t = 20.0)]
    profile: f64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct OutArgs {
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct LayoutArgs {
    /// base, epi or stage
    name: String,
    #[arg(long)]
    out_dir: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { command } => generate(command),
        Command::Layout(args) => layout(args),
    }
}

fn generate(command: GenerateCommand) -> Result<()> {
    match command {
        GenerateCommand::EndSlider(args) => {
            let side = parse_side(&args.side)?;
            let belt = if args.no_belt {
                None
            } else {
                Some(belt_gt2())
            };
            let part = end_slider(
                args.slide_rod,
                args.hold_rod,
                args.sep,
                side,
                belt,
                "end_slider",
            )
            .context("failed to build end slider")?;
            export_composite(&part, &args.out)
        }
        GenerateCommand::CentralSlider(args) => {
            let part = central_slider(args.rod, "central_slider")
                .context("failed to build central slider")?;
            export_composite(&part, &args.out)
        }
        GenerateCommand::BearingHouse(args) => {
            let part =
                bearing_house(args.rod, "bearing_house").context("failed to build bearing house")?;
            export_composite(&part, &args.out)
        }
        GenerateCommand::ShaftHolder(args) => {
            let part = shaft_holder(args.rod, args.height, "shaft_holder")
                .context("failed to build shaft holder")?;
            export_element(&part, &args.out)
        }
        GenerateCommand::Extrusion(args) => {
            let axis = parse_axis(&args.axis)?;
            let part = alu_extrusion(args.side, args.length, axis, "extrusion")
                .context("failed to build extrusion")?;
            export_element(&part, &args.out)
        }
        GenerateCommand::NemaHolder(args) => {
            let part = nema_holder(args.nema, args.profile, "nema_holder")
                .context("failed to build motor holder")?;
            export_element(&part, &args.out)
        }
        GenerateCommand::BeltClamp(args) => {
            let part = belt_clamp("belt_clamp").context("failed to build belt clamp")?;
            export_element(&part, &args.out)
        }
        GenerateCommand::BeltTensioner(args) => {
            let part = belt_tensioner("belt_tensioner").context("failed to build tensioner")?;
            export_element(&part, &args.out)
        }
        GenerateCommand::PulleyHolder(args) => {
            let part =
                idle_pulley_holder("pulley_holder").context("failed to build pulley holder")?;
            export_composite(&part, &args.out)
        }
        GenerateCommand::CageMount(args) => {
            let part = cage_cube_mount(args.profile, "cage_mount")
                .context("failed to build cage mount")?;
            export_element(&part, &args.out)
        }
        GenerateCommand::CageCube(args) => {
            let part = cage_cube_block("cage_cube").context("failed to build cage cube")?;
            export_element(&part, &args.out)
        }
    }
}

fn layout(args: LayoutArgs) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => StageConfig::default(),
    };

    let document = match args.name.as_str() {
        "base" => base_layout(&cfg)?,
        "epi" => epi_layout(&cfg)?,
        "stage" => stage_layout(&cfg)?,
        other => bail!("unknown layout {other}; expected base, epi or stage"),
    };

    write_manifest(&document, args.out_dir.join("manifest.json"))
        .context("manifest export failed")?;
    write_bom(&document, args.out_dir.join("bom.txt")).context("BOM export failed")?;
    for element in document.iter() {
        let path = args.out_dir.join("parts").join(format!("{}.stl", element.name));
        export_stl(element.geometry(), &path, DEFAULT_TESSELLATION_TOLERANCE)
            .with_context(|| format!("STL export failed for {}", element.name))?;
    }
    info!(
        elements = document.len(),
        path = %args.out_dir.display(),
        "layout export complete"
    );
    Ok(())
}

fn export_element(element: &PartElement, out: &Path) -> Result<()> {
    export_solid(element, out)?;
    info!(path = %out.display(), "export complete");
    Ok(())
}

fn export_composite(part: &CompositePart, out: &Path) -> Result<()> {
    let stem = out
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("part")
        .to_string();
    let extension = out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("stl")
        .to_string();
    let dir = out.parent().unwrap_or_else(|| Path::new("."));
    for child in part.children() {
        let path = dir.join(format!("{stem}_{}.{extension}", child.name));
        export_solid(child, &path)?;
    }
    info!(
        children = part.children().len(),
        path = %out.display(),
        "composite export complete"
    );
    Ok(())
}

fn export_solid(element: &PartElement, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "step" | "stp" => export_step(element.geometry(), path).context("STEP export failed"),
        "obj" => export_obj(
            element.geometry(),
            path,
            DEFAULT_TESSELLATION_TOLERANCE,
        )
        .context("OBJ export failed"),
        "stl" => export_stl(
            element.geometry(),
            path,
            DEFAULT_TESSELLATION_TOLERANCE,
        )
        .context("STL export failed"),
        other => bail!("unsupported output format: {other:?}; expected step, obj or stl"),
    }
}

fn parse_side(text: &str) -> Result<Side> {
    match text.to_ascii_lowercase().as_str() {
        "left" => Ok(Side::Left),
        "right" => Ok(Side::Right),
        other => bail!("--side expects left or right, got {other}"),
    }
}

fn parse_axis(text: &str) -> Result<Axis> {
    match text.to_ascii_lowercase().as_str() {
        "x" => Ok(Axis::X),
        "z" => Ok(Axis::Z),
        other => bail!("--axis expects x or z, got {other}"),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
