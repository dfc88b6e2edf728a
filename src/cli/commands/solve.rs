//! `cdt solve` command - define a clip from a seed edge

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::core::SolverConfig;
use crate::geometry::EdgeId;
use crate::scene::PlanarScene;
use crate::solver::{Axis, BeamVariant, ClipInstance, ClipSession, GeomVariant, SolveWarning};

#[derive(clap::Args, Debug)]
pub struct SolveArgs {
    /// Scene file (.yaml)
    pub scene: PathBuf,

    /// Seed edge id on the clip base face
    #[arg(long, short = 's')]
    pub seed: u32,

    /// Geometry variant
    #[arg(long, short = 'v', default_value = "standard")]
    pub variant: GeomVariant,

    /// Beam topology variant
    #[arg(long, short = 'b', default_value = "single")]
    pub beam: BeamVariant,

    /// Also create the y = 0 mirror of the solved clip
    #[arg(long)]
    pub mirror: bool,

    /// Solver configuration file (defaults apply when omitted)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct StopReport {
    axis: String,
    value: f64,
    solved: bool,
    clip_face: Option<u32>,
    mate_face: Option<u32>,
}

#[derive(Serialize)]
struct ClipReport {
    part: String,
    seed_edge: u32,
    opposite_edge: u32,
    small_face: u32,
    large_face: u32,
    clip_faces: Vec<u32>,
    origin: [f64; 3],
    axis_x: [f64; 3],
    axis_y: [f64; 3],
    axis_z: [f64; 3],
    stops: Vec<StopReport>,
    entities_created: usize,
}

#[derive(Serialize)]
struct SolveReport {
    scene: String,
    variant: String,
    beam: String,
    clip: ClipReport,
    mirrored: Option<ClipReport>,
    warnings: Vec<String>,
}

#[derive(Tabled)]
struct StopRow {
    #[tabled(rename = "AXIS")]
    axis: String,
    #[tabled(rename = "LIMIT")]
    limit: String,
    #[tabled(rename = "SOLVED")]
    solved: String,
    #[tabled(rename = "FACES")]
    faces: String,
}

pub fn run(args: SolveArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SolverConfig::load(path).map_err(|e| miette::miette!("{}", e))?,
        None => SolverConfig::default(),
    };
    config.validate().map_err(|e| miette::miette!("{}", e))?;

    let mut scene = PlanarScene::load(&args.scene).map_err(|e| miette::miette!("{}", e))?;
    if args.seed as usize >= scene.edge_count() {
        return Err(miette::miette!(
            "Seed edge E{} does not exist: scene has {} edge(s)",
            args.seed,
            scene.edge_count()
        ));
    }
    let mut session = ClipSession::new(&mut scene, config);

    let (instance, warnings) = session
        .define_clip(EdgeId(args.seed), args.variant, args.beam)
        .map_err(|e| miette::miette!("{}", e))?;

    let mirrored = if args.mirror {
        Some(
            session
                .mirror(&instance)
                .map_err(|e| miette::miette!("{}", e))?,
        )
    } else {
        None
    };

    let report = SolveReport {
        scene: args.scene.display().to_string(),
        variant: args.variant.to_string(),
        beam: args.beam.to_string(),
        clip: clip_report(&instance),
        mirrored: mirrored.as_ref().map(clip_report),
        warnings: warnings
            .iter()
            .map(|w| format!("{}: {}", w.axis, w.message))
            .collect(),
    };

    match args.format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&report).map_err(|e| miette::miette!("{}", e))?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| miette::miette!("{}", e))?;
            println!("{}", json);
        }
        OutputFormat::Table => print_report(&report, &warnings),
    }

    Ok(())
}

fn clip_report(instance: &ClipInstance) -> ClipReport {
    let frame = &instance.frame;
    let origin = frame.origin();
    let x = frame.axis_x().into_inner();
    let y = frame.axis_y().into_inner();
    let z = frame.axis_z().into_inner();

    let stops = Axis::ALL
        .iter()
        .map(|&axis| {
            let entry = instance.stops.entry(axis);
            StopReport {
                axis: axis.tag().to_string(),
                value: entry.value,
                solved: entry.solved,
                clip_face: entry.provenance.map(|(clip, _)| clip.0),
                mate_face: entry.provenance.map(|(_, mate)| mate.0),
            }
        })
        .collect();

    ClipReport {
        part: instance.region.part.0.clone(),
        seed_edge: instance.region.seed_edge.0,
        opposite_edge: instance.region.opposite_edge.0,
        small_face: instance.region.small_face.0,
        large_face: instance.region.large_face.0,
        clip_faces: instance.region.clip_faces.iter().map(|f| f.0).collect(),
        origin: [origin.x, origin.y, origin.z],
        axis_x: [x.x, x.y, x.z],
        axis_y: [y.x, y.y, y.z],
        axis_z: [z.x, z.y, z.z],
        stops,
        entities_created: instance.entities.len(),
    }
}

fn print_report(report: &SolveReport, warnings: &[SolveWarning]) {
    println!(
        "{} Solved clip on part '{}' ({} variant, {} beam)",
        style("✓").green().bold(),
        report.clip.part,
        report.variant,
        report.beam
    );
    print_clip(&report.clip);

    if let Some(mirrored) = &report.mirrored {
        println!();
        println!("{} Mirrored copy across y = 0", style("✓").green().bold());
        print_clip(mirrored);
    }

    for warning in warnings {
        println!(
            "{} {}: {}",
            style("!").yellow().bold(),
            warning.axis,
            warning.message
        );
    }
}

fn print_clip(clip: &ClipReport) {
    println!(
        "  region: E{} seed, E{} opposite, F{} small, F{} large, {} grown face(s)",
        clip.seed_edge,
        clip.opposite_edge,
        clip.small_face,
        clip.large_face,
        clip.clip_faces.len()
    );
    println!(
        "  origin: ({:.3}, {:.3}, {:.3})",
        clip.origin[0], clip.origin[1], clip.origin[2]
    );
    println!(
        "  axes:   x ({:.3}, {:.3}, {:.3})  y ({:.3}, {:.3}, {:.3})  z ({:.3}, {:.3}, {:.3})",
        clip.axis_x[0], clip.axis_x[1], clip.axis_x[2],
        clip.axis_y[0], clip.axis_y[1], clip.axis_y[2],
        clip.axis_z[0], clip.axis_z[1], clip.axis_z[2],
    );
    println!("  entities created: {}", clip.entities_created);
    println!();

    let rows: Vec<StopRow> = clip
        .stops
        .iter()
        .map(|s| StopRow {
            axis: s.axis.clone(),
            limit: format!("{:.2}", s.value),
            solved: if s.solved { "yes".to_string() } else { "-".to_string() },
            faces: match (s.clip_face, s.mate_face) {
                (Some(c), Some(m)) => format!("F{} / F{}", c, m),
                _ => "-".to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
