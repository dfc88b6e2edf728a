//! `cdt inspect` command - summarize a scene file

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::geometry::GeometryQuery;
use crate::scene::PlanarScene;

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Scene file (.yaml)
    pub scene: PathBuf,

    /// Only show faces owned by this part
    #[arg(long, short = 'p')]
    pub part: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Tabled)]
struct FaceRow {
    #[tabled(rename = "FACE")]
    face: String,
    #[tabled(rename = "PART")]
    part: String,
    #[tabled(rename = "AREA")]
    area: String,
    #[tabled(rename = "NORMAL")]
    normal: String,
    #[tabled(rename = "EDGES")]
    edges: usize,
}

#[derive(Serialize)]
struct FaceReport {
    face: u32,
    part: String,
    area: f64,
    normal: [f64; 3],
    edges: usize,
}

#[derive(Serialize)]
struct InspectReport {
    scene: String,
    parts: Vec<String>,
    face_count: usize,
    edge_count: usize,
    faces: Vec<FaceReport>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let scene = PlanarScene::load(&args.scene).map_err(|e| miette::miette!("{}", e))?;

    let mut faces = Vec::new();
    for face in scene.all_faces() {
        let owner = scene.face_owner(face);
        if let Some(filter) = &args.part {
            if owner.0 != *filter {
                continue;
            }
        }
        let normal = scene.face_normal(face);
        faces.push(FaceReport {
            face: face.0,
            part: owner.0,
            area: scene.face_area(face),
            normal: [normal.x, normal.y, normal.z],
            edges: scene.edges_of_faces(&[face]).len(),
        });
    }

    let report = InspectReport {
        scene: args.scene.display().to_string(),
        parts: scene.part_names().to_vec(),
        face_count: scene.face_count(),
        edge_count: scene.edge_count(),
        faces,
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
        OutputFormat::Table => print_table(&report),
    }

    Ok(())
}

fn print_table(report: &InspectReport) {
    println!(
        "{} {} - {} part(s), {} face(s), {} edge(s)",
        style("→").blue(),
        report.scene,
        report.parts.len(),
        report.face_count,
        report.edge_count
    );
    println!("  parts: {}", report.parts.join(", "));
    println!();

    let rows: Vec<FaceRow> = report
        .faces
        .iter()
        .map(|f| FaceRow {
            face: format!("F{}", f.face),
            part: f.part.clone(),
            area: format!("{:.3}", f.area),
            normal: format!("({:.2}, {:.2}, {:.2})", f.normal[0], f.normal[1], f.normal[2]),
            edges: f.edges,
        })
        .collect();

    if rows.is_empty() {
        println!("{} no faces matched", style("?").yellow());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
