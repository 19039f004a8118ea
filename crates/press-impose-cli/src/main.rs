mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use press_impose::{
    ExportJob, PageSequence, PlacedPage, ProjectFile, ResolvedSpecification, Sheet, SheetLayout,
    SlotPosition,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pressctl", about = "Print imposition planner", version)]
struct Cli {
    /// Log planner decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the sheet layout of a project
    Plan {
        /// Project file (JSON)
        project: PathBuf,

        /// Print the export job as JSON instead of a sheet listing
        #[arg(long)]
        json: bool,
    },

    /// Check a project and its specification without planning
    Check {
        /// Project file (JSON)
        project: PathBuf,
    },

    /// Show imposition statistics for a project
    Stats {
        /// Project file (JSON)
        project: PathBuf,
    },

    /// Suggest the standard press sheet that fits the most pages
    Suggest {
        /// Page width
        #[arg(long)]
        width: f32,

        /// Page height
        #[arg(long)]
        height: f32,

        /// Units of width and height
        #[arg(long, default_value = "in", value_enum)]
        units: UnitsArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    In,
    Mm,
    Pt,
}

impl From<UnitsArg> for press_impose::Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::In => Self::Inches,
            UnitsArg::Mm => Self::Millimeters,
            UnitsArg::Pt => Self::Points,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Plan { project, json } => {
            let (sequence, spec) = load_project(&project).await?;
            let job = ExportJob::plan(&sequence, spec)?;
            if json {
                println!("{}", job.to_json()?);
            } else {
                print_layout(&sequence, &job.layout);
            }
        }

        Commands::Check { project } => {
            let (sequence, spec) = load_project(&project).await?;
            println!(
                "OK: {} pages ({} interior), {:?} / {:?}",
                sequence.len(),
                sequence.interior_count(),
                spec.binding,
                spec.imposition_type
            );
        }

        Commands::Stats { project } => {
            let (sequence, spec) = load_project(&project).await?;
            let stats = press_impose::calculate_statistics(&sequence, &spec)?;
            println!("Imposition Statistics:");
            println!("  Sequence pages: {}", stats.sequence_pages);
            println!("  Interior pages: {}", stats.interior_pages);
            println!("  Output sheets: {}", stats.output_sheets);
            println!("  Printed sides: {}", stats.output_sides);
            println!("  Blank pages added: {}", stats.blank_pages_added);
            println!("  Pages per side: {}", stats.slots_per_side);
        }

        Commands::Suggest {
            width,
            height,
            units,
        } => {
            let page = press_impose::Dimensions::new(width, height, units.into());
            let Some(s) = press_impose::suggest_sheet(page) else {
                bail!("No standard press sheet fits a {} page", page);
            };
            let (sheet_w, sheet_h) = s.sheet_dimensions().to_points();
            println!(
                "{} {:?}: {} x {} = {} pages per side ({:.0}% waste)",
                s.sheet.name(),
                s.orientation,
                s.grid.cols,
                s.grid.rows,
                s.grid.cell_count(),
                s.waste / (sheet_w * sheet_h) * 100.0
            );
        }
    }

    Ok(())
}

/// Load a project, assemble its sequence and resolve its specification
async fn load_project(path: &Path) -> Result<(PageSequence, ResolvedSpecification)> {
    let project = ProjectFile::load(path)
        .await
        .with_context(|| format!("Failed to load project {}", path.display()))?;
    let store = project.load_store().await?;
    let sequence = press_impose::assemble(&project.assembly, &store)?;

    match press_impose::validate(&project.specification, &sequence) {
        Ok(spec) => Ok((sequence, spec)),
        Err(errors) => {
            for error in &errors {
                eprintln!("  {}: {}", error.field(), error);
            }
            bail!("Specification has {} error(s)", errors.len())
        }
    }
}

fn print_layout(sequence: &PageSequence, layout: &SheetLayout) {
    println!(
        "{:?} imposition, {} x {} grid, {} sheets, {} blank pages added",
        layout.imposition,
        layout.grid.cols,
        layout.grid.rows,
        layout.sheets.len(),
        layout.padding_added
    );
    for sheet in &layout.sheets {
        print_sheet(sequence, sheet);
    }
}

fn print_sheet(sequence: &PageSequence, sheet: &Sheet) {
    let side = |placements: &[PlacedPage]| -> String {
        placements
            .iter()
            .map(|p| label(sequence, p))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    print!(
        "  #{} {:?} {}: front [{}]",
        sheet.print_order + 1,
        sheet.kind,
        sheet.index,
        side(&sheet.front)
    );
    if !sheet.back.is_empty() {
        print!(" back [{}]", side(&sheet.back));
    }
    if sheet.creep_offset_pt > 0.0 {
        print!(" creep {:.2}pt", sheet.creep_offset_pt);
    }
    println!();
}

fn label(sequence: &PageSequence, placed: &PlacedPage) -> String {
    let text = match placed.page.and_then(|id| sequence.get(id)) {
        None => "-".to_string(),
        Some(entry) => match &entry.source {
            Some(source) => format!("{}:{}", source.document, source.page_index + 1),
            None => "blank".to_string(),
        },
    };
    match placed.position {
        SlotPosition::Spine => format!("spine {}", text),
        SlotPosition::Cell { .. } => text,
    }
}
