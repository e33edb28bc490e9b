mod faces;
mod process_solver;
mod settings;
mod solve_log;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cube_logic::scramble::{preset_scramble, random_scramble};
use cube_logic::{
    classify_by_distance, plan_reply, plan_solution, read_cube, Bgr, Classification, CubeScan,
    RobotPlan,
};
use process_solver::ProcessSolver;
use settings::Settings;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Cube robot color reading and move planning", long_about = None)]
struct Args {
    /// Settings file (JSON); defaults apply when it does not exist.
    #[arg(short, long, default_value = "cube_planner.json")]
    config: PathBuf,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify 54 BGR colors given as a JSON list of [b, g, r] in scan order.
    Classify { colors: PathBuf },
    /// Sample the face images in a directory and write the colors as JSON.
    Faces {
        dir: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Translate a solver solution, e.g. "R1 U2 F3", into robot moves.
    Plan { solution: String },
    /// Classify, solve with the external solver and print the robot plan.
    Solve { colors: PathBuf },
    /// Print a scramble: the preset one for 0, otherwise n random moves.
    Scramble {
        #[arg(default_value_t = 0)]
        n: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let settings = Settings::load(&args.config)?;
    let profile = settings.device_profile();
    info!(profile = ?settings.profile, start = %profile.start, "settings loaded");

    match args.command {
        Command::Classify { colors } => {
            let scan = profile.scan.assemble(&read_colors(&colors)?)?;
            let (classification, _) = classify_by_distance(&scan, &settings.hue_thresholds);
            print_classification(&classification);
        }
        Command::Faces { dir, output } => {
            let paths = faces::face_images(&dir)?;
            if paths.is_empty() {
                bail!("no PNG images in {}", dir.display());
            }
            let colors = faces::sample_faces(&paths, &settings.sampler)?;
            let rows: Vec<[u8; 3]> = colors.iter().map(|c| [c.b, c.g, c.r]).collect();
            let json = serde_json::to_string_pretty(&rows)?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
            if colors.len() < 54 {
                // Preview the partial scan the way the solver will see it.
                let preview = profile.scan.to_urfdlb(&colors);
                warn!("{} of 54 facelets sampled", colors.len());
                let scan = CubeScan::from_bgr(&preview)?;
                let (classification, _) = classify_by_distance(&scan, &settings.hue_thresholds);
                print_classification(&classification);
            }
        }
        Command::Plan { solution } => {
            let plan = plan_solution(&solution, profile.start)?;
            print_plan(&plan);
        }
        Command::Solve { colors } => {
            let colors = read_colors(&colors)?;
            let scan = profile.scan.assemble(&colors)?;
            let Some(mut solver) = ProcessSolver::new(&settings.solver_command) else {
                bail!("solver_command is empty");
            };
            let read = read_cube(&scan, &mut solver, &settings.hue_thresholds);
            if let Some(classification) = &read.classification {
                print_classification(classification);
            }
            println!("method: {}", read.method);
            println!("solver: {}", read.reply);
            if let Some(path) = &settings.solve_log {
                solve_log::append(path, &read, &colors)?;
            }
            if !read.succeeded() {
                bail!("cube not read, scan again");
            }
            print_plan(&plan_reply(&read.reply, profile.start));
        }
        Command::Scramble { n } => {
            let moves = if n == 0 {
                preset_scramble()
            } else {
                random_scramble(n, &mut rand::thread_rng())
            };
            let text: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
            println!("{}", text.join(" "));
        }
    }
    Ok(())
}

fn read_colors(path: &Path) -> Result<Vec<Bgr>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<[u8; 3]> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(rows.into_iter().map(Bgr::from).collect())
}

fn print_classification(classification: &Classification) {
    let cube = classification.cube_string();
    println!("cube: {}", cube);
    println!("counts (URFDLB): {:?}", cube.face_counts());
    match classification.color_sequence {
        Some(seq) => {
            let names: Vec<&str> = seq.0.iter().map(|c| c.name()).collect();
            println!("centers (URFDLB): {}", names.join(" "));
        }
        None => println!("centers: not resolved"),
    }
}

fn print_plan(plan: &RobotPlan) {
    for (i, mv) in plan.moves.iter().enumerate() {
        println!(
            "{:>2}  {:<9} {:>3} actions left",
            i + 1,
            mv.to_string(),
            plan.remaining_actions(i + 1)
        );
    }
    println!(
        "{} moves, {} robot actions",
        plan.moves.len(),
        plan.total_actions
    );
}
