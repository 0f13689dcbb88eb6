use std::{
    fs::File,
    io,
    io::prelude::*,
    thread,
    time::Duration,
};

use docopt::Docopt;
use itertools::Itertools;
use log::{debug, info};
use serde_derive::Deserialize;

use mazerunner::{
    cells::{Cartesian2DCoordinate, Endpoints},
    config::{MazeConfig, MazeConfigBuilder},
    grid_displays::{LayeredDisplay, PathDisplay, StartEndPointsDisplay, VisitedDisplay},
    maze::Maze,
    pathing::{SearchOutcome, Solution, SolveStep},
    units::SideLength,
};

const USAGE: &str = "Maze Runner

Generate a maze with the recursive backtracker and find the shortest route through it.

Usage:
    mazerunner_driver -h | --help
    mazerunner_driver [options]

Options:
    -h --help                 Show this screen.
    --grid-size=<n>           The grid size is n * n [default: 20].
    --seed=<s>                Seed for the random number generator. A random seed is used if not given.
    --start-x=<x>             x coordinate of the path start, 0 if not given.
    --start-y=<y>             y coordinate of the path start, 0 if not given.
    --end-x=<x>               x coordinate of the path end, n - 1 if not given.
    --end-y=<y>               y coordinate of the path end, n - 1 if not given.
    --animate                 Redraw the maze in the terminal after every search step.
    --step-delay-ms=<ms>      Pause between animated search steps [default: 10].
    --finish-pause-ms=<ms>    Pause after the animated search ends before the result is drawn [default: 500].
    --show-visited            Mark every cell the search visited on the final rendering.
    --stats                   Print statistics about the maze and its shortest route.
    --text-out=<path>         Write the final rendering to a text file instead of the terminal.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: usize,
    flag_seed: Option<u64>,
    flag_start_x: Option<u32>,
    flag_start_y: Option<u32>,
    flag_end_x: Option<u32>,
    flag_end_y: Option<u32>,
    flag_animate: bool,
    flag_step_delay_ms: u64,
    flag_finish_pause_ms: u64,
    flag_show_visited: bool,
    flag_stats: bool,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazerunner::errors::Error, ::mazerunner::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const LOG_FILTER_ENV: &str = "RUST_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<()> {

    logger_builder(LOG_FILTER_ENV).init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let config = maze_config_from_args(&args)?;
    let mut rng = config.rng();
    let maze = Maze::generate(&config, &mut rng)?;

    let solution = if args.flag_animate {
        animate_solve(&maze, &config)?
    } else {
        maze.solve()?
    };
    report_solution(&maze, &solution);

    let rendering = render_solution(&maze, &solution, args.flag_show_visited);
    if args.flag_text_out.is_empty() {
        print!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        info!("Wrote maze to {}", args.flag_text_out);
    }

    if args.flag_stats {
        println!("{}", maze.stats());
    }

    Ok(())
}

/// Log at `info` unless the environment variable holds a filter of its own.
fn logger_builder(filter_env: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(filter_env, DEFAULT_LOG_FILTER))
}

fn maze_config_from_args(maze_args: &MazeArgs) -> Result<MazeConfig> {

    let start = coordinate_from_args("start", maze_args.flag_start_x, maze_args.flag_start_y)?;
    let end = coordinate_from_args("end", maze_args.flag_end_x, maze_args.flag_end_y)?;

    let config = MazeConfigBuilder::new()
        .side_length(SideLength(maze_args.flag_grid_size))
        .start(start)
        .end(end)
        .seed(maze_args.flag_seed)
        .step_delay(Duration::from_millis(maze_args.flag_step_delay_ms))
        .finish_pause(Duration::from_millis(maze_args.flag_finish_pause_ms))
        .build()
        .chain_err(|| "Invalid maze options")?;
    debug!("{:?}", config);
    Ok(config)
}

fn coordinate_from_args(name: &str,
                        x: Option<u32>,
                        y: Option<u32>)
                        -> Result<Option<Cartesian2DCoordinate>> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(Some(Cartesian2DCoordinate::new(x, y))),
        (None, None) => Ok(None),
        _ => Err(format!("Both the x and y coordinate of the {} point are required", name).into()),
    }
}

/// Redraw the maze after every search step, pausing between steps so the search can be watched.
fn animate_solve(maze: &Maze, config: &MazeConfig) -> Result<Solution> {

    let ends = StartEndPointsDisplay::new(maze.endpoints());
    let mut search = maze.solver()?;

    while let Some(step) = search.next() {
        match step {
            SolveStep::Visited(_) => {
                let visited = VisitedDisplay::new(search.visited());
                let layers = LayeredDisplay::new().with_layer(&ends).with_layer(&visited);
                print!("{}{}", CLEAR_SCREEN, maze.grid().display_with(&layers));
                println!("Steps: {}", search.visited().len());
                io::stdout().flush()?;
                thread::sleep(config.step_delay());
            }
            SolveStep::Found(_) | SolveStep::NotFound => break,
        }
    }

    thread::sleep(config.finish_pause());
    print!("{}", CLEAR_SCREEN);
    Ok(search.run_to_completion())
}

fn render_solution(maze: &Maze, solution: &Solution, show_visited: bool) -> String {

    let ends = StartEndPointsDisplay::new(maze.endpoints());
    let path = PathDisplay::new(solution.path());
    let visited_cells: &[Cartesian2DCoordinate] = if show_visited { solution.visited() } else { &[] };
    let visited = VisitedDisplay::new(visited_cells);
    let layers = LayeredDisplay::new()
        .with_layer(&ends)
        .with_layer(&path)
        .with_layer(&visited);

    format!("{}", maze.grid().display_with(&layers))
}

fn report_solution(maze: &Maze, solution: &Solution) {

    let Endpoints { start, end } = maze.endpoints();
    match *solution.outcome() {
        SearchOutcome::Found(ref path) => {
            info!("Found a path of {} cells from {} to {} after {} steps",
                  solution.path_length(),
                  start,
                  end,
                  solution.steps_count());
            debug!("Path: {}", path.iter().join(" -> "));
        }
        SearchOutcome::NotFound => {
            info!("No path from {} to {} after {} steps", start, end, solution.steps_count());
        }
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
