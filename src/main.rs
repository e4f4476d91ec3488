use std::env;
use std::process;

use clap::{App, Arg};

use sokoban_bfs::config::Mode;
use sokoban_bfs::{LoadLevel, Solve};

const EXIT_SOLVED: i32 = 0;
const EXIT_NO_SOLUTION: i32 = 1;
const EXIT_BAD_INPUT: i32 = 2;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-bfs")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds a solution with the fewest moves using breadth-first search")
        .arg(
            Arg::with_name("parallel")
                .short("p")
                .long("parallel")
                .help("Use multiple threads for live cell marking and hash table growth"),
        )
        .arg(
            Arg::with_name("steps")
                .long("steps")
                .help("Print the board after every move, not just after pushes"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Don't print progress while searching"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("Level in XSB format"),
        )
        .get_matches();

    let mode = if matches.is_present("parallel") {
        Mode::Parallel
    } else {
        Mode::Sequential
    };
    let include_steps = matches.is_present("steps");
    let print_status = !matches.is_present("quiet");
    // required so clap exits before we get here if it's missing
    let path = matches.value_of("file").unwrap_or_default();

    let level = path.load_level().unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => eprintln!("Can't load level {} in {}: {}", path, dir.display(), err),
            Err(_) => eprintln!("Can't load level {}: {}", path, err),
        }
        process::exit(EXIT_BAD_INPUT);
    });

    println!("Solving {}...", path);
    let solver_ok = level.solve(mode, print_status);
    println!();
    print!("{}", solver_ok.stats);
    println!();

    match solver_ok.moves {
        Some(moves) => {
            println!("Found solution:");
            print!("{}", level.format_solution(&moves, include_steps));
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
            process::exit(EXIT_SOLVED);
        }
        None => {
            println!("No solution");
            process::exit(EXIT_NO_SOLUTION);
        }
    }
}
