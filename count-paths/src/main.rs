use anyhow::{anyhow, Result};
use clap::Parser;
use pathcount::{count_paths, Grid};
use std::fs::File;
use std::io;

#[derive(Parser)]
#[clap(version = "0.1")]
struct Opts {
    /// Grid file to read. Reads standard input if omitted.
    grid_file: Option<String>,

    /// How many times to run the full DP sweep; only the final count is
    /// printed. Useful for benchmarking the row-transition enumerator.
    #[clap(default_value_t = 1)]
    repetitions: u32,

    /// Render the grid's ASCII-art diagnostic view to stderr before
    /// counting.
    #[clap(long)]
    render: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let grid = match &opts.grid_file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| anyhow!("couldn't open '{path}': {e}"))?;
            Grid::parse(file)?
        }
        None => Grid::parse(io::stdin())?,
    };

    if opts.render {
        let mut out = String::new();
        grid.render(&mut out)?;
        eprint!("{out}");
    }

    let mut total = count_paths(&grid);
    for _ in 1..opts.repetitions.max(1) {
        total = count_paths(&grid);
    }

    println!("{total}");

    Ok(())
}
