//! Command-line front end for scotch: perft tools and agent matches.

pub mod args;
pub mod error;
pub mod runner;

use std::time::Instant;

use scotch_core::{Position, divide, perft};
use scotch_engine::Agent;
use tracing::{error, info};

pub use args::{Options, parse_args};
pub use error::CliError;
pub use runner::{MatchRunner, MatchSummary};

/// Parse `args` (without the program name) and do what they ask.
///
/// With `-perft`/`-divide` the counts are printed. With both agents a match
/// is played. With neither, the starting board is printed.
pub fn run<I>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let options = parse_args(args)?;
    let mut start: Position = options.board.parse().inspect_err(|err| {
        error!(fen = %options.board, %err, "rejected board");
    })?;

    if let Some(depth) = options.perft {
        let timer = Instant::now();
        let nodes = perft(&mut start, depth);
        info!(depth, nodes, elapsed_ms = timer.elapsed().as_millis() as u64, "perft");
        println!("perft({depth}) = {nodes}");
    }

    if let Some(depth) = options.divide {
        let counts = divide(&mut start, depth);
        let total: u64 = counts.iter().map(|(_, n)| n).sum();
        for (uci, n) in &counts {
            println!("{uci}: {n}");
        }
        println!("total: {total}");
    }

    match (&options.agent1, &options.agent2) {
        (Some(white), Some(black)) => {
            let white: Agent = white.parse()?;
            let black: Agent = black.parse()?;
            let summary = MatchRunner::new(start, white, black)
                .with_delay(options.delay)
                .with_advisor(options.advise)
                .run(options.games);
            println!(
                "white {} black {} draws {} unfinished {}",
                summary.white_wins, summary.black_wins, summary.draws, summary.unfinished
            );
        }
        (Some(_), None) => return Err(CliError::MissingAgent { side: "black" }),
        (None, Some(_)) => return Err(CliError::MissingAgent { side: "white" }),
        (None, None) => {
            if options.perft.is_none() && options.divide.is_none() {
                println!("{}", start.pretty());
                println!("{start}");
            }
        }
    }

    Ok(())
}
