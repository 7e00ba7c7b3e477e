//! Command-line flag parsing.
//!
//! Flags take their value from the following argument:
//! `-board <FEN> -agent1 <id[:config]> -agent2 <id[:config]> -games <n>
//! -delay <ms> -advise <config> -perft <depth> -divide <depth>`.

use std::str::FromStr;
use std::time::Duration;

use scotch_core::STARTING_FEN;
use scotch_engine::SearchConfig;

use crate::error::CliError;

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// FEN every game starts from.
    pub board: String,
    /// Agent descriptor (`id[:config]`) for White.
    pub agent1: Option<String>,
    /// Agent descriptor (`id[:config]`) for Black.
    pub agent2: Option<String>,
    /// Number of games to play.
    pub games: u32,
    /// Pause after each move.
    pub delay: Duration,
    /// Run an advisory search after each move.
    pub advise: Option<SearchConfig>,
    pub perft: Option<usize>,
    pub divide: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            board: STARTING_FEN.to_string(),
            agent1: None,
            agent2: None,
            games: 1,
            delay: Duration::ZERO,
            advise: None,
            perft: None,
            divide: None,
        }
    }
}

fn number<T: FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::BadNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn take_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next().ok_or_else(|| CliError::MissingValue {
        flag: flag.to_string(),
    })
}

/// Parse flags (without the program name).
pub fn parse_args<I>(args: I) -> Result<Options, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "-board" => options.board = take_value(&mut args, &flag)?,
            "-agent1" => options.agent1 = Some(take_value(&mut args, &flag)?),
            "-agent2" => options.agent2 = Some(take_value(&mut args, &flag)?),
            "-games" => options.games = number(&flag, &take_value(&mut args, &flag)?)?,
            "-delay" => {
                let millis = number(&flag, &take_value(&mut args, &flag)?)?;
                options.delay = Duration::from_millis(millis);
            }
            "-advise" => options.advise = Some(take_value(&mut args, &flag)?.parse::<SearchConfig>()?),
            "-perft" => options.perft = Some(number(&flag, &take_value(&mut args, &flag)?)?),
            "-divide" => options.divide = Some(number(&flag, &take_value(&mut args, &flag)?)?),
            _ => return Err(CliError::UnknownFlag { flag }),
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, CliError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.board, STARTING_FEN);
        assert_eq!(options.games, 1);
    }

    #[test]
    fn full_command_line() {
        let options = parse(&[
            "-board",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "-agent1",
            "search:3,true,0",
            "-agent2",
            "random",
            "-games",
            "5",
            "-delay",
            "250",
            "-advise",
            "2,false,100",
        ])
        .unwrap();
        assert_eq!(options.board, "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(options.agent1.as_deref(), Some("search:3,true,0"));
        assert_eq!(options.agent2.as_deref(), Some("random"));
        assert_eq!(options.games, 5);
        assert_eq!(options.delay, Duration::from_millis(250));
        assert_eq!(options.advise.map(|c| c.depth), Some(Some(2)));
    }

    #[test]
    fn perft_and_divide() {
        let options = parse(&["-perft", "3", "-divide", "2"]).unwrap();
        assert_eq!(options.perft, Some(3));
        assert_eq!(options.divide, Some(2));
    }

    #[test]
    fn errors() {
        assert!(matches!(parse(&["-games"]), Err(CliError::MissingValue { flag }) if flag == "-games"));
        assert!(matches!(parse(&["-colour", "w"]), Err(CliError::UnknownFlag { flag }) if flag == "-colour"));
        assert!(matches!(
            parse(&["-games", "many"]),
            Err(CliError::BadNumber { value, .. }) if value == "many"
        ));
        assert!(matches!(parse(&["-advise", "0,true"]), Err(CliError::Config(_))));
    }
}
