//! Shell Commands
//!
//! Every command the shell understands, with its handler.

use std::io::Write;

use rand::Rng;
use tracing::debug;

use crate::error::{CommandError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage};
use crate::repl::Session;

/// Catch chance for a Pokemon with no base experience
const MAX_CATCH_CHANCE: f64 = 100.0;
/// Catch chance floor for a Pokemon at the experience ceiling
const MIN_CATCH_CHANCE: f64 = 15.0;
/// Base experience treated as the top of the scale
const EXPERIENCE_CEILING: f64 = 350.0;

/// Whether the shell should keep reading input after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Command ==
/// A shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Map,
    Mapb,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// All commands, in declaration order.
    pub const ALL: [Command; 8] = [
        Command::Exit,
        Command::Help,
        Command::Map,
        Command::Mapb,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    /// Looks up a command by the word the user typed.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::Help => "help",
            Command::Map => "map",
            Command::Mapb => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Exit => "Exit the Pokedex",
            Command::Help => "Displays a help message",
            Command::Map => "Display the names of 20 location areas in the Pokemon world",
            Command::Mapb => {
                "Display the names of the previous 20 location areas in the Pokemon world"
            }
            Command::Explore => "Explore a location area to find Pokemon",
            Command::Catch => "Attempt to catch a Pokemon by name",
            Command::Inspect => "Inspect Pokemon details",
            Command::Pokedex => "Display all Pokemon found in Pokedex",
        }
    }

    /// Runs the command against `session`, writing its output to `out`.
    pub async fn execute<W: Write>(
        self,
        session: &mut Session,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow> {
        debug!("Executing {} with {} argument(s)", self.name(), args.len());

        match self {
            Command::Exit => exit(args, out),
            Command::Help => help(args, out),
            Command::Map => map(session, args, out).await,
            Command::Mapb => mapb(session, args, out).await,
            Command::Explore => explore(session, args, out).await,
            Command::Catch => catch(session, args, out).await,
            Command::Inspect => inspect(session, args, out),
            Command::Pokedex => pokedex(session, out),
        }
    }
}

fn warn_extra_args<W: Write>(command: Command, args: &[String], out: &mut W) -> Result<()> {
    if !args.is_empty() {
        writeln!(
            out,
            "Warning: The {} command takes no arguments, ignoring extra input",
            command.name()
        )?;
    }
    Ok(())
}

/// Returns the only argument, or `usage` as an error when there are none or
/// several.
fn single_arg<'a>(args: &'a [String], usage: &'static str) -> Result<&'a String> {
    match args {
        [arg] => Ok(arg),
        _ => Err(CommandError::MissingArgument(usage)),
    }
}

fn exit<W: Write>(args: &[String], out: &mut W) -> Result<Flow> {
    warn_extra_args(Command::Exit, args, out)?;
    writeln!(out, "Closing the Pokedex... Goodbye!")?;
    Ok(Flow::Exit)
}

fn help<W: Write>(args: &[String], out: &mut W) -> Result<Flow> {
    warn_extra_args(Command::Help, args, out)?;

    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;

    let mut commands = Command::ALL.to_vec();
    commands.sort_by_key(|command| command.name());
    for command in commands {
        writeln!(out, "{}: {}", command.name(), command.description())?;
    }
    Ok(Flow::Continue)
}

// == Location Paging ==
/// Fetches the page at `url`, moves the cursor to it and prints its areas.
async fn show_page<W: Write>(session: &mut Session, url: &str, out: &mut W) -> Result<()> {
    let fetched = session
        .client
        .location_area_page(&session.cache, url)
        .await?;
    if fetched.from_cache {
        writeln!(out, "Using cached data...")?;
    }

    let page: LocationAreaPage = fetched.value;
    session.next = page.next;
    session.previous = page.previous;

    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    Ok(())
}

async fn map<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> Result<Flow> {
    warn_extra_args(Command::Map, args, out)?;

    let url = session
        .next
        .clone()
        .unwrap_or_else(|| session.client.location_areas_url());
    show_page(session, &url, out).await?;
    Ok(Flow::Continue)
}

async fn mapb<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> Result<Flow> {
    warn_extra_args(Command::Mapb, args, out)?;

    match session.previous.clone() {
        Some(url) => show_page(session, &url, out).await?,
        None => writeln!(out, "you're on the first page.")?,
    }
    Ok(Flow::Continue)
}

async fn explore<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> Result<Flow> {
    let area = single_arg(args, "you must provide a location area name")?;

    writeln!(out, "Exploring {}...", area)?;
    let url = session.client.location_area_url(area);
    let detail: LocationAreaDetail = match session.client.cached(&session.cache, &url).await? {
        Some(detail) => detail,
        None => {
            writeln!(out, "Fetching data from PokeAPI...")?;
            session.client.download(&session.cache, &url).await?
        }
    };

    let names = detail.pokemon_names();
    if names.is_empty() {
        return Err(CommandError::NoPokemon(area.clone()));
    }

    writeln!(out, "Found Pokemon:")?;
    for name in names {
        writeln!(out, " - {}", name)?;
    }
    Ok(Flow::Continue)
}

// == Catching ==
/// Highest roll (out of 0..100) that still catches a Pokemon with the given
/// base experience. Scales linearly from 100 at zero experience to 15 at the
/// ceiling, and keeps falling beyond it.
pub fn catch_threshold(base_experience: u32) -> i32 {
    let chance = MAX_CATCH_CHANCE
        - (base_experience as f64 / EXPERIENCE_CEILING) * (MAX_CATCH_CHANCE - MIN_CATCH_CHANCE);
    chance as i32
}

async fn catch<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> Result<Flow> {
    let name = single_arg(args, "please specify the name of the Pokemon to catch")?.clone();

    writeln!(out, "Throwing a Pokeball at {}...", name)?;
    let pokemon = session.client.pokemon(&session.cache, &name).await?.value;

    let threshold = catch_threshold(pokemon.base_experience.unwrap_or(0));
    let roll: i32 = session.rng.gen_range(0..100);
    debug!("Catch roll for {}: {} against {}", name, roll, threshold);

    if roll > threshold {
        writeln!(out, "{} escaped!", name)?;
    } else {
        writeln!(out, "{} was caught!", name)?;
        session.pokedex.insert(name, pokemon);
    }
    Ok(Flow::Continue)
}

fn inspect<W: Write>(session: &Session, args: &[String], out: &mut W) -> Result<Flow> {
    let name = single_arg(args, "please specify the name of the Pokemon to inspect")?;

    let Some(pokemon) = session.pokedex.get(name) else {
        writeln!(out, "You have not caught the Pokemon {}.", name)?;
        return Ok(Flow::Continue);
    };

    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stat:")?;
    for stat in &pokemon.stats {
        writeln!(out, "  - {}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(out, "  - {}", kind.kind.name)?;
    }
    Ok(Flow::Continue)
}

fn pokedex<W: Write>(session: &Session, out: &mut W) -> Result<Flow> {
    if session.pokedex.is_empty() {
        writeln!(out, "You have not caught any Pokemon yet")?;
        return Ok(Flow::Continue);
    }

    writeln!(out, "Your Pokedex:")?;
    for pokemon in session.pokedex.iter() {
        writeln!(out, " - {}", pokemon.name)?;
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(Command::parse("mapb"), Some(Command::Mapb));
        assert_eq!(Command::parse("pokedex"), Some(Command::Pokedex));
        assert_eq!(Command::parse("fly"), None);
        assert_eq!(Command::parse("MAP"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::parse(command.name()), Some(command));
        }
    }

    #[test]
    fn test_single_arg_rule() {
        let usage = "please specify the name of the Pokemon to catch";
        let one = vec!["pidgey".to_string()];
        let two = vec!["pidgey".to_string(), "now".to_string()];

        assert_eq!(single_arg(&one, usage).unwrap(), "pidgey");
        assert!(matches!(single_arg(&[], usage), Err(CommandError::MissingArgument(_))));
        let err = single_arg(&two, usage).unwrap_err();
        assert_eq!(err.to_string(), usage);
    }

    #[test]
    fn test_catch_threshold_scale() {
        assert_eq!(catch_threshold(0), 100);
        assert_eq!(catch_threshold(350), 15);
        // 100 - 64/350*85 = 84.457...
        assert_eq!(catch_threshold(64), 84);
        assert!(catch_threshold(1000) < 0);
    }

    #[test]
    fn test_help_lists_commands_sorted() {
        let mut out = Vec::new();
        let flow = help(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(flow, Flow::Continue);
        let listed: Vec<&str> = text
            .lines()
            .filter_map(|line| line.split_once(':').map(|(name, _)| name))
            .collect();
        assert_eq!(
            listed,
            vec!["Usage", "catch", "exit", "explore", "help", "inspect", "map", "mapb", "pokedex"]
        );
    }

    #[test]
    fn test_exit_warns_on_arguments() {
        let mut out = Vec::new();
        let flow = exit(&["now".to_string()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(flow, Flow::Exit);
        assert!(text.starts_with("Warning: The exit command takes no arguments"));
        assert!(text.ends_with("Closing the Pokedex... Goodbye!\n"));
    }
}
