use std::fmt;

use blockcraft_core::{Coordinate, Delta, Material};
use blockcraft_world::{BuilderSession, Command, CommandOutcome, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCoordArg {
    Absolute(i32),
    Relative(i32),
}

impl BlockCoordArg {
    pub fn resolve(self, base: i32) -> i32 {
        match self {
            Self::Absolute(v) => v,
            Self::Relative(delta) => base.saturating_add(delta),
        }
    }
}

/// Three coordinate arguments, each absolute or relative to the ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArg {
    pub x: BlockCoordArg,
    pub y: BlockCoordArg,
    pub z: BlockCoordArg,
}

impl CellArg {
    pub fn resolve(self, ghost: Coordinate) -> Coordinate {
        Coordinate::new(
            self.x.resolve(ghost.x),
            self.y.resolve(ghost.y),
            self.z.resolve(ghost.z),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Blocks,
    Place {
        at: Option<CellArg>,
        material: Option<Material>,
    },
    Remove {
        at: Option<CellArg>,
    },
    Undo,
    Redo,
    Save,
    Load,
    Reset,
    Material(Material),
    Grid,
    Move(Delta),
    Ghost {
        at: Option<CellArg>,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub lines: Vec<String>,
}

impl From<CommandOutcome> for CommandOutput {
    fn from(outcome: CommandOutcome) -> Self {
        Self {
            success: outcome.success,
            lines: vec![outcome.message],
        }
    }
}

impl CommandOutput {
    fn info(lines: Vec<String>) -> Self {
        Self {
            success: true,
            lines,
        }
    }

    pub fn error(err: &CommandError) -> Self {
        Self {
            success: false,
            lines: vec![format!("Error: {err}")],
        }
    }
}

pub fn execute_command<S: KeyValueStore>(
    session: &mut BuilderSession<S>,
    cmd: ConsoleCommand,
) -> CommandOutput {
    let ghost = session.ghost();
    let command = match cmd {
        ConsoleCommand::Help => return CommandOutput::info(help_lines()),
        ConsoleCommand::Blocks => {
            let mut lines = vec![format!("{} blocks", session.world().len())];
            lines.extend(
                session
                    .blocks()
                    .map(|block| format!("  {} {}", block.coordinate, block.material)),
            );
            return CommandOutput::info(lines);
        }
        ConsoleCommand::Ghost { at: None } => {
            return CommandOutput::info(vec![format!("Ghost at {ghost}")]);
        }
        ConsoleCommand::Ghost { at: Some(at) } => Command::SetGhost(at.resolve(ghost)),
        ConsoleCommand::Place { at, material } => Command::Place {
            target: at.map(|at| at.resolve(ghost)),
            material,
        },
        ConsoleCommand::Remove { at } => Command::Remove {
            target: at.map(|at| at.resolve(ghost)),
        },
        ConsoleCommand::Undo => Command::Undo,
        ConsoleCommand::Redo => Command::Redo,
        ConsoleCommand::Save => Command::Save,
        ConsoleCommand::Load => Command::Load,
        ConsoleCommand::Reset => Command::Reset,
        ConsoleCommand::Material(material) => Command::SetMaterial(material),
        ConsoleCommand::Grid => Command::ToggleGrid,
        ConsoleCommand::Move(delta) => Command::MoveGhost(delta),
    };
    session.dispatch(command).into()
}

pub fn parse_command(input: &str) -> Result<ConsoleCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(ConsoleCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let no_args = |command: ConsoleCommand| {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(CommandError::new(format!("Usage: {cmd}")))
        }
    };

    match cmd.as_str() {
        "help" | "?" => no_args(ConsoleCommand::Help),
        "blocks" | "list" => no_args(ConsoleCommand::Blocks),
        "undo" => no_args(ConsoleCommand::Undo),
        "redo" => no_args(ConsoleCommand::Redo),
        "save" => no_args(ConsoleCommand::Save),
        "load" => no_args(ConsoleCommand::Load),
        "reset" => no_args(ConsoleCommand::Reset),
        "grid" => no_args(ConsoleCommand::Grid),
        "place" => parse_place_command(&args),
        "remove" | "rm" => {
            let at = parse_optional_cell(&args, "Usage: remove [x y z]")?;
            Ok(ConsoleCommand::Remove { at })
        }
        "ghost" => {
            let at = parse_optional_cell(&args, "Usage: ghost [x y z]")?;
            Ok(ConsoleCommand::Ghost { at })
        }
        "material" | "mat" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: material <name|1-5>"));
            }
            Ok(ConsoleCommand::Material(parse_material(args[0])?))
        }
        "move" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: move <dx> <dy> <dz>"));
            }
            let step = |s: &str| {
                s.parse::<i32>()
                    .map_err(|_| CommandError::new(format!("Invalid offset: {s}")))
            };
            Ok(ConsoleCommand::Move(Delta::new(
                step(args[0])?,
                step(args[1])?,
                step(args[2])?,
            )))
        }
        _ => Err(CommandError::new(format!("Unknown command: {cmd}. Try help"))),
    }
}

fn parse_place_command(args: &[&str]) -> Result<ConsoleCommand, CommandError> {
    const USAGE: &str = "Usage: place [x y z] [material]";
    let (at, material) = match args.len() {
        0 => (None, None),
        1 => (None, Some(parse_material(args[0])?)),
        3 => (Some(parse_cell(args)?), None),
        4 => (Some(parse_cell(&args[..3])?), Some(parse_material(args[3])?)),
        _ => return Err(CommandError::new(USAGE)),
    };
    Ok(ConsoleCommand::Place { at, material })
}

fn parse_optional_cell(args: &[&str], usage: &str) -> Result<Option<CellArg>, CommandError> {
    match args.len() {
        0 => Ok(None),
        3 => parse_cell(args).map(Some),
        _ => Err(CommandError::new(usage)),
    }
}

fn parse_cell(args: &[&str]) -> Result<CellArg, CommandError> {
    Ok(CellArg {
        x: parse_block_coord(args[0])?,
        y: parse_block_coord(args[1])?,
        z: parse_block_coord(args[2])?,
    })
}

fn parse_block_coord(s: &str) -> Result<BlockCoordArg, CommandError> {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('~') {
        if rest.is_empty() {
            return Ok(BlockCoordArg::Relative(0));
        }
        let delta = rest
            .parse::<i32>()
            .map_err(|_| CommandError::new(format!("Invalid relative block coordinate: {s}")))?;
        return Ok(BlockCoordArg::Relative(delta));
    }
    let value = s
        .parse::<i32>()
        .map_err(|_| CommandError::new(format!("Invalid block coordinate: {s}")))?;
    Ok(BlockCoordArg::Absolute(value))
}

/// Material by storage label or 1-based palette slot.
fn parse_material(token: &str) -> Result<Material, CommandError> {
    if let Ok(slot) = token.parse::<usize>() {
        return slot
            .checked_sub(1)
            .and_then(Material::from_palette_index)
            .ok_or_else(|| CommandError::new(format!("Palette slot must be 1-5, got {slot}")));
    }
    token
        .parse::<Material>()
        .map_err(|err| CommandError::new(err.to_string()))
}

fn help_lines() -> Vec<String> {
    let palette = Material::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}={}", i + 1, m.as_str()))
        .collect::<Vec<_>>()
        .join(" ");
    vec![
        "Commands:".to_string(),
        "  help".to_string(),
        "  place [x y z] [material]   (supports ~offset from the ghost)".to_string(),
        "  remove [x y z]             (supports ~offset from the ghost)".to_string(),
        "  undo | redo".to_string(),
        "  save | load | reset".to_string(),
        format!("  material <name|1-5>        {palette}"),
        "  grid                       toggle the floor grid".to_string(),
        "  move <dx> <dy> <dz>".to_string(),
        "  ghost [x y z]".to_string(),
        "  blocks                     list placed blocks".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_world::{MemoryStore, SessionOptions};

    fn session() -> BuilderSession<MemoryStore> {
        BuilderSession::new(SessionOptions::default(), MemoryStore::new())
    }

    #[test]
    fn parses_place_with_relative_coords() {
        let cmd = parse_command("/place ~1 0 ~ oak").unwrap();
        assert_eq!(
            cmd,
            ConsoleCommand::Place {
                at: Some(CellArg {
                    x: BlockCoordArg::Relative(1),
                    y: BlockCoordArg::Absolute(0),
                    z: BlockCoordArg::Relative(0),
                }),
                material: Some(Material::Oak),
            }
        );
    }

    #[test]
    fn parses_materials_by_name_or_slot() {
        assert_eq!(
            parse_command("material GLASS").unwrap(),
            ConsoleCommand::Material(Material::Glass)
        );
        assert_eq!(
            parse_command("material 1").unwrap(),
            ConsoleCommand::Material(Material::Stone)
        );
        assert!(parse_command("material 0").is_err());
        assert!(parse_command("material 6").is_err());
        assert!(parse_command("material lava").is_err());
    }

    #[test]
    fn rejects_bad_arity_and_unknown_commands() {
        assert!(parse_command("place 1 2").is_err());
        assert!(parse_command("undo now").is_err());
        assert!(parse_command("move 1 0").is_err());
        let err = parse_command("fly").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: fly. Try help");
        assert_eq!(parse_command("   ").unwrap(), ConsoleCommand::Help);
    }

    #[test]
    fn relative_coords_resolve_against_the_ghost() {
        let mut session = session();
        let out = execute_command(&mut session, parse_command("place ~-8 ~-8 0").unwrap());
        assert!(out.success);
        assert_eq!(out.lines, vec!["Block placed: Wood at 0,0,0".to_string()]);
    }

    #[test]
    fn ghost_without_args_reports_position() {
        let mut session = session();
        let out = execute_command(&mut session, ConsoleCommand::Ghost { at: None });
        assert_eq!(out.lines, vec!["Ghost at 8,8,0".to_string()]);
    }

    #[test]
    fn golden_command_session_outputs_are_stable() {
        let mut session = session();

        let mut transcript = Vec::new();
        for input in [
            "place 0 0 0",
            "place 0 0 0",
            "place 5 5 1",
            "material 3",
            "place 0 0 1",
            "remove 1 0 0",
            "undo",
            "redo",
            "grid",
            "save",
            "reset",
            "load",
            "blocks",
        ] {
            let cmd = parse_command(input).unwrap();
            let out = execute_command(&mut session, cmd);
            transcript.extend(out.lines);
        }

        assert_eq!(
            transcript,
            vec![
                "Block placed: Wood at 0,0,0".to_string(),
                "Block placed: Wood at 1,0,0".to_string(),
                "That block would float: nothing below or beside it".to_string(),
                "Material: Oak".to_string(),
                "Block placed: Oak at 0,0,1".to_string(),
                "Block removed (Wood)".to_string(),
                "Undo: block restored".to_string(),
                "Redo: block removed".to_string(),
                "Grid hidden".to_string(),
                "Project saved".to_string(),
                "Canvas reset".to_string(),
                "Project loaded (2 blocks)".to_string(),
                "2 blocks".to_string(),
                "  0,0,0 wood".to_string(),
                "  0,0,1 oak".to_string(),
            ]
        );
    }
}
