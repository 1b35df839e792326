pub mod cli;
pub mod colors;
pub mod commands;
mod logger;

pub use cli::{Cli, Commands, ListCommands};
pub use colors::Colors;
pub use logger::CommandLogger;

fn term_width() -> u16 {
  crossterm::terminal::size().map_or(80, |(width, _)| width)
}
