use clap::Parser;

/// Port and storage location are fixed, so the command line only offers
/// `--help` and `--version`.
#[derive(Parser, Debug)]
#[command(name = "snow-notes")]
#[command(version, about = "Note-sharing backend with public/private notes and replies")]
#[command(after_help = "Listens on port 3001 and stores notes in notes.db next to the executable.\n\
Set RUST_LOG to change log verbosity.")]
pub struct Cli {}
