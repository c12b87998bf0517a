//! Lineup CLI
//!
//! Edits the formation board stored under the configured storage directory.
//! Every command opens the board of the selected template, applies one
//! operation, waits for the writes and prints the result.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lineup_core::models::RosterSection;
use lineup_core::{
    BoardConfig, BoardState, FileStore, FormationBoard, JsonFileSink, KeyValueStore, LineupSheet,
    PhotoMap, PlayerRole, Roster, RosterFilter, RosterProvider, TemplateCatalog, WriteQueue,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Build and edit team lineups on a formation board", long_about = None)]
struct Cli {
    /// Config YAML (falls back to LINEUP_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Template to work on (default from config)
    #[arg(long, short, global = true)]
    template: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available templates
    Templates,

    /// Print the board
    Show {
        /// Print the stored slot records as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List roster players
    Roster {
        /// GK, DF, MF, FW (Italian names accepted)
        #[arg(long, value_parser = parse_role)]
        role: Option<PlayerRole>,

        /// Birth year
        #[arg(long)]
        year: Option<u16>,

        /// Name substring, case-insensitive
        #[arg(long)]
        search: Option<String>,
    },

    /// Roster players not yet on the board
    Available,

    /// Put a player on a slot
    Assign { slot: String, player: String },

    /// Empty a slot
    Clear { slot: String },

    /// Empty every slot
    ClearAll,

    /// Move a slot (percent coordinates, clamped to 0-100)
    #[command(allow_negative_numbers = true)]
    Move { slot: String, x: f64, y: f64 },

    /// Switch to another template
    Switch {
        to: String,

        /// Carry the current players over by nearest slot
        #[arg(long, conflicts_with = "fresh")]
        preserve: bool,

        /// Load the target's own board even if the config preserves
        #[arg(long)]
        fresh: bool,
    },

    /// Restore the template's default layout and empty it
    Reset,

    /// Write the lineup sheet as JSON
    Export {
        /// Output directory (default from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_role(value: &str) -> Result<PlayerRole, String> {
    PlayerRole::parse(value).ok_or_else(|| format!("unknown role '{value}'"))
}

/// `--fresh` beats everything, then `--preserve`, then the config default.
fn preserve_on_switch(preserve: bool, fresh: bool, config_default: bool) -> bool {
    !fresh && (preserve || config_default)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let catalog = TemplateCatalog::global();

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::from_env()?,
    };
    config.validate(catalog)?;

    let roster = load_roster(&config)?;
    let template = cli.template.clone().unwrap_or_else(|| config.default_template.clone());

    // commands that never touch the board
    match &cli.command {
        Commands::Templates => {
            print_templates(catalog, &template);
            return Ok(());
        }
        Commands::Roster { role, year, search } => {
            let filter = RosterFilter { role: *role, year: *year, search: search.clone() };
            print_sections(&roster.sections(&filter));
            return Ok(());
        }
        _ => {}
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage_dir));
    let writes = WriteQueue::on_current_runtime(Arc::clone(&store))?;
    let mut board = FormationBoard::open(catalog, writes, &template)?;

    match cli.command {
        Commands::Templates | Commands::Roster { .. } => {}
        Commands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&board.state().slots)?);
            } else {
                print_board(board.state(), &roster);
            }
        }
        Commands::Available => {
            let available = board.available_players(&roster);
            println!("{} of {} players available", available.len(), roster.len());
            for player in available {
                println!("   {:<4} {:<28} {}", player.role.short_name(), player.name, player.id);
            }
        }
        Commands::Assign { slot, player } => {
            if !roster.is_empty() && roster.find(&player).is_none() {
                tracing::warn!(player = %player, "Player is not in the roster");
            }
            board.assign(&slot, &player)?;
            print_board(board.state(), &roster);
        }
        Commands::Clear { slot } => {
            board.clear(&slot)?;
            print_board(board.state(), &roster);
        }
        Commands::ClearAll => {
            board.clear_all();
            print_board(board.state(), &roster);
        }
        Commands::Move { slot, x, y } => {
            board.reposition(&slot, x, y)?;
            print_board(board.state(), &roster);
        }
        Commands::Switch { to, preserve, fresh } => {
            let preserve = preserve_on_switch(preserve, fresh, config.preserve_assignments);
            let dropped = board.switch_template(&to, preserve)?;
            if !dropped.is_empty() {
                println!("Left off the board: {}", dropped.join(", "));
            }
            print_board(board.state(), &roster);
        }
        Commands::Reset => {
            board.reset()?;
            print_board(board.state(), &roster);
        }
        Commands::Export { out } => {
            let photos = PhotoMap::load(store.as_ref());
            let sheet = LineupSheet::from_board(board.state(), &roster, &photos);
            let sink = JsonFileSink::new(out.unwrap_or_else(|| config.export_dir.clone()));
            let path = sink.write(&sheet).context("exporting lineup")?;
            println!("Lineup written to {}", path.display());
        }
    }

    board.flush().await;
    for notice in board.persistence_notices() {
        eprintln!("⚠️  Changes not saved ({}): {}", notice.key, notice.message);
    }

    Ok(())
}

fn load_roster(config: &BoardConfig) -> Result<Roster> {
    match &config.roster_path {
        Some(path) => Roster::load(path).with_context(|| format!("loading roster {}", path.display())),
        None => Ok(Roster::default()),
    }
}

fn print_templates(catalog: &TemplateCatalog, current: &str) {
    for template in catalog.templates() {
        let marker = if template.name == current { "*" } else { " " };
        println!(
            "{} {:<8} DF {} / MF {} / FW {}   {}",
            marker,
            template.name,
            template.defender_count(),
            template.midfielder_count(),
            template.forward_count(),
            template.description
        );
    }
}

fn print_sections(sections: &[RosterSection<'_>]) {
    if sections.is_empty() {
        println!("No players match");
    }
    for section in sections {
        println!("{} ({})", section.role.display_name(), section.players.len());
        for player in &section.players {
            let year = player.year.map(|y| y.to_string()).unwrap_or_default();
            println!("   {:<28} {:<6} {}", player.name, year, player.id);
        }
    }
}

fn print_board(state: &BoardState, roster: &Roster) {
    println!("Formation {} ({}/{} assigned)", state.template_name, state.assigned_count(), state.slots.len());
    for slot in &state.slots {
        let who = match slot.player_id.as_deref() {
            Some(id) => roster.find(id).map(|p| p.name.clone()).unwrap_or_else(|| id.to_string()),
            None => "-".to_string(),
        };
        println!("   {:<5} {:<3} ({:>5.1}, {:>5.1})  {}", slot.id, slot.role.short_name(), slot.x, slot.y, who);
    }
}
