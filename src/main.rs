mod analysis;
mod api;
mod auth;
mod cache;
mod config;
mod display;
mod error;
mod logging;
mod roster;
mod store;

use analysis::champion_resolver::ChampionResolver;
use analysis::matchups::{champion_breakdown, opponent_summary, threat_tiers, DEFAULT_THREAT_MIN_GAMES};
use analysis::player_stats::{find_player, player_history, player_records, sorted_players};
use analysis::scrims::{champion_options, find_match, opponent_options, MatchDetail, Outcome, ScrimFilter};
use analysis::team_stats::{objective_control, team_record};
use anyhow::Context;
use api::catalog::{load_catalog, Catalog, CATALOG_MAX_AGE_MINS};
use api::client::DataDragonClient;
use auth::Session;
use cache::CatalogCache;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use config::Config;
use display::output::*;
use error::AppError;
use indicatif::ProgressBar;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use store::json_store::{CachedStore, JsonDataStore, DEFAULT_READ_TTL_SECS};
use store::models::{MatchRecord, PlayerSummaryRecord, Side};
use store::DataStore;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "Scrim Stats")]
#[command(about = "Browse scrim results, team stats and champion matchups", long_about = None)]
struct Args {
    /// Directory holding games.json and players.json (overrides SCRIM_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Dashboard password (prompted for when required and not given)
    #[arg(long, global = true)]
    password: Option<String>,

    /// Refetch the champion catalog, ignoring its disk cache
    #[arg(long, global = true)]
    refresh: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List scrims, or show one with --id
    Scrims {
        /// Show the full breakdown of one scrim
        #[arg(long)]
        id: Option<String>,

        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// WIN or LOSS
        #[arg(long)]
        result: Option<Outcome>,

        /// BLUE or RED
        #[arg(long, value_parser = parse_side)]
        side: Option<Side>,

        /// Exact opponent team name
        #[arg(long)]
        opponent: Option<String>,

        /// Champion played by one of our roster players
        #[arg(long)]
        allied: Option<String>,

        /// Champion played by the opponent
        #[arg(long)]
        enemy: Option<String>,

        /// Print the values accepted by the filters
        #[arg(long)]
        options: bool,
    },

    /// Overall, per-side and objective win rates
    Team,

    /// Player summaries, or one player's detail with --name
    Players {
        #[arg(long)]
        name: Option<String>,
    },

    /// Champion pools per role and opponent threat tiers
    Champions {
        /// Minimum games before an opponent champion is tiered
        #[arg(long, default_value_t = DEFAULT_THREAT_MIN_GAMES)]
        min_games: usize,
    },
}

impl Command {
    /// Whether the command renders champion art and so needs the catalog.
    fn needs_catalog(&self) -> bool {
        match self {
            Command::Scrims { id, .. } => id.is_some(),
            Command::Champions { .. } => true,
            Command::Team | Command::Players { .. } => false,
        }
    }
}

fn parse_side(raw: &str) -> Result<Side, String> {
    match Side::from(raw.to_string()) {
        Side::Unknown => Err(format!("unknown side '{}', expected BLUE or RED", raw)),
        side => Ok(side),
    }
}

fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn authenticate(config: &Config, password: Option<String>) -> Result<Session, AppError> {
    let Some(expected) = config.dashboard_password.as_deref() else {
        return Ok(Session::open());
    };

    let attempt = match password {
        Some(p) => p,
        None => {
            print!("Password: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let mut session = Session::new();
    if session.login(&attempt, expected) {
        display_success("Authenticated");
        Ok(session)
    } else {
        Err(AppError::Unauthorized)
    }
}

fn fetch_catalog(config: &Config, refresh: bool) -> Catalog {
    info!(refresh, "loading champion catalog");
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading champion catalog");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let client = DataDragonClient::new(&config.locale);
    let catalog = load_catalog(
        &CatalogCache::get_cache_path(),
        CATALOG_MAX_AGE_MINS,
        refresh,
        || client.fetch_catalog(),
    );

    spinner.finish_and_clear();
    if catalog.is_empty() {
        display_warning("Champion catalog unavailable, champion art will show as placeholders");
    }
    catalog
}

/// `Ok(None)` when there are no player summaries to search.
fn select_player<'a>(
    players: &'a [PlayerSummaryRecord],
    name: &str,
) -> Result<Option<&'a PlayerSummaryRecord>, AppError> {
    if players.is_empty() {
        return Ok(None);
    }
    find_player(players, name)
        .map(Some)
        .ok_or_else(|| AppError::PlayerNotFound(name.to_string()))
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let mut session = authenticate(&config, args.password)?;
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized.into());
    }

    let source = JsonDataStore::new(&config.data_dir);
    info!(dir = %source.dir().display(), "reading scrim exports");
    let store = CachedStore::new(source, chrono::Duration::seconds(DEFAULT_READ_TTL_SECS));

    let catalog = if args.command.needs_catalog() {
        fetch_catalog(&config, args.refresh)
    } else {
        Catalog::empty()
    };
    let resolver = ChampionResolver::new(&catalog.entries);
    let art = ChampionArt::new(&resolver, &catalog.version);

    match args.command {
        Command::Scrims {
            id,
            from,
            to,
            result,
            side,
            opponent,
            allied,
            enemy,
            options,
        } => {
            let matches = load_matches(&store)?;
            if matches.is_empty() {
                display_info("No games found. Export the games collection to games.json first.");
            } else if options {
                let (allied, enemy) = champion_options(&matches, &config.roster);
                display_filter_options(&allied, &enemy, &opponent_options(&matches));
            } else if let Some(id) = id {
                let record = find_match(&matches, &id)?;
                let detail = MatchDetail::build(record, &config, &catalog.version);
                display_scrim_detail(&detail, &config.team_name, &art);
            } else {
                let filter = ScrimFilter {
                    date_from: from.map(|d| d.to_string()),
                    date_to: to.map(|d| d.to_string()),
                    result,
                    side,
                    opponent,
                    allied_champion: allied,
                    enemy_champion: enemy,
                };
                let kept = filter.apply(&matches, &config.roster);
                display_scrim_list(&kept, matches.len());
            }
        }
        Command::Team => {
            let matches = load_matches(&store)?;
            if matches.is_empty() {
                display_info("No games found. Export the games collection to games.json first.");
            } else {
                display_team_stats(&team_record(&matches), &objective_control(&matches));
            }
        }
        Command::Players { name } => {
            let players = store
                .list_players()
                .context("Failed to load player summaries")?;
            let matches = load_matches(&store)?;

            match name {
                Some(name) => match select_player(&players, &name)? {
                    Some(player) => {
                        display_player_detail(player, &player_history(&matches, &player.name))
                    }
                    None => display_info(
                        "No player summaries found. Export the players collection to players.json first.",
                    ),
                },
                None => {
                    let records = player_records(&matches, &config.roster);
                    display_player_list(&sorted_players(&players), &records);
                }
            }
        }
        Command::Champions { min_games } => {
            let matches = load_matches(&store)?;
            if matches.is_empty() {
                display_info("No games found. Export the games collection to games.json first.");
            } else {
                let breakdown = champion_breakdown(&matches, &config.roster);
                display_champion_breakdown(&breakdown, &config.roster, &art);

                let tiers = threat_tiers(&breakdown.opponents, min_games);
                display_threats(&tiers, &opponent_summary(&breakdown.opponents), min_games, &art);
                display_opponent_table(&breakdown.opponents, &art);
            }
        }
    }

    session.logout();
    Ok(())
}

fn load_matches<S: DataStore>(store: &CachedStore<S>) -> anyhow::Result<Vec<MatchRecord>> {
    let matches = store.list_matches().context("Failed to load games")?;
    info!(count = matches.len(), "scrims loaded");
    Ok(matches)
}
