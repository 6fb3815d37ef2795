//! Training server wiring.
//!
//! Builds the actix-web app around the hosting layer: CORS, request
//! logging, the health probe, and the WebSocket game route. A table is
//! opened at startup from the command-line configuration and its join
//! URL logged; further games can be opened by embedding [`Lobby`]
//! directly.
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use clap::Parser;
use rail_agents::Archetype;
use rail_agents::HouseOracle;
use rail_agents::JsonlMemory;
use rail_core::Chips;
use rail_gameplay::GameConfig;
use rail_gameplay::Mode;
use rail_gameplay::RakeConfig;
use rail_gameplay::Structure;
use rail_gameroom::NoMemory;
use rail_gameroom::OpponentMemory;
use rail_gameroom::TimerConfig;
use rail_hosting::Lobby;
use rail_hosting::handlers;
use std::sync::Arc;

/// Runtime configuration.
#[derive(Debug, Parser)]
#[command(name = "railbird", about = "Interactive Texas Hold'em training server")]
pub struct Args {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,
    /// Betting structure: nl, pl, or fl.
    #[arg(long, default_value = "nl")]
    pub structure: String,
    /// Small blind.
    #[arg(long, default_value_t = rail_core::S_BLIND)]
    pub sblind: Chips,
    /// Big blind.
    #[arg(long, default_value_t = rail_core::B_BLIND)]
    pub bblind: Chips,
    /// Ante taken from every dealt-in seat, 0 to disable.
    #[arg(long, default_value_t = 0)]
    pub ante: Chips,
    /// Starting stack for every seat.
    #[arg(long, default_value_t = rail_core::STACK)]
    pub stack: Chips,
    /// Seats at the table, including the human.
    #[arg(long, default_value_t = rail_core::N)]
    pub seats: usize,
    /// Rake the pots (cash-game rules).
    #[arg(long, default_value_t = false)]
    pub rake: bool,
    /// Opponent archetype labels, cycled across the non-human seats.
    #[arg(long, value_delimiter = ',', default_value = "TAG,LAG,NIT,STATION,MANIAC")]
    pub archetypes: Vec<String>,
    /// Append completed hands to this JSONL file.
    #[arg(long)]
    pub history: Option<std::path::PathBuf>,
}

impl Args {
    pub fn game_config(&self) -> anyhow::Result<GameConfig> {
        Ok(GameConfig {
            mode: Mode::Cash,
            structure: Structure::try_from(self.structure.as_str())?,
            sblind: self.sblind,
            bblind: self.bblind,
            ante: self.ante,
            rake: self.rake.then(RakeConfig::default),
            seats: self.seats,
        })
    }
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.game_config()?;
    let memory: Arc<dyn OpponentMemory> = match &args.history {
        Some(path) => Arc::new(JsonlMemory::open(path.clone())?),
        None => Arc::new(NoMemory),
    };
    let archetypes = args
        .archetypes
        .iter()
        .map(|label| Archetype::lookup(label).id)
        .collect::<Vec<String>>();
    let lobby = Arc::new(Lobby::new(
        config,
        TimerConfig::default(),
        args.stack,
        archetypes,
        Arc::new(HouseOracle),
        memory,
    ));
    let (game, player) = lobby.open().await?;
    log::info!(
        "table open: ws://{}/ws/game/{}?player_id={}",
        args.bind,
        game,
        player
    );
    let lobby = web::Data::new(lobby);
    log::info!("starting server on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/ws/game/{game_id}", web::get().to(handlers::enter))
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}
