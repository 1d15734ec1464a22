use std::path::PathBuf;

use bracket_terminal::prelude::*;
use clap::Parser;
use env_logger::Env;
use log::info;
use tombcrawl::{
    GameConfig, Session,
    app::{TombsState, replay},
    input::ScriptedInput,
};

#[derive(Parser, Debug)]
#[command(name = "tombcrawl")]
#[command(about = "Turn-based dungeon crawl through the Tombs of the Ancient Kings")]
#[command(version)]
struct Args {
    /// Dungeon seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding the default game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a key script headlessly instead of opening a window
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> BError {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();
    info!("tombcrawl v{}", tombcrawl::VERSION);

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    if let Some(path) = &args.script {
        let keys = ScriptedInput::from_file(path)?;
        let (_, summary) = replay(config, keys)?;
        println!("{summary}");
        return Ok(());
    }

    let context = BTermBuilder::simple(config.screen_width, config.screen_height)?
        .with_title("Tombs of the Ancient Kings")
        .build()?;
    let state = TombsState::new(Session::new(config)?);
    main_loop(context, state)
}
