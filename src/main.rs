//! Space Journey entry point
//!
//! Native builds run a headless autopilot demo and print the leaderboard.
//! The browser build is driven through `space_journey::web::WebSession`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use space_journey::audio::{AudioManager, LogSink};
    use space_journey::consts::SIM_DT;
    use space_journey::sim::{GameEvent, demo_input};
    use space_journey::{LocalLeaderboard, Session, Settings, Tuning};

    /// Two minutes of play
    const DEFAULT_TICK_LIMIT: u64 = 60 * 120;

    /// Headless Space Journey demo driven by the autopilot.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Cli {
        /// JSON file overriding gameplay tuning
        #[arg(long, value_name = "FILE")]
        pub tuning: Option<PathBuf>,
        /// Run seed; random when omitted
        #[arg(long)]
        pub seed: Option<u64>,
        /// Ticks before the demo stops waiting for a game over
        #[arg(
            long = "max-ticks",
            value_name = "TICKS",
            default_value_t = DEFAULT_TICK_LIMIT,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        pub max_ticks: u64,
    }

    pub fn run(cli: Cli) {
        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path).unwrap_or_else(|e| {
                log::warn!("Falling back to default tuning: {e}");
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let seed = cli.seed.unwrap_or_else(rand::random);
        let settings = Settings::load();

        let mut audio = AudioManager::with_settings(LogSink, &settings);
        let mut session = Session::new(seed, tuning, &settings, LocalLeaderboard::new());

        while !session.state().is_game_over() && session.state().time_ticks < cli.max_ticks {
            let input = demo_input(session.state());
            session.set_input(input);
            session.update(SIM_DT);

            let events = session.drain_events();
            audio.dispatch(&events);
            for event in &events {
                match event {
                    GameEvent::PlayerHit { damage, health } => {
                        log::info!("Hit for {damage}, {health} health left");
                    }
                    GameEvent::ScoreAwarded { total, .. } => log::debug!("Score {total}"),
                    _ => {}
                }
            }
        }

        let state = session.state();
        println!(
            "Seed {seed}: survived {} ticks, score {}",
            state.time_ticks, state.player.score
        );

        // A run that outlasted the limit still goes on the board
        if !state.is_game_over() {
            session.state_mut().player.health = 0;
            session.update(SIM_DT);
        }

        println!("\nHIGH SCORES");
        for (rank, record) in session.show_leaderboard().iter().enumerate() {
            println!("{:>2}. {:<3} {:>6}", rank + 1, record.name, record.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Space Journey (native) starting...");
    native::run(native::Cli::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the exported WebSession, this is just to satisfy the compiler
}
