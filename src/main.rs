use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_alphalcazar::prelude::*;

fn main() -> Result<()> {
    // Initialize program options and environment.
    dotenvy::dotenv().ok();
    let options = DriverOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(
            match cfg!(debug_assertions) {
                true => AdaptiveFormat::WithThread,
                _    => AdaptiveFormat::Default
            })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    run(&options)
}

/// Plays the configured batch of games and reports aggregate results.
fn run(options: &DriverOptions) -> Result<()> {
    let mut player_1 = options.build_strategy(options.player_1);
    let mut player_2 = options.build_strategy(options.player_2);

    let mut games = Vec::with_capacity(options.games);
    for index in 0..options.games {
        let mut game = Game::new();
        let result = game.play(player_1.as_mut(), player_2.as_mut());
        log::info!(
            "Game {} finished after {} turns: {:?}.",
            index + 1,
            game.turns,
            result
        );
        games.push(game);
    }

    analyze_games(&games);

    if options.persist {
        player_1.flush_caches();
        player_2.flush_caches();
    }
    Ok(())
}
