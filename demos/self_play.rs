extern crate medium_bot;

use medium_bot::game::{Game, Phase};
use medium_bot::policy::Tier;
use medium_bot::random::{RandomGenerator, StandardRandomGenerator};
use medium_bot::{GameOutcome, Mark};
use tracing_subscriber::EnvFilter;

const GAMES: usize = 2000;

fn main() {
    // RUST_LOG=medium_bot=debug shows every decision
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // The "human" here just plays random cells
    let mut human = StandardRandomGenerator;
    let mut game = Game::new();

    let mut human_wins = 0;
    let mut bot_wins = 0;
    let mut draws = 0;
    let mut blocks = 0;

    for _ in 0..GAMES {
        game.reset();
        while game.phase() == Phase::HumanToMove {
            let moves = game.board().available_moves();
            let pick = *human
                .get_random_from_slice(&moves)
                .expect("the human always has a move while the game is running");
            let report = game.play_turn(pick).expect("legal move was rejected");
            if report.opponent_move.is_some_and(|d| d.tier == Tier::Block) {
                blocks += 1;
            }
        }

        match game.phase() {
            Phase::Finished(GameOutcome::Win(Mark::X)) => human_wins += 1,
            Phase::Finished(GameOutcome::Win(Mark::O)) => bot_wins += 1,
            Phase::Finished(GameOutcome::Draw) => draws += 1,
            other => panic!("game stopped without a result: {other:?}"),
        }
    }

    println!("Last board:\n{}\n", game.board());
    println!(
        "Human wins: {:.2?}%",
        human_wins as f64 / GAMES as f64 * 100.0
    );
    println!("Bot wins: {:.2?}%", bot_wins as f64 / GAMES as f64 * 100.0);
    println!("Draws: {:.2?}%", draws as f64 / GAMES as f64 * 100.0);
    println!("Blocks played: {blocks}");

    assert_eq!(human_wins + bot_wins + draws, GAMES);
}
