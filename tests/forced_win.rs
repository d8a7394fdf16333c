use fpg::{
    analyzer::{Analyzer, Outcome},
    game::FinitePositionGame,
    spoiler::{Mode, Spoiler},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Play until somebody lands on the target. Returns `true` if the spoiler made the last move.
fn play_out(spoiler: &Spoiler, mut position: u32, rng: &mut StdRng) -> bool {
    let game = *spoiler.analyzer().game();
    loop {
        let spoiler_move = spoiler.make_move(position, rng).unwrap();
        position += spoiler_move;
        if position == game.target() {
            return true;
        }

        let max_legal = game.max_move().min(game.target() - position);
        position += rng.random_range(1..=max_legal);
        if position == game.target() {
            return false;
        }
    }
}

#[test]
fn smart_spoiler_never_loses_from_winning_position() {
    let mut rng = StdRng::seed_from_u64(2001);
    for (day, month, year) in [(1, 1, 1), (1, 2, 3), (3, 1, 9), (12, 11, 2001), (31, 12, 99)] {
        let game = FinitePositionGame::new(day, month, year).unwrap();
        let analyzer = Analyzer::new_using_closure(game);
        let spoiler = Spoiler::new(&analyzer, Mode::Smart);

        for position in analyzer.winning_positions().step_by(7) {
            for _ in 0..4 {
                assert!(play_out(&spoiler, position, &mut rng), "{game} from {position}");
            }
        }
    }
}

#[test]
fn random_opponent_can_lose_won_positions() {
    let game = FinitePositionGame::new(12, 11, 2001).unwrap();
    let analyzer = Analyzer::new_using_minimax(game);
    let spoiler = Spoiler::new(&analyzer, Mode::Random);

    let blunders = analyzer
        .winning_positions()
        .filter(|&position| {
            let mv = spoiler.make_move(position, &mut rand::rng()).unwrap();
            let next = position + mv;
            next != game.target() && analyzer.outcome(next) == Outcome::Winning
        })
        .count();
    assert!(blunders > 0);
}
