//! The learner against built-in and custom opponents

use rps_qlearning::{
    opponents::{CounterLastOpponent, FrequencyOpponent, MarkovOpponent, OpponentKind},
    pipeline::{TrainingConfig, TrainingPipeline},
    ports::{FnOpponent, Opponent},
    q_learning::{LearnerConfig, TabularQLearner},
    rps::Move,
};

fn fast_learner(seed: u64) -> TabularQLearner {
    TabularQLearner::new(
        LearnerConfig::default()
            .with_epsilon_decay(1e-3)
            .with_seed(seed),
    )
    .unwrap()
}

#[test]
fn every_kind_builds_a_named_opponent() {
    for kind in OpponentKind::ALL {
        let mut opponent = kind.build();
        assert!(!opponent.name().is_empty());
        assert!(opponent.respond(None).is_some(), "{kind} answered the opening");
        assert!(opponent.respond(Some(Move::Rock)).is_some());
    }
}

#[test]
fn counter_last_punishes_repetition() {
    let mut opponent = CounterLastOpponent;
    for mv in Move::ALL {
        let reply = opponent.respond(Some(mv)).unwrap();
        assert!(reply.beats(mv));
    }
}

#[test]
fn frequency_counters_most_common_recent_move() {
    let mut opponent = FrequencyOpponent::default();
    assert_eq!(opponent.respond(None), Some(Move::Rock));

    for mv in [Move::Scissors, Move::Scissors, Move::Paper] {
        opponent.respond(Some(mv));
    }
    assert_eq!(opponent.respond(Some(Move::Rock)), Some(Move::Rock));
}

#[test]
fn markov_predicts_a_deterministic_cycle() {
    let mut opponent = MarkovOpponent::default();
    let agent = [Move::Rock, Move::Paper, Move::Scissors];
    for mv in agent.iter().cycle().take(9) {
        opponent.respond(Some(*mv));
    }
    // After Scissors the agent always played Rock, so the answer is Paper.
    assert_eq!(opponent.respond(Some(Move::Scissors)), Some(Move::Paper));
}

#[test]
fn learner_beats_cycle_and_constant_opponents() {
    for (kind, threshold) in [
        (OpponentKind::Constant(Move::Scissors), 0.8),
        (OpponentKind::Cycle, 0.4),
    ] {
        let mut learner = fast_learner(31);
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            rounds: 8000,
            seed: Some(31),
        });
        let mut opponent = kind.build();
        pipeline.run(&mut learner, opponent.as_mut()).unwrap();
        let result = pipeline
            .evaluate(&mut learner, opponent.as_mut(), 1000)
            .unwrap();

        assert!(
            result.win_rate > threshold,
            "win rate {:.3} against {kind}",
            result.win_rate
        );
    }
}

#[test]
fn closure_opponent_can_restart_episodes() {
    let mut round = 0usize;
    let mut opponent = FnOpponent::new("flaky", move |_prev: Option<Move>| {
        round += 1;
        if round.is_multiple_of(5) {
            None
        } else {
            Some(Move::Paper)
        }
    });
    let mut learner = fast_learner(2);

    let moves = learner.train(&mut opponent, 20).unwrap();

    assert_eq!(moves.len(), 20);
    assert_eq!(learner.step(), 20);
    assert_eq!(opponent.name(), "flaky");
}
