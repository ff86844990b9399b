//! Frame-loop properties over random seeds and input streams

use highway_survival::consts::*;
use highway_survival::sim::{
    Difficulty, GameEvent, GamePhase, GameState, Hitboxes, TIER_COUNT, TickInput, spawn_interval,
    tick,
};
use highway_survival::{GameConfig, Preset};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    prop_oneof![Just(Preset::Highway.config()), Just(Preset::Classic.config())]
}

/// Mostly steering, with the odd pause, pick or restart
fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), 0u8..40, 0u8..16).prop_map(|(left, right, pause, key)| {
        TickInput {
            left,
            right,
            pause: pause == 0,
            confirm: key == 4,
            select: match key {
                1 => Some(Difficulty::Easy),
                2 => Some(Difficulty::Medium),
                3 => Some(Difficulty::Hard),
                _ => None,
            },
        }
    })
}

fn inputs() -> impl Strategy<Value = Vec<TickInput>> {
    prop::collection::vec(input_strategy(), 0..1500)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_stays_between_boundaries(
        config in config_strategy(),
        seed in any::<u64>(),
        inputs in inputs(),
    ) {
        let mut state = GameState::new(&config, Hitboxes::default(), seed);
        for input in &inputs {
            tick(&mut state, input, &config);
            let x = state.player.pos.x;
            prop_assert!(x >= LEFT_BOUNDARY, "x = {}", x);
            prop_assert!(x <= state.player.max_x(), "x = {}", x);
            prop_assert!(x + state.player.size.x <= RIGHT_BOUNDARY);
        }
    }

    #[test]
    fn score_follows_frame_cadence(
        config in config_strategy(),
        seed in any::<u64>(),
        inputs in inputs(),
    ) {
        let mut state = GameState::new(&config, Hitboxes::default(), seed);
        for input in &inputs {
            tick(&mut state, input, &config);
            if matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
                prop_assert_eq!(
                    state.score as u64,
                    state.frame_counter / SCORE_INTERVAL_FRAMES
                );
            }
        }
    }

    #[test]
    fn live_obstacles_stay_on_field(
        config in config_strategy(),
        seed in any::<u64>(),
        inputs in inputs(),
    ) {
        let mut state = GameState::new(&config, Hitboxes::default(), seed);
        for input in &inputs {
            tick(&mut state, input, &config);
            for obstacle in &state.obstacles {
                prop_assert!(obstacle.pos.y <= SCREEN_HEIGHT);
                prop_assert!(config.roster().contains(&obstacle.kind));
                let lane = (obstacle.pos.x - FIRST_LANE_X) / LANE_SPACING;
                prop_assert!(lane.fract() == 0.0 && lane >= 0.0 && lane < LANE_COUNT as f32);
            }
        }
    }

    #[test]
    fn crash_ends_round_once(
        config in config_strategy(),
        seed in any::<u64>(),
        inputs in inputs(),
    ) {
        let mut state = GameState::new(&config, Hitboxes::default(), seed);
        for input in &inputs {
            let was_playing = state.phase == GamePhase::Playing;
            let events = tick(&mut state, input, &config);
            let crashes = events
                .iter()
                .filter(|e| matches!(e, GameEvent::Crashed { .. }))
                .count();
            prop_assert!(crashes <= 1);
            if crashes == 1 {
                prop_assert!(was_playing);
                prop_assert_eq!(state.phase, GamePhase::GameOver);
                prop_assert_eq!(state.lives, 0);
                prop_assert!(state.high_score() >= state.score);
            }
            prop_assert!(state.lives <= STARTING_LIVES);
        }
    }

    #[test]
    fn high_scores_never_drop(
        config in config_strategy(),
        seed in any::<u64>(),
        inputs in inputs(),
    ) {
        let mut state = GameState::new(&config, Hitboxes::default(), seed);
        let mut best = [0u32; TIER_COUNT];
        for input in &inputs {
            tick(&mut state, input, &config);
            for difficulty in Difficulty::ALL {
                let now = state.high_scores.best(difficulty);
                prop_assert!(now >= best[difficulty.index()]);
                best[difficulty.index()] = now;
            }
        }
    }

    #[test]
    fn same_seed_same_game(
        config in config_strategy(),
        seed in any::<u64>(),
        inputs in inputs(),
    ) {
        let mut a = GameState::new(&config, Hitboxes::default(), seed);
        let mut b = GameState::new(&config, Hitboxes::default(), seed);
        for input in &inputs {
            prop_assert_eq!(tick(&mut a, input, &config), tick(&mut b, input, &config));
        }
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.obstacles.len(), b.obstacles.len());
        prop_assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn spawn_interval_shrinks_to_floor(score in 0u32..100_000) {
        let interval = spawn_interval(score);
        prop_assert!(interval >= SPAWN_INTERVAL_MIN);
        prop_assert!(interval <= SPAWN_INTERVAL_BASE);
        prop_assert!(spawn_interval(score + 1) <= interval);
    }
}
