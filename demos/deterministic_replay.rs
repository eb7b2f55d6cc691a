/// Deterministic Replay example: two engines with the same seed and clock
/// produce identical histories, even through skill checks and NPC reactions.
///
/// Run with: cargo run --example deterministic_replay

use chrono::{DateTime, Utc};
use encounter_engine::core::clock::FixedClock;
use encounter_engine::core::engine::EncounterEngine;
use encounter_engine::schema::action::SocialAction;
use encounter_engine::schema::encounter::Encounter;
use encounter_engine::schema::profile::PlayerStats;

const MOVES: [SocialAction; 6] = [
    SocialAction::Humor,
    SocialAction::ShowProof,
    SocialAction::Empathize,
    SocialAction::Negotiate,
    SocialAction::FirmBoundary,
    SocialAction::Wait,
];

fn play(encounter: &Encounter, seed: u64) -> EncounterEngine {
    let clock = FixedClock(
        DateTime::<Utc>::from_timestamp(1_767_225_600, 0).expect("valid timestamp"),
    );
    let mut engine = EncounterEngine::builder(encounter.clone())
        .stats(PlayerStats::new(3, 4, 4, 2))
        .seed(seed)
        .clock(clock)
        .build()
        .expect("Failed to build engine");
    engine.start();

    let mut turn = 0;
    while !engine.is_complete() && turn < 12 {
        let available = engine.available_actions();
        let action = MOVES[turn % MOVES.len()];
        let action = if available.contains(&action) {
            action
        } else {
            available[0]
        };
        engine.perform_action(action);
        turn += 1;
    }
    engine
}

fn main() {
    let encounter = Encounter::load_from_ron(std::path::Path::new(
        "content/encounters/noisy_neighbor.ron",
    ))
    .expect("Failed to load noisy neighbor encounter");

    for seed in [7, 7, 8] {
        let engine = play(&encounter, seed);
        let path: Vec<String> = engine
            .history()
            .iter()
            .map(|h| h.state.to_string())
            .collect();
        println!(
            "seed {:>2}: {:?} after {} rounds, reputation {}, stress {}",
            seed,
            engine.outcome(),
            engine.context().rounds_passed,
            engine.context().reputation,
            engine.context().stress
        );
        println!("         {}", path.join(" -> "));
    }

    let a = play(&encounter, 7);
    let b = play(&encounter, 7);
    assert_eq!(a.context(), b.context());
    println!("\nSame seed, same encounter: replay matches.");
}
