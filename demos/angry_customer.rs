/// Angry Customer example: plays the bundled café encounter with a scripted player.
///
/// The player tries empathy first, falls back to proof, then negotiates toward a settlement.
///
/// Run with: cargo run --example angry_customer

use encounter_engine::core::engine::EncounterEngine;
use encounter_engine::schema::action::SocialAction;
use encounter_engine::schema::encounter::Encounter;
use encounter_engine::schema::outcome::Payout;
use encounter_engine::schema::profile::PlayerStats;

fn main() {
    let encounter = Encounter::load_from_ron(std::path::Path::new(
        "content/encounters/angry_customer.ron",
    ))
    .expect("Failed to load angry customer encounter");

    println!("=== {} ===", encounter.title);
    println!("{}\n", encounter.setting);

    let mut engine = EncounterEngine::builder(encounter)
        .traits(["warm_smile"])
        .stats(PlayerStats::new(4, 3, 2, 5))
        .seed(2026)
        .build()
        .expect("Failed to build engine");

    engine.start();

    // Preferred moves in order; the first one the current state offers is played.
    let script = [
        SocialAction::Empathize,
        SocialAction::ShowProof,
        SocialAction::Negotiate,
        SocialAction::Apologize,
        SocialAction::Wait,
    ];

    while !engine.is_complete() && engine.context().rounds_passed < 20 {
        let state = engine.current_state();
        println!("[{}] {}: \"{}\"", state.mood.tag(), state.name, state.dialogue);

        let available = engine.available_actions();
        let Some(action) = script.iter().copied().find(|a| available.contains(a)) else {
            println!("  (no scripted action available)");
            break;
        };

        let result = engine.perform_action(action);
        print!("  > {}", action);
        if let Some(roll) = result.check {
            print!(
                "  (rolled {} + {} vs {}: {})",
                roll.roll,
                roll.bonus,
                roll.target,
                if roll.success { "pass" } else { "fail" }
            );
        }
        println!();
        if let Some(reaction) = result.npc_reaction {
            println!("  The customer {}.", reaction.text);
        }
        let ctx = engine.context();
        println!("  reputation {} / stress {}\n", ctx.reputation, ctx.stress);
    }

    match engine.rewards() {
        Some(Payout::Victory(rewards)) => {
            println!("VICTORY: {}", engine.outcome_dialogue().unwrap_or(""));
            println!("  tips {:?}, experience {:?}, items {:?}", rewards.tips, rewards.experience, rewards.items);
        }
        Some(Payout::Defeat(consequences)) => {
            println!("DEFEAT: {}", engine.outcome_dialogue().unwrap_or(""));
            println!("  tips {:?}, reputation {:?}", consequences.tips, consequences.reputation);
        }
        None => println!("The encounter is still going after {} rounds.", engine.context().rounds_passed),
    }
}
