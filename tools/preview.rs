/// Preview: interactive shell for playing an encounter definition.
///
/// Usage: preview --encounter <path> [--seed <n>] [--traits a,b] [--stats s,l,f,p]
///
/// Commands:
///   actions        list actions offered in the current state
///   do <action>    perform an action
///   state          show the current state
///   context        show reputation, stress and rounds
///   history        show the encounter log
///   timeout        expire the encounter timer
///   reset          restart with the same seed
///   seed <n>       restart with a new seed
///   help           list commands
///   quit           exit

use encounter_engine::core::engine::EncounterEngine;
use encounter_engine::core::resolver::ActionResult;
use encounter_engine::schema::action::SocialAction;
use encounter_engine::schema::encounter::Encounter;
use encounter_engine::schema::outcome::Payout;
use encounter_engine::schema::profile::PlayerStats;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut encounter_path = None;
    let mut seed: u64 = 42;
    let mut traits: Vec<String> = Vec::new();
    let mut stats = PlayerStats::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--encounter" if i + 1 < args.len() => {
                i += 1;
                encounter_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--traits" if i + 1 < args.len() => {
                i += 1;
                traits = args[i]
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "--stats" if i + 1 < args.len() => {
                i += 1;
                match parse_stats(&args[i]) {
                    Some(s) => stats = s,
                    None => {
                        eprintln!("Invalid --stats '{}': expected four integers s,l,f,p", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(path) = encounter_path else {
        eprintln!("Missing --encounter <path>");
        std::process::exit(1);
    };

    let encounter = match Encounter::load_from_ron(Path::new(&path)) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let mut current_seed = seed;
    let mut engine = match build_engine(&encounter, &traits, stats, current_seed) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}, {}", encounter.title, encounter.setting);
    println!("Opponent: {} (difficulty {})", encounter.opponent_type, encounter.difficulty);
    if let Some(secs) = encounter.timer_seconds {
        println!("Timer: {}s (use 'timeout' to expire it)", secs);
    }
    for condition in &encounter.win_conditions {
        println!("Win when {}", condition);
    }
    for condition in &encounter.lose_conditions {
        println!("Lose when {}", condition);
    }
    println!("Seed: {}", current_seed);
    println!("Type 'help' for commands.\n");
    print_state(&engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "actions" | "a" => {
                let actions = engine.available_actions();
                if actions.is_empty() {
                    println!("No actions available.");
                } else {
                    let names: Vec<&str> = actions.iter().map(|a| a.name()).collect();
                    println!("Available: {}", names.join(", "));
                }
            }
            "do" => {
                if parts.len() < 2 {
                    println!("Usage: do <action>");
                    continue;
                }
                let action: SocialAction = match parts[1].parse() {
                    Ok(a) => a,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let result = engine.perform_action(action);
                print_result(&result);
                print_state(&engine);
            }
            "state" | "s" => print_state(&engine),
            "context" | "c" => {
                let ctx = engine.context();
                println!(
                    "reputation {}/100  stress {}/{}  rounds {}",
                    ctx.reputation, ctx.stress, ctx.max_stress, ctx.rounds_passed
                );
            }
            "history" => {
                for (n, entry) in engine.history().iter().enumerate() {
                    match entry.action {
                        Some(action) => println!("  {:>2}. {} -> {}", n, action, entry.state),
                        None => println!("  {:>2}. start at {}", n, entry.state),
                    }
                }
            }
            "timeout" => {
                let result = engine.expire_timer();
                print_result(&result);
                print_state(&engine);
            }
            "reset" | "seed" => {
                if cmd == "seed" {
                    match parts.get(1).map(|s| s.parse::<u64>()) {
                        Some(Ok(s)) => current_seed = s,
                        Some(Err(_)) => {
                            println!("Invalid seed: {}", parts[1]);
                            continue;
                        }
                        None => {
                            println!("Current seed: {}", current_seed);
                            continue;
                        }
                    }
                }
                match build_engine(&encounter, &traits, stats, current_seed) {
                    Ok(e) => {
                        engine = e;
                        println!("Restarted with seed {}", current_seed);
                        print_state(&engine);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            _ => {
                println!("Unknown command '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn build_engine(
    encounter: &Encounter,
    traits: &[String],
    stats: PlayerStats,
    seed: u64,
) -> Result<EncounterEngine, encounter_engine::ContentIntegrityError> {
    let mut engine = EncounterEngine::builder(encounter.clone())
        .traits(traits.iter().cloned())
        .stats(stats)
        .seed(seed)
        .build()?;
    engine.start();
    Ok(engine)
}

fn parse_stats(s: &str) -> Option<PlayerStats> {
    let values: Vec<i32> = s
        .split(',')
        .map(|v| v.trim().parse().ok())
        .collect::<Option<Vec<_>>>()?;
    match values.as_slice() {
        [social, logic, focus, perception] => {
            Some(PlayerStats::new(*social, *logic, *focus, *perception))
        }
        _ => None,
    }
}

fn print_result(result: &ActionResult) {
    if !result.success {
        println!("  ✗ {}", result.message.as_deref().unwrap_or("rejected"));
        return;
    }
    if let Some(roll) = result.check {
        println!(
            "  🎲 {} + {} = {} vs {}: {}",
            roll.roll,
            roll.bonus,
            roll.total(),
            roll.target,
            if roll.success { "success" } else { "failure" }
        );
    }
    if result.transition.is_none() {
        println!("  (nothing happens)");
    }
    if let Some(ref reaction) = result.npc_reaction {
        println!("  The opponent {}.", reaction.text);
    }
}

fn print_state(engine: &EncounterEngine) {
    let state = engine.current_state();
    let ctx = engine.context();
    println!("\n--- {} [{}] ---", state.name, state.mood.tag());
    println!("\"{}\"", state.dialogue);
    println!(
        "reputation {}/100  stress {}/{}  round {}",
        ctx.reputation, ctx.stress, ctx.max_stress, ctx.rounds_passed
    );
    if let Some(payout) = engine.rewards() {
        println!("\n=== {:?} ===", payout.outcome());
        if let Some(text) = engine.outcome_dialogue() {
            println!("{}", text);
        }
        match payout {
            Payout::Victory(r) => println!(
                "Rewards: tips {:?}, experience {:?}, reputation {:?}, items {:?}",
                r.tips, r.experience, r.reputation, r.items
            ),
            Payout::Defeat(c) => println!(
                "Consequences: tips {:?}, reputation {:?}",
                c.tips, c.reputation
            ),
        }
    }
    println!();
}

fn print_usage() {
    println!("Usage: preview --encounter <path> [--seed <n>] [--traits a,b] [--stats s,l,f,p]");
}

fn print_help() {
    println!("Commands:");
    println!("  actions        list actions offered in the current state");
    println!("  do <action>    perform an action (e.g. 'do show_proof')");
    println!("  state          show the current state");
    println!("  context        show reputation, stress and rounds");
    println!("  history        show the encounter log");
    println!("  timeout        expire the encounter timer");
    println!("  reset          restart with the same seed");
    println!("  seed <n>       restart with a new seed");
    println!("  help           show this help");
    println!("  quit           exit");
}
