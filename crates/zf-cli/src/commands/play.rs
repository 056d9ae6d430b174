use std::io::{self, BufRead, Write};

use colored::Colorize;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use zf_engine::{NarrativeSession, SessionConfig, Transition};
use zf_scenario::{Catalog, Mode, OptionTag, Scenario};

pub fn run(seed: u64, scenario_id: Option<u32>) -> Result<(), String> {
    let catalog = Catalog::builtin().map_err(|e| format!("failed to load catalog: {e}"))?;

    let scenario: Scenario = match scenario_id {
        Some(id) => catalog
            .get(id)
            .map_err(|e| e.to_string())?
            .clone(),
        None => {
            let mut rng = StdRng::seed_from_u64(seed);
            catalog
                .scenarios()
                .choose(&mut rng)
                .ok_or_else(|| "catalog is empty".to_string())?
                .clone()
        }
    };

    let config = SessionConfig::default().with_seed(seed);
    let mut session = NarrativeSession::new(scenario, config)
        .map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} {}", "Playing".bold(), session.scenario().title.bold());
    println!("  Seed: {seed}");
    if !session.scenario().intro.is_empty() {
        println!("\n{}", session.scenario().intro);
    }
    println!("\n  Type a, b or c to choose, 'quit' to exit.\n");

    print_step(&session);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        let Some(tag) = OptionTag::parse(input) else {
            println!("{}\n", "Pick one of a, b or c.".yellow());
            continue;
        };

        match session.choose(tag) {
            Ok(outcome) => {
                if !outcome.narration.is_empty() {
                    println!("\n{}", outcome.narration);
                }
                let scale = session.progression();
                println!(
                    "  [{} — level {}]\n",
                    scale.tier_label().cyan(),
                    scale.level()
                );

                match outcome.transition {
                    Transition::Advanced { .. } => print_step(&session),
                    Transition::Won => {
                        println!("{}\n", victory_banner(scale.mode()).green().bold());
                        break;
                    }
                    Transition::Lost => {
                        println!("{}\n", defeat_banner(scale.mode()).red().bold());
                        break;
                    }
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}

fn print_step(session: &NarrativeSession) {
    let Some(step) = session.current_step() else {
        return;
    };
    println!("{}", step.title.bold());
    for (tag, option) in step.options() {
        println!("  {}) {}", tag, option.description);
    }
    println!();
}

fn victory_banner(mode: Mode) -> &'static str {
    match mode {
        Mode::Cultivation => "You ascend beyond the mortal coil. Immortality is yours.",
        Mode::Business => "The empire stands. The market bows to your name.",
        Mode::Survival => "Against wind and wave, you made it home alive.",
    }
}

fn defeat_banner(mode: Mode) -> &'static str {
    match mode {
        Mode::Cultivation => "Your cultivation is broken. The path ends here.",
        Mode::Business => "The venture collapses into debt and dust.",
        Mode::Survival => "The wilderness claims you. The story ends here.",
    }
}
