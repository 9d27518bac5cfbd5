//! raffle-runner: headless driver for the Raffler core.
//!
//! Usage:
//!   raffle-runner --data-dir ./data lottery 60 6
//!   raffle-runner --db raffler.db --seed 7 roulette 1
//!   raffle-runner create-raffle "Lunch" Pizza Sushi Tacos

use anyhow::{bail, Context, Result};
use raffler_core::{
    config::RafflerConfig,
    custom_raffle::CustomRaffle,
    draw,
    presentation::{Observable, ScreenPhase},
    rng,
    types::RaffleMode,
    Raffler,
};
use serde::Serialize;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let data_dir = flag(&args, "--data-dir").unwrap_or("./data").to_string();
    let mut config = RafflerConfig::load(&data_dir)?;
    if let Some(db) = flag(&args, "--db") {
        config.db_path = db.to_string();
    }
    if let Some(seed) = flag(&args, "--seed") {
        config.seed = Some(seed.parse().context("--seed must be an integer")?);
    }

    let positional = positional(&args);
    let Some((command, rest)) = positional.split_first() else {
        bail!("missing command; try `lottery <available> <to_raffle>`");
    };

    let raffler = Raffler::open(config)?;
    log::info!("raffle-runner: {command} {rest:?}");

    match (command.as_str(), rest) {
        ("lottery", [available, to_raffle]) => {
            let vm = raffler.lottery();
            vm.load().await;
            let phase = vm.get_lottery_numbers(available, to_raffle).await;
            print_outcome(phase, &vm.lottery_numbers, &[&vm.quantity_available_error, &vm.quantity_to_raffle_error, &vm.error])
        }
        ("decisions", []) => {
            let vm = raffler.quick_decision();
            let phase = vm.load().await;
            print_outcome(phase, &vm.quick_decisions, &[&vm.error])
        }
        ("decide", [id]) => {
            let vm = raffler.quick_decision();
            vm.load().await;
            let phase = vm.decide(id).await;
            print_outcome(phase, &vm.result, &[&vm.error])
        }
        ("create-raffle", [description, items @ ..]) => {
            let items: Vec<&str> = items.iter().map(String::as_str).collect();
            let id = raffler
                .custom_raffles
                .save_custom_raffle(&CustomRaffle::new(description.as_str(), &items))?;
            print_json(&serde_json::json!({ "id": id }))
        }
        ("raffles", []) => print_json(&raffler.custom_raffles.all_custom_raffles()?),
        ("coin", []) => {
            let side = draw::flip_coin(&mut *rng::lock(&raffler.rng)?);
            print_json(&side)
        }
        ("roulette", [id]) => {
            let vm = raffler.custom_raffle();
            let phase = vm.spin_roulette(parse_id(id)?).await;
            print_outcome(phase, &vm.roulette_result, &[&vm.error])
        }
        ("winners", [id, quantity]) => {
            let vm = raffler.custom_raffle();
            let phase = vm.draw_winners(parse_id(id)?, quantity).await;
            print_outcome(phase, &vm.winners, &[&vm.quantity_error, &vm.error])
        }
        ("groups", [id, groups]) => {
            let vm = raffler.custom_raffle();
            let phase = vm.split_into_groups(parse_id(id)?, groups).await;
            print_outcome(phase, &vm.groups, &[&vm.quantity_error, &vm.error])
        }
        ("reset", [id]) => {
            let vm = raffler.custom_raffle();
            let phase = vm.reset_items(parse_id(id)?).await;
            print_outcome(phase, &vm.custom_raffle, &[&vm.error])
        }
        ("prefs", []) => {
            let vm = raffler.preferences_screen();
            let phase = vm.load().await;
            print_outcome(phase, &vm.preferences, &[&vm.error])
        }
        ("remember", [value]) => {
            let vm = raffler.preferences_screen();
            let phase = vm.remember_raffled_items(parse_bool(value)?).await;
            print_outcome(phase, &vm.preferences, &[&vm.error])
        }
        ("mode", [value]) => {
            let vm = raffler.preferences_screen();
            let phase = vm.set_preferred_raffle_mode(RaffleMode::parse(value)).await;
            print_outcome(phase, &vm.preferences, &[&vm.error])
        }
        ("reset-hints", []) => {
            let vm = raffler.preferences_screen();
            let phase = vm.reset_hints().await;
            print_outcome(phase, &vm.preferences, &[&vm.error])
        }
        (other, _) => bail!("unknown command or wrong arguments: {other}"),
    }
}

#[derive(Serialize)]
struct Outcome<'a, T> {
    phase: ScreenPhase,
    value: Option<T>,
    errors: Vec<&'a str>,
}

fn print_outcome<T: Clone + Serialize>(
    phase: ScreenPhase,
    value: &Observable<T>,
    errors: &[&Observable<String>],
) -> Result<()> {
    let messages: Vec<String> = errors
        .iter()
        .filter_map(|o| o.current())
        .filter(|m| !m.is_empty())
        .collect();
    let outcome = Outcome {
        phase,
        value: value.current(),
        errors: messages.iter().map(String::as_str).collect(),
    };
    print_json(&outcome)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Value following `name`, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if arg.starts_with("--") {
            skip_next = true;
        } else {
            out.push(arg.clone());
        }
    }
    out
}

fn parse_id(value: &str) -> Result<i64> {
    value.parse().with_context(|| format!("raffle id must be an integer, got {value}"))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => bail!("expected true/false, got {value}"),
    }
}
