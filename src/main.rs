//! Headless session driver
//!
//! Runs one full session with a scripted pilot at the fixed tick rate,
//! records the result, and prints the end report plus the updated board.
//!
//! Usage: astro-drift [original|time-attack|one-in-chamber] [seed]

use std::env;
use std::process::ExitCode;

use astro_drift::consts::*;
use astro_drift::sim::{self, EndReport, GameMode, GameState, TickInput};
use astro_drift::{LeaderboardStore, normalize_angle};

/// Hard cap so a pathological run always terminates (20 minutes of play)
const MAX_TICKS: u64 = (20.0 * 60.0 / TICK_DT) as u64;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = match args.get(1) {
        None => GameMode::Original,
        Some(arg) => match arg.parse() {
            Ok(mode) => mode,
            Err(e) => {
                eprintln!("{e}");
                eprintln!("usage: astro-drift [original|time-attack|one-in-chamber] [seed]");
                return ExitCode::FAILURE;
            }
        },
    };
    let seed = match args.get(2) {
        None => 0xa57e_201d,
        Some(arg) => match arg.parse() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("seed must be an unsigned integer, got '{arg}'");
                return ExitCode::FAILURE;
            }
        },
    };

    log::info!("starting {} session, seed {seed}", mode.label());
    let mut state = GameState::new(mode, seed);

    let mut ticks = 0u64;
    while !state.is_ended() && ticks < MAX_TICKS {
        let input = pilot(&state);
        sim::tick(&mut state, &input, TICK_DT);
        ticks += 1;
    }

    let Some(report) = EndReport::from_state(&state) else {
        eprintln!("session did not finish within {MAX_TICKS} ticks");
        return ExitCode::FAILURE;
    };

    let store = LeaderboardStore::default();
    let (rank, leaderboard) = store.record_session(&report);
    let board = astro_drift::persistence::board_for(&report);

    println!("mode:    {}", report.mode.label());
    println!("outcome: {:?}", report.outcome);
    println!("score:   {}", report.score);
    println!("time:    {}", sim::format_clock(report.time));
    if let Some(ammo) = report.ammo {
        println!("ammo:    {ammo}");
    }
    match rank {
        Some(rank) => println!("ranked #{rank} on the {} board", board.title()),
        None => println!("no rank on the {} board", board.title()),
    }

    println!("\n{} top {}:", board.title(), leaderboard.board(board).len());
    for (index, entry) in leaderboard.board(board).iter().enumerate() {
        let ammo = entry
            .ammo
            .map(|a| format!("  ammo {a}"))
            .unwrap_or_default();
        println!(
            "  {}. {:>6}  {}  {}{}",
            index + 1,
            entry.score,
            sim::format_clock(entry.time),
            entry.date,
            ammo
        );
    }

    ExitCode::SUCCESS
}

/// Scripted pilot: turn toward the nearest asteroid and fire once roughly
/// aligned. Deliberately simple; it loses eventually, which is enough to
/// exercise a full session end to end.
fn pilot(state: &GameState) -> TickInput {
    let ship = &state.ship.body;

    let Some(target) = state
        .asteroids
        .iter()
        .filter(|a| a.alive)
        .min_by(|a, b| {
            let da = a.body.pos.distance_squared(ship.pos);
            let db = b.body.pos.distance_squared(ship.pos);
            da.total_cmp(&db)
        })
    else {
        return TickInput::default();
    };

    let to_target = target.body.pos - ship.pos;
    let desired = to_target.y.atan2(to_target.x);
    let error = normalize_angle(desired - ship.rotation);

    // Fire within ~6 degrees of the target bearing
    let aligned = error.abs() < 0.1;
    TickInput {
        turn_left: error < -0.02,
        turn_right: error > 0.02,
        thrust: false,
        fire: aligned,
    }
}
