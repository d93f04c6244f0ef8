//! Simulator CLI: fast in-memory games for balance checks and soak runs.
//!
//! Drives the domain layer directly, without the actor runtime, so a run
//! of thousands of games finishes in well under a second.

use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use cowtaker::config::EngineConfig;
use cowtaker::domain::rules::max_active_for;
use cowtaker::domain::session::{
    create_session, join_session, resolve_turn, start_game, ResolveOutcome,
};
use cowtaker::domain::state::{ParticipantId, Session, SessionId};
use cowtaker::domain::Card;
use cowtaker::error::GameError;
use cowtaker::telemetry;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Fast in-memory game simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Number of players per game
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Strategy used by every player
    #[arg(long, default_value = "random")]
    strategy: Strategy,

    /// Base seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Commit a uniformly random card from hand.
    Random,
    /// Always commit the lowest card in hand.
    Lowest,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    games: u32,
    players: usize,
    seed: u64,
    elapsed_ms: f64,
    seats: Vec<SeatSummary>,
}

#[derive(Debug, Serialize)]
struct SeatSummary {
    seat: usize,
    wins: u32,
    avg_score: f64,
    min_score: u32,
    max_score: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.log_format {
        LogFormat::Json => telemetry::init_tracing(),
        LogFormat::Pretty => {
            telemetry::init_tracing_pretty(if args.verbose { "debug" } else { "warn" });
        }
    }

    let config = EngineConfig::from_env()?;
    let max_players = max_active_for(config.hand_size);
    if args.players < config.min_active || args.players > max_players {
        return Err(format!(
            "player count must be between {} and {}",
            config.min_active, max_players
        )
        .into());
    }

    let base_seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = StdRng::seed_from_u64(base_seed);

    let start = Instant::now();
    let mut all_scores: Vec<Vec<u32>> = Vec::with_capacity(args.games as usize);
    for game_num in 1..=args.games {
        let session_seed = rng.random::<u64>();
        let scores = run_game(game_num, args.players, session_seed, &config, args.strategy)?;
        all_scores.push(scores);
    }
    let elapsed = start.elapsed();

    let summary = summarize(&args, base_seed, elapsed.as_secs_f64() * 1000.0, &all_scores);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// Play one full game and return final scores in seat order.
fn run_game(
    game_num: u32,
    players: usize,
    seed: u64,
    config: &EngineConfig,
    strategy: Strategy,
) -> Result<Vec<u32>, GameError> {
    let authority = ParticipantId::new("seat0");
    let mut session = create_session(
        SessionId::new(format!("SIM{game_num:04}")),
        authority.clone(),
        "seat0".to_string(),
        seed,
        OffsetDateTime::now_utc(),
    );
    for seat in 1..players {
        join_session(
            &mut session,
            ParticipantId::new(format!("seat{seat}")),
            format!("seat{seat}"),
            players,
        )?;
    }
    start_game(&mut session, &authority, config.hand_size, config.min_active)?;

    let mut rng = StdRng::seed_from_u64(seed);
    loop {
        let ids: Vec<ParticipantId> = session.active_participants().map(|p| p.id.clone()).collect();
        for id in &ids {
            let Some(card) = choose_card(&session, id, strategy, &mut rng) else {
                continue;
            };
            cowtaker::domain::commit_card(&mut session, id, card)?;
        }
        match resolve_turn(&mut session, &authority)? {
            ResolveOutcome::GameEnded => break,
            ResolveOutcome::RoundResolved => {}
            outcome @ (ResolveOutcome::NotAuthority | ResolveOutcome::NotReady) => {
                warn!(game_num, ?outcome, "Resolve skipped unexpectedly");
                break;
            }
        }
    }

    Ok(session.participants.iter().map(|p| p.score).collect())
}

fn choose_card(
    session: &Session,
    id: &ParticipantId,
    strategy: Strategy,
    rng: &mut StdRng,
) -> Option<Card> {
    let hand = &session.participant(id)?.hand;
    match strategy {
        Strategy::Random => hand.choose(rng).copied(),
        // Hands are dealt sorted, so the first card is the lowest.
        Strategy::Lowest => hand.first().copied(),
    }
}

fn summarize(args: &Args, seed: u64, elapsed_ms: f64, all_scores: &[Vec<u32>]) -> RunSummary {
    let mut seats: Vec<SeatSummary> = (0..args.players)
        .map(|seat| SeatSummary {
            seat,
            wins: 0,
            avg_score: 0.0,
            min_score: u32::MAX,
            max_score: 0,
        })
        .collect();

    let mut totals = vec![0u64; args.players];
    for scores in all_scores {
        // Low score wins; ties all count as wins.
        let best = scores.iter().min().copied().unwrap_or(0);
        for (seat, &score) in scores.iter().enumerate() {
            totals[seat] += u64::from(score);
            seats[seat].min_score = seats[seat].min_score.min(score);
            seats[seat].max_score = seats[seat].max_score.max(score);
            if score == best {
                seats[seat].wins += 1;
            }
        }
    }
    let games = all_scores.len().max(1) as f64;
    for (seat, total) in totals.iter().enumerate() {
        seats[seat].avg_score = *total as f64 / games;
    }

    RunSummary {
        games: args.games,
        players: args.players,
        seed,
        elapsed_ms,
        seats,
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== Simulation Summary ===");
    println!(
        "Games: {} with {} players (seed {})",
        summary.games, summary.players, summary.seed
    );
    println!("Total time: {:.1}ms", summary.elapsed_ms);
    println!("\n=== Results by Seat ===");
    for seat in &summary.seats {
        let win_rate = (seat.wins as f64 / summary.games.max(1) as f64) * 100.0;
        println!(
            "Seat {}: avg={:.1}, min={}, max={}, wins={} ({:.1}%)",
            seat.seat, seat.avg_score, seat.min_score, seat.max_score, seat.wins, win_rate
        );
    }
}
