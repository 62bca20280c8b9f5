//! Slope Runner headless driver
//!
//! Runs one session without rendering: a synthetic tilt sensor feeds the
//! simulation at the nominal tick rate and the result is logged.
//!
//! Usage: `slope-runner [seed] [power-up] [max-ticks] [profile-dir]`

use std::path::{Path, PathBuf};

use slope_runner::consts::*;
use slope_runner::platform::{FixedStep, TiltFeed};
use slope_runner::sim::{GameEvent, GameSession, PowerUp, SessionPhase, TickInput};
use slope_runner::{BestRecord, CreditLedger, Rank, RunnerTuning};

/// Credits granted to a fresh profile so the demo can always start
const STARTING_CREDITS: u32 = 10;

struct Args {
    seed: u64,
    powerup: PowerUp,
    max_ticks: u64,
    profile_dir: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
        let powerup = args
            .next()
            .and_then(|s| {
                let parsed = PowerUp::from_str(&s);
                if parsed.is_none() {
                    log::warn!("Unknown power-up '{}', using None", s);
                }
                parsed
            })
            .unwrap_or(PowerUp::None);
        let max_ticks = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(u64::from(TICK_RATE) * 120);
        let profile_dir = args.next().map(PathBuf::from);
        Self {
            seed,
            powerup,
            max_ticks,
            profile_dir,
        }
    }
}

/// Gentle weaving roll, like a player steering around the centre line
fn synthetic_roll(t: f32) -> f64 {
    (0.35 * (t * 0.9).sin() + 0.1 * (t * 2.3).sin()) as f64
}

/// Best run from disk; an unreadable file is reported and replaced by an empty record
fn load_best(path: &Path) -> BestRecord {
    BestRecord::load(path).unwrap_or_else(|err| {
        log::warn!("Could not load best run ({}), starting fresh", err);
        BestRecord::default()
    })
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let ledger_path = args.profile_dir.as_ref().map(|d| d.join("credits.json"));
    let best_path = args.profile_dir.as_ref().map(|d| d.join("best.json"));

    let mut ledger = match &ledger_path {
        Some(path) => CreditLedger::load(path).unwrap_or_else(|err| {
            log::warn!("Could not load credits ({}), starting fresh", err);
            CreditLedger::default()
        }),
        None => CreditLedger::default(),
    };
    if ledger.balance == 0 {
        ledger.add(STARTING_CREDITS);
    }
    let mut best = match &best_path {
        Some(path) => load_best(path),
        None => BestRecord::default(),
    };

    let mut session = match GameSession::new(RunnerTuning::default()) {
        Ok(session) => session,
        Err(err) => {
            log::error!("{}", err);
            return;
        }
    };

    if let Err(err) = ledger.purchase(args.powerup) {
        log::error!("{}", err);
        return;
    }
    session.start(args.powerup, args.seed);

    let sensor = TiltFeed::new();
    let mut clock = FixedStep::default();
    let mut elapsed = 0.0f32;
    let mut ticks = 0u64;

    // Frames arrive at the nominal rate; no sleeping, this is headless
    while session.phase() == SessionPhase::Running && ticks < args.max_ticks {
        elapsed += SIM_DT;
        sensor.publish_device_roll(synthetic_roll(elapsed));

        for _ in 0..clock.advance(SIM_DT) {
            let input = TickInput::tilt(sensor.latest());
            for event in session.tick(&input) {
                match event {
                    GameEvent::ShieldAbsorbed { remaining } => {
                        log::info!("Shield hit, {} left", remaining)
                    }
                    GameEvent::SpeedIncreased { speed } => log::info!("Speed up: {:.2}", speed),
                    _ => {}
                }
            }
            ticks += 1;
        }
    }

    if session.phase() != SessionPhase::Ended {
        session.quit();
    }

    let view = session.view();
    let score = view.score;
    let rank = Rank::for_score(score);
    log::info!(
        "Run finished after {} ticks: score {} ({}), cause: {}",
        ticks,
        score,
        rank.name(),
        view.end_cause.map_or("unknown", |c| c.as_str())
    );
    best.record(score);
    println!(
        "score={} rank={} best={} credits={}",
        score,
        rank.name(),
        best.best_score,
        ledger.balance
    );

    if let (Some(ledger_path), Some(best_path)) = (ledger_path, best_path) {
        if let Err(err) = ledger.save(&ledger_path) {
            log::error!("Saving credits failed: {}", err);
        }
        if let Err(err) = best.save(&best_path) {
            log::error!("Saving best run failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_best_record_falls_back_to_empty() {
        let path = std::env::temp_dir()
            .join(format!("slope-runner-best-corrupt-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").expect("write");

        assert_eq!(load_best(&path), BestRecord::default());
        // Loading alone leaves the file as it was
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{ not json");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_best_record_is_empty() {
        let path = std::env::temp_dir().join("slope-runner-best-missing-none.json");
        assert_eq!(load_best(&path), BestRecord::default());
    }
}
