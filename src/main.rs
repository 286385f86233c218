//! Shape Focus headless runner
//!
//! Plays one seeded session with a simple bot at a fixed 60 Hz clock, records
//! the result and prints it as JSON.
//!
//! Usage: `shape-focus [SEED] [PROGRESS_FILE] [SETTINGS_FILE]`

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use shape_focus::persistence::{JsonFileStore, MemoryStore, StoredProgress};
use shape_focus::progress::ResultRecorder;
use shape_focus::sim::{Session, SessionEvent, SessionObserver};
use shape_focus::{SessionResult, Settings};

/// Fixed host frame time
const FRAME_DT: f64 = 1.0 / 60.0;
/// Seconds the bot needs before it reacts to a shape
const BOT_REACTION_SECS: f64 = 0.45;
/// Chance per reaction that the bot taps a decoy instead
const BOT_SLIP_CHANCE: f64 = 0.08;

/// Logs the events a renderer would animate
struct EventLogger;

impl SessionObserver for EventLogger {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Spawn { wave } => log::debug!("spawn {} shapes", wave.len()),
            SessionEvent::Hit {
                kind,
                correct,
                new_score,
                new_lives,
                new_calm_tier,
                ..
            } => log::info!(
                "{} {kind}: score {new_score}, lives {new_lives}, {}",
                if *correct { "hit" } else { "WRONG" },
                new_calm_tier.label()
            ),
            SessionEvent::Expire { shape_id } => log::trace!("expired #{shape_id}"),
            SessionEvent::TargetChanged { target } => log::info!("tap the {target}"),
            SessionEvent::GameOver { .. } => {}
        }
    }
}

fn play(session: &mut Session, bot: &mut Pcg32) {
    let mut now = 0.0;
    while !session.is_over() {
        session.tick(now);

        let ready: Vec<_> = session
            .state()
            .shapes
            .iter()
            .filter(|s| now - s.spawned_at >= BOT_REACTION_SECS)
            .map(|s| (s.is_target, s.position))
            .collect();

        let slip = bot.random_bool(BOT_SLIP_CHANCE);
        let choice = ready
            .iter()
            .find(|(is_target, _)| *is_target != slip)
            .or_else(|| ready.iter().find(|(is_target, _)| *is_target));
        if let Some((_, position)) = choice {
            session.tap(*position);
        }

        now += FRAME_DT;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 1,
    };
    let progress_path = args.next();
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    log::info!("Shape Focus (headless) starting, seed {seed}");

    let config = settings.to_session_config(seed)?;
    let mut session = Session::new(config.clone())?;
    session.subscribe(Box::new(EventLogger));

    let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);
    play(&mut session, &mut bot);

    let result: SessionResult = session
        .result()
        .ok_or("session loop exited before game over")?;

    let is_new_best = match progress_path {
        Some(path) => {
            let mut progress = StoredProgress::open(JsonFileStore::with_path(path));
            progress.record_result(result.score, &config)
        }
        None => StoredProgress::open(MemoryStore::new()).record_result(result.score, &config),
    };

    log::info!(
        "{} ({}% accuracy){}",
        result.feedback().message(),
        result.accuracy_percent(),
        if is_new_best { ", new best!" } else { "" }
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
