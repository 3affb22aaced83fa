//! Spirolaterals entry point
//!
//! Headless runner: plays one run of the current level with the given step
//! values on a virtual clock, reports the verdict and saves the session.
//!
//! Usage: `spirolaterals [STEPS] [--settings PATH]`, e.g. `spirolaterals 11132`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use spirolaterals::consts::SLOT_COUNT;
    use spirolaterals::outcome::Outcome;
    use spirolaterals::platform::{InputCommand, LogScore, ManualScheduler, RecordingRenderer};
    use spirolaterals::{GameController, SessionState, Settings};

    /// Screen size assumed when the layout preference is `Auto`
    const HEADLESS_SCREEN: (u32, u32) = (1200, 900);

    env_logger::init();
    log::info!("Spirolaterals (headless) starting...");

    let mut guess = None;
    let mut settings_path = PathBuf::from("spirolaterals-settings.json");
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => match args.next() {
                Some(path) => settings_path = PathBuf::from(path),
                None => log::warn!("--settings needs a path"),
            },
            other => match parse_steps(other) {
                Some(values) => guess = Some(values),
                None => log::warn!("Ignoring argument {other:?}: expected {SLOT_COUNT} digits 1-5"),
            },
        }
    }

    let settings = Settings::load(&settings_path).unwrap_or_else(|e| {
        log::warn!("{e}; using default settings");
        Settings::default()
    });
    let session = SessionState::load(&settings.session_file).unwrap_or_else(|e| {
        log::warn!("{e}; starting a fresh session");
        SessionState::default()
    });

    let (width, height) = HEADLESS_SCREEN;
    let mut game = GameController::new(
        session,
        settings.layout(width, height),
        settings.pattern_store(),
        ManualScheduler::new(),
        RecordingRenderer::new(),
        LogScore,
    )
    .with_delay_step(settings.speed_step)
    .with_pen_width(settings.pen_width);

    if let Some(values) = guess {
        game.set_steps(values);
    }

    game.handle(InputCommand::Run);
    while let Some(handle) = game.scheduler_mut().pop_next() {
        game.fire(handle);
    }

    let goal = game.goal().values();
    match game.last_verdict() {
        Some(verdict) if verdict.outcome == Outcome::Success => println!(
            "Level {}: solved with {:?} (score {})",
            game.pattern(),
            game.steps().values(),
            game.score().value
        ),
        Some(_) => println!(
            "Level {}: {:?} does not match the goal {:?}",
            game.pattern(),
            game.steps().values(),
            goal
        ),
        None => println!("Level {}: run did not finish", game.pattern()),
    }
    println!(
        "{} ticks over {} ms of game time",
        game.simulation().ticks,
        game.scheduler().now().as_millis()
    );

    if let Err(e) = game.session().save(&settings.session_file) {
        log::error!("{e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_steps(arg: &str) -> Option<[u8; spirolaterals::consts::SLOT_COUNT]> {
    let mut values = [0u8; spirolaterals::consts::SLOT_COUNT];
    if arg.chars().count() != values.len() {
        return None;
    }
    for (slot, c) in values.iter_mut().zip(arg.chars()) {
        *slot = match c.to_digit(10)? {
            d @ 1..=5 => d as u8,
            _ => return None,
        };
    }
    Some(values)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The game is driven by the host page on wasm; nothing to run here
}
