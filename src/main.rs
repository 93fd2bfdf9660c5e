//! Maze Runner entry point
//!
//! Sets up logging and the terminal, then runs the fixed-rate game loop.

use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

use maze_runner::assets::SpriteSet;
use maze_runner::input::KeyTracker;
use maze_runner::renderer::{Palette, TerminalRenderer};
use maze_runner::sim::{GameEvent, GameState, tick};
use maze_runner::{LevelTable, Settings};

/// Log output goes to the settings' log file when set, else stderr
fn init_logging(settings: &Settings) {
    // stderr shares the screen with the game, so keep it quiet unless asked
    let default_filter = if settings.log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = &settings.log_file {
        match std::fs::File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file {}: {e}", path.display()),
        }
    }
    builder.init();
}

/// Events the simulation doesn't log itself
fn log_event(event: &GameEvent) {
    match event {
        GameEvent::TokenCollected { score } => log::debug!("Token collected, score {score}"),
        GameEvent::PlayerHit { lives } => log::info!("Player hit, {lives} lives left"),
        // Level loads, clears and run endings are logged by the simulation
        _ => {}
    }
}

/// Puts the terminal back however `main` exits
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Game instance holding everything the loop touches
struct Game {
    state: GameState,
    renderer: TerminalRenderer,
    keys: KeyTracker,
    start: Instant,
}

impl Game {
    /// Run until quit; frame timing and input sampling happen here
    fn run<W: Write>(&mut self, out: &mut W, rx: &mpsc::Receiver<Event>, settings: &Settings) -> std::io::Result<()> {
        let frame = settings.frame_duration();

        loop {
            let frame_start = Instant::now();
            let now = self.start.elapsed();

            while let Ok(event) = rx.try_recv() {
                match event {
                    Event::Key(key) => self.keys.handle(&key, now),
                    Event::Resize(..) => self.renderer.invalidate(),
                    _ => {}
                }
            }
            if self.keys.quit_requested() {
                log::info!("Quit requested");
                return Ok(());
            }

            let input = self.keys.take_input(now);
            tick(&mut self.state, &input, now);
            for event in self.state.drain_events() {
                log_event(&event);
            }

            self.renderer.render(out, &self.state)?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
    }
}

fn main() -> std::io::Result<()> {
    let settings = Settings::load();
    init_logging(&settings);
    log::info!("Maze Runner starting...");

    let levels = LevelTable::builtin().map_err(std::io::Error::other)?;
    let sprites = SpriteSet::load(&settings.asset_dir);
    let palette = Palette::from_sprites(&sprites);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    let mut guard = TerminalGuard {
        keyboard_enhanced: false,
    };
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key releases are only reported by terminals that support the
    // enhancement protocol; others fall back to the hold window
    guard.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("Key release events: {}", guard.keyboard_enhanced);

    // Blocking reads live on their own thread so the loop never waits on input
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let start = Instant::now();
    let mut game = Game {
        state: GameState::new(levels, settings.effective_seed(), start.elapsed()),
        renderer: TerminalRenderer::new(palette, settings.show_controls_hint),
        keys: KeyTracker::new(guard.keyboard_enhanced),
        start,
    };
    log::info!("Game initialized with seed: {}", game.state.seed);
    let result = game.run(&mut out, &rx, &settings);

    let _ = out.flush();
    drop(guard);
    log::info!(
        "Exiting at level {} with score {}",
        game.state.level_index + 1,
        game.state.score()
    );
    result
}
