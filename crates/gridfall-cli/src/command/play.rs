use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use gridfall_engine::{Game, GameConfig, PeriodicTrigger, RandomShapeSource};
use rand::Rng as _;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tui_runtime::{App, Runtime};

use crate::{command::CommandArgs, store::FileScoreStore, ui::widgets::GameDisplay};

const TICK_RATE: f64 = 120.0;
const RENDER_RATE: f64 = 60.0;

/// How long fast drop stays armed after a ↓ press. Autorepeat keeps extending
/// the window while the key is held; a release event ends it early on
/// terminals that report releases.
const FAST_DROP_GRACE: Duration = Duration::from_millis(150);

pub(crate) fn run(args: &CommandArgs) -> anyhow::Result<()> {
    // Key-release reporting needs the enhanced keyboard protocol, and probing
    // for it needs raw mode.
    terminal::enable_raw_mode()?;
    let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
    terminal::disable_raw_mode()?;

    let mut app = PlayApp::new(args.seed, &args.score_file);

    if release_events {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let result = Runtime::with_rates(TICK_RATE, RENDER_RATE).run(&mut app);
    if release_events {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    result?;

    Ok(())
}

#[derive(Debug)]
struct PlayApp {
    game: Game,
    difficulty: PeriodicTrigger,
    fast_drop_until: Option<Instant>,
    pinned_seed: Option<u64>,
    score_file: PathBuf,
    exiting: bool,
}

impl PlayApp {
    fn new(pinned_seed: Option<u64>, score_file: &Path) -> Self {
        let now = Instant::now();
        let game = new_game(pinned_seed, score_file, now);
        let difficulty = PeriodicTrigger::new(game.config().difficulty_interval, now);
        Self {
            game,
            difficulty,
            fast_drop_until: None,
            pinned_seed,
            score_file: score_file.to_path_buf(),
            exiting: false,
        }
    }

    fn restart(&mut self) {
        let now = Instant::now();
        self.game = new_game(self.pinned_seed, &self.score_file, now);
        self.difficulty = PeriodicTrigger::new(self.game.config().difficulty_interval, now);
        self.fast_drop_until = None;
    }

    fn start_fast_drop(&mut self) {
        self.game.start_fast_drop();
        self.fast_drop_until = Some(Instant::now() + FAST_DROP_GRACE);
    }

    fn stop_fast_drop(&mut self) {
        self.game.stop_fast_drop();
        self.fast_drop_until = None;
    }
}

fn new_game(pinned_seed: Option<u64>, score_file: &Path, now: Instant) -> Game {
    let seed = pinned_seed.unwrap_or_else(|| rand::rng().random());
    Game::new(
        GameConfig::default(),
        Box::new(RandomShapeSource::with_seed(seed)),
        Box::new(FileScoreStore::open(score_file.to_path_buf())),
        now,
    )
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.exiting
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind == KeyEventKind::Release {
            if key.code == KeyCode::Down {
                self.stop_fast_drop();
            }
            return;
        }
        match key.code {
            KeyCode::Left => _ = self.game.move_left(),
            KeyCode::Right => _ = self.game.move_right(),
            KeyCode::Up => _ = self.game.rotate(),
            KeyCode::Down => self.start_fast_drop(),
            KeyCode::Char(' ') => self.game.hard_drop(Instant::now()),
            KeyCode::Char('r') if self.game.phase().is_game_over() => self.restart(),
            KeyCode::Char('q') | KeyCode::Esc => self.exiting = true,
            _ => {}
        }
    }

    fn update(&mut self, now: Instant) {
        if let Some(until) = self.fast_drop_until
            && now >= until
        {
            self.stop_fast_drop();
        }
        self.game.tick(now);
        if self.game.phase().is_playing() && self.difficulty.fired(now) {
            self.game.speed_up();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let display = GameDisplay::new(&self.game);
        let help_text = if self.game.phase().is_game_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Fast Drop) | Space (Hard Drop) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(help_text, help_area);
    }
}
