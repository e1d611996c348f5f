use std::time::{Duration, Instant};

use derive_more::IsVariant;

use crate::{
    core::{Board, Position, Shape},
    engine::{clock::FallClock, score_store::ScoreStore, shape_source::ShapeSource},
};

/// Store key under which the high score is persisted.
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Points awarded per cleared row.
pub const POINTS_PER_ROW: u64 = 100;

/// Tunable rule parameters. The `Default` values are the classic setup:
/// a 10×20 board, a 1000 ms drop interval decaying by 5 % every 30 s down to
/// a 100 ms floor, and a 50 ms fast-drop cadence.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub initial_drop_interval: Duration,
    pub fast_drop_interval: Duration,
    pub min_drop_interval: Duration,
    pub speed_up_factor: f64,
    pub difficulty_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            initial_drop_interval: Duration::from_millis(1000),
            fast_drop_interval: Duration::from_millis(50),
            min_drop_interval: Duration::from_millis(100),
            speed_up_factor: 0.95,
            difficulty_interval: Duration::from_secs(30),
        }
    }
}

/// Lifecycle of a game. The transition is one-way; a restart builds a fresh
/// [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// The piece currently falling: a shape plus its top-left board position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    shape: Shape,
    position: Position,
}

impl ActivePiece {
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Absolute board cells covered by the piece.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.shape.filled_cells().map(move |(col, row)| {
            #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let cell = Position::new(self.position.x + col as i32, self.position.y + row as i32);
            cell
        })
    }
}

/// The complete game state machine.
///
/// Hosts feed it player commands and periodic `tick(now)` calls; the game
/// gates gravity internally, so calling `tick` more often than the drop
/// interval is harmless. After game over every command and tick is a no-op.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    shapes: Box<dyn ShapeSource>,
    scores: Box<dyn ScoreStore>,
    clock: FallClock,
    score: u64,
    high_score: u64,
    phase: GamePhase,
}

impl Game {
    /// Starts a new game and spawns the first piece at `now`.
    ///
    /// The high score is read from `scores` once, here; afterwards the store
    /// is only written to.
    #[must_use]
    pub fn new(
        config: GameConfig,
        shapes: Box<dyn ShapeSource>,
        scores: Box<dyn ScoreStore>,
        now: Instant,
    ) -> Self {
        let high_score = scores.get(HIGH_SCORE_KEY).unwrap_or(0);
        let mut game = Self {
            board: Board::new(config.width, config.height),
            active: None,
            shapes,
            scores,
            clock: FallClock::new(&config, now),
            score: 0,
            high_score,
            phase: GamePhase::Playing,
            config,
        };
        game.spawn(now);
        game
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.clock.level()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.clock.drop_interval()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Moves the piece one column left. Returns whether the move applied.
    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    /// Moves the piece one column right. Returns whether the move applied.
    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i32) -> bool {
        let Self { board, active, .. } = self;
        let Some(active) = active else { return false };
        let candidate = active.position.shifted(dx, 0);
        if !board.allows(&active.shape, candidate) {
            return false;
        }
        active.position = candidate;
        true
    }

    /// Rotates the piece clockwise in place. The rotated footprint must fit
    /// at the current position; there is no kick, a blocked rotation is
    /// simply rejected.
    pub fn rotate(&mut self) -> bool {
        let Self { board, active, .. } = self;
        let Some(active) = active else { return false };
        let candidate = active.shape.rotated_clockwise();
        if !board.allows(&candidate, active.position) {
            return false;
        }
        active.shape = candidate;
        true
    }

    /// Advances time. Performs at most one gravity step per call: the piece
    /// descends one row, or, if it cannot, it is locked, full rows are
    /// cleared and scored, and the next piece spawns, all within this call.
    /// Returns whether a step happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase.is_game_over() || !self.clock.should_step(now) {
            return false;
        }
        self.clock.mark_step(now);
        if !self.descend() {
            self.settle(now);
        }
        true
    }

    /// Drops the piece straight down and settles it immediately.
    pub fn hard_drop(&mut self, now: Instant) {
        if self.phase.is_game_over() {
            return;
        }
        while self.descend() {}
        self.clock.mark_step(now);
        self.settle(now);
    }

    /// Switches gravity to the fast cadence while held.
    pub fn start_fast_drop(&mut self) {
        if self.phase.is_playing() {
            self.clock.set_fast_dropping(true);
        }
    }

    pub fn stop_fast_drop(&mut self) {
        if self.phase.is_playing() {
            self.clock.set_fast_dropping(false);
        }
    }

    /// Difficulty hook: shrinks the drop interval and bumps the level. The
    /// host drives the cadence, typically via
    /// [`PeriodicTrigger`](crate::PeriodicTrigger).
    pub fn speed_up(&mut self) {
        if self.phase.is_playing() {
            self.clock.speed_up();
        }
    }

    fn descend(&mut self) -> bool {
        let Self { board, active, .. } = self;
        let Some(active) = active else { return false };
        let candidate = active.position.below();
        if !board.allows(&active.shape, candidate) {
            return false;
        }
        active.position = candidate;
        true
    }

    fn settle(&mut self, now: Instant) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.board.lock(active.cells());
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.add_score(POINTS_PER_ROW * cleared as u64);
        }
        self.spawn(now);
    }

    fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.scores.set(HIGH_SCORE_KEY, self.high_score);
        }
    }

    fn spawn(&mut self, now: Instant) {
        let shape = self.shapes.next_shape();
        #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let x = (self.config.width / 2) as i32 - (shape.width() / 2) as i32;
        let position = Position::new(x, 0);
        if self.board.allows(&shape, position) {
            self.active = Some(ActivePiece { shape, position });
            self.clock.mark_step(now);
        } else {
            self.active = None;
            self.phase = GamePhase::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    use super::*;
    use crate::engine::{score_store::MemoryScoreStore, shape_source::RandomShapeSource};

    const STRAIGHT: usize = 0;
    const SQUARE: usize = 1;

    /// Cycles through a fixed list of catalog indices.
    #[derive(Debug)]
    struct SequenceSource {
        indices: Vec<usize>,
        next: usize,
    }

    impl SequenceSource {
        fn new(indices: &[usize]) -> Self {
            Self {
                indices: indices.to_vec(),
                next: 0,
            }
        }
    }

    impl ShapeSource for SequenceSource {
        fn next_shape(&mut self) -> Shape {
            let index = self.indices[self.next % self.indices.len()];
            self.next += 1;
            Shape::from_catalog(index)
        }
    }

    /// Store whose contents stay observable after being moved into the game.
    #[derive(Debug, Clone, Default)]
    struct SharedStore {
        values: Rc<RefCell<HashMap<String, u64>>>,
    }

    impl ScoreStore for SharedStore {
        fn get(&self, key: &str) -> Option<u64> {
            self.values.borrow().get(key).copied()
        }

        fn set(&mut self, key: &str, value: u64) {
            self.values.borrow_mut().insert(key.to_owned(), value);
        }
    }

    fn start(indices: &[usize]) -> (Game, Instant) {
        let t0 = Instant::now();
        let game = Game::new(
            GameConfig::default(),
            Box::new(SequenceSource::new(indices)),
            Box::new(MemoryScoreStore::new()),
            t0,
        );
        (game, t0)
    }

    fn active_position(game: &Game) -> Position {
        game.active().expect("piece should be active").position()
    }

    fn secs(t0: Instant, s: u64) -> Instant {
        t0 + Duration::from_secs(s)
    }

    #[test]
    fn spawn_is_centered() {
        let (game, _) = start(&[STRAIGHT]);
        assert_eq!(active_position(&game), Position::new(3, 0));

        let (game, _) = start(&[SQUARE]);
        assert_eq!(active_position(&game), Position::new(4, 0));
    }

    #[test]
    fn lateral_moves_stop_at_walls() {
        let (mut game, _) = start(&[SQUARE]);
        for _ in 0..4 {
            assert!(game.move_left());
        }
        assert!(!game.move_left());
        assert_eq!(active_position(&game), Position::new(0, 0));

        for _ in 0..8 {
            assert!(game.move_right());
        }
        assert!(!game.move_right());
        assert_eq!(active_position(&game), Position::new(8, 0));
    }

    #[test]
    fn rotation_without_kick_is_rejected_when_blocked() {
        let (mut game, _) = start(&[STRAIGHT]);
        // The vertical footprint of the rotated straight piece is blocked.
        game.board.lock([Position::new(3, 1)]);
        assert!(!game.rotate());
        assert_eq!(game.active().expect("active").shape().width(), 4);

        game.board = Board::new(10, 20);
        assert!(game.rotate());
        assert_eq!(game.active().expect("active").shape().height(), 4);
    }

    #[test]
    fn gravity_steps_once_per_interval() {
        let (mut game, t0) = start(&[STRAIGHT]);
        assert!(!game.tick(t0 + Duration::from_millis(999)));
        assert_eq!(active_position(&game).y, 0);

        assert!(game.tick(secs(t0, 1)));
        assert_eq!(active_position(&game).y, 1);

        // Reference was reset; the same instant does not step again.
        assert!(!game.tick(secs(t0, 1)));
        assert!(!game.tick(t0 + Duration::from_millis(1999)));
        assert!(game.tick(secs(t0, 2)));
        assert_eq!(active_position(&game).y, 2);
    }

    #[test]
    fn grounded_piece_locks_and_respawns_on_one_tick() {
        let (mut game, t0) = start(&[STRAIGHT, SQUARE]);
        for s in 1..=19 {
            assert!(game.tick(secs(t0, s)));
        }
        assert_eq!(active_position(&game), Position::new(3, 19));

        // One more tick: lock, clear (nothing), respawn, atomically.
        assert!(game.tick(secs(t0, 20)));
        for x in 3..7 {
            assert!(game.board().is_occupied(x, 19));
        }
        assert_eq!(active_position(&game), Position::new(4, 0));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn hard_drop_settles_immediately() {
        let (mut game, t0) = start(&[SQUARE, STRAIGHT]);
        game.hard_drop(t0);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert!(game.board().is_occupied(x, y));
        }
        assert_eq!(active_position(&game), Position::new(3, 0));
    }

    #[test]
    fn clearing_two_rows_scores_two_hundred() {
        let (mut game, t0) = start(&[SQUARE, STRAIGHT]);
        // Rows 18 and 19 are full except for the two columns the square
        // lands in.
        let gap = [4, 5];
        for y in [18, 19] {
            game.board.lock(
                (0..10)
                    .filter(|x| !gap.contains(x))
                    .map(|x| Position::new(x, y)),
            );
        }

        game.hard_drop(t0);
        assert_eq!(game.score(), 200);
        assert_eq!(*game.board(), Board::new(10, 20));
    }

    #[test]
    fn high_score_is_written_through_only_when_beaten() {
        let mut store = SharedStore::default();
        store.set(HIGH_SCORE_KEY, 150);
        let t0 = Instant::now();
        let mut game = Game::new(
            GameConfig::default(),
            Box::new(SequenceSource::new(&[STRAIGHT])),
            Box::new(store.clone()),
            t0,
        );
        assert_eq!(game.high_score(), 150);

        let fill_gap_row =
            |game: &mut Game| {
                game.board.lock((0..10).filter(|x| !(3..7).contains(x)).map(
                    |x| Position::new(x, 19),
                ));
            };

        fill_gap_row(&mut game);
        game.hard_drop(t0);
        assert_eq!(game.score(), 100);
        assert_eq!(game.high_score(), 150);
        assert_eq!(store.get(HIGH_SCORE_KEY), Some(150));

        fill_gap_row(&mut game);
        game.hard_drop(t0);
        assert_eq!(game.score(), 200);
        assert_eq!(game.high_score(), 200);
        assert_eq!(store.get(HIGH_SCORE_KEY), Some(200));
    }

    #[test]
    fn blocked_spawn_ends_the_game_for_good() {
        let (mut game, t0) = start(&[STRAIGHT, SQUARE]);
        // Block the straight piece from descending so it settles in row 0,
        // and occupy the square's spawn footprint.
        game.board.lock([Position::new(4, 1), Position::new(5, 1)]);
        game.hard_drop(t0);

        assert!(game.phase().is_game_over());
        assert!(game.active().is_none());

        let board = game.board().clone();
        let score = game.score();
        assert!(!game.move_left());
        assert!(!game.rotate());
        assert!(!game.tick(secs(t0, 60)));
        game.hard_drop(secs(t0, 60));
        game.start_fast_drop();
        game.speed_up();
        assert_eq!(*game.board(), board);
        assert_eq!(game.score(), score);
        assert_eq!(game.level(), 1);
        assert!(game.phase().is_game_over());
    }

    #[test]
    fn fast_drop_switches_gravity_cadence() {
        let (mut game, t0) = start(&[STRAIGHT]);
        game.start_fast_drop();
        assert!(game.tick(t0 + Duration::from_millis(50)));
        assert!(game.tick(t0 + Duration::from_millis(100)));
        assert_eq!(active_position(&game).y, 2);

        game.stop_fast_drop();
        assert!(!game.tick(t0 + Duration::from_millis(150)));
        assert!(game.tick(t0 + Duration::from_millis(1100)));
        assert_eq!(active_position(&game).y, 3);
    }

    #[test]
    fn speed_up_shrinks_interval_and_raises_level() {
        let (mut game, _) = start(&[STRAIGHT]);
        assert_eq!(game.level(), 1);
        assert_eq!(game.drop_interval(), Duration::from_millis(1000));
        game.speed_up();
        assert_eq!(game.level(), 2);
        assert_eq!(game.drop_interval(), Duration::from_millis(950));
    }

    #[test]
    fn active_piece_never_leaves_bounds_or_overlaps() {
        fn assert_invariants(game: &Game) {
            let Some(active) = game.active() else { return };
            let board = game.board();
            for cell in active.cells() {
                let x = usize::try_from(cell.x).expect("x in range");
                assert!(x < board.width());
                if let Ok(y) = usize::try_from(cell.y) {
                    assert!(y < board.height());
                    assert!(!board.is_occupied(x, y));
                }
            }
        }

        let t0 = Instant::now();
        let mut game = Game::new(
            GameConfig::default(),
            Box::new(RandomShapeSource::with_seed(1)),
            Box::new(MemoryScoreStore::new()),
            t0,
        );
        let mut now = t0;
        for step in 0.. {
            if game.phase().is_game_over() {
                break;
            }
            assert!(step < 10_000, "game should fill up eventually");
            match step % 7 {
                0 | 3 => {
                    game.move_left();
                }
                1 => {
                    game.rotate();
                }
                2 | 5 => {
                    game.move_right();
                }
                4 => {
                    now += Duration::from_millis(1000);
                    game.tick(now);
                }
                _ => game.hard_drop(now),
            }
            assert_invariants(&game);
        }
    }
}
