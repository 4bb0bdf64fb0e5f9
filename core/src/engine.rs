use rand::Rng;

use crate::*;

/// The minesweeper widget's state machine.
///
/// Owns the current [`Board`] and drives the injected [`Stopwatch`] and [`HighScoreStore`].
/// Inputs that make no sense for the current board (out of bounds, game over, revealed or
/// flagged targets) are ignored and reported as `NoChange`, never as errors.
pub struct Minesweeper<W, S> {
    settings: Settings,
    difficulty: Difficulty,
    board: Board,
    started: bool,
    new_record: bool,
    stopwatch: W,
    store: S,
    generator: Box<dyn MinefieldGenerator>,
    /// Used whenever `generator` hands back a layout of the wrong shape.
    fallback: RandomMinefieldGenerator,
}

impl<W: Stopwatch, S: HighScoreStore> Minesweeper<W, S> {
    /// Boards come from a single [`RandomMinefieldGenerator`] whose stream carries on from one
    /// board to the next, seeded from `settings.seed` or from entropy.
    pub fn new(settings: Settings, stopwatch: W, store: S) -> Self {
        let generator = RandomMinefieldGenerator::new(seed_from(&settings));
        Self::with_generator(settings, stopwatch, store, generator)
    }

    /// Like [`new`](Self::new) but boards come from `generator`. A layout that does not match
    /// the difficulty is replaced by a random one.
    pub fn with_generator(
        settings: Settings,
        mut stopwatch: W,
        store: S,
        generator: impl MinefieldGenerator + 'static,
    ) -> Self {
        let difficulty = settings.difficulty;
        let mut generator: Box<dyn MinefieldGenerator> = Box::new(generator);
        let mut fallback = RandomMinefieldGenerator::new(seed_from(&settings));
        let board = generate_board(difficulty, generator.as_mut(), &mut fallback);
        stopwatch.reset();
        log::debug!("New {} board", difficulty);
        Self {
            settings,
            difficulty,
            board,
            started: false,
            new_record: false,
            stopwatch,
            store,
            generator,
            fallback,
        }
    }

    /// Replaces the board with a fresh one of `difficulty`, even when it is the current one.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.new_board();
    }

    pub fn restart(&mut self) {
        self.new_board();
    }

    /// Primary click on a cell.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if let Err(err) = self.board.validate_coords(coords) {
            log::debug!("Ignoring reveal at {:?}: {}", coords, err);
            return RevealOutcome::NoChange;
        }

        if self.board.state().is_playing() {
            self.mark_started();
        }

        let outcome = self.board.reveal(coords).unwrap_or_else(|err| {
            log::debug!("Ignoring reveal at {:?}: {}", coords, err);
            RevealOutcome::NoChange
        });

        if outcome.is_terminal() {
            self.mark_ended();
        }
        if outcome == RevealOutcome::Won {
            self.record_time();
        }
        outcome
    }

    /// Secondary click on a cell. The host is expected to suppress the context menu.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.board.toggle_flag(coords).unwrap_or_else(|err| {
            log::debug!("Ignoring flag at {:?}: {}", coords, err);
            MarkOutcome::NoChange
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Grid {
        self.board.snapshot()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.cell_at(coords)
    }

    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.cell_at(coords).map(Cell::view)
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn flag_count(&self) -> CellCount {
        self.board.flag_count()
    }

    pub fn mines_remaining(&self) -> i32 {
        self.board.mines_left()
    }

    pub fn elapsed(&self) -> u32 {
        self.stopwatch.elapsed()
    }

    pub fn best_time(&self) -> u32 {
        self.best_time_for(self.difficulty)
    }

    pub fn best_time_for(&self, difficulty: Difficulty) -> u32 {
        self.store
            .get(&self.settings.score_key(difficulty))
            .unwrap_or(self.settings.no_record)
    }

    /// Set when the last won game beat the stored best time, cleared by a new board.
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn face(&self) -> Face {
        self.state().into()
    }

    pub fn mines_counter(&self) -> String {
        format_mines_counter(self.mines_remaining())
    }

    pub fn time_counter(&self) -> String {
        format_time_counter(self.elapsed())
    }

    pub fn status_message(&self) -> Option<&'static str> {
        status_message(self.state())
    }

    pub fn stopwatch(&self) -> &W {
        &self.stopwatch
    }

    /// For hosts that drive the stopwatch themselves, e.g. ticking a [`ManualStopwatch`].
    pub fn stopwatch_mut(&mut self) -> &mut W {
        &mut self.stopwatch
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (W, S) {
        (self.stopwatch, self.store)
    }

    fn new_board(&mut self) {
        self.board = generate_board(self.difficulty, self.generator.as_mut(), &mut self.fallback);
        self.started = false;
        self.new_record = false;
        self.stopwatch.reset();
        log::debug!("New {} board", self.difficulty);
    }

    fn mark_started(&mut self) {
        if !self.started {
            self.started = true;
            self.stopwatch.start();
            log::debug!("Started {} game", self.difficulty);
        }
    }

    fn mark_ended(&mut self) {
        self.stopwatch.stop();
        log::debug!(
            "Game {:?} after {}s",
            self.board.state(),
            self.stopwatch.elapsed()
        );
    }

    fn record_time(&mut self) {
        let key = self.settings.score_key(self.difficulty);
        let elapsed = self.stopwatch.elapsed();
        let best = self.store.get(&key).unwrap_or(self.settings.no_record);

        if elapsed < best {
            self.store.set(&key, elapsed);
            self.new_record = true;
            log::info!("New {} record: {}s (was {}s)", self.difficulty, elapsed, best);
        }
    }
}

fn seed_from(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| rand::rng().random())
}

fn generate_board(
    difficulty: Difficulty,
    generator: &mut dyn MinefieldGenerator,
    fallback: &mut RandomMinefieldGenerator,
) -> Board {
    let config = difficulty.config();
    Board::generate(config, generator).unwrap_or_else(|err| {
        log::warn!("Falling back to a random {} board: {}", difficulty, err);
        Board::new(&fallback.generate(config))
    })
}
