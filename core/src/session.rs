use rand::prelude::*;

use crate::*;

/// Rendering collaborator contract: receives one full-state refresh after
/// every engine call that changed the board. Mapping cells to visual tiles
/// is entirely the sink's business.
pub trait RenderSink {
    fn refresh(&mut self, snapshot: BoardSnapshot<'_>);
}

/// The engine object a host holds: owns the single live board, the
/// configuration used to restart it, and the seed stream feeding successive
/// games. There is no global state; one session is one game at a time.
pub struct GameSession {
    config: GameConfig,
    board: Board,
    seeds: SmallRng,
    sink: Option<Box<dyn RenderSink>>,
}

impl GameSession {
    /// Generates the first board immediately. A fixed `seed` makes the whole
    /// session reproducible, including every restart.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = LinearProbeGenerator::new(seeds.random()).generate(config);
        Self {
            config,
            board,
            seeds,
            sink: None,
        }
    }

    /// Installs the rendering collaborator and pushes the current state to
    /// it, so a late-attached sink starts out in sync.
    pub fn attach_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.sink = Some(sink);
        self.push_refresh();
    }

    /// Replaces the current board with a freshly generated one using the
    /// stored dimensions. The host's restart binding lands here.
    pub fn new_game(&mut self) {
        let seed = self.seeds.random();
        self.new_game_with(LinearProbeGenerator::new(seed));
    }

    /// Restart with an injected generator, for hosts that control placement.
    pub fn new_game_with(&mut self, generator: impl BoardGenerator) {
        self.board = generator.generate(self.config);
        log::debug!(
            "new {}x{} game with {} mines",
            self.config.size.0,
            self.config.size.1,
            self.config.mines
        );
        self.push_refresh();
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        self.board.snapshot()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = self.board.reveal(coords);
        if outcome.has_update() {
            self.push_refresh();
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let outcome = self.board.toggle_flag(coords);
        if outcome.has_update() {
            self.push_refresh();
        }
        outcome
    }

    pub fn chord_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = self.board.chord_reveal(coords);
        if outcome.has_update() {
            self.push_refresh();
        }
        outcome
    }

    fn push_refresh(&mut self) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.refresh(self.board.snapshot());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingSink {
        refreshes: Rc<RefCell<u32>>,
    }

    impl RenderSink for CountingSink {
        fn refresh(&mut self, _snapshot: BoardSnapshot<'_>) {
            *self.refreshes.borrow_mut() += 1;
        }
    }

    fn session_with_sink(config: GameConfig) -> (GameSession, Rc<RefCell<u32>>) {
        let refreshes = Rc::new(RefCell::new(0));
        let mut session = GameSession::new(config, 42);
        session.attach_sink(Box::new(CountingSink {
            refreshes: Rc::clone(&refreshes),
        }));
        *refreshes.borrow_mut() = 0;
        (session, refreshes)
    }

    #[test]
    fn state_changes_push_exactly_one_refresh() {
        let (mut session, refreshes) = session_with_sink(GameConfig::new((4, 4), 2));

        session.toggle_flag((0, 0));
        assert_eq!(*refreshes.borrow(), 1);

        // out-of-bounds input changes nothing and pushes nothing
        session.toggle_flag((9, 9));
        assert_eq!(*refreshes.borrow(), 1);

        session.new_game();
        assert_eq!(*refreshes.borrow(), 2);
    }

    #[test]
    fn attach_sink_syncs_the_current_state() {
        let refreshes = Rc::new(RefCell::new(0));
        let mut session = GameSession::new(GameConfig::new((4, 4), 2), 42);

        session.attach_sink(Box::new(CountingSink {
            refreshes: Rc::clone(&refreshes),
        }));
        assert_eq!(*refreshes.borrow(), 1);
    }

    #[test]
    fn same_seed_sessions_generate_identical_boards() {
        let config = GameConfig::new((8, 8), 10);

        let a = GameSession::new(config, 7);
        let b = GameSession::new(config, 7);
        assert_eq!(a.board(), b.board());

        // and every restart stays in lockstep
        let mut a = a;
        let mut b = b;
        a.new_game();
        b.new_game();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn new_game_replaces_the_board_with_a_fresh_one() {
        let (mut session, _) = session_with_sink(GameConfig::new((4, 4), 2));

        session.toggle_flag((0, 0));
        assert!(session.snapshot().cell_at((0, 0)).flagged);

        session.new_game();
        assert!(!session.snapshot().cell_at((0, 0)).flagged);
        assert_eq!(session.snapshot().size(), (4, 4));
        assert_eq!(session.snapshot().game_state(), GameState::InProgress);
    }

    #[test]
    fn injected_generator_controls_placement() {
        let config = GameConfig::new((5, 5), 3);
        let mut session = GameSession::new(config, 1);

        session.new_game_with(LinearProbeGenerator::new(1234));
        let direct = LinearProbeGenerator::new(1234).generate(config);
        assert_eq!(session.board(), &direct);
    }
}
