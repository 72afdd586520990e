//! Elm-architecture Model for the visualizer.

use std::error::Error;
use std::time::Duration;

use pathviz_core::{
    Canvas, Context, Glyph, Point,
    app::{Effect, Model, Screen},
    messages::{Key, MouseAction, Msg},
};
use pathviz_search::{Algorithm, Board, SearchOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::editor::{Brush, Editor};
use crate::layout::Layout;
use crate::palette::Palette;

const HELP_TEXT: &str = "\
left click     place start, then end, then walls
right click    erase a cell
space, enter   run the search
b / d / tab    BFS / Dijkstra / toggle
x              clear search marks
r              scatter random walls
c              clear the board
esc            stop a running search
q, ctrl+c      quit

press any key to go back";

/// UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Edit,
    Help,
}

/// What the status line reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    NeedEndpoints,
    Running,
    Found { path: usize, visited: usize },
    NoPath { visited: usize },
    Cancelled,
    Scattered(usize),
    Error(String),
}

impl Status {
    fn from_outcome(outcome: &SearchOutcome) -> Self {
        if outcome.found {
            Self::Found {
                path: outcome.path_len,
                visited: outcome.expanded.len(),
            }
        } else if outcome.cancelled {
            Self::Cancelled
        } else {
            Self::NoPath {
                visited: outcome.expanded.len(),
            }
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Ready => "space: run  ?: help".to_string(),
            Self::NeedEndpoints => "place a start and an end first".to_string(),
            Self::Running => "searching... esc: stop".to_string(),
            Self::Found { path, visited } => format!("path: {path} cells, visited {visited}"),
            Self::NoPath { visited } => format!("no path, visited {visited}"),
            Self::Cancelled => "cancelled".to_string(),
            Self::Scattered(n) => format!("scattered {n} walls"),
            Self::Error(msg) => msg.clone(),
        }
    }
}

/// The pathviz visualizer model.
pub struct Visualizer {
    board: Board,
    editor: Editor,
    layout: Layout,
    palette: Palette,
    algorithm: Algorithm,
    step_delay: Duration,
    density: f64,
    rng: StdRng,
    brush: Option<Brush>,
    status: Status,
    mode: Mode,
}

impl Visualizer {
    /// A visualizer editing `board` with the settings from `config`.
    pub fn new(config: &Config, board: Board) -> Self {
        let rng = match config.scatter.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            editor: Editor::from_board(&board),
            layout: Layout::new(board.size(), config.grid.cell_width),
            board,
            palette: Palette::from_config(&config.palette),
            algorithm: config.search.algorithm,
            step_delay: Duration::from_millis(config.search.step_delay_ms),
            density: config.scatter.density,
            rng,
            brush: None,
            status: Status::Ready,
            mode: Mode::Edit,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn update_edit(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.handle_mouse(action, pos);
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Space | Key::Enter => {
                if self.editor.is_ready() {
                    self.status = Status::Running;
                    return Some(Effect::Animate);
                }
                self.status = Status::NeedEndpoints;
            }
            Key::Char('b') => self.algorithm = Algorithm::Bfs,
            Key::Char('d') => self.algorithm = Algorithm::Dijkstra,
            Key::Tab => self.algorithm = self.algorithm.toggle(),
            Key::Char('x') => {
                self.board.clear_search();
                self.editor.restore_endpoints(&mut self.board);
                self.status = Status::Ready;
            }
            Key::Char('c') => {
                self.editor.reset(&mut self.board);
                self.status = Status::Ready;
            }
            Key::Char('r') => {
                let added = self.editor.scatter(&mut self.board, self.density, &mut self.rng);
                self.status = Status::Scattered(added);
            }
            Key::Char('?') => self.mode = Mode::Help,
            Key::Char('q') => return Some(Effect::End),
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::Main => self.brush = Some(Brush::Paint),
            MouseAction::Secondary => self.brush = Some(Brush::Erase),
            MouseAction::Release => {
                self.brush = None;
                return;
            }
            MouseAction::Move => {}
            MouseAction::Auxiliary => return,
        }
        let (Some(brush), Some(cell)) = (self.brush, self.layout.cell_at(pos)) else {
            return;
        };
        self.editor.apply(brush, &mut self.board, cell);
    }

    fn update_help(&mut self, msg: Msg) -> Option<Effect> {
        if let Msg::KeyDown { .. } = msg {
            self.mode = Mode::Edit;
        }
        None
    }

    // -------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------

    fn draw_help(&self, canvas: &mut Canvas) {
        let style = self.palette.status();
        canvas.fill(canvas.bounds(), Glyph::blank(style));
        for (y, line) in HELP_TEXT.lines().enumerate() {
            canvas.print(Point::new(1, y as i32), line, style);
        }
    }
}

/// Paint `board` and a status line reading `status`.
fn render(board: &Board, layout: &Layout, palette: &Palette, status: &str, canvas: &mut Canvas) {
    canvas.fill(canvas.bounds(), Glyph::default());
    for cell in board.cells() {
        let origin = layout.origin(cell.pos());
        for column in 0..layout.cell_width() {
            canvas.set(origin.shift(column, 0), palette.glyph(cell.state(), column));
        }
    }
    let line = layout.status_line();
    let style = palette.status();
    canvas.fill(line, Glyph::blank(style));
    canvas.print(line.min, status, style);
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        if msg.is_quit() {
            return Some(Effect::End);
        }
        match self.mode {
            Mode::Edit => self.update_edit(msg),
            Mode::Help => self.update_help(msg),
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        match self.mode {
            Mode::Help => self.draw_help(canvas),
            Mode::Edit => {
                let status = format!("[{}] {}", self.algorithm, self.status.text());
                render(&self.board, &self.layout, &self.palette, &status, canvas);
            }
        }
    }

    /// Run the selected search, presenting a frame after every step and
    /// polling input for `step_delay` in between. Esc stops the run; a quit
    /// request stops it and ends the application.
    fn animate(&mut self, screen: &mut Screen<'_>) -> Result<Option<Effect>, Box<dyn Error>> {
        let ctx = Context::new();
        let mut quit = false;
        let mut failure: Option<Box<dyn Error>> = None;
        let status = format!("[{}] {}", self.algorithm, Status::Running.text());
        self.editor.restore_endpoints(&mut self.board);
        let (layout, palette, delay) = (&self.layout, &self.palette, self.step_delay);

        let result = self.algorithm.run(&mut self.board, &ctx, |board| {
            if failure.is_some() {
                return;
            }
            let polled = screen
                .present(|canvas| render(board, layout, palette, &status, canvas))
                .and_then(|()| screen.poll(delay));
            match polled {
                Ok(msgs) => {
                    for msg in msgs {
                        if msg.is_quit() || msg == Msg::key(Key::Char('q')) {
                            quit = true;
                            ctx.cancel();
                        } else if let Msg::KeyDown { key: Key::Escape, .. } = msg {
                            ctx.cancel();
                        }
                    }
                }
                Err(e) => {
                    failure = Some(e);
                    ctx.cancel();
                }
            }
        });
        self.editor.restore_endpoints(&mut self.board);
        self.brush = None;

        if let Some(e) = failure {
            return Err(e);
        }
        self.status = match result {
            Ok(outcome) => Status::from_outcome(&outcome),
            Err(e) => Status::Error(e.to_string()),
        };
        Ok(quit.then_some(Effect::End))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pathviz_core::{App, AppConfig, Driver, Frame};
    use pathviz_search::CellState;

    use super::*;

    /// Replays scripted input batches, one batch per poll, then a run of
    /// empty polls, then `Msg::Quit`. Counts the frames it is asked to paint.
    struct ScriptedDriver {
        script: VecDeque<Vec<Msg>>,
        idle: usize,
        flushes: usize,
    }

    impl ScriptedDriver {
        fn new(script: Vec<Vec<Msg>>) -> Self {
            Self {
                script: script.into(),
                idle: 500,
                flushes: 0,
            }
        }
    }

    impl Driver for ScriptedDriver {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }

        fn poll_msgs(&mut self, _timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>> {
            if let Some(batch) = self.script.pop_front() {
                return Ok(batch);
            }
            if self.idle > 0 {
                self.idle -= 1;
                return Ok(Vec::new());
            }
            Ok(vec![Msg::Quit])
        }

        fn flush(&mut self, _frame: Frame) -> Result<(), Box<dyn Error>> {
            self.flushes += 1;
            Ok(())
        }

        fn close(&mut self) {}
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.search.step_delay_ms = 0;
        config.scatter.seed = Some(3);
        config
    }

    fn visualizer(layout: &str) -> Visualizer {
        Visualizer::new(&config(), Board::parse(layout).unwrap())
    }

    fn click(action: MouseAction, x: i32, y: i32) -> Msg {
        Msg::mouse(action, Point::new(x, y))
    }

    /// Run `model` to completion under `script`, returning the app.
    fn run(model: Visualizer, script: Vec<Vec<Msg>>) -> App<Visualizer, ScriptedDriver> {
        let layout = model.layout();
        let mut app = App::new(AppConfig {
            model,
            driver: ScriptedDriver::new(script),
            width: layout.width(),
            height: layout.height(),
            poll_interval: Duration::ZERO,
        });
        app.run().unwrap();
        app
    }

    /// Animate `m` directly against `driver`.
    fn animate(m: &mut Visualizer, driver: &mut ScriptedDriver) -> Option<Effect> {
        let layout = m.layout();
        let mut prev = Canvas::new(layout.width(), layout.height());
        let mut curr = Canvas::new(layout.width(), layout.height());
        let mut screen = Screen::new(driver, &mut prev, &mut curr);
        m.animate(&mut screen).unwrap()
    }

    #[test]
    fn clicks_and_drags_edit_the_board() {
        let mut m = Visualizer::new(&config(), Board::new(4));
        // Cells are two columns wide: x=3 is cell (1, 0).
        m.update(click(MouseAction::Main, 0, 0));
        m.update(click(MouseAction::Release, 0, 0));
        m.update(click(MouseAction::Main, 3, 0));
        m.update(click(MouseAction::Release, 3, 0));
        m.update(click(MouseAction::Main, 0, 2));
        m.update(click(MouseAction::Move, 2, 2));
        m.update(click(MouseAction::Move, 4, 2));
        m.update(click(MouseAction::Release, 4, 2));
        m.update(click(MouseAction::Move, 6, 2));
        assert_eq!(m.board().to_string(), "SE..\n....\n###.\n....\n");

        m.update(click(MouseAction::Secondary, 2, 2));
        m.update(click(MouseAction::Move, 0, 0));
        assert_eq!(m.board().to_string(), ".E..\n....\n#.#.\n....\n");
    }

    #[test]
    fn clicks_off_the_board_are_ignored() {
        let mut m = Visualizer::new(&config(), Board::new(4));
        m.update(click(MouseAction::Main, 20, 1));
        m.update(click(MouseAction::Main, 1, 4));
        assert_eq!(m.board().count(CellState::Empty), 16);
    }

    #[test]
    fn run_without_endpoints_only_updates_status() {
        let mut m = Visualizer::new(&config(), Board::new(3));
        assert_eq!(m.update(Msg::key(Key::Space)), None);
        assert_eq!(m.status(), &Status::NeedEndpoints);
    }

    #[test]
    fn run_with_endpoints_requests_animation() {
        let mut m = visualizer("S..\n...\n..E");
        assert_eq!(m.update(Msg::key(Key::Enter)), Some(Effect::Animate));
    }

    #[test]
    fn algorithm_keys() {
        let mut m = Visualizer::new(&config(), Board::new(3));
        assert_eq!(m.algorithm(), Algorithm::Dijkstra);
        m.update(Msg::key(Key::Char('b')));
        assert_eq!(m.algorithm(), Algorithm::Bfs);
        m.update(Msg::key(Key::Tab));
        assert_eq!(m.algorithm(), Algorithm::Dijkstra);
        m.update(Msg::key(Key::Char('d')));
        assert_eq!(m.algorithm(), Algorithm::Dijkstra);
    }

    #[test]
    fn scatter_and_reset_keys() {
        let mut m = visualizer("S...\n....\n....\n...E");
        m.update(Msg::key(Key::Char('r')));
        let Status::Scattered(n) = *m.status() else {
            panic!("unexpected status {:?}", m.status());
        };
        assert_eq!(m.board().count(CellState::Barrier), n);
        m.update(Msg::key(Key::Char('c')));
        assert_eq!(m.board().count(CellState::Empty), 16);
        // Both slots were cleared: the next click places Start again.
        m.update(click(MouseAction::Main, 2, 1));
        assert_eq!(m.board().state(Point::new(1, 1)), Some(CellState::Start));
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut m = Visualizer::new(&config(), Board::new(3));
        assert_eq!(m.update(Msg::key(Key::Char('q'))), Some(Effect::End));
        assert_eq!(m.update(Msg::Quit), Some(Effect::End));
    }

    #[test]
    fn help_mode_swallows_keys_until_dismissed() {
        let mut m = visualizer("S..\n...\n..E");
        m.update(Msg::key(Key::Char('?')));
        assert_eq!(m.update(Msg::key(Key::Space)), None);
        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Animate));
        let mut canvas = Canvas::new(48, 4);
        m.draw(&mut canvas);
        assert_eq!(canvas.at(Point::new(0, 0)).ch, 'S');
    }

    #[test]
    fn draw_paints_cells_and_status() {
        let m = visualizer("S#\n.E");
        let layout = m.layout();
        let mut canvas = Canvas::new(layout.width(), layout.height());
        m.draw(&mut canvas);
        let palette = Palette::default();
        assert_eq!(canvas.at(Point::new(0, 0)).ch, 'S');
        assert_eq!(canvas.at(Point::new(2, 0)).style.bg, palette.color(CellState::Barrier));
        assert_eq!(canvas.at(Point::new(3, 0)).style.bg, palette.color(CellState::Barrier));
        assert_eq!(canvas.at(Point::new(0, 1)).ch, '·');
        assert_eq!(canvas.at(Point::new(2, 1)).ch, 'E');
        let status: String = (0..layout.width())
            .map(|x| canvas.at(Point::new(x, 2)).ch)
            .collect();
        assert!(status.starts_with("[Dijkstra] space: run"), "{status:?}");
    }

    #[test]
    fn animated_run_marks_the_path() {
        let model = visualizer("S...\n.##.\n....\n...E");
        let app = run(model, vec![vec![Msg::key(Key::Space)]]);
        let m = app.model();
        let Status::Found { path, visited } = *m.status() else {
            panic!("unexpected status {:?}", m.status());
        };
        assert_eq!(path, 5);
        assert!(visited > path);
        assert_eq!(m.board().count(CellState::Path), 5);
        assert_eq!(m.board().count(CellState::Start), 1);
        assert_eq!(m.board().count(CellState::End), 1);
        assert!(app.driver().flushes > path);
    }

    #[test]
    fn unreachable_end_reports_no_path() {
        let model = visualizer("S.#.\n..#.\n###.\n...E");
        let app = run(model, vec![vec![Msg::key(Key::Space)]]);
        assert_eq!(app.model().status(), &Status::NoPath { visited: 4 });
        assert_eq!(app.model().board().count(CellState::Path), 0);
    }

    #[test]
    fn escape_cancels_only_the_run() {
        let model = visualizer("S.....\n......\n......\n......\n......\n.....E");
        let app = run(
            model,
            vec![
                vec![Msg::key(Key::Space)],
                // First poll inside the animation.
                vec![],
                vec![Msg::key(Key::Escape)],
            ],
        );
        let m = app.model();
        assert_eq!(m.status(), &Status::Cancelled);
        assert_eq!(m.board().count(CellState::Path), 0);
        assert!(m.board().count(CellState::Closed) > 0);
    }

    #[test]
    fn endpoints_survive_a_cancelled_run() {
        let mut m = visualizer("SE.\n...\n...");
        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Animate));
        let mut driver = ScriptedDriver::new(vec![vec![Msg::key(Key::Escape)]]);
        assert_eq!(animate(&mut m, &mut driver), None);
        assert_eq!(m.status(), &Status::Cancelled);
        // End was discovered before the cancel took effect.
        assert_eq!(m.board().state(Point::new(1, 0)), Some(CellState::End));

        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Animate));
        let mut driver = ScriptedDriver::new(Vec::new());
        assert_eq!(animate(&mut m, &mut driver), None);
        assert!(matches!(m.status(), Status::Found { path: 0, .. }));

        m.update(Msg::key(Key::Char('x')));
        assert_eq!(m.status(), &Status::Ready);
        assert_eq!(m.board().state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(m.board().state(Point::new(1, 0)), Some(CellState::End));
        assert_eq!(m.board().count(CellState::Empty), 7);
    }

    #[test]
    fn clearing_after_a_cancelled_run_keeps_endpoints() {
        let mut m = visualizer("SE.\n...\n...");
        m.update(Msg::key(Key::Space));
        let mut driver = ScriptedDriver::new(vec![vec![Msg::key(Key::Escape)]]);
        animate(&mut m, &mut driver);
        m.update(Msg::key(Key::Char('x')));
        assert_eq!(m.board().count(CellState::Start), 1);
        assert_eq!(m.board().count(CellState::End), 1);
        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Animate));
    }

    #[test]
    fn quit_during_a_run_cancels_and_ends() {
        let model = visualizer("S.....\n......\n......\n......\n......\n.....E");
        // The run is cancelled by the quit; no further batches are consumed.
        let app = run(
            model,
            vec![
                vec![Msg::key(Key::Space)],
                vec![Msg::key(Key::Char('q'))],
                vec![Msg::key(Key::Char('c'))],
            ],
        );
        let m = app.model();
        assert_eq!(m.status(), &Status::Cancelled);
        assert!(m.board().count(CellState::Closed) <= 1);
        assert_eq!(m.board().count(CellState::Start), 1);
    }

    #[test]
    fn rerun_after_edits_starts_clean() {
        let mut m = visualizer("S..\n...\n..E");
        let mut driver = ScriptedDriver::new(Vec::new());
        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Animate));
        assert_eq!(animate(&mut m, &mut driver), None);
        assert!(matches!(m.status(), Status::Found { path: 3, .. }));

        m.update(click(MouseAction::Main, 2, 1));
        m.update(Msg::key(Key::Char('b')));
        assert_eq!(m.update(Msg::key(Key::Space)), Some(Effect::Animate));
        assert_eq!(animate(&mut m, &mut driver), None);
        assert_eq!(m.algorithm(), Algorithm::Bfs);
        // The wall in the centre leaves one cell unvisited.
        assert_eq!(m.status(), &Status::Found { path: 3, visited: 8 });
        assert_eq!(m.board().count(CellState::Path), 3);
        assert_eq!(m.board().state(Point::new(1, 1)), Some(CellState::Barrier));
    }

    #[test]
    fn driver_errors_abort_the_animation() {
        struct Broken;

        impl Driver for Broken {
            fn init(&mut self) -> Result<(), Box<dyn Error>> {
                Ok(())
            }

            fn poll_msgs(&mut self, _timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>> {
                Ok(Vec::new())
            }

            fn flush(&mut self, _frame: Frame) -> Result<(), Box<dyn Error>> {
                Err("terminal gone".into())
            }

            fn close(&mut self) {}
        }

        let mut m = visualizer("S..\n...\n..E");
        let mut driver = Broken;
        let mut prev = Canvas::new(48, 4);
        let mut curr = Canvas::new(48, 4);
        let mut screen = Screen::new(&mut driver, &mut prev, &mut curr);
        let err = m.animate(&mut screen).unwrap_err();
        assert_eq!(err.to_string(), "terminal gone");
        assert_eq!(m.board().count(CellState::Path), 0);
    }
}
