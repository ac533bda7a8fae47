use std::{
    io,
    ops::ControlFlow,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use plummet_engine::{COLS, GameState, PieceSeed, ROWS};
use plummet_evaluator::{
    move_evaluator::MoveEvaluator,
    session::{GameLimits, GameOutcome, play_game},
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};

use crate::util::Output;

const FILLED_CELL: &str = "[]";
const EMPTY_CELL: &str = " .";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many moves
    #[clap(long)]
    max_turns: Option<u32>,
    /// Delay between moves in milliseconds
    #[clap(long, default_value_t = 300)]
    delay_ms: u64,
    /// Play without rendering and print the outcome as JSON
    #[clap(long, default_value_t = false)]
    headless: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            max_turns: None,
            delay_ms: 300,
            headless: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        max_turns,
        delay_ms,
        headless,
    } = arg;

    let mut state = seed.map_or_else(GameState::new, GameState::with_seed);
    let limits = GameLimits {
        max_turns: *max_turns,
    };
    let evaluator = MoveEvaluator::default();

    if *headless {
        let outcome = play_game(&evaluator, &mut state, limits, |_| ControlFlow::Continue(()));
        report(&outcome);
        return Output::save_json(&outcome, None);
    }

    let delay = Duration::from_millis(*delay_ms);
    let outcome =
        ratatui::run(|terminal| watch_game(terminal, &evaluator, &mut state, limits, delay))?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &GameOutcome) {
    let ending = if outcome.lost { "lost" } else { "stopped" };
    eprintln!(
        "Game {ending} after {} moves with {} rows cleared (seed {})",
        outcome.turns, outcome.rows_cleared, outcome.seed
    );
}

fn watch_game(
    terminal: &mut DefaultTerminal,
    evaluator: &MoveEvaluator<'_>,
    state: &mut GameState,
    limits: GameLimits,
    delay: Duration,
) -> io::Result<GameOutcome> {
    terminal.draw(|frame| draw(frame, state, limits))?;
    if wait_for_quit(delay)? {
        return Ok(GameOutcome::from_state(state));
    }

    let mut error = None;
    let mut quit = false;
    let outcome = play_game(evaluator, state, limits, |state| {
        let result = terminal
            .draw(|frame| draw(frame, state, limits))
            .and_then(|_| wait_for_quit(delay));
        match result {
            Ok(false) => ControlFlow::Continue(()),
            Ok(true) => {
                quit = true;
                ControlFlow::Break(())
            }
            Err(e) => {
                error = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    if let Some(e) = error {
        return Err(e);
    }

    // Keep the final board on screen until the user quits
    while !quit {
        quit = wait_for_quit(Duration::from_secs(1))?;
    }
    Ok(outcome)
}

/// Waits up to `timeout` for a `q` key press.
fn wait_for_quit(timeout: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('q') {
                    return Ok(true);
                }
            }
            _ => {}
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}

#[expect(clippy::cast_possible_truncation)]
fn draw(frame: &mut Frame<'_>, state: &GameState, limits: GameLimits) {
    let board_width = (COLS * FILLED_CELL.len() + 2) as u16;
    let board_height = (ROWS + 2) as u16;
    let [board_area, info_area] =
        Layout::horizontal([Constraint::Length(board_width), Constraint::Min(0)])
            .areas::<2>(frame.area());
    let [board_area, _] =
        Layout::vertical([Constraint::Length(board_height), Constraint::Min(0)])
            .areas::<2>(board_area);

    let filled = Style::default().fg(Color::Cyan);
    let empty = Style::default().fg(Color::DarkGray);
    let rows = state
        .board()
        .rows()
        .rev()
        .map(|row| {
            row.iter()
                .map(|&cell| {
                    if cell == 0 {
                        Span::styled(EMPTY_CELL, empty)
                    } else {
                        Span::styled(FILLED_CELL, filled)
                    }
                })
                .collect::<Line>()
        })
        .collect::<Vec<_>>();
    let board = Paragraph::new(rows).block(Block::bordered().title(" plummet "));
    frame.render_widget(board, board_area);

    let status = if state.has_lost() {
        "Game over"
    } else if limits.allows_turn(state.turn()) {
        "Playing"
    } else {
        "Turn limit reached"
    };
    let counter = state.stats().row_clear_counter();
    let info = Text::from(vec![
        Line::from(format!("Seed:         {}", state.seed())),
        Line::from(format!("Turn:         {}", state.turn())),
        Line::from(format!("Rows cleared: {}", state.rows_cleared())),
        Line::from(format!("Stack height: {}", state.column_heights().max())),
        Line::from(format!("Next piece:   {}", state.current_piece())),
        Line::from(""),
        Line::from(format!("Singles:      {}", counter[1])),
        Line::from(format!("Doubles:      {}", counter[2])),
        Line::from(format!("Triples:      {}", counter[3])),
        Line::from(format!("Tetrises:     {}", counter[4])),
        Line::from(""),
        Line::from(status),
        Line::styled("Controls: q (Quit)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(info).block(Block::bordered()), info_area);
}
