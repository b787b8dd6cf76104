//! Terminal rendering of the board and status

use protocol::{Board, GameOutcome, Mark, BOARD_SIZE, HUMAN_MARK};

use crate::game::{ClientGame, TurnState};
use crate::storage::ScoreBoard;
use crate::theme::ColorTheme;

/// Draw the grid. Empty cells show their index so the player knows what to type.
pub fn render_board(board: &Board, theme: &ColorTheme, winning_line: Option<[usize; 3]>, last_move: Option<usize>) -> String {
    let separator = theme.paint("───┼───┼───", theme.grid);
    let bar = theme.paint("│", theme.grid);

    let mut lines = Vec::with_capacity(BOARD_SIZE * 2 - 1);
    for (row, cells) in board.rows().enumerate() {
        if row > 0 {
            lines.push(separator.clone());
        }

        let rendered: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let index = row * BOARD_SIZE + col;
                let text = format!(" {} ", cell.map_or_else(|| index.to_string(), |m| m.to_string()));

                let mut painted = match cell {
                    Some(Mark::X) => theme.paint(&text, theme.x_mark),
                    Some(Mark::O) => theme.paint(&text, theme.o_mark),
                    None => theme.paint(&text, theme.empty_cell),
                };
                if winning_line.is_some_and(|line| line.contains(&index)) {
                    painted = theme.paint(&painted, theme.winning_line);
                } else if last_move == Some(index) {
                    painted = theme.paint(&painted, theme.last_move);
                }
                painted
            })
            .collect();

        lines.push(rendered.join(&bar));
    }

    lines.join("\n")
}

/// One-line description of the turn or result
pub fn status_text(game: &ClientGame) -> String {
    match game.turn() {
        TurnState::HumanTurn => format!("Your move ({})", HUMAN_MARK),
        TurnState::AiTurn | TurnState::AiThinking => "AI is thinking...".to_string(),
        TurnState::Finished(GameOutcome::Win { mark, .. }) if mark == HUMAN_MARK => {
            "You win! Type 'r' to play again.".to_string()
        }
        TurnState::Finished(GameOutcome::Win { .. }) => "AI wins. Type 'r' to play again.".to_string(),
        TurnState::Finished(_) => "Draw. Type 'r' to play again.".to_string(),
    }
}

pub fn score_text(scores: &ScoreBoard) -> String {
    let totals = format!(
        "You {}  AI {}  Draws {}  ({} played)",
        scores.player_wins, scores.ai_wins, scores.draws, scores.games_played
    );
    match scores.formatted_last_played() {
        Some(last) => format!("{}, last {}", totals, last),
        None => totals,
    }
}

/// Full screen: header, board, status, score and commentary
pub fn render_screen(game: &ClientGame, scores: &ScoreBoard, theme: &ColorTheme, commentary: Option<&str>) -> String {
    let winning_line = game.outcome().and_then(|o| o.winning_line());

    let mut screen = vec![
        theme.paint(&format!("Tic-Tac-Toe  [{}]", game.difficulty()), theme.status),
        String::new(),
        render_board(&game.board(), theme, winning_line, game.last_move()),
        String::new(),
        theme.paint(&status_text(game), theme.status),
        score_text(scores),
    ];
    if let Some(text) = commentary {
        screen.push(theme.paint(&format!("AI: {}", text), theme.commentary));
    }

    screen.join("\n")
}
