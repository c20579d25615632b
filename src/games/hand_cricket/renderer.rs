//! Ratatui views for the three screens: welcome, toss/role, pitch
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::games::hand_cricket::app::{Delivery, HandCricketApp, Toast};
use crate::games::hand_cricket::opponent::Opponent;
use crate::games::hand_cricket::state::{
    GameResult, GameState, Innings, InningsPolicy, Phase, Side,
};

const TITLE: &str = " GUESS & TOSS SHOWDOWN ";

pub fn render<O: Opponent>(f: &mut Frame, app: &HandCricketApp<O>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    f.render_widget(
        Paragraph::new(TITLE)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let state = app.state();
    let help = match state.phase {
        Phase::Welcome => {
            render_welcome(f, chunks[1], app.name_input());
            "[Type] Name  [Enter] Start Game  [Esc] Quit"
        }
        Phase::Toss | Phase::RoleSelect => {
            render_toss(f, chunks[1], state);
            match state.phase {
                Phase::Toss => "[H] Heads  [T] Tails  [F/Enter] Flip  [Ctrl-R] Reset  [Esc] Quit",
                _ => "[A] Attack  [D] Defense  [Enter] Accept  [Ctrl-R] Reset  [Esc] Quit",
            }
        }
        Phase::Playing | Phase::GameOver => {
            render_pitch(f, chunks[1], state, app.rules().innings, app.last_delivery());
            match state.phase {
                Phase::Playing => "[1-6] Pick  [F] Forfeit  [Ctrl-R] Reset  [Esc] Quit",
                _ => "[R/Enter] Play Again  [Q] Quit",
            }
        }
    };

    f.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[2],
    );

    if let Some(toast) = app.toast() {
        render_toast(f, toast);
    }
}

fn render_welcome(f: &mut Frame, area: Rect, name_input: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let input = Paragraph::new(vec![
        Line::from(format!(" > {name_input}_")),
        Line::from(""),
        Line::from(Span::styled(
            " Alphanumeric characters only (letters and numbers)",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().title(" ENTER YOUR NAME ").borders(Borders::ALL));
    f.render_widget(input, chunks[0]);

    let rules = [
        "Win the toss to choose attack or defense",
        "Guess numbers 1-6 each turn",
        "If numbers match, current player is OUT!",
        "Otherwise, add your guess to your score",
        "Highest score wins when someone gets out",
    ];
    let items: Vec<ListItem> = rules.iter().map(|r| ListItem::new(format!(" • {r}"))).collect();
    f.render_widget(
        List::new(items).block(Block::default().title(" HOW TO PLAY ").borders(Borders::ALL)),
        chunks[1],
    );
}

fn render_toss(f: &mut Frame, area: Rect, state: &GameState) {
    let mut lines = Vec::new();

    if state.phase == Phase::Toss {
        lines.push(Line::from(format!("Welcome {}!", state.player_name)));
        lines.push(Line::from(""));
        match state.player_choice {
            None => lines.push(Line::from("Time for the toss! Choose heads or tails.")),
            Some(choice) => {
                lines.push(Line::from(format!("You chose: {choice}")));
                lines.push(Line::from(""));
                lines.push(Line::from("Press F to flip the coin!"));
            }
        }
    } else {
        if let Some(outcome) = state.toss_result {
            lines.push(Line::from(format!("The coin shows {outcome}")));
            lines.push(Line::from(""));
        }
        if state.player_won_toss {
            lines.push(styled_line("You Won the Toss!", Color::Green));
            lines.push(Line::from("Choose your strategy:"));
            lines.push(Line::from(""));
            lines.push(Line::from("[A] Attack (Play First)"));
            lines.push(Line::from("[D] Defense (Play Second)"));
        } else {
            lines.push(styled_line("You Lost the Toss", Color::Red));
            lines.push(Line::from("Computer chose: Defense (Playing Second)"));
            lines.push(Line::from(""));
            lines.push(Line::from("[A/Enter] You Get Attack (Play First)"));
        }
    }

    let title = if state.phase == Phase::Toss { " TOSS " } else { " CHOOSE ROLE " };
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn render_pitch(
    f: &mut Frame,
    area: Rect,
    state: &GameState,
    policy: InningsPolicy,
    last: Option<&Delivery>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let mut board = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}", state.player_name, state.player_score),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   Round {}   ", state.current_round)),
            Span::styled(
                format!("Computer {}", state.computer_score),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Role: {}",
            if state.is_player_attacking { "Attacking" } else { "Defending" }
        )),
    ];
    if policy == InningsPolicy::Two {
        board.push(Line::from(match (state.innings, state.target()) {
            (Innings::Second, Some(target)) => format!("2nd innings - target {target}"),
            _ => "1st innings".to_string(),
        }));
    }
    if state.phase == Phase::Playing {
        board.push(Line::from(format!("{}'s Turn", state.batter_name())));
    }
    f.render_widget(
        Paragraph::new(board)
            .alignment(Alignment::Center)
            .block(Block::default().title(" SCOREBOARD ").borders(Borders::ALL)),
        chunks[0],
    );

    let mut lines = Vec::new();
    if let Some(delivery) = last {
        lines.push(Line::from(format!(
            "{} {}  -  Computer {}",
            state.player_name, delivery.player, delivery.computer
        )));
        let batter = match delivery.batter {
            Side::Player => state.player_name.as_str(),
            Side::Computer => "Computer",
        };
        lines.push(if delivery.is_out() {
            styled_line(&format!("Match! {batter} is OUT!"), Color::Red)
        } else {
            Line::from(format!("No match! {} added to {batter}'s score", delivery.runs()))
        });
        lines.push(Line::from(""));
    }

    match state.phase {
        Phase::GameOver => {
            let (banner, color) = match state.game_result {
                Some(GameResult::Win) => ("You Won! Congratulations on your victory!", Color::Green),
                Some(GameResult::Tie) => ("It's a Tie!", Color::Yellow),
                _ => ("You Lost! Better luck next time!", Color::Red),
            };
            lines.push(styled_line(banner, color));
            lines.push(Line::from(format!(
                "Final Scores: {} {}  VS  Computer {}",
                state.player_name, state.player_score, state.computer_score
            )));
        }
        _ => lines.push(Line::from(match state.batting_side() {
            Side::Player => "Choose Your Number (1-6)",
            Side::Computer => "Computer is batting. Pick a number (1-6) to match it!",
        })),
    }

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(" PITCH ").borders(Borders::ALL)),
        chunks[1],
    );
}

fn render_toast(f: &mut Frame, toast: &Toast) {
    let area = popup_area(f.area(), 50, 5);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(
                Block::default()
                    .title(format!(" {} ", toast.title))
                    .borders(Borders::ALL),
            ),
        area,
    );
}

fn styled_line(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Top-centered box, clipped to the frame
fn popup_area(frame: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    Rect::new(frame.x + (frame.width - width) / 2, frame.y + 1.min(frame.height - height), width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::core::game::{Context, Game};
    use crate::games::hand_cricket::opponent::RandomOpponent;
    use crate::games::hand_cricket::state::Rules;

    fn screen<O: Opponent>(app: &HandCricketApp<O>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn welcome_screen_shows_prompt_and_typed_name() {
        let app = HandCricketApp::new(Rules::default(), RandomOpponent::from_seed(Some(1)))
            .with_name_input("Rahul");
        let out = screen(&app);
        assert!(out.contains("GUESS & TOSS SHOWDOWN"));
        assert!(out.contains("ENTER YOUR NAME"));
        assert!(out.contains("> Rahul_"));
        assert!(out.contains("HOW TO PLAY"));
    }

    #[test]
    fn forfeited_game_shows_final_scores() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = Context::new(tx);
        let mut app = HandCricketApp::new(Rules::default(), RandomOpponent::from_seed(Some(3)));
        // Attack is always on offer, whoever wins the toss.
        for c in "Rahul\nhfaf".chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            app.handle_input(KeyEvent::new(code, KeyModifiers::NONE), &ctx);
        }

        let out = screen(&app);
        assert!(out.contains("You Lost!"));
        assert!(out.contains("Final Scores: Rahul 0"));
        assert!(out.contains("[R/Enter] Play Again"));
    }

    #[test]
    fn popup_fits_inside_tiny_frames() {
        let area = popup_area(Rect::new(0, 0, 10, 3), 50, 5);
        assert_eq!(area, Rect::new(0, 0, 10, 3));
    }
}
