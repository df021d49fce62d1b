use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::debug;

use crate::cli::display::{
    describe_turn, elimination_log, ending_line, history_line, score_line, turn_header,
    vanish_declaration, weakness_hint_lines,
};
use crate::game::engine::NegotiationEngine;
use crate::game::state::GameError;
use crate::game::twist::{SeededTwist, TwistSource};
use crate::types::{Color as CardColor, Faction, GamePhase, TurnKind};

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Card(CardColor),
    /// Optional replacement color; `None` keeps the opponent's choice.
    Veto(Option<CardColor>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: FieldValue,
}

impl Field {
    fn text(label: String) -> Self {
        Self {
            label,
            value: FieldValue::Text(String::new()),
        }
    }

    fn card(label: String, color: CardColor) -> Self {
        Self {
            label,
            value: FieldValue::Card(color),
        }
    }

    fn veto(label: String) -> Self {
        Self {
            label,
            value: FieldValue::Veto(None),
        }
    }

    fn cycle(&mut self, forward: bool) {
        match &mut self.value {
            FieldValue::Text(_) => {}
            FieldValue::Card(color) => {
                *color = if forward {
                    color.successor()
                } else {
                    color.successor().successor()
                };
            }
            FieldValue::Veto(choice) => {
                let options = [
                    None,
                    Some(CardColor::Red),
                    Some(CardColor::Blue),
                    Some(CardColor::Yellow),
                ];
                let current = *choice;
                let idx = options.iter().position(|o| *o == current).unwrap_or(0);
                let next = if forward {
                    (idx + 1) % options.len()
                } else {
                    (idx + options.len() - 1) % options.len()
                };
                *choice = options[next];
            }
        }
    }

    fn display_value(&self, focused: bool) -> String {
        match &self.value {
            FieldValue::Text(text) if focused => format!("{text}_"),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Card(color) => format!("< {} >", color.label()),
            FieldValue::Veto(None) => "< keep >".to_string(),
            FieldValue::Veto(Some(color)) => format!("< {} >", color.label()),
        }
    }
}

pub struct TuiApp<T: TwistSource = SeededTwist> {
    engine: NegotiationEngine<T>,
    fields: Vec<Field>,
    focus: usize,
    log: Vec<String>,
    status: Option<String>,
    show_help: bool,
    should_quit: bool,
}

impl<T: TwistSource> TuiApp<T> {
    pub fn new(engine: NegotiationEngine<T>) -> Self {
        let mut app = Self {
            engine,
            fields: Vec::new(),
            focus: 0,
            log: Vec::new(),
            status: None,
            show_help: false,
            should_quit: false,
        };
        app.rebuild_form();
        app
    }

    pub fn engine(&self) -> &NegotiationEngine<T> {
        &self.engine
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = loop {
            if self.should_quit {
                break Ok(());
            }
            if let Err(err) = terminal.draw(|f| self.render(f)) {
                break Err(err);
            }
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Ok(_) => {}
                    Err(err) => break Err(err),
                },
                Ok(false) => {}
                Err(err) => break Err(err),
            }
        };

        // Always restore the terminal, even when the loop failed.
        let _ = disable_raw_mode();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    /// Returns true once the app wants to exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.should_quit = true;
            return true;
        }
        if key.code == KeyCode::F(1) {
            self.show_help = !self.show_help;
            return false;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Left => self.cycle_focused(false),
            KeyCode::Right => self.cycle_focused(true),
            KeyCode::Backspace => {
                if let Some(Field {
                    value: FieldValue::Text(text),
                    ..
                }) = self.fields.get_mut(self.focus)
                {
                    text.pop();
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.type_char(c),
            _ => {}
        }
        self.should_quit
    }

    fn move_focus(&mut self, forward: bool) {
        if self.fields.is_empty() {
            return;
        }
        let len = self.fields.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    fn cycle_focused(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.cycle(forward);
        }
    }

    fn type_char(&mut self, c: char) {
        if self.fields.is_empty() {
            if matches!(c, 'q' | 'Q') {
                self.should_quit = true;
            }
            return;
        }
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match &mut field.value {
            FieldValue::Text(text) => text.push(c),
            FieldValue::Card(color) => {
                if let Some(picked) = CardColor::from_code(c) {
                    *color = picked;
                }
            }
            FieldValue::Veto(choice) => {
                if c == 'k' || c == 'K' {
                    *choice = None;
                } else if let Some(picked) = CardColor::from_code(c) {
                    *choice = Some(picked);
                }
            }
        }
    }

    fn text_at(&self, idx: usize) -> String {
        match self.fields.get(idx).map(|f| &f.value) {
            Some(FieldValue::Text(text)) => text.trim().to_string(),
            _ => String::new(),
        }
    }

    fn card_at(&self, idx: usize) -> CardColor {
        match self.fields.get(idx).map(|f| &f.value) {
            Some(FieldValue::Card(color)) => *color,
            _ => CardColor::Yellow,
        }
    }

    fn veto_at(&self, idx: usize) -> Option<CardColor> {
        match self.fields.get(idx).map(|f| &f.value) {
            Some(FieldValue::Veto(choice)) => *choice,
            _ => None,
        }
    }

    fn submit(&mut self) {
        let result = match self.engine.phase() {
            GamePhase::Elimination => self.submit_elimination(),
            GamePhase::Inheritance => self.submit_inheritance(),
            GamePhase::Negotiation => self.submit_turn(),
            GamePhase::Completed => {
                self.should_quit = true;
                return;
            }
        };
        match result {
            Ok(lines) => {
                self.log.extend(lines);
                self.status = None;
                self.rebuild_form();
            }
            Err(message) => {
                debug!(%message, "submission rejected");
                self.status = Some(message);
            }
        }
    }

    fn submit_elimination(&mut self) -> Result<Vec<String>, String> {
        let label = self.engine.stage_label().unwrap_or_default();
        let term_a = self.text_at(0);
        let term_b = self.text_at(1);
        let stage = self
            .engine
            .record_elimination(&term_a, &term_b)
            .map_err(|err| err.to_string())?;

        let (name_a, name_b) = self.names();
        let mut lines = vec![format!("[{label}] {name_a}: {term_a} / {name_b}: {term_b}")];
        if self.engine.phase() != GamePhase::Elimination {
            debug!(stage, "elimination phase finished");
            lines.extend(vanish_declaration(self.engine.state(), &name_a, &name_b));
        }
        Ok(lines)
    }

    fn submit_inheritance(&mut self) -> Result<Vec<String>, String> {
        let parse_number = |raw: String, name: &str| {
            raw.parse::<usize>()
                .map_err(|_| format!("{name}'s most painful item must be a number"))
        };
        let (name_a, name_b) = self.names();
        let number_a = parse_number(self.text_at(0), &name_a)?;
        let number_b = parse_number(self.text_at(3), &name_b)?;
        let weakness_a = self.card_at(1);
        let weakness_b = self.card_at(4);
        let veto_on_a = self.veto_at(2);
        let veto_on_b = self.veto_at(5);

        let mut lines = Vec::new();
        let item_a = self
            .engine
            .mark_painful_item(Faction::A, number_a)
            .map_err(|err| err.to_string())?;
        let item_b = self
            .engine
            .mark_painful_item(Faction::B, number_b)
            .map_err(|err| err.to_string())?;
        self.engine.set_weaknesses(weakness_a, weakness_b);
        if let Some(color) = veto_on_a {
            self.engine
                .veto_weakness(Faction::B, color)
                .map_err(|err| err.to_string())?;
            lines.push(format!("{name_b} demanded a replacement for {name_a}"));
        }
        if let Some(color) = veto_on_b {
            self.engine
                .veto_weakness(Faction::A, color)
                .map_err(|err| err.to_string())?;
            lines.push(format!("{name_a} demanded a replacement for {name_b}"));
        }
        let state = self.engine.state();
        lines.push(format!(
            "{name_a} lost most: {item_a}; empty slip {}",
            state.weakness_a.label()
        ));
        lines.push(format!(
            "{name_b} lost most: {item_b}; empty slip {}",
            state.weakness_b.label()
        ));
        Ok(lines)
    }

    fn submit_turn(&mut self) -> Result<Vec<String>, String> {
        let card_a = self.card_at(0);
        let text_a = self.text_at(1);
        let card_b = self.card_at(2);
        let text_b = self.text_at(3);
        let outcome = self
            .engine
            .play_turn(card_a, card_b, &text_a, &text_b)
            .map_err(|err| self.rejection(err))?;

        let (name_a, name_b) = self.names();
        let mut lines = vec![format!("-- Turn {} --", outcome.turn)];
        lines.extend(describe_turn(&outcome, &name_a, &name_b));
        lines.push(score_line(&self.engine.state().scores));
        if outcome.game_over {
            lines.push(format!(
                "Result: {}",
                ending_line(&self.engine.compute_outcome())
            ));
        }
        Ok(lines)
    }

    fn rejection(&self, err: GameError) -> String {
        match err {
            GameError::InvalidMove { faction, card } => format!(
                "{} cannot play {}: it is not in {}'s domestic history",
                self.engine.nation_name(faction),
                card.label(),
                self.engine.nation_name(faction.opponent())
            ),
            other => other.to_string(),
        }
    }

    fn names(&self) -> (String, String) {
        (
            self.engine.nation_name(Faction::A).to_string(),
            self.engine.nation_name(Faction::B).to_string(),
        )
    }

    fn rebuild_form(&mut self) {
        let (name_a, name_b) = self.names();
        self.fields = match self.engine.phase() {
            GamePhase::Elimination => vec![
                Field::text(format!("{name_a} term")),
                Field::text(format!("{name_b} term")),
            ],
            GamePhase::Inheritance => vec![
                Field::text(format!("{name_a} most painful item #")),
                Field::card(format!("{name_a} weakness"), CardColor::Red),
                Field::veto(format!("{name_b} veto on {name_a}")),
                Field::text(format!("{name_b} most painful item #")),
                Field::card(format!("{name_b} weakness"), CardColor::Blue),
                Field::veto(format!("{name_a} veto on {name_b}")),
            ],
            GamePhase::Negotiation => vec![
                Field::card(format!("{name_a} card"), CardColor::Red),
                Field::text(format!("{name_a} phrase")),
                Field::card(format!("{name_b} card"), CardColor::Red),
                Field::text(format!("{name_b} phrase")),
            ],
            GamePhase::Completed => Vec::new(),
        };
        self.focus = 0;
    }

    fn render(&mut self, f: &mut Frame<'_>) {
        let area = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Phase header
                Constraint::Min(12),   // Main content
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[1]);

        self.render_header(f, chunks[0]);
        self.render_world(f, main_chunks[0]);
        self.render_form(f, right_chunks[0]);
        self.render_log(f, right_chunks[1]);
        self.render_status_bar(f, chunks[2]);
    }

    fn header_text(&self) -> String {
        match self.engine.phase() {
            GamePhase::Elimination => format!(
                "Part 1: Elimination - round {}/5: {}",
                self.engine.state().stage_index + 1,
                self.engine.stage_label().unwrap_or_default()
            ),
            GamePhase::Inheritance => "Part 2: National loss - choose empty slips".to_string(),
            GamePhase::Negotiation => format!(
                "Part 3: World, Out of Stock - {}",
                turn_header(self.engine.state())
            ),
            GamePhase::Completed => format!(
                "Game over: {}",
                self.engine.compute_outcome().ending.title()
            ),
        }
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.header_text())
            .block(Block::default().borders(Borders::ALL))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn render_world(&self, f: &mut Frame<'_>, area: Rect) {
        let state = self.engine.state();
        let (name_a, name_b) = self.names();
        let mut lines: Vec<Line<'_>> = Vec::new();

        lines.push(Line::from(Span::styled(
            "Lost items",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in elimination_log(state, &name_a, &name_b) {
            lines.push(Line::from(line));
        }

        if state.weaknesses_chosen {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Empty slips",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (faction, name) in [(Faction::A, &name_a), (Faction::B, &name_b)] {
                lines.push(Line::from(vec![
                    Span::raw(format!("{name}: ")),
                    Span::styled(
                        state.weakness(faction).label(),
                        Style::default().fg(color_for_card(state.weakness(faction))),
                    ),
                ]));
            }
        }

        if state.phase() == GamePhase::Negotiation || state.is_over() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Domestic history",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("{name_a}: {}", history_line(&state.past_a))));
            lines.push(Line::from(format!("{name_b}: {}", history_line(&state.past_b))));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                score_line(&state.scores),
                Style::default().fg(Color::Green),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("World"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_form(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line<'_>> = Vec::new();
        for (idx, field) in self.fields.iter().enumerate() {
            let focused = idx == self.focus;
            let marker = if focused { "> " } else { "  " };
            let style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{}: ", field.label), style),
                Span::styled(field.display_value(focused), style),
            ]));
        }

        let state = self.engine.state();
        match state.phase() {
            GamePhase::Inheritance => {
                lines.push(Line::from(""));
                for line in weakness_hint_lines() {
                    lines.push(Line::from(Span::styled(
                        line,
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            GamePhase::Negotiation if state.turn_kind() == TurnKind::Diplomatic => {
                let (name_a, name_b) = self.names();
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "{name_a} may borrow: {}",
                    history_line(&state.past_b)
                )));
                lines.push(Line::from(format!(
                    "{name_b} may borrow: {}",
                    history_line(&state.past_a)
                )));
            }
            GamePhase::Completed => {
                lines.push(Line::from(ending_line(&self.engine.compute_outcome())));
                lines.push(Line::from("Press Enter or q to leave."));
            }
            _ => {}
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Your move"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_log(&self, f: &mut Frame<'_>, area: Rect) {
        let viewport_height = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(viewport_height);
        let lines: Vec<Line<'_>> = self.log[start..]
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Log"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let (text, style) = match &self.status {
            Some(message) => (message.clone(), Style::default().fg(Color::Red)),
            None if self.show_help => (
                "Tab/↓: Next field | Shift+Tab/↑: Previous | ←/→ or R/B/Y: Pick color | Enter: Submit | F1: Toggle help | Esc: Quit".to_string(),
                Style::default().fg(Color::White),
            ),
            None => (
                "Press F1 for help | Enter submits | Esc quits".to_string(),
                Style::default().fg(Color::White),
            ),
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

fn color_for_card(color: CardColor) -> Color {
    match color {
        CardColor::Red => Color::Red,
        CardColor::Blue => Color::Blue,
        CardColor::Yellow => Color::Yellow,
    }
}
