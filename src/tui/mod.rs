//! TUI module - Terminal skin over the plan view with ratatui

pub mod theme;

use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io::{stdout, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use crate::frame::{CardFrame, Frame as ViewFrame, HeaderFrame};
use crate::host::PlanReceiver;
use crate::text::phase_label;
use crate::ticker::{Tick, TokioDriver};
use crate::timer::TimerPhase;
use crate::view::{Action, PlanView, WidgetConfig};

pub use theme::{Theme, ThemeName};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI. Only the cursor is owned here; everything else
/// comes from the plan view
pub struct App {
    view: PlanView<TokioDriver>,
    ticks: UnboundedReceiver<Tick>,
    host: PlanReceiver,
    theme: Theme,
    cursor: usize,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    /// Must be created inside a tokio runtime
    pub fn new(config: WidgetConfig, theme: Theme, host: PlanReceiver) -> Self {
        let (driver, ticks) = TokioDriver::new();
        Self {
            view: PlanView::new(config, driver),
            ticks,
            host,
            theme,
            cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            if let Some(plan) = self.host.try_take() {
                self.view.deliver(plan);
                self.cursor = 0;
            }
            while let Ok(tick) = self.ticks.try_recv() {
                self.view.apply_tick(tick);
            }

            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        match self.view.frame() {
            ViewFrame::Waiting => {
                let text = if self.host.is_pending() {
                    "Loading workout plan..."
                } else {
                    "No plan was delivered"
                };
                let placeholder = Paragraph::new(text)
                    .style(Style::default().fg(self.theme.muted))
                    .block(Block::default().borders(Borders::ALL).border_style(self.border()));
                frame.render_widget(placeholder, chunks[0]);
            }
            ViewFrame::EmptyPlan { name } => {
                let notice = Paragraph::new(vec![
                    Line::from(name).style(Style::default().fg(self.theme.text).bold()),
                    Line::from(""),
                    Line::from("No exercises in this plan."),
                ])
                .block(Block::default().borders(Borders::ALL).border_style(self.border()));
                frame.render_widget(notice, chunks[0]);
            }
            ViewFrame::Plan(plan) => {
                frame.render_widget(self.header(&plan.header), chunks[0]);

                let gauge = Gauge::default()
                    .gauge_style(Style::default().fg(self.theme.accent))
                    .ratio(plan.header.fraction.clamp(0.0, 1.0))
                    .label("");
                frame.render_widget(gauge, chunks[1]);

                let mut lines = Vec::new();
                let mut cursor_line = 0;
                for (i, card) in plan.cards.iter().enumerate() {
                    if i == self.cursor {
                        cursor_line = lines.len();
                    }
                    lines.extend(self.card_lines(card, i == self.cursor));
                }
                let visible = chunks[2].height.saturating_sub(2) as usize;
                let scroll = cursor_line.saturating_sub(visible / 2) as u16;
                let list = Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(self.border())
                            .title("Exercises"),
                    );
                frame.render_widget(list, chunks[2]);
            }
        }

        // Footer
        let mut help =
            "q: quit | j/k: move | space: done | enter: details | s: start/pause | r: reset".to_string();
        if self.view.config().pause_when_hidden {
            help.push_str(" | timers pause while unfocused");
        }
        let footer = Paragraph::new(self.status.clone().unwrap_or(help))
            .style(Style::default().fg(self.theme.muted))
            .block(Block::default().borders(Borders::ALL).border_style(self.border()));
        frame.render_widget(footer, chunks[3]);
    }

    fn header(&self, h: &HeaderFrame) -> Paragraph<'static> {
        let t = &self.theme;
        let stat = |label: &str, value: String, color: Color| {
            vec![
                Span::styled(format!(" {} ", label), Style::default().fg(Color::Black).bg(color)),
                Span::styled(format!(" {} ", value), Style::default().fg(t.text).bold()),
                Span::raw("  "),
            ]
        };

        let mut stats = Vec::new();
        stats.extend(stat("Total Sets", h.total_sets.to_string(), t.info));
        stats.extend(stat("Est. Time", h.est_rest.clone(), t.done));
        stats.extend(stat("Progress", format!("{}%", h.percent), t.accent));

        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(h.name.clone(), Style::default().fg(t.text).bold()),
                Span::raw("  "),
                Span::styled(h.date.format("%Y-%m-%d").to_string(), Style::default().fg(t.muted)),
            ]),
            Line::from(format!("{}/{} exercises", h.completed, h.total))
                .style(Style::default().fg(t.text)),
            Line::from(""),
            Line::from(stats),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(self.border()))
    }

    fn card_lines(&self, card: &CardFrame, selected: bool) -> Vec<Line<'static>> {
        let t = &self.theme;
        let mut name_style = Style::default().fg(t.text).bold();
        if card.completed {
            name_style = name_style.fg(t.muted).crossed_out();
        }
        let marker = if selected { "▸ " } else { "  " };
        let button = if card.completed {
            Span::styled(" ✓ ", Style::default().fg(Color::Black).bg(t.border))
        } else {
            Span::styled(" Done ", Style::default().fg(Color::Black).bg(t.accent))
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(marker, Style::default().fg(t.cursor)),
            Span::styled(format!("Exercise {}  ", card.index_label), Style::default().fg(t.muted)),
            Span::styled(card.key.name.clone(), name_style),
            Span::raw("  "),
            button,
        ])];

        let mut stats = Vec::new();
        if let Some(sr) = &card.sets_reps {
            stats.push(format!("💪 {}", sr));
        }
        if let Some(w) = &card.weight {
            stats.push(format!("⚖️ {}", w));
        }
        if let Some(r) = &card.rest {
            stats.push(format!("😤 {}", r));
        }
        if card.timer.phase != TimerPhase::Idle && card.timer.usable {
            stats.push(format!("⏱ {}", card.timer.display));
        }
        if !stats.is_empty() {
            lines.push(Line::from(format!("    {}", stats.join("   "))).style(Style::default().fg(t.text)));
        }

        if card.expanded {
            if let Some(notes) = &card.notes {
                lines.push(Line::from(format!("    {}", notes)).style(Style::default().fg(t.muted)));
            }
            if card.timer.usable {
                let color = match card.timer.phase {
                    TimerPhase::Running => t.info,
                    TimerPhase::Expired => t.done,
                    _ => t.text,
                };
                lines.push(Line::from(vec![
                    Span::raw("    Rest timer "),
                    Span::styled(card.timer.display.clone(), Style::default().fg(color).bold()),
                    Span::styled(
                        format!("  {}", phase_label(card.timer.phase)),
                        Style::default().fg(t.muted),
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines
    }

    fn border(&self) -> Style {
        Style::default().fg(self.theme.border)
    }

    fn handle_events(&mut self) -> Result<()> {
        if !event::poll(Duration::from_millis(100))? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let len = self.view.plan().map_or(0, |p| p.len());
                let action = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        self.should_quit = true;
                        None
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        if self.cursor + 1 < len {
                            self.cursor += 1;
                        }
                        None
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        self.cursor = self.cursor.saturating_sub(1);
                        None
                    }
                    KeyCode::Char(' ') | KeyCode::Char('d') => Some(Action::ToggleComplete(self.cursor)),
                    KeyCode::Enter => Some(Action::ToggleExpand(self.cursor)),
                    KeyCode::Char('s') => Some(Action::ToggleTimer(self.cursor)),
                    KeyCode::Char('r') => Some(Action::ResetTimer(self.cursor)),
                    _ => None,
                };
                if let Some(action) = action
                    && len > 0
                {
                    self.status = None;
                    if let Err(e) = self.view.dispatch(action) {
                        warn!("Action {:?} failed: {}", action, e);
                        self.status = Some(e.to_string());
                    }
                }
            }
            Event::FocusLost => self.view.set_visible(false),
            Event::FocusGained => self.view.set_visible(true),
            _ => {}
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableFocusChange)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(DisableFocusChange)?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
