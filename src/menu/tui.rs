use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{Stdout, stdout};

use crate::ui;

/// Full-screen terminal owned by the menu for its whole lifetime.
pub struct MenuTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl MenuTui {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        // Log lines written to the alternate screen would corrupt the frame
        ui::hold_output();
        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn draw(&mut self, title: &str, lines: Vec<Line<'static>>) -> Result<()> {
        let title = format!(" {} ", title);
        self.terminal.draw(|f| {
            let area = f.area();
            let body = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue))
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            );
            f.render_widget(Clear, area);
            f.render_widget(body, area);
        })?;
        Ok(())
    }

    /// Blocks until a key is pressed. Releases and repeats are ignored.
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(key);
            }
        }
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        ui::release_output();
        Ok(())
    }
}

impl Drop for MenuTui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
