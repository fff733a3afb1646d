//! Interactive main menu.
//!
//! Screens: main menu, drive list, and a placeholder for actions that are
//! not implemented yet. Key handling is a pure function of the current
//! screen so it can be tested without a terminal.

mod tui;

use crate::diskpart::{Disk, DiskInventory};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tui::MenuTui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ViewDrives,
    FormatDrive,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [
        MenuOption::ViewDrives,
        MenuOption::FormatDrive,
        MenuOption::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::ViewDrives => "View Drives",
            MenuOption::FormatDrive => "Format Drive",
            MenuOption::Exit => "Exit",
        }
    }

    fn from_key(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Main,
    Drives(Vec<Disk>),
    Placeholder(MenuOption),
}

/// What a key press asks the menu loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Main,
    ViewDrives,
    Placeholder(MenuOption),
    Exit,
}

pub fn on_key(screen: &Screen, key: KeyEvent) -> Transition {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Transition::Exit;
    }
    match screen {
        Screen::Main => match key.code {
            KeyCode::Char(c) => match MenuOption::from_key(c) {
                Some(MenuOption::ViewDrives) => Transition::ViewDrives,
                Some(option @ MenuOption::FormatDrive) => Transition::Placeholder(option),
                Some(MenuOption::Exit) => Transition::Exit,
                None => Transition::Stay,
            },
            _ => Transition::Stay,
        },
        Screen::Drives(_) | Screen::Placeholder(_) => Transition::Main,
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn hint(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

pub fn screen_title(screen: &Screen) -> &'static str {
    match screen {
        Screen::Main => "Main Menu",
        Screen::Drives(_) => "Drives",
        Screen::Placeholder(option) => option.label(),
    }
}

pub fn screen_lines(screen: &Screen) -> Vec<Line<'static>> {
    match screen {
        Screen::Main => {
            let mut lines = vec![
                heading("----- Main Menu -----"),
                Line::from("Please enter a number:"),
                Line::from(""),
            ];
            lines.extend(
                MenuOption::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, option)| Line::from(format!("{}. {}", i + 1, option.label()))),
            );
            lines
        }
        Screen::Drives(disks) => {
            let mut lines = vec![heading("Drives connected:"), Line::from("")];
            if disks.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No drives!",
                    Style::default().fg(Color::Yellow),
                )));
            } else {
                lines.extend(disks.iter().map(|disk| {
                    Line::from(format!(
                        "Disk {:<3} size {:>8}  free {:>8}  {}",
                        disk.number,
                        disk.size,
                        disk.free,
                        disk.style()
                    ))
                }));
            }
            lines.push(Line::from(""));
            lines.push(hint("Press any key to go back."));
            lines
        }
        Screen::Placeholder(option) => vec![Line::from(format!(
            "You selected {}. Press any key to return to the menu.",
            option.label()
        ))],
    }
}

/// Moves to the screen a transition names. `None` means exit.
///
/// Entering the drive list always queries the inventory again.
pub fn apply(
    screen: Screen,
    transition: Transition,
    inventory: &dyn DiskInventory,
) -> Option<Screen> {
    match transition {
        Transition::Stay => Some(screen),
        Transition::Main => Some(Screen::Main),
        Transition::ViewDrives => Some(Screen::Drives(inventory.disks())),
        Transition::Placeholder(option) => Some(Screen::Placeholder(option)),
        Transition::Exit => None,
    }
}

/// Runs the menu until the user picks Exit.
pub fn run(inventory: &dyn DiskInventory) -> Result<()> {
    let mut tui = MenuTui::new()?;
    let mut screen = Screen::Main;

    loop {
        tui.draw(screen_title(&screen), screen_lines(&screen))?;
        let transition = on_key(&screen, tui.read_key()?);
        if transition == Transition::ViewDrives {
            tui.draw("Drives", vec![hint("Querying drives...")])?;
        }
        match apply(screen, transition, inventory) {
            Some(next) => screen = next,
            None => break,
        }
    }

    tui.cleanup()
}
