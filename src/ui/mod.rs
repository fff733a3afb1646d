//! Output and logging for diskmenu.
//!
//! Every user-facing message goes through [`emit`], which renders either
//! colored text or one JSON event per line depending on the configured
//! [`OutputFormat`].

use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Debug => "debug",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Warn | Level::Debug)
    }
}

#[derive(Debug, Clone)]
struct Renderer {
    format: OutputFormat,
    color: bool,
}

static RENDERER: LazyLock<RwLock<Renderer>> = LazyLock::new(|| {
    RwLock::new(Renderer {
        format: OutputFormat::Text,
        color: true,
    })
});

static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Events held back while a full-screen UI owns the terminal.
static HELD: Mutex<Option<Vec<(Level, String)>>> = Mutex::new(None);

pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

pub fn init(format: OutputFormat, color: bool) {
    if let Ok(mut r) = RENDERER.write() {
        r.format = format;
        r.color = color;
    }
    if !color {
        colored::control::set_override(false);
    }
}

/// Queues further events instead of writing them, until [`release_output`].
pub fn hold_output() {
    if let Ok(mut held) = HELD.lock() {
        held.get_or_insert_with(Vec::new);
    }
}

/// Stops holding events and writes everything queued since [`hold_output`].
pub fn release_output() {
    for (level, line) in take_held() {
        write_line(level, &line);
    }
}

fn take_held() -> Vec<(Level, String)> {
    match HELD.lock() {
        Ok(mut held) => held.take().unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

pub fn get_output_format() -> OutputFormat {
    renderer().format
}

fn renderer() -> Renderer {
    match RENDERER.read() {
        Ok(r) => r.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[derive(Serialize)]
struct Event<'a> {
    level: &'a str,
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

fn colorize(level: Level, s: &str, enable: bool) -> String {
    if !enable {
        return s.to_string();
    }
    match level {
        Level::Info => s.normal().to_string(),
        Level::Success => s.green().bold().to_string(),
        Level::Warn => s.yellow().bold().to_string(),
        Level::Error => s.red().bold().to_string(),
        Level::Debug => s.cyan().to_string(),
    }
}

/// Removes CSI escape sequences so JSON consumers never see terminal codes.
fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if ('@'..='~').contains(&next) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

fn render_line(
    r: &Renderer,
    level: Level,
    code: &str,
    message: &str,
    data: Option<serde_json::Value>,
) -> String {
    match r.format {
        OutputFormat::Text => colorize(level, message, r.color),
        OutputFormat::Json => {
            let clean_msg = strip_ansi(message);
            let ev = Event {
                level: level.as_str(),
                code,
                message: &clean_msg,
                data,
            };
            serde_json::to_string(&ev).unwrap_or_else(|_| clean_msg.clone())
        }
    }
}

/// Writes a single event. Debug events are dropped unless debug mode is on.
pub fn emit(level: Level, code: &str, message: &str, data: Option<serde_json::Value>) {
    if level == Level::Debug && !is_debug_enabled() {
        return;
    }
    let r = renderer();
    let line = render_line(&r, level, code, message, data);
    if let Ok(mut held) = HELD.lock()
        && let Some(queue) = held.as_mut()
    {
        queue.push((level, line));
        return;
    }
    write_line(level, &line);
}

fn write_line(level: Level, line: &str) {
    let mut out: Box<dyn Write> = if level.to_stderr() {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let _ = writeln!(out, "{}", line);
}

pub mod prelude {
    pub use super::{Level, OutputFormat, emit, get_output_format};
}
