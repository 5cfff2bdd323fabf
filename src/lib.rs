use std::sync::{atomic::{AtomicBool, Ordering}, Mutex};

use indicatif::ProgressBar;
use semver::{BuildMetadata, Prerelease, Version};

pub mod auth;
pub mod clipboard;
pub mod config;
pub mod drive;
pub mod filesystem;
pub mod lock;
pub mod util;

const MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");
const MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");
const PATCH: &str = env!("CARGO_PKG_VERSION_PATCH");

// only modified in main.rs on launch
pub struct RuntimeOptions
{
    pub debug: AtomicBool,
    pub debug_timestamp: AtomicBool
}

pub static OPTIONS: RuntimeOptions = RuntimeOptions { debug: AtomicBool::new(false), debug_timestamp: AtomicBool::new(false) };

// a live spinner is hidden while a log line prints
static PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Register the progress bar log lines should print around, returns the previous one
pub fn set_progress(bar: Option<ProgressBar>) -> Option<ProgressBar>
{
    match PROGRESS.lock()
    {
        Ok(mut current) => std::mem::replace(&mut *current, bar),
        Err(_) => None
    }
}

fn emit(message: &str, stderr: bool)
{
    let write = ||
    {
        if stderr { eprint!("{message}") } else { print!("{message}") }
    };

    match PROGRESS.lock()
    {
        Ok(bar) => match bar.as_ref()
        {
            Some(bar) => bar.suspend(write),
            None => write()
        },
        Err(_) => write()
    }
}

/// Prefix each line of msg with a [CONTEXT] tag (and a timestamp if enabled)
pub fn format_message(msg: &str, tag: &str, timestamp: bool) -> String
{
    let mut message = String::new();

    let time = chrono::offset::Utc::now().to_rfc3339();

    for line in msg.split("\n")
    {
        if timestamp { message.push_str(&format!("{time} ")); }
        message.push_str(&format!("[{tag}] "));
        message.push_str(line);
        message.push_str("\n");
    }

    message
}

/// Print msg only when running with -d
pub fn debug(msg: String, context: Option<&str>)
{
    if !OPTIONS.debug.load(Ordering::Relaxed) { return }

    let tag = context.unwrap_or("DEBUG");
    emit(&format_message(&msg, tag, OPTIONS.debug_timestamp.load(Ordering::Relaxed)), false);
}

/// Always print msg, WARN and ERROR contexts go to stderr
pub fn log(msg: String, context: Option<&str>)
{
    let tag = context.unwrap_or("INFO");
    let message = format_message(&msg, tag, OPTIONS.debug_timestamp.load(Ordering::Relaxed));

    emit(&message, matches!(tag, "WARN" | "ERROR"));
}

pub fn program_version() -> Version
{
    Version
    {
        major: MAJOR.parse().unwrap_or(0),
        minor: MINOR.parse().unwrap_or(0),
        patch: PATCH.parse().unwrap_or(0),
        pre: Prerelease::EMPTY,
        build: BuildMetadata::EMPTY
    }
}

pub fn openssl_version() -> String
{
    format!("{}, {}", openssl::version::version(), openssl::version::built_on())
}
