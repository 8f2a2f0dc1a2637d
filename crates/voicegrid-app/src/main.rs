//! VoiceGrid desktop entry point.
//!
//! Accessibility-first content browser: every screen is a fixed 3x3 grid
//! of actions and all navigation is confirmed by synthesized speech.
//! This front end runs in a terminal -- command words stand in for the
//! device's keys and touch screen, and utterances go to the log. Type
//! `help` for the command list, `quit` to exit.

mod app_state;
mod catalog;
mod input;
mod screens;
mod storage;

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use app_state::{App, AppServices, InputResult};
use catalog::BuiltinCatalog;
use input::ConsoleCommand;
use storage::{RecordStore, TomlFileStore};
use voicegrid_speech::LogSpeech;

/// Frame cadence for the timer loop.
const FRAME_MS: u64 = 100;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::var("VOICEGRID_CONFIG")
        .unwrap_or_else(|_| "voicegrid.toml".to_string());
    let store = TomlFileStore::new(&config_path);
    let config = store.load()?.unwrap_or_default();
    log::info!(
        "Starting VoiceGrid ({} content kinds enabled, settings at {config_path})",
        config.autoplay.enabled_kinds.len(),
    );

    let services = AppServices {
        speech: voicegrid_speech::shared(LogSpeech::new()),
        catalog: BuiltinCatalog::new(),
        store,
        config,
        rng: fastrand::Rng::new(),
    };
    let mut app = App::new(services);

    // Stdin is read on a helper thread; the engine itself stays on this
    // thread and advances through ticks between commands.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{}", input::USAGE);

    let mut last_tick = Instant::now();
    'run: loop {
        match rx.recv_timeout(Duration::from_millis(FRAME_MS)) {
            Ok(line) => {
                for command in input::parse_line(&line) {
                    match command {
                        ConsoleCommand::Event(event) => {
                            if app.handle_event(&event) == InputResult::Quit {
                                break 'run;
                            }
                        },
                        ConsoleCommand::Help => println!("{}", input::USAGE),
                        ConsoleCommand::Unknown(word) => {
                            println!("unknown command: {word} (try `help`)");
                        },
                    }
                }
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {},
            Err(mpsc::RecvTimeoutError::Disconnected) => break 'run,
        }

        let dt_ms = last_tick.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        last_tick = Instant::now();
        app.tick(dt_ms);
    }

    app.shutdown();
    log::info!("VoiceGrid stopped");
    Ok(())
}
