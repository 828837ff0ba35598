use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use qaktus_core::{update, AppState};
use qaktus_logging::{qaktus_info, qaktus_warn};

use super::clipboard::SystemClipboard;
use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, AppEvent};
use super::ui::render;

pub fn run_app() -> anyhow::Result<()> {
    let path = config::config_path();
    let (config, config_error) = match config::load(&path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        qaktus_warn!("Using default settings: {}", err);
        eprintln!("Warning: {err}; using defaults");
    }
    qaktus_info!("Starting with public base {}", config.public_base_url);

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let mut runner = EffectRunner::new(
        &config.client_settings(),
        Box::new(SystemClipboard::default()),
        app_tx.clone(),
    )?;
    spawn_input_reader(app_tx);

    let mut state = AppState::with_public_base(config.public_base_url.clone());
    let mut stdout = io::stdout();
    write_screen(&mut stdout, &render::render(&state.view()))?;

    while let Ok(event) = app_rx.recv() {
        match event {
            AppEvent::Quit => break,
            AppEvent::Help => write_screen(&mut stdout, commands::HELP)?,
            AppEvent::Notice(text) => write_screen(&mut stdout, &text)?,
            AppEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    write_screen(&mut stdout, &render::render(&state.view()))?;
                }
            }
        }
    }

    qaktus_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if let Some(event) = commands::parse_command(&line) {
                if app_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = app_tx.send(AppEvent::Quit);
    });
}

fn write_screen(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.trim_end())?;
    writeln!(out)?;
    out.flush()
}
