mod display;
mod keys;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use keys::{Action, KeyRelay};
use space_invader::background::Background;
use space_invader::config::GameConfig;
use space_invader::error::GameResult;
use space_invader::raster::Canvas;
use space_invader::render::render_frame;
use space_invader::scheduler::{Clock, FramePacer, MonotonicClock};
use space_invader::session::Session;

#[derive(Parser)]
#[command(name = "space_invader")]
#[command(about = "Space-Invaders-style shooter for the terminal")]
struct Args {
    /// TOML file overriding gameplay constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Binary PPM (P6) drawn behind the playfield
    #[arg(long)]
    background: Option<PathBuf>,

    /// Where to write logs (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: PathBuf) -> GameResult<()> {
    let file = File::create(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: drain pending terminal events into the session's input
/// staging, run the scheduled tick (if any), render, present, then sleep
/// for the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    background: &mut Background,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let clock = MonotonicClock::new();
    let config = session.config().clone();
    let mut pacer = FramePacer::new(Duration::from_millis(config.frame_interval_ms));
    let mut canvas = Canvas::new(config.width as u32, config.height as u32);
    let mut relay = KeyRelay::new(!keyboard_enhanced);
    let mut frame: u64 = 0;

    loop {
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut actions = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key_event) = ev {
                actions.extend(relay.translate(key_event, frame));
            }
        }
        actions.extend(relay.expire(frame));

        for action in actions {
            match action {
                Action::Quit => {
                    session.teardown();
                    return Ok(());
                }
                Action::Start => {
                    if !session.is_playing() {
                        session.start();
                    }
                }
                Action::Down(key) => session.key_down(key, clock.now_ms()),
                Action::Up(key) => session.key_up(key),
            }
        }

        session.run_frame();

        let image = background.poll();
        render_frame(&mut canvas, session.state(), image);
        display::present(out, &canvas, session)?;

        if !session.is_playing() {
            for action in relay.release_all() {
                if let Action::Up(key) = action {
                    session.key_up(key);
                }
            }
        }

        pacer.wait();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> GameResult<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("space_invader.log"));
    init_logging(log_path)?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.background.is_some() {
        config.background = args.background;
    }
    config.validate()?;

    let mut background = match &config.background {
        Some(path) => Background::spawn(path.clone()),
        None => Background::none(),
    };
    let mut session = Session::new(config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back to
    // synthesised releases.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut session, &mut background, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "game loop failed");
    }
    result?;
    Ok(())
}
