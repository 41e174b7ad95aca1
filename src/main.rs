//! vellum: section and panel navigation for markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use vellum::app_state::{AppState, FileMode, View};
use vellum::config::{Config, Layout};
use vellum::input;
use vellum::snapshot::ViewSnapshot;

#[derive(Parser)]
#[command(name = "vellum")]
#[command(about = "Section and panel navigation for markdown documents", long_about = None)]
struct Args {
    /// Documents or directories to view
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Config file, or a directory holding config.toml (searched for when not given)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Page layout
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// Title of the section to turn into a dropdown
    #[arg(long, value_name = "TITLE")]
    dropdown: Option<String>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Replay a saved view snapshot when its document is opened
    #[arg(long, value_name = "FILE")]
    restore: Option<PathBuf>,

    /// Print the initial view of each document as JSON instead of starting the viewer
    #[arg(long)]
    dump: bool,

    /// Write logs to this file while the viewer runs
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> vellum::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref(), args.dump)?;

    let mut cfg = Config::load(args.config.as_deref())?;

    // Override config with command line args
    if let Some(layout) = args.layout {
        cfg.layout = layout.to_string();
    }
    if let Some(title) = args.dropdown {
        cfg.dropdown_section = title;
    }
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let pending = args
        .restore
        .as_deref()
        .map(ViewSnapshot::load)
        .transpose()?;

    let mut state = AppState::new(documents, cfg);

    if args.dump {
        for index in 0..state.files.len() {
            state.current_file_index = index;
            open_document(&mut state, pending.as_ref())?;
            if let Some(snapshot) = state.snapshot() {
                println!("{}", snapshot.to_json()?);
            }
        }
        return Ok(());
    }

    if state.file_mode == FileMode::Single {
        open_document(&mut state, pending.as_ref())?;
    }

    run_tui(state, pending.as_ref())
}

fn init_logging(log_file: Option<&PathBuf>, dump: bool) -> vellum::Result<()> {
    let filter =
        || EnvFilter::try_from_env("VELLUM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    // The viewer owns the terminal, so logs only go to a file unless we are dumping.
    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if dump {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

fn open_document(state: &mut AppState, pending: Option<&ViewSnapshot>) -> vellum::Result<()> {
    state.open_selected()?;
    if let Some(snapshot) = pending.filter(|s| s.document == state.document_name) {
        state.restore(snapshot);
    }
    Ok(())
}

fn run_tui(mut app: AppState, pending: Option<&ViewSnapshot>) -> vellum::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, pending);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else if let Some(snapshot) = app.snapshot() {
        println!("{}", snapshot.to_json()?);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    pending: Option<&ViewSnapshot>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| vellum::ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.current_view {
            View::FileList => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up => {
                    app.current_file_index = app.current_file_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    if app.current_file_index + 1 < app.files.len() {
                        app.current_file_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Err(e) = open_document(app, pending) {
                        app.message = Some(format!("Error opening: {e}"));
                    }
                }
                _ => {}
            },
            View::Page => match key.code {
                KeyCode::Char('q') => {
                    if !app.close() {
                        return Ok(());
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => app.focus_prev(),
                KeyCode::Right | KeyCode::Char('l') => app.focus_next(),
                KeyCode::Enter => app.activate_focused(),
                KeyCode::Char(c @ '1'..='9') => {
                    // Digits jump straight to a nav control
                    let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                    if index.is_some_and(|i| app.focus_control(i - 1)) {
                        app.activate_focused();
                    }
                }
                KeyCode::Char(' ' | 't') => app.toggle_header(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll(-1),
                KeyCode::Down | KeyCode::Char('j') => app.scroll(1),
                KeyCode::PageUp => app.scroll(-10),
                KeyCode::PageDown => app.scroll(10),
                KeyCode::Home => app.scroll(i32::MIN),
                _ => {}
            },
            View::Dropdown => match key.code {
                KeyCode::Up | KeyCode::Char('k') => app.dropdown_up(),
                KeyCode::Down | KeyCode::Char('j') => app.dropdown_down(),
                KeyCode::Enter => app.choose_dropdown(),
                KeyCode::Esc | KeyCode::Char('q') => app.close_dropdown(),
                _ => {}
            },
        }
    }
}
