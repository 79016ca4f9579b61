use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

use tasktop::app::{App, check_terminal_size};
use tasktop::config::{Config, load_config, load_config_from_path};
use tasktop::message::{self, Mailbox};
use tasktop::sampler;
use tasktop::sampler::capacity::CapacitySampler;
use tasktop::sampler::load::LoadSampler;
use tasktop::sampler::tasklist::TasklistSampler;
use tasktop::system::collector::CommandCollector;
use tasktop::ui;

/// Idle sleep between loop iterations when the mailbox is empty; keeps input
/// and resize checks responsive without repainting.
const IDLE_SLEEP: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "tasktop",
    about = "Monitors host processes, processor load, and memory capacity"
)]
struct Cli {
    /// Sort the process table by memory usage, descending
    #[arg(short = 'm', long)]
    memory: bool,

    /// Sort the process table by cpu time (reserved, not yet implemented)
    #[arg(short = 'c', long)]
    cpu: bool,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path, overriding the config
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    let _log_guard = init_logging(&config.general.log_file)?;

    if cli.cpu {
        tracing::warn!("cpu time sort is not implemented; --cpu ignored");
    }

    let (tx, rx) = message::mailbox();
    let stop = CancellationToken::new();
    let handles = vec![
        sampler::spawn(
            TasklistSampler::new(
                CommandCollector::tasklist(),
                config.samplers.tasklist_interval(),
                cli.memory,
            ),
            tx.clone(),
            stop.clone(),
        ),
        sampler::spawn(
            LoadSampler::new(CommandCollector::cpu(), config.samplers.load_interval()),
            tx.clone(),
            stop.clone(),
        ),
        sampler::spawn(
            CapacitySampler::new(
                CommandCollector::physical_memory(),
                config.samplers.capacity_interval(),
            ),
            tx.clone(),
            stop.clone(),
        ),
    ];
    drop(tx);

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, rx).await;

    ratatui::restore();

    stop.cancel();
    for handle in handles {
        let _ = handle.await;
    }
    info!("shut down cleanly");

    result
}

/// The render loop: size check, input poll, mailbox drain, repaint. The loop
/// owns all screen state; samplers only ever reach it through the mailbox.
async fn run(terminal: &mut ratatui::DefaultTerminal, mut mailbox: Mailbox) -> Result<()> {
    let mut app = App::new();
    let mut first_paint = true;

    while app.running {
        let size = terminal.size()?;
        check_terminal_size(size.width, size.height)?;

        while app.running && event::poll(Duration::ZERO)? {
            if let CrosstermEvent::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                let action = app.map_key(key);
                app.dispatch(action);
            }
        }
        if !app.running {
            break;
        }

        // Drain every queued message before painting so a burst of sampler
        // publishes costs one repaint.
        let mut drained = false;
        while let Ok(msg) = mailbox.try_recv() {
            app.apply(msg);
            drained = true;
        }

        if drained || first_paint {
            terminal.draw(|frame| ui::draw(frame, &app.view))?;
            first_paint = false;
        } else {
            tokio::time::sleep(IDLE_SLEEP).await;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref path) = cli.log_file {
        config.general.log_file = path.clone();
    }

    config
}

/// Opens the log file fresh for this run and installs the global subscriber.
/// The returned guard flushes the background writer on drop.
fn init_logging(path: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::File::create(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(guard)
}
