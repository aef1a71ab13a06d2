//! Demonstration CLI for the duotone controller.
//!
//! Wires the library to a JSON file store and an in-memory surface, then
//! prints what a real page would display. The notification timeline runs
//! on a manual scheduler so each step can be shown as it happens.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;

use duotone::{
    system_or_inert, DocumentSurface, FileStore, ManualScheduler, MemorySurface, PreferenceStore,
    ThemeController, ThemePreference, HOTKEY_HINT_DELAY, HOTKEY_HINT_KEY, NOTIFICATION_FADE,
    NOTIFICATION_REVEAL_DELAY, NOTIFICATION_VISIBLE_FOR, THEME_KEY,
};

#[derive(Parser)]
#[command(name = "duoto", about = "Toggle between light and dark themes")]
struct Cli {
    /// Path to the preference store.
    #[arg(long, default_value = ".duotone.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current theme and where it came from.
    Status,
    /// Toggle the theme and walk through the notification timeline.
    Toggle,
    /// Forget the explicit choice and the hotkey hint flag.
    Reset,
}

struct App {
    surface: Arc<Mutex<MemorySurface>>,
    store: Arc<FileStore>,
    scheduler: Arc<ManualScheduler>,
    controller: ThemeController,
}

impl App {
    fn open(path: &PathBuf) -> anyhow::Result<Self> {
        let store = Arc::new(
            FileStore::open(path)
                .with_context(|| format!("Could not open store at {}", path.display()))?,
        );
        let surface = Arc::new(Mutex::new(MemorySurface::new()));
        let scheduler = Arc::new(ManualScheduler::new());
        let controller = ThemeController::new(
            surface.clone(),
            store.clone(),
            system_or_inert(),
            scheduler.clone(),
        );
        Ok(Self {
            surface,
            store,
            scheduler,
            controller,
        })
    }

    fn print_surface(&self) {
        let surface = self.surface.lock().unwrap();
        let theme = surface.theme_marker();
        let swatch = match theme {
            ThemePreference::Light => style(theme.title()).black().on_white(),
            ThemePreference::Dark => style(theme.title()).white().on_black(),
        };
        println!("  {} {}", swatch, style(format!("({theme})")).dim());
        if let (Some(icon), Some(label)) = (surface.toggle_icon(), surface.toggle_label()) {
            println!("  Кнопка: {icon} {label}");
        }
    }

    fn status(&self) {
        self.controller.init_theme();
        self.print_surface();

        let source = match self.store.get(THEME_KEY) {
            Some(_) => "выбрана пользователем",
            None => "определена системой",
        };
        println!("  {}", style(source).dim());
    }

    fn toggle(&self) {
        self.controller.start();
        self.controller.handle_click();
        self.print_surface();

        self.scheduler.advance(NOTIFICATION_REVEAL_DELAY);
        for text in self.surface.lock().unwrap().visible_notifications() {
            println!("  {}", style(text).bold());
        }

        self.scheduler
            .advance(NOTIFICATION_VISIBLE_FOR + NOTIFICATION_FADE);
        println!("  {}", style("уведомление скрыто").dim());

        // First run only: lets the one-time hotkey hint fire.
        self.scheduler.advance(HOTKEY_HINT_DELAY);
    }

    fn reset(&self) {
        self.store.remove(THEME_KEY);
        self.store.remove(HOTKEY_HINT_KEY);
        println!("  {}", style("настройки сброшены").dim());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let app = App::open(&cli.store)?;

    match cli.command {
        Command::Status => app.status(),
        Command::Toggle => app.toggle(),
        Command::Reset => app.reset(),
    }

    Ok(())
}
