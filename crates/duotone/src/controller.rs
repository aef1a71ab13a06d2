//! The theme controller: state synchronization between surface, store,
//! and OS scheme.
//!
//! One rule holds everywhere: the document's marker, the toggle control's
//! icon/label, and the persisted value (when one exists) always agree. The
//! controller enforces it across three event sources — pointer clicks, the
//! keyboard chord, and OS scheme changes — plus the startup path.
//!
//! Persistence marks intent. User-initiated changes (toggle) persist the
//! choice; inferred changes (startup sync, OS mirroring) deliberately do
//! not, so a user who never chose keeps following the OS.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use duotone::{
//!     DocumentSurface, ManualScheduler, MemoryStore, MemorySurface, MockScheme,
//!     ThemeController, ThemePreference,
//! };
//!
//! let surface = Arc::new(Mutex::new(MemorySurface::new()));
//! let controller = ThemeController::new(
//!     surface.clone(),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MockScheme::new(true)), // OS prefers dark
//!     Arc::new(ManualScheduler::new()),
//! );
//!
//! controller.start();
//! assert_eq!(
//!     surface.lock().unwrap().theme_marker(),
//!     ThemePreference::Dark
//! );
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::input::{KeyChord, Modifier, DEFAULT_TOGGLE_CHORD};
use crate::preference::ThemePreference;
use crate::scheduler::Scheduler;
use crate::scheme::SchemeProvider;
use crate::store::{persisted_theme, PreferenceStore, HOTKEY_HINT_KEY, THEME_KEY};
use crate::surface::DocumentSurface;

/// How long the background/text color transition stays engaged.
pub const TRANSITION_CLEAR: Duration = Duration::from_millis(500);

/// Delay before a spawned notification becomes visible, so the host's
/// opacity transition can engage.
pub const NOTIFICATION_REVEAL_DELAY: Duration = Duration::from_millis(10);

/// How long a notification stays visible before it starts fading.
pub const NOTIFICATION_VISIBLE_FOR: Duration = Duration::from_millis(2000);

/// Fade duration between hiding a notification and removing it.
pub const NOTIFICATION_FADE: Duration = Duration::from_millis(300);

/// Delay before the one-time hotkey hint is emitted.
pub const HOTKEY_HINT_DELAY: Duration = Duration::from_millis(3000);

/// Synchronizes theme state across the surface, the preference store, and
/// the OS scheme.
pub struct ThemeController {
    surface: Arc<Mutex<dyn DocumentSurface>>,
    store: Arc<dyn PreferenceStore>,
    scheme: Arc<dyn SchemeProvider>,
    scheduler: Arc<dyn Scheduler>,
    chord: KeyChord,
}

/// Syncs the toggle control to describe the action opposite the active
/// theme. Skipped on pages without a control.
fn sync_toggle_control(surface: &mut dyn DocumentSurface, active: ThemePreference) {
    if let Some(control) = surface.toggle_control() {
        control.set_icon(active.control_icon());
        control.set_label(active.control_label());
    }
}

impl ThemeController {
    /// Creates a controller over the given capabilities, with the default
    /// Alt+T toggle chord.
    pub fn new(
        surface: Arc<Mutex<dyn DocumentSurface>>,
        store: Arc<dyn PreferenceStore>,
        scheme: Arc<dyn SchemeProvider>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            surface,
            store,
            scheme,
            scheduler,
            chord: DEFAULT_TOGGLE_CHORD,
        }
    }

    /// Replaces the toggle chord, returning `self` for chaining.
    pub fn with_chord(mut self, chord: KeyChord) -> Self {
        self.chord = chord;
        self
    }

    /// The chord that triggers a toggle.
    pub fn chord(&self) -> KeyChord {
        self.chord
    }

    /// Resolves the theme to show, without side effects.
    ///
    /// Precedence: an explicit persisted choice wins; otherwise an OS dark
    /// preference maps to Dark; otherwise Light.
    pub fn detect_preferred_theme(&self) -> ThemePreference {
        match persisted_theme(&*self.store) {
            Some(theme) => theme,
            None if self.scheme.prefers_dark() => ThemePreference::Dark,
            None => ThemePreference::Light,
        }
    }

    /// Applies `theme` as a user decision: marker, control sync,
    /// persistence, and the color transition.
    ///
    /// On pages without a toggle control the visual sync is skipped but
    /// the marker and the persisted value still change.
    pub fn apply_theme(&self, theme: ThemePreference) {
        {
            let mut surface = self.surface.lock().unwrap();
            surface.set_theme_marker(theme);
            sync_toggle_control(&mut *surface, theme);
            surface.begin_color_transition();
        }
        self.store.set(THEME_KEY, theme.as_str());

        let surface = Arc::clone(&self.surface);
        self.scheduler.schedule(
            TRANSITION_CLEAR,
            Box::new(move || surface.lock().unwrap().end_color_transition()),
        );
    }

    /// Startup path: shows the resolved theme without persisting it and
    /// without the transition, since nothing changed by user action.
    ///
    /// Does nothing on pages without a toggle control.
    pub fn init_theme(&self) {
        let theme = self.detect_preferred_theme();
        let mut surface = self.surface.lock().unwrap();
        if surface.toggle_control().is_none() {
            return;
        }
        surface.set_theme_marker(theme);
        sync_toggle_control(&mut *surface, theme);
    }

    /// Flips to the opposite of the currently applied theme, via
    /// [`apply_theme`](Self::apply_theme).
    pub fn toggle_theme(&self) {
        let current = self.surface.lock().unwrap().theme_marker();
        self.apply_theme(current.opposite());
    }

    /// Subscribes to OS scheme changes for the lifetime of the provider.
    ///
    /// While no explicit choice is persisted, changes are mirrored onto
    /// the surface without persisting — the choice stays "unset" so future
    /// OS changes keep being honored. Once a choice exists, changes are
    /// ignored entirely.
    pub fn watch_system_theme(&self) {
        let surface = Arc::clone(&self.surface);
        let store = Arc::clone(&self.store);
        self.scheme.subscribe(Box::new(move |prefers_dark| {
            // Same rule as detect_preferred_theme: only a parseable value
            // counts as an explicit choice.
            if persisted_theme(&*store).is_some() {
                return;
            }
            let theme = if prefers_dark {
                ThemePreference::Dark
            } else {
                ThemePreference::Light
            };
            let mut surface = surface.lock().unwrap();
            surface.set_theme_marker(theme);
            sync_toggle_control(&mut *surface, theme);
        }));
    }

    /// Announces `theme` with a transient notification.
    ///
    /// Timeline: hidden on spawn, revealed after
    /// [`NOTIFICATION_REVEAL_DELAY`], hidden again after
    /// [`NOTIFICATION_VISIBLE_FOR`], removed [`NOTIFICATION_FADE`] later.
    /// Rapid toggles stack independent notifications; none are cancelled
    /// or replaced.
    pub fn show_notification(&self, theme: ThemePreference) {
        let id = self
            .surface
            .lock()
            .unwrap()
            .spawn_notification(theme.announcement());

        let surface = Arc::clone(&self.surface);
        self.scheduler.schedule(
            NOTIFICATION_REVEAL_DELAY,
            Box::new(move || surface.lock().unwrap().set_notification_visible(id, true)),
        );

        let surface = Arc::clone(&self.surface);
        let scheduler = Arc::clone(&self.scheduler);
        self.scheduler.schedule(
            NOTIFICATION_VISIBLE_FOR,
            Box::new(move || {
                surface.lock().unwrap().set_notification_visible(id, false);
                let surface = Arc::clone(&surface);
                scheduler.schedule(
                    NOTIFICATION_FADE,
                    Box::new(move || surface.lock().unwrap().remove_notification(id)),
                );
            }),
        );
    }

    /// Toggles and announces the theme the toggle produces.
    ///
    /// The announcement is derived from the marker captured immediately
    /// before the toggle, so it names the new state.
    pub fn toggle_theme_with_notification(&self) {
        let next = self.surface.lock().unwrap().theme_marker().opposite();
        self.toggle_theme();
        self.show_notification(next);
    }

    /// Pointer-click trigger on the toggle control.
    pub fn handle_click(&self) {
        self.toggle_theme_with_notification();
    }

    /// Keyboard trigger. Returns true when the chord matched and the host
    /// should suppress the key's default action.
    pub fn handle_key(&self, modifier: Option<Modifier>, key: char) -> bool {
        if !self.chord.matches(modifier, key) {
            return false;
        }
        self.toggle_theme_with_notification();
        true
    }

    /// Startup wiring: initializes the theme, starts watching the OS
    /// scheme, and schedules the one-time hotkey hint.
    pub fn start(&self) {
        self.init_theme();
        self.watch_system_theme();
        self.schedule_hotkey_hint();
    }

    /// Emits the hotkey hint once per store, [`HOTKEY_HINT_DELAY`] after
    /// startup. The flag is written when the hint fires, and startups that
    /// find the flag set schedule nothing.
    fn schedule_hotkey_hint(&self) {
        if self.store.get(HOTKEY_HINT_KEY).is_some() {
            return;
        }
        let store = Arc::clone(&self.store);
        let chord = self.chord;
        self.scheduler.schedule(
            HOTKEY_HINT_DELAY,
            Box::new(move || {
                tracing::info!(
                    "💡 Подсказка: используйте {chord} для быстрого переключения темы"
                );
                store.set(HOTKEY_HINT_KEY, "true");
            }),
        );
    }
}
