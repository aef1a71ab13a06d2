//! Two-theme preference controller with persistence and OS mirroring.
//!
//! `duotone` switches a displayed document between light and dark themes,
//! persists the user's explicit choice, mirrors operating-system scheme
//! changes while no explicit choice exists, and announces each toggle with
//! a transient notification.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use duotone::{
//!     DocumentSurface, ManualScheduler, MemoryStore, MemorySurface, Modifier,
//!     MockScheme, ThemeController, ThemePreference,
//! };
//!
//! let surface = Arc::new(Mutex::new(MemorySurface::new()));
//! let scheduler = Arc::new(ManualScheduler::new());
//! let controller = ThemeController::new(
//!     surface.clone(),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MockScheme::new(false)),
//!     scheduler.clone(),
//! );
//!
//! controller.start();
//! controller.handle_key(Some(Modifier::Alt), 't'); // toggle shortcut
//!
//! assert_eq!(surface.lock().unwrap().theme_marker(), ThemePreference::Dark);
//! ```
//!
//! # Architecture
//!
//! The controller owns no ambient state; every dependency is an injected
//! capability:
//!
//! ```text
//! ThemeController
//! ├── DocumentSurface   → marker, toggle control, notifications
//! ├── PreferenceStore   → "theme" / "hotkeyHintShown" keys
//! ├── SchemeProvider    → OS "prefers dark" query + change subscription
//! └── Scheduler         → transition clear, notification timeline, hint
//! ```
//!
//! Real hosts implement [`DocumentSurface`] over their rendering tree and
//! [`Scheduler`] over their event loop; the bundled [`MemorySurface`],
//! [`FileStore`], [`SystemScheme`], and [`ThreadScheduler`] cover hosts
//! that have neither.
//!
//! # Testing
//!
//! Every capability ships a deterministic implementation:
//! [`MemorySurface`] and [`MemoryStore`] are inspectable, [`MockScheme`]
//! scripts OS changes, and [`ManualScheduler`] drives time explicitly:
//!
//! ```rust
//! use duotone::{ManualScheduler, Scheduler};
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! scheduler.schedule(Duration::from_secs(3), Box::new(|| {}));
//! scheduler.advance(Duration::from_secs(3)); // fires now
//! ```

mod controller;
mod error;
mod input;
mod preference;
mod scheduler;
mod scheme;
mod store;
mod surface;

pub use controller::{
    ThemeController, HOTKEY_HINT_DELAY, NOTIFICATION_FADE, NOTIFICATION_REVEAL_DELAY,
    NOTIFICATION_VISIBLE_FOR, TRANSITION_CLEAR,
};
pub use error::StoreError;
pub use input::{KeyChord, Modifier, DEFAULT_TOGGLE_CHORD};
pub use preference::{ParsePreferenceError, ThemePreference};
pub use scheduler::{ManualScheduler, Scheduler, ThreadScheduler, TimerCallback, TimerHandle};
pub use scheme::{
    system_or_inert, InertScheme, MockScheme, SchemeListener, SchemeProvider, SubscriptionId,
    SystemScheme,
};
pub use store::{
    persisted_theme, FileStore, MemoryStore, PreferenceStore, HOTKEY_HINT_KEY, THEME_KEY,
};
pub use surface::{DocumentSurface, MemorySurface, Notification, NotificationId, ToggleControl};
