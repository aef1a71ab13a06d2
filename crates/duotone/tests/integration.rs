//! End-to-end scenarios across startup, input triggers, persistence, and
//! OS scheme mirroring.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use duotone::{
    DocumentSurface, FileStore, ManualScheduler, MemoryStore, MemorySurface, MockScheme,
    Modifier, PreferenceStore, ThemeController, ThemePreference, HOTKEY_HINT_KEY,
    NOTIFICATION_FADE, NOTIFICATION_REVEAL_DELAY, NOTIFICATION_VISIBLE_FOR, THEME_KEY,
};

struct Session {
    surface: Arc<Mutex<MemorySurface>>,
    store: Arc<dyn PreferenceStore>,
    scheme: Arc<MockScheme>,
    scheduler: Arc<ManualScheduler>,
    controller: ThemeController,
}

/// Boots a fresh page against an existing store, like a browser reload.
fn start_session(store: Arc<dyn PreferenceStore>, os_prefers_dark: bool) -> Session {
    let surface = Arc::new(Mutex::new(MemorySurface::new()));
    let scheme = Arc::new(MockScheme::new(os_prefers_dark));
    let scheduler = Arc::new(ManualScheduler::new());
    let controller = ThemeController::new(
        surface.clone(),
        store.clone(),
        scheme.clone(),
        scheduler.clone(),
    );
    controller.start();
    Session {
        surface,
        store,
        scheme,
        scheduler,
        controller,
    }
}

#[test]
fn empty_store_with_dark_os_then_hotkey_toggle() {
    // Persisted store empty, OS prefers dark.
    let session = start_session(Arc::new(MemoryStore::new()), true);

    // Startup: dark marker, light-theme affordance on the control, and no
    // persisted value since the state was inferred.
    {
        let surface = session.surface.lock().unwrap();
        assert_eq!(surface.theme_marker(), ThemePreference::Dark);
        assert_eq!(surface.toggle_icon(), Some("☀️"));
        assert_eq!(surface.toggle_label(), Some("Светлая тема"));
    }
    assert_eq!(session.store.get(THEME_KEY), None);

    // User presses the keyboard chord.
    assert!(session.controller.handle_key(Some(Modifier::Alt), 't'));

    {
        let surface = session.surface.lock().unwrap();
        assert_eq!(surface.theme_marker(), ThemePreference::Light);
        assert_eq!(surface.toggle_icon(), Some("🌙"));
        assert_eq!(surface.toggle_label(), Some("Тёмная тема"));
    }
    assert_eq!(session.store.get(THEME_KEY), Some("light".to_string()));

    // The notification appears and disappears within ~2.3s.
    session.scheduler.advance(NOTIFICATION_REVEAL_DELAY);
    assert_eq!(
        session.surface.lock().unwrap().visible_notifications(),
        vec!["Светлая тема включена"]
    );

    session
        .scheduler
        .advance(NOTIFICATION_VISIBLE_FOR + NOTIFICATION_FADE);
    assert!(session.surface.lock().unwrap().notifications().is_empty());
}

#[test]
fn os_changes_ignored_after_explicit_choice() {
    let session = start_session(Arc::new(MemoryStore::new()), false);

    // No choice yet: the surface follows the OS.
    session.scheme.set_prefers_dark(true);
    assert_eq!(
        session.surface.lock().unwrap().theme_marker(),
        ThemePreference::Dark
    );
    assert_eq!(session.store.get(THEME_KEY), None);

    // Explicit choice: light.
    session.controller.handle_click();
    assert_eq!(session.store.get(THEME_KEY), Some("light".to_string()));

    // Further OS flips change nothing.
    session.scheme.set_prefers_dark(false);
    session.scheme.set_prefers_dark(true);
    assert_eq!(
        session.surface.lock().unwrap().theme_marker(),
        ThemePreference::Light
    );
}

#[test]
fn explicit_choice_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let store: Arc<dyn PreferenceStore> = Arc::new(FileStore::open(&path).unwrap());
    let session = start_session(store, false);
    session.controller.handle_click(); // -> dark
    drop(session);

    // New page, OS now prefers light; the explicit choice still wins.
    let store: Arc<dyn PreferenceStore> = Arc::new(FileStore::open(&path).unwrap());
    let session = start_session(store, false);
    assert_eq!(
        session.surface.lock().unwrap().theme_marker(),
        ThemePreference::Dark
    );
}

#[test]
fn hint_fires_on_first_startup_only() {
    let store = Arc::new(MemoryStore::new());

    let first = start_session(store.clone(), false);
    assert_eq!(first.store.get(HOTKEY_HINT_KEY), None);
    first.scheduler.advance(Duration::from_secs(3));
    assert_eq!(first.store.get(HOTKEY_HINT_KEY), Some("true".to_string()));
    drop(first);

    // Second startup with the flag set schedules no hint timer.
    let second = start_session(store, false);
    assert_eq!(second.scheduler.pending(), 0);
}

#[test]
fn rapid_toggles_keep_marker_store_and_label_in_agreement() {
    let session = start_session(Arc::new(MemoryStore::new()), false);

    for _ in 0..5 {
        session.controller.handle_click();
        let surface = session.surface.lock().unwrap();
        let applied = surface.theme_marker();
        assert_eq!(surface.toggle_label(), Some(applied.opposite().title()));
        drop(surface);
        assert_eq!(
            session.store.get(THEME_KEY),
            Some(applied.as_str().to_string())
        );
    }

    // Five overlapping notifications, all independently cleaned up.
    assert_eq!(session.surface.lock().unwrap().notifications().len(), 5);
    session
        .scheduler
        .advance(NOTIFICATION_VISIBLE_FOR + NOTIFICATION_FADE);
    assert!(session.surface.lock().unwrap().notifications().is_empty());
}
