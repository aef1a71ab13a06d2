//! The displayed document, abstracted behind a capability trait.
//!
//! The controller never touches a real rendering tree. Everything it needs
//! from the document — the dark-mode marker, the toggle control's icon and
//! label, the color transition flag, and transient notifications — goes
//! through [`DocumentSurface`].
//!
//! Presence of the toggle control is an explicit branch:
//! [`toggle_control`](DocumentSurface::toggle_control) returns `None` on
//! pages without one, and callers skip the visual sync while the marker and
//! persisted value still change.
//!
//! [`MemorySurface`] is the bundled implementation: a plain in-memory
//! record of the surface state, inspectable from tests and from the demo
//! CLI.

use crate::preference::ThemePreference;

/// Identifies a spawned notification element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

/// The toggle control's mutable visual state.
pub trait ToggleControl {
    /// Sets the icon glyph.
    fn set_icon(&mut self, glyph: &str);

    /// Sets the text label.
    fn set_label(&mut self, text: &str);
}

/// Capability trait for the displayed document.
pub trait DocumentSurface: Send {
    /// The currently applied theme, read from the document's marker.
    ///
    /// An absent marker reads as [`ThemePreference::Light`].
    fn theme_marker(&self) -> ThemePreference;

    /// Sets or clears the dark-mode marker.
    fn set_theme_marker(&mut self, theme: ThemePreference);

    /// Returns the toggle control, or `None` if the page has none.
    fn toggle_control(&mut self) -> Option<&mut dyn ToggleControl>;

    /// Starts the bounded background/text color transition.
    fn begin_color_transition(&mut self);

    /// Clears the transition so it does not affect later style changes.
    fn end_color_transition(&mut self);

    /// Creates a hidden notification element with the given text.
    fn spawn_notification(&mut self, text: &str) -> NotificationId;

    /// Shows or hides a notification. Unknown ids are ignored.
    fn set_notification_visible(&mut self, id: NotificationId, visible: bool);

    /// Removes a notification element. Removing an id that is already
    /// gone is a no-op, so cleanup can race with other mutation safely.
    fn remove_notification(&mut self, id: NotificationId);
}

/// A notification element on a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    text: String,
    visible: bool,
}

impl Notification {
    /// The notification's announcement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the notification is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ControlState {
    icon: String,
    label: String,
}

impl ToggleControl for ControlState {
    fn set_icon(&mut self, glyph: &str) {
        self.icon = glyph.to_string();
    }

    fn set_label(&mut self, text: &str) {
        self.label = text.to_string();
    }
}

/// In-memory document surface.
///
/// Records exactly what a host renderer would be told to display, so tests
/// assert on surface state instead of on controller internals.
///
/// # Example
///
/// ```rust
/// use duotone::{DocumentSurface, MemorySurface, ThemePreference};
///
/// let mut surface = MemorySurface::new();
/// assert_eq!(surface.theme_marker(), ThemePreference::Light);
///
/// surface.set_theme_marker(ThemePreference::Dark);
/// assert_eq!(surface.theme_marker(), ThemePreference::Dark);
/// ```
#[derive(Debug)]
pub struct MemorySurface {
    dark_marker: bool,
    control: Option<ControlState>,
    transition_active: bool,
    next_notification: u64,
    notifications: Vec<Notification>,
}

impl MemorySurface {
    /// Creates a surface with a toggle control present.
    pub fn new() -> Self {
        Self {
            dark_marker: false,
            control: Some(ControlState::default()),
            transition_active: false,
            next_notification: 0,
            notifications: Vec::new(),
        }
    }

    /// Creates a surface for a page without a toggle control.
    pub fn without_toggle_control() -> Self {
        Self {
            control: None,
            ..Self::new()
        }
    }

    /// The toggle control's current icon glyph, if a control exists.
    pub fn toggle_icon(&self) -> Option<&str> {
        self.control.as_ref().map(|control| control.icon.as_str())
    }

    /// The toggle control's current label, if a control exists.
    pub fn toggle_label(&self) -> Option<&str> {
        self.control.as_ref().map(|control| control.label.as_str())
    }

    /// Whether the color transition is currently engaged.
    pub fn transition_active(&self) -> bool {
        self.transition_active
    }

    /// All notification elements currently attached, in spawn order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Texts of the currently visible notifications, in spawn order.
    pub fn visible_notifications(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter(|n| n.visible)
            .map(|n| n.text.as_str())
            .collect()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSurface for MemorySurface {
    fn theme_marker(&self) -> ThemePreference {
        if self.dark_marker {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    fn set_theme_marker(&mut self, theme: ThemePreference) {
        self.dark_marker = theme == ThemePreference::Dark;
    }

    fn toggle_control(&mut self) -> Option<&mut dyn ToggleControl> {
        self.control
            .as_mut()
            .map(|control| control as &mut dyn ToggleControl)
    }

    fn begin_color_transition(&mut self) {
        self.transition_active = true;
    }

    fn end_color_transition(&mut self) {
        self.transition_active = false;
    }

    fn spawn_notification(&mut self, text: &str) -> NotificationId {
        self.next_notification += 1;
        let id = NotificationId(self.next_notification);
        self.notifications.push(Notification {
            id,
            text: text.to_string(),
            visible: false,
        });
        id
    }

    fn set_notification_visible(&mut self, id: NotificationId, visible: bool) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.visible = visible;
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|n| n.id != id);
    }
}
