use dioxus::prelude::{Key, Modifiers};
use services::NavKey;

/// Translate a platform key event into the session's key vocabulary.
///
/// Chorded presses (Ctrl, Alt, Meta) are left to the platform.
pub(super) fn nav_key(key: &Key, modifiers: Modifiers) -> NavKey {
    if modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::META) {
        return NavKey::Other;
    }
    match key {
        Key::ArrowLeft => NavKey::ArrowLeft,
        Key::ArrowRight => NavKey::ArrowRight,
        Key::Enter => NavKey::Enter,
        Key::Character(value) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => NavKey::Char(c),
                _ => NavKey::Other,
            }
        }
        _ => NavKey::Other,
    }
}
