//! Shared UI icons and emojis.
//!
//! Each icon falls back to plain ASCII on terminals without emoji support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Cues
pub static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[!!]");
pub static SIREN: Emoji<'_, '_> = Emoji("🚨 ", "[!]");

// Report sections
pub static ARROW: Emoji<'_, '_> = Emoji("➔", "->");
pub static BUG: Emoji<'_, '_> = Emoji("🐞 ", "");
pub static TRANSLATE: Emoji<'_, '_> = Emoji("🌐 ", "");
