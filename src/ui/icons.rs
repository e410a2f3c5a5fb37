//! Shared UI icons.
//!
//! Every icon carries an ASCII fallback for terminals without emoji support.

use console::Emoji;

// Badge status
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[FAIL]");
pub static RUNNING: Emoji<'_, '_> = Emoji("🔄 ", "[RUN]");
pub static QUEUED: Emoji<'_, '_> = Emoji("⏳ ", "[WAIT]");
pub static QUESTION: Emoji<'_, '_> = Emoji("❔ ", "[?]");

// Coverage
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "[COV]");

// Board
pub static COLLAPSED: Emoji<'_, '_> = Emoji("▸ ", "+");
pub static EXPANDED: Emoji<'_, '_> = Emoji("▾ ", "-");
pub static CARD: Emoji<'_, '_> = Emoji("• ", "*");
