//! CLI progress display utilities
//!
//! Step indicators with emojis for the pipeline phases.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::HumanDuration;

use crate::operations::{OpPhase, OpProgress};

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Document - for table operations
pub static DOCUMENT: Emoji<'_, '_> = Emoji("📄 ", "");
/// Gear - for merge operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/3] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

fn phase_emoji(phase: OpPhase) -> Emoji<'static, 'static> {
    match phase {
        OpPhase::ReadingInput | OpPhase::Scanning => LOOKING_GLASS,
        OpPhase::LoadingTable => DOCUMENT,
        OpPhase::Merging => GEAR,
        OpPhase::WritingOutput => DISK,
        OpPhase::Complete => SPARKLE,
    }
}

/// Progress callback printing one step line per phase
///
/// The `Complete` phase is skipped; callers print their own summary.
pub fn print_progress(progress: &OpProgress) {
    if progress.phase == OpPhase::Complete {
        return;
    }
    print_step(
        progress.current,
        progress.total,
        phase_emoji(progress.phase),
        &format!("{}...", progress.describe().trim_end_matches("...")),
    );
}
