//! Plain-text rendering of structures and progress.

use std::fmt::Write;
use waypost_core::Structure;
use waypost_progress::ProgressTracker;

/// Full tree of a structure, with every step prompt.
pub fn structure_tree(structure: &Structure) -> String {
    let mut out = String::new();
    for block in structure.blocks() {
        let _ = writeln!(out, "{} {}", block.marker, block.name);
        for module in &block.modules {
            let _ = writeln!(out, "  {}", module.name);
            for card in &module.cards {
                let _ = writeln!(out, "    - {}", card.title);
                for (i, step) in card.steps.iter().enumerate() {
                    let _ = writeln!(out, "        {}. {}", i + 1, step);
                }
            }
        }
    }
    out
}

/// Text progress bar, `width` cells wide.
pub fn bar(percentage: f32, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Numbered block list with progress.
pub fn block_list(tracker: &ProgressTracker) -> String {
    let snapshot = tracker.snapshot();
    let mut out = String::new();
    for (i, (block, (_, progress))) in tracker
        .structure()
        .blocks()
        .iter()
        .zip(&snapshot.blocks)
        .enumerate()
    {
        let _ = writeln!(
            out,
            "{:>2}. {} {} {} {:.0}% ({}/{})",
            i + 1,
            block.marker,
            block.name,
            bar(progress.percentage, 10),
            progress.percentage,
            progress.completed_cards,
            progress.total_cards
        );
    }
    let _ = write!(
        out,
        "Overall {} {:.0}%",
        bar(snapshot.overall, 20),
        snapshot.overall
    );
    out
}

/// The card under the cursor, its current step and any answer.
pub fn current_card(tracker: &ProgressTracker) -> Option<String> {
    let block = tracker.selected_block()?;
    let module = tracker.selected_module()?;
    let card = tracker.current_card()?;
    let index = tracker.cursor().card;
    let step = tracker.current_step_index()?;
    let done = tracker
        .is_done(&block.name, &module.name, index)
        .unwrap_or(false);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} › {} › {}{}",
        block.marker,
        block.name,
        module.name,
        card.title,
        if done { " ✅" } else { "" }
    );
    let _ = write!(
        out,
        "Step {}/{}: {}",
        step + 1,
        card.steps.len(),
        card.step(step).unwrap_or_default()
    );
    if let Ok(Some(answer)) = tracker.answer(&block.name, &module.name, index, step) {
        let _ = write!(out, "\n> {}", answer);
    }
    Some(out)
}
