//! Progress tracking service.
//!
//! [`ProgressTracker`] owns one session: the structure, its completion
//! table, a step cursor per card, the answers typed so far and the
//! navigation cursor. Every operation validates first and mutates after,
//! so a rejected call leaves the tracker untouched.

use crate::completion::{aligned, BlockProgress, CompletionState};
use crate::snapshot::{CardRecord, ProgressSnapshot, SessionExport};
use std::collections::HashMap;
use tracing::{debug, info};
use waypost_core::{Block, Card, Module, Result, SessionId, Structure, TrackerError};

/// Where the user currently is.
///
/// `card` is only meaningful while a module is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Selected block position
    pub block: Option<usize>,

    /// Selected module position within the block
    pub module: Option<usize>,

    /// Selected card index within the module
    pub card: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CardAddr {
    block: usize,
    module: usize,
    card: usize,
}

/// Tracks navigation and completion for one session.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    session: SessionId,
    structure: Structure,
    completion: CompletionState,
    steps: Vec<Vec<Vec<usize>>>,
    answers: HashMap<(CardAddr, usize), String>,
    cursor: Cursor,
}

impl ProgressTracker {
    /// Start a session over a structure.
    pub fn new(structure: Structure) -> Self {
        let session = SessionId::new();
        debug!(
            "Starting session {} ({} blocks, {} cards)",
            session,
            structure.blocks().len(),
            structure.card_count()
        );
        Self {
            session,
            completion: CompletionState::new(&structure),
            steps: aligned(&structure, 0),
            answers: HashMap::new(),
            cursor: Cursor::default(),
            structure,
        }
    }

    /// Session identifier.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The structure being tracked.
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Completion flags.
    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    /// Navigation cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    // === Navigation ===

    /// Select a block. Clears the module and resets the card index.
    pub fn select_block(&mut self, name: &str) -> Result<()> {
        let block = self
            .structure
            .block_position(name)
            .ok_or_else(|| TrackerError::BlockNotFound(name.to_string()))?;

        self.cursor = Cursor {
            block: Some(block),
            module: None,
            card: 0,
        };
        debug!("Selected block: {}", name);
        Ok(())
    }

    /// Select a module of the selected block. Resets the card index.
    pub fn select_module(&mut self, name: &str) -> Result<()> {
        let block = self.selected_block().ok_or(TrackerError::NoBlockSelected)?;
        let module = block
            .module_position(name)
            .ok_or_else(|| TrackerError::ModuleNotFound {
                block: block.name.clone(),
                module: name.to_string(),
            })?;

        self.cursor.module = Some(module);
        self.cursor.card = 0;
        debug!("Selected module: {}", name);
        Ok(())
    }

    /// Open a card of the selected module.
    pub fn open_card(&mut self, index: usize) -> Result<()> {
        let module = self.require_module()?;
        let len = module.cards.len();
        if index >= len {
            return Err(TrackerError::CardOutOfRange { index, len });
        }

        self.cursor.card = index;
        debug!("Opened card {}", index);
        Ok(())
    }

    /// Move a card one step forward. Stays put on the last step.
    ///
    /// Returns the resulting step index.
    pub fn advance_step(&mut self, block: &str, module: &str, card: usize) -> Result<usize> {
        let addr = self.resolve(block, module, card)?;
        Ok(self.advance_at(addr))
    }

    /// Move a card one step back. Stays put on the first step.
    ///
    /// Returns the resulting step index.
    pub fn retreat_step(&mut self, block: &str, module: &str, card: usize) -> Result<usize> {
        let addr = self.resolve(block, module, card)?;
        Ok(self.retreat_at(addr))
    }

    /// Mark a card done. Marking it again changes nothing.
    pub fn mark_done(&mut self, block: &str, module: &str, card: usize) -> Result<()> {
        let addr = self.resolve(block, module, card)?;
        self.mark_done_at(addr);
        Ok(())
    }

    // === Selected card ===

    /// The block under the cursor.
    pub fn selected_block(&self) -> Option<&Block> {
        self.cursor.block.map(|b| &self.structure.blocks()[b])
    }

    /// The module under the cursor.
    pub fn selected_module(&self) -> Option<&Module> {
        let block = self.selected_block()?;
        self.cursor.module.map(|m| &block.modules[m])
    }

    /// The card under the cursor, if the module has any.
    pub fn current_card(&self) -> Option<&Card> {
        self.selected_module()?.cards.get(self.cursor.card)
    }

    /// Step index of the card under the cursor.
    pub fn current_step_index(&self) -> Option<usize> {
        self.selected_addr().ok().map(|addr| self.step_at(addr))
    }

    /// Prompt of the step under the cursor.
    pub fn current_step(&self) -> Option<&str> {
        let index = self.current_step_index()?;
        self.current_card()?.step(index)
    }

    /// [`advance_step`](Self::advance_step) on the card under the cursor.
    pub fn advance_current(&mut self) -> Result<usize> {
        let addr = self.selected_addr()?;
        Ok(self.advance_at(addr))
    }

    /// [`retreat_step`](Self::retreat_step) on the card under the cursor.
    pub fn retreat_current(&mut self) -> Result<usize> {
        let addr = self.selected_addr()?;
        Ok(self.retreat_at(addr))
    }

    /// [`mark_done`](Self::mark_done) on the card under the cursor.
    pub fn mark_current_done(&mut self) -> Result<()> {
        let addr = self.selected_addr()?;
        self.mark_done_at(addr);
        Ok(())
    }

    /// Record an answer for the step under the cursor.
    pub fn answer_current(&mut self, text: impl Into<String>) -> Result<()> {
        let addr = self.selected_addr()?;
        let step = self.step_at(addr);
        self.answers.insert((addr, step), text.into());
        Ok(())
    }

    // === Queries ===

    /// Step index of a card.
    pub fn step_index(&self, block: &str, module: &str, card: usize) -> Result<usize> {
        let addr = self.resolve(block, module, card)?;
        Ok(self.step_at(addr))
    }

    /// Whether a card is done.
    pub fn is_done(&self, block: &str, module: &str, card: usize) -> Result<bool> {
        let addr = self.resolve(block, module, card)?;
        Ok(self.completion.is_done(addr.block, addr.module, addr.card))
    }

    /// Completion flags of one module, by name.
    pub fn module_completion(&self, block: &str, module: &str) -> Result<&[bool]> {
        let (b, m) = self.resolve_module(block, module)?;
        Ok(self.completion.module(b, m).unwrap_or(&[]))
    }

    /// Record free text for one step of a card.
    pub fn record_answer(
        &mut self,
        block: &str,
        module: &str,
        card: usize,
        step: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let addr = self.resolve(block, module, card)?;
        self.check_step(addr, step)?;
        self.answers.insert((addr, step), text.into());
        Ok(())
    }

    /// Answer previously recorded for one step of a card.
    pub fn answer(&self, block: &str, module: &str, card: usize, step: usize) -> Result<Option<&str>> {
        let addr = self.resolve(block, module, card)?;
        self.check_step(addr, step)?;
        Ok(self.answers.get(&(addr, step)).map(String::as_str))
    }

    /// Percentage of a block's cards marked done; 0 for a block without cards.
    pub fn block_progress(&self, name: &str) -> Result<f32> {
        Ok(self.block_summary(name)?.percentage)
    }

    /// Done/total counts and percentage for a block.
    pub fn block_summary(&self, name: &str) -> Result<BlockProgress> {
        let block = self
            .structure
            .block_position(name)
            .ok_or_else(|| TrackerError::BlockNotFound(name.to_string()))?;
        let (done, total) = self.completion.block_counts(block);
        Ok(BlockProgress::from_counts(done, total))
    }

    /// Percentage of all cards marked done; 0 when there are no cards.
    pub fn overall_progress(&self) -> f32 {
        let (done, total) = self.completion.counts();
        crate::completion::percentage(done, total)
    }

    /// Take a progress snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let blocks = self
            .structure
            .blocks()
            .iter()
            .enumerate()
            .map(|(i, block)| {
                let (done, total) = self.completion.block_counts(i);
                (block.name.clone(), BlockProgress::from_counts(done, total))
            })
            .collect();

        ProgressSnapshot {
            session: self.session,
            timestamp: chrono::Utc::now(),
            overall: self.overall_progress(),
            blocks,
        }
    }

    /// Gather structure, completion, step cursors and answers for export.
    pub fn session_export(&self) -> SessionExport {
        let mut cards = Vec::with_capacity(self.structure.card_count());
        for (b, block) in self.structure.blocks().iter().enumerate() {
            for (m, module) in block.modules.iter().enumerate() {
                for (c, card) in module.cards.iter().enumerate() {
                    let addr = CardAddr { block: b, module: m, card: c };
                    cards.push(CardRecord {
                        block: block.name.clone(),
                        module: module.name.clone(),
                        card: c,
                        title: card.title.clone(),
                        done: self.completion.is_done(b, m, c),
                        step: self.step_at(addr),
                        answers: (0..card.steps.len())
                            .map(|s| self.answers.get(&(addr, s)).cloned())
                            .collect(),
                    });
                }
            }
        }

        SessionExport {
            progress: self.snapshot(),
            structure: self.structure.clone(),
            cards,
        }
    }

    // === Internals ===

    fn selected_positions(&self) -> Result<(usize, usize)> {
        match (self.cursor.block, self.cursor.module) {
            (None, _) => Err(TrackerError::NoBlockSelected),
            (Some(_), None) => Err(TrackerError::NoModuleSelected),
            (Some(block), Some(module)) => Ok((block, module)),
        }
    }

    fn require_module(&self) -> Result<&Module> {
        let (block, module) = self.selected_positions()?;
        Ok(&self.structure.blocks()[block].modules[module])
    }

    fn selected_addr(&self) -> Result<CardAddr> {
        let (block, module) = self.selected_positions()?;
        let len = self.structure.blocks()[block].modules[module].cards.len();
        if self.cursor.card >= len {
            return Err(TrackerError::CardOutOfRange {
                index: self.cursor.card,
                len,
            });
        }
        Ok(CardAddr {
            block,
            module,
            card: self.cursor.card,
        })
    }

    fn resolve_module(&self, block: &str, module: &str) -> Result<(usize, usize)> {
        let b = self
            .structure
            .block_position(block)
            .ok_or_else(|| TrackerError::BlockNotFound(block.to_string()))?;
        let m = self.structure.blocks()[b]
            .module_position(module)
            .ok_or_else(|| TrackerError::ModuleNotFound {
                block: block.to_string(),
                module: module.to_string(),
            })?;
        Ok((b, m))
    }

    fn resolve(&self, block: &str, module: &str, card: usize) -> Result<CardAddr> {
        let (b, m) = self.resolve_module(block, module)?;
        let len = self.structure.blocks()[b].modules[m].cards.len();
        if card >= len {
            return Err(TrackerError::CardOutOfRange { index: card, len });
        }
        Ok(CardAddr { block: b, module: m, card })
    }

    fn card_at(&self, addr: CardAddr) -> &Card {
        &self.structure.blocks()[addr.block].modules[addr.module].cards[addr.card]
    }

    fn check_step(&self, addr: CardAddr, step: usize) -> Result<()> {
        let len = self.card_at(addr).steps.len();
        if step >= len {
            return Err(TrackerError::StepOutOfRange { index: step, len });
        }
        Ok(())
    }

    fn step_at(&self, addr: CardAddr) -> usize {
        self.steps[addr.block][addr.module][addr.card]
    }

    fn advance_at(&mut self, addr: CardAddr) -> usize {
        let last = self.card_at(addr).last_step();
        let step = &mut self.steps[addr.block][addr.module][addr.card];
        if *step < last {
            *step += 1;
        }
        debug!("Card {:?} at step {}", addr, *step);
        *step
    }

    fn retreat_at(&mut self, addr: CardAddr) -> usize {
        let step = &mut self.steps[addr.block][addr.module][addr.card];
        *step = step.saturating_sub(1);
        debug!("Card {:?} at step {}", addr, *step);
        *step
    }

    fn mark_done_at(&mut self, addr: CardAddr) {
        if self.completion.set_done(addr.block, addr.module, addr.card) {
            info!(
                "Card done: {} ({:.0}% overall)",
                self.card_at(addr).title,
                self.overall_progress()
            );
        } else {
            debug!("Card already done: {}", self.card_at(addr).title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_core::catalog::startup_checklist;
    use waypost_core::ErrorKind;

    const FINANCES: &str = "Finances";
    const RUNWAY: &str = "Runway & Budget";

    fn startup() -> ProgressTracker {
        ProgressTracker::new(startup_checklist().unwrap())
    }

    fn with_empty_block() -> ProgressTracker {
        let structure = Structure::builder()
            .block(Block::new("Empty", "∅"))
            .block(Block::new("Hollow", "∅").with_module(Module::new("Nothing")))
            .block(
                Block::new("Full", "✓").with_module(
                    Module::new("Three").with_card(Card::new("Card", ["one", "two", "three"])),
                ),
            )
            .build()
            .unwrap();
        ProgressTracker::new(structure)
    }

    #[test]
    fn test_finances_scenario() {
        let mut tracker = startup();
        tracker.select_block(FINANCES).unwrap();
        tracker.select_module(RUNWAY).unwrap();
        tracker.mark_done(FINANCES, RUNWAY, 0).unwrap();

        assert_eq!(tracker.block_progress(FINANCES).unwrap(), 50.0);
        assert_eq!(tracker.module_completion(FINANCES, RUNWAY).unwrap(), &[true, false]);
    }

    #[test]
    fn test_open_card_out_of_range() {
        let mut tracker = startup();
        tracker.select_block(FINANCES).unwrap();
        tracker.select_module(RUNWAY).unwrap();
        tracker.open_card(1).unwrap();

        let err = tracker.open_card(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err, TrackerError::CardOutOfRange { index: 5, len: 2 });
        assert_eq!(tracker.cursor().card, 1);
    }

    #[test]
    fn test_select_module_without_block() {
        let mut tracker = startup();
        let err = tracker.select_module("X").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(tracker.cursor(), Cursor::default());
    }

    #[test]
    fn test_open_card_without_module() {
        let mut tracker = startup();
        assert_eq!(tracker.open_card(0), Err(TrackerError::NoBlockSelected));

        tracker.select_block(FINANCES).unwrap();
        let err = tracker.open_card(0).unwrap_err();
        assert_eq!(err, TrackerError::NoModuleSelected);
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_unknown_names() {
        let mut tracker = startup();
        let err = tracker.select_block("Nowhere").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        tracker.select_block(FINANCES).unwrap();
        let err = tracker.select_module("Taxes").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(tracker.cursor().module, None);

        assert_eq!(tracker.block_progress("Nowhere").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            tracker.mark_done(FINANCES, "Taxes", 0).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            tracker.advance_step(FINANCES, RUNWAY, 9).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_switching_block_resets_module_and_card() {
        let mut tracker = startup();
        tracker.select_block(FINANCES).unwrap();
        tracker.select_module(RUNWAY).unwrap();
        tracker.open_card(1).unwrap();

        tracker.select_block("Launch").unwrap();
        let cursor = tracker.cursor();
        assert_eq!(cursor.module, None);
        assert_eq!(cursor.card, 0);
        assert_eq!(tracker.selected_block().unwrap().name, "Launch");
        assert!(tracker.current_card().is_none());
    }

    #[test]
    fn test_select_module_resets_card() {
        let mut tracker = startup();
        tracker.select_block("Launch").unwrap();
        tracker.select_module("Go-to-Market").unwrap();
        tracker.open_card(1).unwrap();
        tracker.select_module("Metrics").unwrap();
        assert_eq!(tracker.cursor().card, 0);
        assert_eq!(tracker.current_card().unwrap().title, "North star metric");
    }

    #[test]
    fn test_advance_clamps_at_last_step() {
        let mut tracker = with_empty_block();
        assert_eq!(tracker.advance_step("Full", "Three", 0).unwrap(), 1);
        assert_eq!(tracker.advance_step("Full", "Three", 0).unwrap(), 2);

        let before = tracker.clone();
        assert_eq!(tracker.advance_step("Full", "Three", 0).unwrap(), 2);
        assert_eq!(tracker.step_index("Full", "Three", 0).unwrap(), 2);
        assert_eq!(tracker.steps, before.steps);
    }

    #[test]
    fn test_retreat_clamps_at_first_step() {
        let mut tracker = with_empty_block();
        assert_eq!(tracker.retreat_step("Full", "Three", 0).unwrap(), 0);

        tracker.advance_step("Full", "Three", 0).unwrap();
        assert_eq!(tracker.retreat_step("Full", "Three", 0).unwrap(), 0);
        assert_eq!(tracker.retreat_step("Full", "Three", 0).unwrap(), 0);
    }

    #[test]
    fn test_mark_done_is_idempotent() {
        let mut tracker = startup();
        tracker.mark_done(FINANCES, RUNWAY, 1).unwrap();
        let once = tracker.completion().clone();

        tracker.mark_done(FINANCES, RUNWAY, 1).unwrap();
        assert_eq!(tracker.completion(), &once);
        assert!(tracker.is_done(FINANCES, RUNWAY, 1).unwrap());
    }

    #[test]
    fn test_done_card_stays_navigable() {
        let mut tracker = startup();
        tracker.mark_done(FINANCES, RUNWAY, 0).unwrap();
        assert_eq!(tracker.advance_step(FINANCES, RUNWAY, 0).unwrap(), 1);
        assert_eq!(tracker.retreat_step(FINANCES, RUNWAY, 0).unwrap(), 0);
    }

    #[test]
    fn test_blocks_without_cards_report_zero() {
        let mut tracker = with_empty_block();
        tracker.mark_done("Full", "Three", 0).unwrap();

        assert_eq!(tracker.block_progress("Empty").unwrap(), 0.0);
        assert_eq!(tracker.block_progress("Hollow").unwrap(), 0.0);
        assert_eq!(tracker.block_progress("Full").unwrap(), 100.0);
        assert_eq!(tracker.overall_progress(), 100.0);
    }

    #[test]
    fn test_progress_stays_within_bounds() {
        let mut tracker = startup();
        let names: Vec<String> = tracker
            .structure()
            .blocks()
            .iter()
            .map(|b| b.name.clone())
            .collect();

        let mut addresses = Vec::new();
        for block in tracker.structure().blocks() {
            for module in &block.modules {
                for card in 0..module.cards.len() {
                    addresses.push((block.name.clone(), module.name.clone(), card));
                }
            }
        }

        for (block, module, card) in addresses {
            tracker.mark_done(&block, &module, card).unwrap();
            for name in &names {
                let progress = tracker.block_progress(name).unwrap();
                assert!((0.0..=100.0).contains(&progress));
            }
        }
        assert_eq!(tracker.overall_progress(), 100.0);
    }

    #[test]
    fn test_overall_progress() {
        let mut tracker = startup();
        let total = tracker.structure().card_count();
        assert_eq!(tracker.overall_progress(), 0.0);

        tracker.mark_done(FINANCES, RUNWAY, 0).unwrap();
        let expected = 100.0 / total as f32;
        assert!((tracker.overall_progress() - expected).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_structure_overall_is_zero() {
        let tracker = ProgressTracker::new(Structure::builder().build().unwrap());
        assert_eq!(tracker.overall_progress(), 0.0);
    }

    #[test]
    fn test_current_card_operations() {
        let mut tracker = startup();
        assert_eq!(tracker.advance_current(), Err(TrackerError::NoBlockSelected));

        tracker.select_block(FINANCES).unwrap();
        tracker.select_module(RUNWAY).unwrap();
        tracker.open_card(0).unwrap();
        assert_eq!(tracker.current_step(), Some("List your fixed monthly costs."));

        tracker.answer_current("Rent and salaries").unwrap();
        assert_eq!(tracker.advance_current().unwrap(), 1);
        assert_eq!(tracker.current_step(), Some("List your variable costs."));
        tracker.mark_current_done().unwrap();

        assert_eq!(
            tracker.answer(FINANCES, RUNWAY, 0, 0).unwrap(),
            Some("Rent and salaries")
        );
        assert_eq!(tracker.answer(FINANCES, RUNWAY, 0, 1).unwrap(), None);
        assert!(tracker.is_done(FINANCES, RUNWAY, 0).unwrap());
    }

    #[test]
    fn test_current_card_in_empty_module() {
        let mut tracker = with_empty_block();
        tracker.select_block("Hollow").unwrap();
        tracker.select_module("Nothing").unwrap();

        assert!(tracker.current_card().is_none());
        assert_eq!(tracker.current_step(), None);
        assert_eq!(
            tracker.mark_current_done(),
            Err(TrackerError::CardOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_record_answer_rejects_bad_step() {
        let mut tracker = startup();
        let err = tracker
            .record_answer(FINANCES, RUNWAY, 1, 2, "too far")
            .unwrap_err();
        assert_eq!(err, TrackerError::StepOutOfRange { index: 2, len: 2 });

        tracker.record_answer(FINANCES, RUNWAY, 1, 1, "18 months").unwrap();
        assert_eq!(tracker.answer(FINANCES, RUNWAY, 1, 1).unwrap(), Some("18 months"));
    }

    #[test]
    fn test_snapshot_and_export() {
        let mut tracker = startup();
        tracker.mark_done(FINANCES, RUNWAY, 0).unwrap();
        tracker.advance_step(FINANCES, RUNWAY, 1).unwrap();
        tracker.record_answer(FINANCES, RUNWAY, 1, 0, "20k").unwrap();

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.session, tracker.session());
        assert_eq!(snapshot.blocks.len(), 7);
        assert_eq!(snapshot.block(FINANCES).unwrap().completed_cards, 1);

        let export = tracker.session_export();
        assert_eq!(export.cards.len(), tracker.structure().card_count());
        let runway = export
            .cards
            .iter()
            .find(|c| c.block == FINANCES && c.card == 1)
            .unwrap();
        assert_eq!(runway.title, "Runway");
        assert!(!runway.done);
        assert_eq!(runway.step, 1);
        assert_eq!(runway.answers, vec![Some("20k".to_string()), None]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = startup();
        let second = startup();
        first.mark_done(FINANCES, RUNWAY, 0).unwrap();

        assert_ne!(first.session(), second.session());
        assert_eq!(second.block_progress(FINANCES).unwrap(), 0.0);
    }
}
