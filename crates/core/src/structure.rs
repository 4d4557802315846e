//! Content model - blocks of modules of cards of steps.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A card is a unit of work: an ordered list of step prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card title
    pub title: String,

    /// Step prompts, shown one at a time
    pub steps: Vec<String>,
}

impl Card {
    /// Create a new card.
    pub fn new<S: Into<String>>(title: impl Into<String>, steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// Prompt of the given step.
    pub fn step(&self, index: usize) -> Option<&str> {
        self.steps.get(index).map(String::as_str)
    }

    /// Index of the last step.
    ///
    /// Cards inside a built [`Structure`] always have at least one step.
    pub fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// A named group of cards within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module name, unique within its block
    pub name: String,

    /// Cards in display order
    pub cards: Vec<Card>,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Append a card.
    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }
}

/// A top-level phase of a guided tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block name, unique within the structure
    pub name: String,

    /// Display marker (emoji)
    pub marker: String,

    /// Modules in display order
    pub modules: Vec<Module>,
}

impl Block {
    /// Create an empty block.
    pub fn new(name: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: marker.into(),
            modules: Vec::new(),
        }
    }

    /// Append a module.
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Find a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Position of a module by name.
    pub fn module_position(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.name == name)
    }

    /// Number of cards across all modules.
    pub fn card_count(&self) -> usize {
        self.modules.iter().map(|m| m.cards.len()).sum()
    }
}

/// Errors raised while validating a structure definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// A block has an empty name
    #[error("block name cannot be empty")]
    EmptyBlockName,

    /// Two blocks share a name
    #[error("duplicate block: {0}")]
    DuplicateBlock(String),

    /// A module has an empty name
    #[error("module name cannot be empty (block '{block}')")]
    EmptyModuleName {
        /// Owning block
        block: String,
    },

    /// Two modules in one block share a name
    #[error("duplicate module '{module}' in block '{block}'")]
    DuplicateModule {
        /// Owning block
        block: String,
        /// Repeated module name
        module: String,
    },

    /// A card has no steps
    #[error("card {card} of module '{module}' in block '{block}' has no steps")]
    EmptyCard {
        /// Owning block
        block: String,
        /// Owning module
        module: String,
        /// Card index
        card: usize,
    },
}

/// The validated, immutable content of one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    blocks: Vec<Block>,
}

impl Structure {
    /// Start building a structure.
    pub fn builder() -> StructureBuilder {
        StructureBuilder::default()
    }

    /// All blocks in display order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Find a block by name.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Position of a block by name.
    pub fn block_position(&self, name: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.name == name)
    }

    /// Number of cards across all blocks.
    pub fn card_count(&self) -> usize {
        self.blocks.iter().map(Block::card_count).sum()
    }
}

/// Builder validating a [`Structure`] on `build`.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    blocks: Vec<Block>,
}

impl StructureBuilder {
    /// Append a block.
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Validate and freeze the structure.
    pub fn build(self) -> Result<Structure, StructureError> {
        let mut block_names = HashSet::new();

        for block in &self.blocks {
            if block.name.is_empty() {
                return Err(StructureError::EmptyBlockName);
            }
            if !block_names.insert(block.name.as_str()) {
                return Err(StructureError::DuplicateBlock(block.name.clone()));
            }

            let mut module_names = HashSet::new();
            for module in &block.modules {
                if module.name.is_empty() {
                    return Err(StructureError::EmptyModuleName {
                        block: block.name.clone(),
                    });
                }
                if !module_names.insert(module.name.as_str()) {
                    return Err(StructureError::DuplicateModule {
                        block: block.name.clone(),
                        module: module.name.clone(),
                    });
                }
                if let Some(card) = module.cards.iter().position(|c| c.steps.is_empty()) {
                    return Err(StructureError::EmptyCard {
                        block: block.name.clone(),
                        module: module.name.clone(),
                        card,
                    });
                }
            }
        }

        Ok(Structure { blocks: self.blocks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block(name: &str) -> Block {
        Block::new(name, "📦").with_module(
            Module::new("Basics")
                .with_card(Card::new("First", ["a", "b"]))
                .with_card(Card::new("Second", ["c"])),
        )
    }

    #[test]
    fn test_build_valid_structure() {
        let structure = Structure::builder()
            .block(sample_block("One"))
            .block(sample_block("Two"))
            .build()
            .unwrap();

        assert_eq!(structure.blocks().len(), 2);
        assert_eq!(structure.card_count(), 4);
        assert_eq!(structure.block_position("Two"), Some(1));
        assert_eq!(structure.block("One").unwrap().module_position("Basics"), Some(0));
    }

    #[test]
    fn test_empty_structure_is_valid() {
        let structure = Structure::builder().build().unwrap();
        assert!(structure.blocks().is_empty());
        assert_eq!(structure.card_count(), 0);
    }

    #[test]
    fn test_duplicate_block_rejected() {
        let result = Structure::builder()
            .block(sample_block("One"))
            .block(sample_block("One"))
            .build();
        assert_eq!(result, Err(StructureError::DuplicateBlock("One".to_string())));
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let block = Block::new("One", "x")
            .with_module(Module::new("M"))
            .with_module(Module::new("M"));
        let result = Structure::builder().block(block).build();
        assert!(matches!(result, Err(StructureError::DuplicateModule { .. })));
    }

    #[test]
    fn test_empty_names_rejected() {
        let result = Structure::builder().block(Block::new("", "x")).build();
        assert_eq!(result, Err(StructureError::EmptyBlockName));

        let block = Block::new("One", "x").with_module(Module::new(""));
        let result = Structure::builder().block(block).build();
        assert!(matches!(result, Err(StructureError::EmptyModuleName { .. })));
    }

    #[test]
    fn test_card_without_steps_rejected() {
        let steps: [&str; 0] = [];
        let block = Block::new("One", "x").with_module(
            Module::new("M")
                .with_card(Card::new("ok", ["a"]))
                .with_card(Card::new("empty", steps)),
        );
        let result = Structure::builder().block(block).build();
        assert_eq!(
            result,
            Err(StructureError::EmptyCard {
                block: "One".to_string(),
                module: "M".to_string(),
                card: 1,
            })
        );
    }

    #[test]
    fn test_card_step_accessors() {
        let card = Card::new("Card", ["first", "second", "third"]);
        assert_eq!(card.step(1), Some("second"));
        assert_eq!(card.step(3), None);
        assert_eq!(card.last_step(), 2);
    }
}
