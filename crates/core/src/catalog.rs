//! Built-in tool definitions.
//!
//! Two guided tools ship with Waypost:
//! - the decision tool, five blocks taking one problem from framing to indicators
//! - the startup checklist, seven blocks covering the first months of a company

use crate::structure::{Block, Card, Module, Structure, StructureError};
use serde::{Deserialize, Serialize};

/// Which built-in tool to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Five-block decision tool
    Decision,
    /// Seven-block startup checklist
    Startup,
}

impl ToolKind {
    /// All built-in tools.
    pub const ALL: [ToolKind; 2] = [ToolKind::Decision, ToolKind::Startup];

    /// Short machine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Decision => "decision",
            ToolKind::Startup => "startup",
        }
    }

    /// Human readable title.
    pub fn title(&self) -> &'static str {
        match self {
            ToolKind::Decision => "🧩 Ultra Simple Decision Tool",
            ToolKind::Startup => "🚀 Startup Checklist",
        }
    }

    /// Build this tool's structure.
    pub fn structure(&self) -> Result<Structure, StructureError> {
        match self {
            ToolKind::Decision => decision_tool(),
            ToolKind::Startup => startup_checklist(),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tool name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0} (expected 'decision' or 'startup')")]
pub struct UnknownTool(pub String);

impl std::str::FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "decision" => Ok(ToolKind::Decision),
            "startup" => Ok(ToolKind::Startup),
            _ => Err(UnknownTool(s.to_string())),
        }
    }
}

fn single_card_block(name: &str, marker: &str, prompt: &str) -> Block {
    Block::new(name, marker).with_module(
        Module::new("Worksheet").with_card(Card::new(name, [prompt])),
    )
}

/// The five-block decision tool. One worksheet card per block.
pub fn decision_tool() -> Result<Structure, StructureError> {
    Structure::builder()
        .block(single_card_block(
            "1. Define the problem",
            "🎯",
            "Write the starting problem here…",
        ))
        .block(single_card_block(
            "2. Explore the options",
            "🔍",
            "List the options, even the bad ones…",
        ))
        .block(single_card_block(
            "3. Choose a direction",
            "🧭",
            "Which direction seems logical?",
        ))
        .block(single_card_block(
            "4. Simple action plan",
            "📝",
            "Short, doable steps, one at a time…",
        ))
        .block(single_card_block(
            "5. Indicators (very simple)",
            "📊",
            "How will you see that it works?",
        ))
        .build()
}

/// The seven-block startup checklist.
pub fn startup_checklist() -> Result<Structure, StructureError> {
    Structure::builder()
        .block(
            Block::new("Idea & Problem", "💡")
                .with_module(
                    Module::new("Problem Statement")
                        .with_card(Card::new(
                            "Pain point",
                            [
                                "What problem are you solving?",
                                "Who feels this pain the most?",
                                "How do they cope with it today?",
                            ],
                        ))
                        .with_card(Card::new(
                            "Target user",
                            ["Describe your first user in one sentence.", "Where can you reach them?"],
                        )),
                )
                .with_module(Module::new("Vision").with_card(Card::new(
                    "One-liner",
                    ["Explain the company in one sentence.", "What does success look like in 3 years?"],
                ))),
        )
        .block(
            Block::new("Customers", "🤝").with_module(
                Module::new("Discovery")
                    .with_card(Card::new(
                        "Interviews",
                        [
                            "List 10 people to interview.",
                            "Which questions will you ask?",
                            "What did you learn?",
                        ],
                    ))
                    .with_card(Card::new(
                        "Personas",
                        ["Sketch your main persona.", "What would make them pay?"],
                    )),
            ),
        )
        .block(
            Block::new("Product", "🛠️")
                .with_module(
                    Module::new("MVP Scope")
                        .with_card(Card::new(
                            "Core features",
                            [
                                "List every feature you imagine.",
                                "Keep only the three that matter.",
                                "What is the smallest version you can ship?",
                            ],
                        ))
                        .with_card(Card::new("Out of scope", ["What are you deliberately not building?"])),
                )
                .with_module(Module::new("Validation").with_card(Card::new(
                    "Prototype test",
                    ["How will you test the prototype?", "What result would change your mind?"],
                ))),
        )
        .block(
            Block::new("Market & Competition", "📈")
                .with_module(
                    Module::new("Competition")
                        .with_card(Card::new(
                            "Competitor map",
                            ["Who else solves this problem?", "What do users dislike about them?"],
                        ))
                        .with_card(Card::new(
                            "Differentiation",
                            ["Why would someone switch to you?", "What is hard to copy?"],
                        )),
                )
                .with_module(Module::new("Sizing").with_card(Card::new(
                    "Market size",
                    ["How many potential customers exist?", "What would they pay per year?"],
                ))),
        )
        .block(
            Block::new("Finances", "💰").with_module(
                Module::new("Runway & Budget")
                    .with_card(Card::new(
                        "Monthly burn",
                        [
                            "List your fixed monthly costs.",
                            "List your variable costs.",
                            "What is your total monthly burn?",
                        ],
                    ))
                    .with_card(Card::new(
                        "Runway",
                        ["How much cash do you have?", "How many months does that give you?"],
                    )),
            ),
        )
        .block(
            Block::new("Legal & Admin", "⚖️")
                .with_module(
                    Module::new("Company Setup")
                        .with_card(Card::new(
                            "Legal structure",
                            ["Which legal form fits you?", "Where will the company be registered?"],
                        ))
                        .with_card(Card::new(
                            "Founders agreement",
                            [
                                "How is equity split?",
                                "What is the vesting schedule?",
                                "What happens if a founder leaves?",
                            ],
                        )),
                )
                .with_module(Module::new("Compliance").with_card(Card::new(
                    "Licenses & IP",
                    ["Which licenses or permits do you need?", "What intellectual property must be protected?"],
                ))),
        )
        .block(
            Block::new("Launch", "🚀")
                .with_module(
                    Module::new("Go-to-Market")
                        .with_card(Card::new(
                            "Launch channels",
                            ["Where will you announce the launch?", "What is the launch date?"],
                        ))
                        .with_card(Card::new(
                            "First 100 users",
                            [
                                "Who are your first 10 users?",
                                "How will you reach the next 90?",
                                "How will you collect their feedback?",
                            ],
                        )),
                )
                .with_module(Module::new("Metrics").with_card(Card::new(
                    "North star metric",
                    ["Which single number shows progress?", "What target do you set for month one?"],
                ))),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_tool_has_five_blocks() {
        let structure = decision_tool().unwrap();
        assert_eq!(structure.blocks().len(), 5);
        assert_eq!(structure.card_count(), 5);
        assert_eq!(structure.blocks()[0].name, "1. Define the problem");
    }

    #[test]
    fn test_startup_checklist_has_seven_blocks() {
        let structure = startup_checklist().unwrap();
        assert_eq!(structure.blocks().len(), 7);

        let finances = structure.block("Finances").unwrap();
        assert_eq!(finances.card_count(), 2);
        assert_eq!(finances.module("Runway & Budget").unwrap().cards.len(), 2);
    }

    #[test]
    fn test_tool_kind_parse() {
        assert_eq!("decision".parse::<ToolKind>(), Ok(ToolKind::Decision));
        assert_eq!("Startup".parse::<ToolKind>(), Ok(ToolKind::Startup));
        assert!("other".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_every_tool_builds() {
        for kind in ToolKind::ALL {
            assert!(kind.structure().is_ok(), "{kind} failed to build");
        }
    }
}
