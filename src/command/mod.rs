mod history;

use std::path::PathBuf;

use egui::Color32;

use crate::document::Document;
use crate::error::SketchResult;

pub use history::SnapshotHistory;

/// Result type for command execution
pub type CommandResult = SketchResult<CommandOutcome>;

/// Actions triggered by the controls, as opposed to pointer strokes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    Clear,
    SetBackground(Color32),
    Save(PathBuf),
    Load(PathBuf),
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The canvas changed
    Changed,
    /// Nothing to do, e.g. undo with an empty history
    Unchanged,
    /// The canvas was written to this path
    Saved(PathBuf),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Clear => "Clear",
            Command::SetBackground(_) => "Set Background",
            Command::Save(_) => "Save",
            Command::Load(_) => "Load Image",
        }
    }

    /// Apply the command to the document. Failed commands leave it untouched.
    pub fn execute(&self, document: &mut Document) -> CommandResult {
        let changed = |done: bool| {
            if done {
                CommandOutcome::Changed
            } else {
                CommandOutcome::Unchanged
            }
        };

        match self {
            Command::Undo => Ok(changed(document.undo())),
            Command::Redo => Ok(changed(document.redo())),
            Command::Clear => {
                log::info!("Clearing canvas");
                document.clear();
                Ok(CommandOutcome::Changed)
            }
            Command::SetBackground(color) => {
                log::info!("Changing background to {:?}", color);
                document.set_background(*color);
                Ok(CommandOutcome::Changed)
            }
            Command::Save(path) => document.save_to(path).map(CommandOutcome::Saved),
            Command::Load(path) => {
                document.load_from(path)?;
                Ok(CommandOutcome::Changed)
            }
        }
    }
}
