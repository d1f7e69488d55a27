//! CLI command implementations.

pub mod compare;
pub mod recipe;
pub mod shortcut;

pub use compare::CompareCommand;
pub use recipe::RecipeCommand;
pub use shortcut::{ShortcutAction, ShortcutCommand};
