//! inkcore — shared library for the inkpad text editor

pub mod browser;
pub mod document;
pub mod recent;
pub mod search;
pub mod session;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use document::{Decision, DocumentState, PromptAnswer};
pub use recent::RecentFiles;
pub use theme::InkTheme;
