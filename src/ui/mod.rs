pub mod board;
pub mod dialogs;
pub mod editor;
pub mod resource_panel;
pub mod theme;
pub mod toolbar;
