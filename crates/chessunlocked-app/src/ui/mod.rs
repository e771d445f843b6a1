pub(crate) mod board;
pub(crate) mod board_theme;
pub(crate) mod drill_panel;
pub(crate) mod input;
pub(crate) mod opening_panel;
pub(crate) mod session_panel;
pub(crate) mod spinner;
pub(crate) mod trainer_screen;
