use eframe::egui::{Color32, Visuals};

/// Color palette for chessboard rendering.
///
/// Square colors are fixed per theme; text and border colors follow the
/// current visuals.
#[derive(Debug, Clone)]
pub(crate) struct BoardPalette {
    pub(crate) square_light: Color32,
    pub(crate) square_dark: Color32,
    pub(crate) square_moved_from: Color32,
    pub(crate) square_moved_to: Color32,
    pub(crate) square_blank: Color32,

    pub(crate) piece_white: Color32,
    pub(crate) piece_black: Color32,

    pub(crate) border: Color32,
    pub(crate) coordinate: Color32,
    pub(crate) placeholder_text: Color32,
}

impl BoardPalette {
    #[must_use]
    pub(crate) fn light(visuals: &Visuals) -> Self {
        Self {
            square_light: Color32::from_rgb(0xf0, 0xd9, 0xb5),
            square_dark: Color32::from_rgb(0xb5, 0x88, 0x63),
            square_moved_from: Color32::from_rgb(0xe6, 0xd2, 0x6e),
            square_moved_to: Color32::from_rgb(0xcd, 0xb1, 0x3f),
            square_blank: visuals.extreme_bg_color,
            piece_white: Color32::WHITE,
            piece_black: Color32::BLACK,
            border: visuals.widgets.inactive.fg_stroke.color,
            coordinate: visuals.weak_text_color(),
            placeholder_text: visuals.text_color(),
        }
    }

    #[must_use]
    pub(crate) fn dark(visuals: &Visuals) -> Self {
        Self {
            square_light: Color32::from_rgb(0x9e, 0x8c, 0x74),
            square_dark: Color32::from_rgb(0x5d, 0x4a, 0x3a),
            square_moved_from: Color32::from_rgb(0x8f, 0x86, 0x45),
            square_moved_to: Color32::from_rgb(0x7a, 0x6e, 0x24),
            ..Self::light(visuals)
        }
    }
}

/// Holds light/dark palettes and selects one based on current visuals.
#[derive(Debug, Clone)]
pub(crate) struct BoardTheme {
    pub(crate) light: BoardPalette,
    pub(crate) dark: BoardPalette,
}

impl BoardTheme {
    #[must_use]
    pub(crate) fn from_visuals(visuals: &Visuals) -> Self {
        Self {
            light: BoardPalette::light(visuals),
            dark: BoardPalette::dark(visuals),
        }
    }

    #[must_use]
    pub(crate) fn palette_for(&self, visuals: &Visuals) -> &BoardPalette {
        if visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}
