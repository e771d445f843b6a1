use std::sync::Arc;

use chessunlocked_core::{BOARD_SIZE, Color, RenderedSquare, SquareShade};
use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Sense, Stroke, Ui, Vec2};

use crate::ui::board_theme::{BoardPalette, BoardTheme};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct SquareVisualState: u8 {
        /// A piece left this square in the last presentation.
        const MOVED_FROM = 0b0000_0001;
        /// A piece arrived on this square in the last presentation.
        const MOVED_TO = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoardSquare {
    pub(crate) rendered: RenderedSquare,
    pub(crate) visual_state: SquareVisualState,
}

#[derive(Debug, Clone)]
pub(crate) struct BoardViewModel {
    squares: Option<Vec<BoardSquare>>,
    placeholder: &'static str,
}

impl BoardViewModel {
    /// `squares` is `None` while nothing has been presented.
    #[must_use]
    pub(crate) fn new(squares: Option<Vec<BoardSquare>>, placeholder: &'static str) -> Self {
        Self {
            squares,
            placeholder,
        }
    }

    #[must_use]
    pub(crate) fn squares(&self) -> Option<&[BoardSquare]> {
        self.squares.as_deref()
    }
}

const BOARD_SQUARES: f32 = 8.0;
const BORDER_WIDTH_RATIO: f32 = 0.012;
const PIECE_RADIUS_RATIO: f32 = 0.36;
const PIECE_FONT_RATIO: f32 = 0.42;
const COORDINATE_FONT_RATIO: f32 = 0.18;
const MIN_BOARD_SIDE: f32 = 160.0;

fn square_fill(square: &BoardSquare, palette: &BoardPalette) -> Color32 {
    if square.visual_state.contains(SquareVisualState::MOVED_TO) {
        return palette.square_moved_to;
    }
    if square.visual_state.contains(SquareVisualState::MOVED_FROM) {
        return palette.square_moved_from;
    }
    match square.rendered.shade {
        SquareShade::Light => palette.square_light,
        SquareShade::Dark => palette.square_dark,
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &BoardViewModel) {
    let style = Arc::clone(ui.style());
    let visuals = &style.visuals;
    let board_theme = BoardTheme::from_visuals(visuals);
    let palette = board_theme.palette_for(visuals);

    let side = ui.available_size().min_elem().max(MIN_BOARD_SIDE);
    let (rect, _response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
    let border = f32::max(side * BORDER_WIDTH_RATIO, 1.0);
    let inner_rect = rect.shrink(border);
    let square_size = inner_rect.width() / BOARD_SQUARES;

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.border);

    let Some(squares) = vm.squares() else {
        painter.rect_filled(inner_rect, 0.0, palette.square_blank);
        painter.text(
            inner_rect.center(),
            Align2::CENTER_CENTER,
            vm.placeholder,
            FontId::proportional(square_size * 0.3),
            palette.placeholder_text,
        );
        return;
    };

    for square in squares {
        let coords = square.rendered.square;
        let offset = Vec2::new(f32::from(coords.col()), f32::from(coords.row())) * square_size;
        let square_rect =
            Rect::from_min_size(inner_rect.min + offset, Vec2::splat(square_size));

        painter.rect_filled(square_rect, 0.0, square_fill(square, palette));
        draw_coordinates(painter, square_rect, square, palette);
        if let Some(piece) = square.rendered.piece {
            draw_piece(painter, square_rect, piece.color, piece.symbol(), palette);
        }
    }
}

fn draw_piece(
    painter: &Painter,
    rect: Rect,
    color: Color,
    symbol: char,
    palette: &BoardPalette,
) {
    let (fill, ink) = match color {
        Color::White => (palette.piece_white, palette.piece_black),
        Color::Black => (palette.piece_black, palette.piece_white),
    };
    let size = rect.width();
    let radius = size * PIECE_RADIUS_RATIO;
    painter.circle(
        rect.center(),
        radius,
        fill,
        Stroke::new(f32::max(size * 0.03, 1.0), palette.piece_black),
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        symbol.to_ascii_uppercase(),
        FontId::monospace(size * PIECE_FONT_RATIO),
        ink,
    );
}

/// Labels ranks along the a-file and files along the first rank.
fn draw_coordinates(painter: &Painter, rect: Rect, square: &BoardSquare, palette: &BoardPalette) {
    let coords = square.rendered.square;
    let font = FontId::proportional(rect.width() * COORDINATE_FONT_RATIO);
    let pad = rect.width() * 0.06;
    let name = coords.to_string();
    let (file, rank) = name.split_at(1);

    if coords.col() == 0 {
        painter.text(
            rect.left_top() + Vec2::splat(pad),
            Align2::LEFT_TOP,
            rank,
            font.clone(),
            palette.coordinate,
        );
    }
    if usize::from(coords.row()) == BOARD_SIZE - 1 {
        painter.text(
            rect.right_bottom() - Vec2::splat(pad),
            Align2::RIGHT_BOTTOM,
            file,
            font,
            palette.coordinate,
        );
    }
}
