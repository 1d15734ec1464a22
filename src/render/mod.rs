pub mod palette;

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::{BTerm, RGB, to_cp437};

use crate::{
    config::GameConfig,
    ecs::ActorStore,
    gamelog::{MessageLog, wrap},
    map::TileGrid,
    menu::Menu,
    turn::Session,
    visibility::{TileView, Visibility},
};

/// Where drawing ends up. The game draws into a `FrameBuffer`, which is
/// blitted to the terminal once per tick.
pub trait GlyphSink {
    fn put_glyph(&mut self, x: i32, y: i32, glyph: char, fg: RGB);
    fn set_cell_background(&mut self, x: i32, y: i32, bg: RGB);
    fn print(&mut self, x: i32, y: i32, text: &str, fg: RGB);
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub fg: RGB,
    pub bg: RGB,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: RGB::named(palette::WHITE),
            bg: RGB::named(palette::BLACK),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width.max(0) * height.max(0)) as usize],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.idx(x, y).map(|idx| &self.cells[idx])
    }

    /// Text of one row with trailing blanks trimmed.
    pub fn row_text(&self, y: i32) -> String {
        let text: String = (0..self.width)
            .filter_map(|x| self.cell(x, y).map(|cell| cell.glyph))
            .collect();
        text.trim_end().to_string()
    }

    pub fn present(&self, ctx: &mut BTerm) {
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(cell) = self.cell(x, y) {
                    ctx.set(x, y, cell.fg, cell.bg, to_cp437(cell.glyph));
                }
            }
        }
    }
}

impl GlyphSink for FrameBuffer {
    fn put_glyph(&mut self, x: i32, y: i32, glyph: char, fg: RGB) {
        if let Some(idx) = self.idx(x, y) {
            self.cells[idx].glyph = glyph;
            self.cells[idx].fg = fg;
        }
    }

    fn set_cell_background(&mut self, x: i32, y: i32, bg: RGB) {
        if let Some(idx) = self.idx(x, y) {
            self.cells[idx].bg = bg;
        }
    }

    fn print(&mut self, x: i32, y: i32, text: &str, fg: RGB) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put_glyph(x + offset as i32, y, glyph, fg);
        }
    }
}

/// Lit colors in view, dark colors for remembered tiles, nothing for tiles
/// never seen.
pub fn draw_map(sink: &mut dyn GlyphSink, grid: &TileGrid, visibility: &Visibility) {
    for point in grid.points() {
        let wall = grid.blocks_sight(point);
        let color = match (visibility.classify(point, grid), wall) {
            (TileView::Visible, true) => palette::LIGHT_WALL,
            (TileView::Visible, false) => palette::LIGHT_GROUND,
            (TileView::Remembered, true) => palette::DARK_WALL,
            (TileView::Remembered, false) => palette::DARK_GROUND,
            (TileView::Unseen, _) => continue,
        };
        sink.set_cell_background(point.x, point.y, RGB::named(color));
    }
}

/// Store order, player on top, visible cells only.
pub fn draw_actors(sink: &mut dyn GlyphSink, store: &ActorStore, visibility: &Visibility) {
    let player = store.player();
    store.each_renderable(|entity, point, render| {
        if entity != player && visibility.can_see(point) {
            sink.put_glyph(point.x, point.y, render.glyph, render.color);
        }
    });
    if let (Some(point), Some(render)) = (store.position(player), store.renderable(player)) {
        sink.put_glyph(point.x, point.y, render.glyph, render.color);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_bar(
    sink: &mut dyn GlyphSink,
    x: i32,
    y: i32,
    total_width: i32,
    name: &str,
    value: i32,
    maximum: i32,
    bar_color: RGB,
    back_color: RGB,
) {
    let filled = if maximum > 0 {
        (value.max(0) as f32 / maximum as f32 * total_width as f32) as i32
    } else {
        0
    };
    for offset in 0..total_width {
        let bg = if offset < filled { bar_color } else { back_color };
        sink.set_cell_background(x + offset, y, bg);
    }

    let label = format!("{name}: {value}/{maximum}");
    let label_x = x + (total_width - label.chars().count() as i32) / 2;
    sink.print(label_x, y, &label, RGB::named(palette::WHITE));
}

fn draw_messages(sink: &mut dyn GlyphSink, log: &MessageLog, x: i32, y: i32) {
    for (row, line) in log.lines().enumerate() {
        sink.print(x, y + row as i32, &line.text, line.color);
    }
}

/// Bottom panel: names under the mouse, HP bar, message log.
pub fn draw_panel(sink: &mut dyn GlyphSink, session: &Session, mouse: Point) {
    let config: &GameConfig = session.config();
    let top = config.panel_y();

    for y in top..config.screen_height {
        for x in 0..config.screen_width {
            sink.set_cell_background(x, y, RGB::named(palette::BLACK));
        }
    }

    let names = session.names_at(mouse);
    if !names.is_empty() {
        sink.print(1, top, &names, RGB::named(palette::LIGHT_GREY));
    }

    if let Some(stats) = session.player_stats() {
        render_bar(
            sink,
            1,
            top + 1,
            config.bar_width,
            "HP",
            stats.hp,
            stats.max_hp,
            RGB::named(palette::LIGHT_RED),
            RGB::named(palette::DARKER_RED),
        );
    }

    draw_messages(sink, session.log(), config.bar_width + 2, top + 1);
}

/// Centered letter menu with the header word-wrapped above the options.
pub fn draw_menu(
    sink: &mut dyn GlyphSink,
    menu: &Menu,
    width: i32,
    screen_width: i32,
    screen_height: i32,
) {
    let mut header = wrap(&menu.header, width.max(1) as usize);
    if !header.is_empty() {
        header.push(String::new());
    }
    let rows = menu.rows();
    let height = (header.len() + rows.len()) as i32;
    let left = screen_width / 2 - width / 2;
    let top = screen_height / 2 - height / 2;

    for y in top..top + height {
        for x in left..left + width {
            sink.set_cell_background(x, y, RGB::named(palette::BLACK));
            sink.put_glyph(x, y, ' ', RGB::named(palette::WHITE));
        }
    }
    for (row, line) in header.iter().chain(rows.iter()).enumerate() {
        sink.print(left, top + row as i32, line, RGB::named(palette::WHITE));
    }
}

#[cfg(test)]
mod tests {
    use bracket_geometry::prelude::Rect;

    use super::*;
    use crate::{
        data::{monsters::BESTIARY, player_spec},
        visibility::ShadowcastFov,
    };

    fn lit_room() -> (TileGrid, Visibility) {
        let mut grid = TileGrid::filled(20, 10);
        grid.carve_room(&Rect::with_size(0, 0, 8, 8));
        grid.carve_room(&Rect::with_size(10, 0, 8, 8));
        let mut vis = Visibility::new(10, true);
        vis.recompute(&ShadowcastFov, Point::new(3, 3), &mut grid);
        (grid, vis)
    }

    #[test]
    fn map_colors_follow_visibility() {
        let (mut grid, vis) = lit_room();
        grid.mark_explored(Point::new(12, 3));
        let mut frame = FrameBuffer::new(20, 10);
        draw_map(&mut frame, &grid, &vis);

        let bg = |x, y| frame.cell(x, y).map(|c| c.bg);
        assert_eq!(bg(3, 4), Some(RGB::named(palette::LIGHT_GROUND)));
        assert_eq!(bg(0, 3), Some(RGB::named(palette::LIGHT_WALL)));
        assert_eq!(bg(12, 3), Some(RGB::named(palette::DARK_GROUND)));
        assert_eq!(bg(14, 5), Some(RGB::named(palette::BLACK)), "unseen stays blank");
    }

    #[test]
    fn player_is_drawn_over_items_and_hidden_actors_are_not() {
        let (_, vis) = lit_room();
        let mut store = ActorStore::new(player_spec(Point::new(3, 3)));
        let player = store.player();
        let potion = store.spawn(
            crate::data::items::ConsumableTemplate::healing_potion(4).spec(Point::new(3, 3)),
        );
        store.send_to_front(potion);
        store.spawn(BESTIARY[0].spec(Point::new(12, 3)));
        assert_ne!(store.handles().last(), Some(&player));

        let mut frame = FrameBuffer::new(20, 10);
        draw_actors(&mut frame, &store, &vis);
        assert_eq!(frame.cell(3, 3).map(|c| c.glyph), Some('@'));
        assert_eq!(frame.cell(12, 3).map(|c| c.glyph), Some(' '));
    }

    #[test]
    fn bar_fill_is_proportional() {
        let mut frame = FrameBuffer::new(30, 2);
        let full = RGB::named(palette::LIGHT_RED);
        let empty = RGB::named(palette::DARKER_RED);
        render_bar(&mut frame, 0, 0, 20, "HP", 15, 30, full, empty);

        assert_eq!(frame.cell(9, 0).map(|c| c.bg), Some(full));
        assert_eq!(frame.cell(10, 0).map(|c| c.bg), Some(empty));
        assert_eq!(frame.row_text(0).trim(), "HP: 15/30");
    }

    #[test]
    fn menu_is_centered_with_lettered_rows() {
        let menu = Menu::new("Use which?", vec!["healing potion".into()]).expect("menu");
        let mut frame = FrameBuffer::new(80, 50);
        draw_menu(&mut frame, &menu, 50, 80, 50);

        let rows: Vec<String> = (0..50).map(|y| frame.row_text(y)).collect();
        let header = rows.iter().position(|r| r.trim() == "Use which?").expect("header");
        assert_eq!(rows[header + 2].trim(), "(a) healing potion");
        assert!(rows[header].starts_with(&" ".repeat(15)));
    }
}
