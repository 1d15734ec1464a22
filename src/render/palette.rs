//! Color tuples, fed to `RGB::named` at the draw site.

pub type Color = (u8, u8, u8);

pub const BLACK: Color = (0, 0, 0);
pub const WHITE: Color = (255, 255, 255);

pub const DARK_WALL: Color = (0, 0, 100);
pub const DARK_GROUND: Color = (50, 50, 150);
pub const LIGHT_WALL: Color = (130, 110, 50);
pub const LIGHT_GROUND: Color = (200, 180, 50);

pub const LIGHT_GREY: Color = (159, 159, 159);
pub const GREY: Color = (127, 127, 127);
pub const DARK_GREY: Color = (95, 95, 95);
pub const DARKER_GREY: Color = (63, 63, 63);
pub const SEPIA: Color = (127, 101, 63);

pub const RED: Color = (255, 0, 0);
pub const LIGHT_RED: Color = (255, 63, 63);
pub const DARK_RED: Color = (191, 0, 0);
pub const DARKER_RED: Color = (127, 0, 0);
pub const ORANGE: Color = (255, 127, 0);
pub const YELLOW: Color = (255, 255, 0);
pub const GREEN: Color = (0, 255, 0);
pub const DARKER_GREEN: Color = (0, 127, 0);
pub const BLUE: Color = (0, 0, 255);
pub const PINK: Color = (255, 0, 127);
pub const VIOLET: Color = (127, 0, 255);
pub const LIGHT_VIOLET: Color = (159, 63, 255);
