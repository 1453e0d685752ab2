//! Dark theme used by the monitor windows.

use egui::{Color32, Context, Visuals};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1b, 0x1b, 0x1b);
pub const LOG_BACKGROUND: Color32 = Color32::from_rgb(0x10, 0x10, 0x10);
pub const PLOT_BACKGROUND: Color32 = Color32::from_rgb(0x20, 0x20, 0x20);
pub const ACCENT: Color32 = Color32::from_rgb(0x00, 0xff, 0x88);
pub const LOG_TEXT: Color32 = Color32::from_rgb(0x00, 0xff, 0xcc);
pub const STATUS_TEXT: Color32 = Color32::from_rgb(0xd0, 0xd0, 0xd0);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);
pub const PRESENT: Color32 = ACCENT;
pub const ABSENT: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);

pub fn apply(ctx: &Context) {
    let mut v = Visuals::dark();
    v.panel_fill = BACKGROUND;
    v.window_fill = BACKGROUND;
    v.extreme_bg_color = LOG_BACKGROUND;
    v.faint_bg_color = PLOT_BACKGROUND;
    v.selection.bg_fill = Color32::from_rgb(0x00, 0x80, 0x44);
    v.hyperlink_color = ACCENT;
    ctx.set_visuals(v);
}
