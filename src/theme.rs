use egui::Color32;

// Details items
pub const DETAIL_COLOR: Color32 = Color32::LIGHT_YELLOW;
pub const HEAD_GRID_COLOR: Color32 = Color32::GRAY;

pub const ITEM_NAME_COLOR: Color32 = Color32::WHITE;
pub const UNDEFINED_NAME_COLOR: Color32 = Color32::LIGHT_RED;

pub const SETTINGS_FRAME_COLOR: Color32 = Color32::from_rgb(40, 40, 48);

pub const GREEN_BUTTON: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50); // green
pub const RED_BUTTON: Color32 = Color32::from_rgb(0xF4, 0x43, 0x36); // red
pub const ORANGE_BUTTON: Color32 = Color32::ORANGE; // orange
pub const BLUE_BUTTON: Color32 = Color32::LIGHT_BLUE; // blue
