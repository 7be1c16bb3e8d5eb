/// A named category color: translucent fill plus a stronger border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
    pub border: &'static str,
}

const fn color(name: &'static str, value: &'static str, border: &'static str) -> PaletteColor {
    PaletteColor {
        name,
        value,
        border,
    }
}

/// Colors offered for categories. The first entry is the default.
pub const PALETTE: [PaletteColor; 13] = [
    color("White", "rgba(255, 255, 255, 0.1)", "rgba(255, 255, 255, 0.8)"),
    color("Blue", "rgba(33, 150, 243, 0.3)", "rgba(33, 150, 243, 0.8)"),
    color("Green", "rgba(76, 175, 80, 0.3)", "rgba(76, 175, 80, 0.8)"),
    color("Purple", "rgba(156, 39, 176, 0.3)", "rgba(156, 39, 176, 0.8)"),
    color("Orange", "rgba(255, 152, 0, 0.3)", "rgba(255, 152, 0, 0.8)"),
    color("Red", "rgba(244, 67, 54, 0.3)", "rgba(244, 67, 54, 0.8)"),
    color("Teal", "rgba(0, 150, 136, 0.3)", "rgba(0, 150, 136, 0.8)"),
    color("Pink", "rgba(233, 30, 99, 0.3)", "rgba(233, 30, 99, 0.8)"),
    color("Indigo", "rgba(63, 81, 181, 0.3)", "rgba(63, 81, 181, 0.8)"),
    color("Cyan", "rgba(0, 188, 212, 0.3)", "rgba(0, 188, 212, 0.8)"),
    color("Amber", "rgba(255, 193, 7, 0.3)", "rgba(255, 193, 7, 0.8)"),
    color("Deep Orange", "rgba(255, 87, 34, 0.3)", "rgba(255, 87, 34, 0.8)"),
    color("Brown", "rgba(121, 85, 72, 0.3)", "rgba(121, 85, 72, 0.8)"),
];

pub fn default_color() -> &'static PaletteColor {
    &PALETTE[0]
}

/// Look up a palette color by name, ignoring case.
pub fn find_color(name: &str) -> Option<&'static PaletteColor> {
    let name = name.trim();
    PALETTE.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Reverse lookup from a stored fill value (for display).
pub fn color_for_value(value: &str) -> Option<&'static PaletteColor> {
    PALETTE.iter().find(|c| c.value == value)
}
