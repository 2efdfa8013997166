/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY for placeholder values ("", "N/A", "In Progress"),
/// and RESET otherwise.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "N/A" {
        format!("{GREY}{value}{RESET}")
    } else if v == "In Progress" {
        format!("{GREEN}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string into a 24-bit value.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Same as [`parse_hex_color`], with a fallback for invalid strings.
pub fn hex_or(s: &str, fallback: u32) -> u32 {
    parse_hex_color(s).unwrap_or(fallback)
}

/// Split a 24-bit color into PDF-style RGB components in `0.0..=1.0`.
pub fn rgb_components(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}
