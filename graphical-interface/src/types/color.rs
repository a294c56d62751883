use egui::Color32;

/// Parses a CSS hex colour, `#RRGGBB` or the short `#RGB` form.
pub fn parse_css_color(css: &str) -> Option<Color32> {
    let hex = css.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => {
            let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
            Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_and_short_forms() {
        assert_eq!(parse_css_color("#FF5733"), Some(Color32::from_rgb(255, 87, 51)));
        assert_eq!(parse_css_color(" #0f0 "), Some(Color32::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_rejects_names_and_garbage() {
        assert_eq!(parse_css_color("red"), None);
        assert_eq!(parse_css_color("#12345"), None);
        assert_eq!(parse_css_color("#GGGGGG"), None);
        assert_eq!(parse_css_color("#ÿÿÿ"), None);
    }
}
