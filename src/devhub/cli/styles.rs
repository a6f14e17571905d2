//! Named style palettes for the two themes, plus the per-user avatar
//! color. Styles are applied through the template `style` filter or, for
//! markdown spans and avatars, directly from render code.

use std::collections::HashMap;

use console::Style;
use devhub::model::Theme;
use once_cell::sync::Lazy;

/// A named collection of console styles. Unknown names render with a
/// `(!?)` marker so template typos surface instead of vanishing.
#[derive(Clone)]
pub struct Palette {
    styles: HashMap<String, Style>,
}

impl Palette {
    fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("(!?) {}", text),
        }
    }
}

pub static DARK: Lazy<Palette> = Lazy::new(|| {
    base_palette()
        .add("title", Style::new().bold().white())
        .add("heading", Style::new().bold().cyan())
        .add("time", Style::new().color256(245).italic())
        .add("dim", Style::new().color256(245))
});

pub static LIGHT: Lazy<Palette> = Lazy::new(|| {
    base_palette()
        .add("title", Style::new().bold().black())
        .add("heading", Style::new().bold().blue())
        .add("time", Style::new().color256(102).italic())
        .add("dim", Style::new().color256(102))
});

fn base_palette() -> Palette {
    Palette::new()
        .add("author", Style::new().bold())
        .add("subject", Style::new().magenta())
        .add("language", Style::new().cyan())
        .add("number", Style::new().yellow())
        .add("fav", Style::new().yellow())
        .add("badge_message", Style::new().green())
        .add("badge_post", Style::new().magenta())
        .add("badge_comment", Style::new().blue())
        .add("code", Style::new().color256(180))
        .add("strong", Style::new().bold())
        .add("emphasis", Style::new().italic())
        .add("reply", Style::new().dim().italic())
}

/// The persisted preference wins; with no key stored we follow the
/// desktop's mode.
pub fn resolve(preference: Option<Theme>) -> &'static Palette {
    let theme = preference.unwrap_or_else(|| match dark_light::detect() {
        dark_light::Mode::Light => Theme::Light,
        _ => Theme::Dark,
    });
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

// One fixed palette of readable ANSI-256 colors; hashing the username picks
// a stable one, same trick the web build used for its avatar circles.
const AVATAR_COLORS: [u8; 8] = [39, 208, 41, 205, 220, 69, 168, 81];

pub fn avatar_color(author: &str) -> u8 {
    let hash: u32 = author
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    AVATAR_COLORS[(hash as usize) % AVATAR_COLORS.len()]
}

pub fn avatar(author: &str, use_color: bool) -> String {
    let initial = author
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    let badge = format!("({})", initial);
    if use_color {
        Style::new()
            .color256(avatar_color(author))
            .bold()
            .apply_to(badge)
            .to_string()
    } else {
        badge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_color_is_stable_per_user() {
        assert_eq!(avatar_color("ada"), avatar_color("ada"));
        // different users usually differ; these two are known to
        assert_ne!(avatar_color("ada"), avatar_color("grace"));
    }

    #[test]
    fn avatar_shows_the_initial() {
        assert_eq!(avatar("ada", false), "(A)");
        assert_eq!(avatar("", false), "(?)");
    }

    #[test]
    fn unknown_style_name_is_flagged() {
        let palette = base_palette();
        assert_eq!(palette.apply("no_such", "x", true), "(!?) x");
    }

    #[test]
    fn apply_without_color_passes_text_through() {
        let palette = base_palette();
        assert_eq!(palette.apply("author", "ada", false), "ada");
    }

    #[test]
    fn both_palettes_define_the_shared_names() {
        for name in ["title", "time", "author", "code", "badge_post"] {
            assert!(DARK.style(name).is_some(), "dark misses {}", name);
            assert!(LIGHT.style(name).is_some(), "light misses {}", name);
        }
    }
}
