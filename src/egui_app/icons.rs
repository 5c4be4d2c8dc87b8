//! Presentation for dock items: glyph and fill colour per item name.
//!
//! Colours come from the item's position in the configured list, so two
//! items never share an appearance by accident of hashing.

use std::collections::BTreeMap;

use egui::Color32;

/// What the render callback hands back for one item.
#[derive(Clone, Debug, PartialEq)]
pub struct DockIcon {
    pub glyph: String,
    /// Hover text for the slot.
    pub label: String,
    pub fill: Color32,
}

const PALETTE: [Color32; 6] = [
    Color32::from_rgb(90, 176, 255),
    Color32::from_rgb(255, 143, 90),
    Color32::from_rgb(115, 214, 140),
    Color32::from_rgb(214, 115, 200),
    Color32::from_rgb(240, 200, 80),
    Color32::from_rgb(120, 130, 240),
];

/// Icons for every configured item, built once at startup.
#[derive(Clone, Debug, Default)]
pub struct IconSet {
    icons: BTreeMap<String, DockIcon>,
}

impl IconSet {
    pub fn new(names: &[String]) -> Self {
        let icons = names
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let icon = DockIcon {
                    glyph: glyph_for(name),
                    label: name.clone(),
                    fill: PALETTE[position % PALETTE.len()],
                };
                (name.clone(), icon)
            })
            .collect();
        Self { icons }
    }

    /// Icon for `name`; names outside the set get a neutral tile.
    pub fn icon(&self, name: &str) -> DockIcon {
        self.icons.get(name).cloned().unwrap_or_else(|| DockIcon {
            glyph: glyph_for(name),
            label: name.to_string(),
            fill: Color32::from_gray(96),
        })
    }
}

fn glyph_for(name: &str) -> String {
    let known = match name {
        "person" => Some("👤"),
        "message" => Some("💬"),
        "call" => Some("📞"),
        "camera" => Some("📷"),
        "photo" => Some("🖼"),
        _ => None,
    };
    match known {
        Some(glyph) => glyph.to_string(),
        None => name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn colours_follow_configured_position() {
        let set = IconSet::new(&names(&["call", "photo"]));
        assert_eq!(set.icon("call").fill, PALETTE[0]);
        assert_eq!(set.icon("photo").fill, PALETTE[1]);
        assert_eq!(set.icon("photo").label, "photo");
    }

    #[test]
    fn unknown_names_use_initial_letter() {
        let set = IconSet::new(&names(&["settings"]));
        assert_eq!(set.icon("settings").glyph, "S");
        assert_eq!(set.icon("").glyph, "?");
        assert_eq!(set.icon("missing").fill, Color32::from_gray(96));
    }
}
