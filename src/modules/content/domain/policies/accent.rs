use serde::Serialize;
use utoipa::ToSchema;

/// A selectable accent color: HSL token used by the stylesheet plus its hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccentColor {
    pub name: &'static str,
    pub value: &'static str,
    pub hex: &'static str,
}

pub const FALLBACK_ACCENT_HEX: &str = "ff5722";

pub const ACCENT_COLORS: [AccentColor; 5] = [
    AccentColor {
        name: "Orange",
        value: "17 100% 55%",
        hex: "ff5722",
    },
    AccentColor {
        name: "Cyber Blue",
        value: "199 89% 48%",
        hex: "0ea5e9",
    },
    AccentColor {
        name: "Emerald Green",
        value: "142 70% 45%",
        hex: "10b981",
    },
    AccentColor {
        name: "Neon Purple",
        value: "270 91% 65%",
        hex: "a855f7",
    },
    AccentColor {
        name: "Crimson",
        value: "346 84% 61%",
        hex: "f43f5e",
    },
];

/// Hex form of an accent token; unknown tokens map to the orange default.
pub fn accent_hex(token: &str) -> &'static str {
    ACCENT_COLORS
        .iter()
        .find(|c| c.value == token.trim())
        .map(|c| c.hex)
        .unwrap_or(FALLBACK_ACCENT_HEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_token_maps_to_its_hex() {
        assert_eq!(accent_hex("199 89% 48%"), "0ea5e9");
    }

    #[test]
    fn unknown_token_falls_back_to_orange() {
        assert_eq!(accent_hex("0 0% 0%"), FALLBACK_ACCENT_HEX);
    }
}
