use finhub_types::ThemeMode;

/// Semantic color tokens the presentation layer styles itself with. Values
/// are `#RRGGBB` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: &'static str,
    pub surface: &'static str,
    pub glass: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub accent: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

pub const DARK: Palette = Palette {
    base: "#0A0A0F",
    surface: "#16161C",
    glass: "#1E1E26",
    border: "#2A2A33",
    text: "#F4F4F5",
    text_secondary: "#A1A1AA",
    accent: "#BEF264",
    success: "#22C55E",
    warning: "#EAB308",
    error: "#EF4444",
    info: "#3B82F6",
};

pub const LIGHT: Palette = Palette {
    base: "#FAFAF9",
    surface: "#FFFFFF",
    glass: "#F4F4F5",
    border: "#E4E4E7",
    text: "#18181B",
    text_secondary: "#52525B",
    accent: "#84CC16",
    success: "#16A34A",
    warning: "#CA8A04",
    error: "#DC2626",
    info: "#2563EB",
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Dark => &DARK,
            ThemeMode::Light => &LIGHT,
        }
    }
}
