use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One role's colour on each background.
struct Shade {
  dark: (u8, u8, u8),
  light: (u8, u8, u8),
}

const TIMESTAMP: Shade = Shade {
  dark: (118, 166, 166),
  light: (92, 62, 38),
};
const PRIMARY: Shade = Shade {
  dark: (191, 126, 4),
  light: (70, 42, 25),
};
const ACCENT: Shade = Shade {
  dark: (166, 84, 55),
  light: (211, 99, 70),
};
const SUCCESS: Shade = Shade {
  dark: (118, 166, 166),
  light: (34, 142, 90),
};
const LABEL: Shade = Shade {
  dark: (217, 164, 4),
  light: (176, 103, 66),
};
const VALUE: Shade = Shade {
  dark: (242, 211, 56),
  light: (199, 146, 76),
};

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
      // Only RGB shades are ever produced here.
      _ => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn shade(&self, shade: &Shade) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = match self.theme {
      Theme::Dark => shade.dark,
      Theme::Light => shade.light,
    };
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.shade(&TIMESTAMP)
  }

  pub const fn primary(&self) -> Color {
    self.shade(&PRIMARY)
  }

  pub const fn accent(&self) -> Color {
    self.shade(&ACCENT)
  }

  pub const fn success(&self) -> Color {
    self.shade(&SUCCESS)
  }

  pub const fn label(&self) -> Color {
    self.shade(&LABEL)
  }

  pub const fn value(&self) -> Color {
    self.shade(&VALUE)
  }

  /// Help output styling; always the dark palette since clap renders before
  /// the theme flag is parsed.
  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, RgbColor, Style, Styles};

    const fn rgb(shade: &Shade) -> Option<ClapColor> {
      let (r, g, b) = shade.dark;
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(rgb(&LABEL)))
      .usage(Style::new().bold().fg_color(rgb(&LABEL)))
      .literal(Style::new().fg_color(rgb(&SUCCESS)))
      .placeholder(Style::new().fg_color(rgb(&TIMESTAMP)))
      .error(Style::new().bold().fg_color(rgb(&ACCENT)))
      .valid(Style::new().fg_color(rgb(&SUCCESS)))
      .invalid(Style::new().bold().fg_color(rgb(&ACCENT)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;extra;bg`); backgrounds 8 and up
/// are the bright half of the palette.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_theme_from_colorfgbg() {
    let cases = [
      ("15;0", Some(Theme::Dark)),
      ("0;15", Some(Theme::Light)),
      ("0;default;15", Some(Theme::Light)),
      ("garbage", None),
    ];
    for (input, expected) in cases {
      assert_eq!(theme_from_colorfgbg(input), expected, "{input}");
    }
  }

  #[test]
  fn test_disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    assert_eq!(colors.accent(), Color::Reset);
    assert_eq!(Colors::new(true, Theme::Light).success(), Color::Rgb { r: 34, g: 142, b: 90 });
  }
}
