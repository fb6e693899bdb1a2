// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Colors and scales shared by the curtain overlay and the demo page.

## Organization

- **Palette**: Base colors, including the four curtain themes
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_curtain::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let veil = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    // Default theme: crimson velvet
    pub const CRIMSON_700: Color = Color::from_rgb(0.55, 0.0, 0.0);
    pub const CRIMSON_900: Color = Color::from_rgb(0.35, 0.0, 0.02);

    // Royal theme: deep purple
    pub const ROYAL_700: Color = Color::from_rgb(0.29, 0.0, 0.51);
    pub const ROYAL_900: Color = Color::from_rgb(0.18, 0.0, 0.33);

    // Elegant theme: charcoal
    pub const ELEGANT_700: Color = Color::from_rgb(0.17, 0.24, 0.31);
    pub const ELEGANT_900: Color = Color::from_rgb(0.1, 0.14, 0.2);

    // Gold theme: antique gold
    pub const GOLD_500: Color = Color::from_rgb(0.83, 0.69, 0.22);
    pub const GOLD_700: Color = Color::from_rgb(0.72, 0.53, 0.04);

    // Accents
    pub const SPARKLE: Color = Color::from_rgb(1.0, 0.95, 0.7);
    pub const CHAMPAGNE: Color = Color::from_rgb(1.0, 0.84, 0.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Diameter of a sparkle particle.
    pub const SPARKLE: f32 = 6.0;

    /// Width of the content box in the middle of the curtain.
    pub const CONTENT_WIDTH: f32 = 420.0;

    /// Resolution of the proportional layouts used for panels and particles.
    pub const PORTION_SCALE: f32 = 1000.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Curtain headline
    pub const DISPLAY: f32 = 48.0;

    /// Curtain subtitle, page headings
    pub const TITLE_MD: f32 = 22.0;

    /// Button labels
    pub const BODY_LG: f32 = 18.0;

    /// Page text
    pub const BODY: f32 = 14.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);

    assert!(typography::DISPLAY > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::BODY_LG);
    assert!(typography::BODY_LG > typography::BODY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }
}
