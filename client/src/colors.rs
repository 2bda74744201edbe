use mapjitsu_shared::Tier;

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Translucent fill in the tier's color, for badge and card backgrounds.
pub fn tier_tint(tier: Tier, alpha: f64) -> String {
    let (r, g, b) = tier.color_rgb();
    rgba_css(r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::{rgba_css, tier_tint};
    use mapjitsu_shared::Tier;

    #[test]
    fn rgba_css_formats_components() {
        assert_eq!(rgba_css(1, 2, 3, 0.5), "rgba(1,2,3,0.5)");
    }

    #[test]
    fn tint_uses_tier_color() {
        assert_eq!(tier_tint(Tier::Caution, 0.1), "rgba(220,38,38,0.1)");
    }
}
