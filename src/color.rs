use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Gender accents and rank tints
// ---------------------------------------------------------------------------

fn hue(gender: Gender) -> f32 {
    match gender {
        Gender::Male => 210.0,
        Gender::Female => 330.0,
    }
}

fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Card / heading colour for a gender.
pub fn gender_accent(gender: Gender) -> Color32 {
    from_hsl(hue(gender), 0.70, 0.55)
}

/// Rank colour: the most popular names are the most saturated, fading out
/// towards `worst`. Unranked entries are grey.
pub fn rank_tint(gender: Gender, rank: Option<i64>, worst: i64) -> Color32 {
    let Some(rank) = rank else {
        return Color32::GRAY;
    };
    let span = (worst.max(2) - 1) as f32;
    let t = ((rank - 1) as f32 / span).clamp(0.0, 1.0);
    from_hsl(hue(gender), 0.80 - 0.60 * t, 0.50 + 0.15 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genders_have_distinct_accents() {
        assert_ne!(gender_accent(Gender::Male), gender_accent(Gender::Female));
    }

    #[test]
    fn rank_tint_fades_and_clamps() {
        let top = rank_tint(Gender::Female, Some(1), 50);
        let bottom = rank_tint(Gender::Female, Some(50), 50);
        assert_ne!(top, bottom);
        assert_eq!(rank_tint(Gender::Female, Some(500), 50), bottom);
        assert_eq!(rank_tint(Gender::Female, Some(0), 50), top);
    }

    #[test]
    fn unranked_is_grey() {
        assert_eq!(rank_tint(Gender::Male, None, 10), Color32::GRAY);
    }
}
