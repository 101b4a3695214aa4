//! Named color-grade preset library.
//!
//! Each preset expands to an ordered list of typed stages. Alongside the
//! hand-tuned looks there are four generated families (`basic_1..5`,
//! `vintage_1..5`, `bw_1..5`, `cine_1..5`) whose strength scales with the
//! suffix index. Unknown names expand to no stages.

use super::stage::FilterStage;

/// Expand a preset name into its stage list.
pub fn preset_stages(name: &str) -> Vec<FilterStage> {
    match name {
        "punch" => vec![eq(0.0, 1.3, 1.3)],
        "golden" => vec![eq(0.0, 1.1, 1.2), shadows(0.1, 0.05, -0.15)],
        "radiate" => vec![eq(0.1, 1.1, 1.1)],
        "warm_contrast" => vec![eq(0.0, 1.2, 1.0), shadows(0.1, 0.0, -0.1)],
        "calm" => vec![eq(0.05, 0.9, 0.8)],
        "cool_light" => vec![eq(0.1, 1.0, 1.0), shadows(-0.05, 0.0, 0.1)],
        "vivid_cool" => vec![eq(0.0, 1.0, 1.4), shadows(-0.1, 0.0, 0.15)],
        "dramatic_cool" => vec![eq(0.0, 1.3, 0.8), shadows(-0.2, 0.0, 0.2)],
        // Legacy looks.
        "vintage" => vec![
            shadows(0.2, 0.1, -0.2),
            FilterStage::Vignette {
                angle: std::f64::consts::FRAC_PI_4,
            },
        ],
        "cinematic" => vec![FilterStage::ColorBalance {
            rs: -0.1,
            gs: -0.05,
            bs: 0.2,
            rh: 0.2,
            gh: 0.1,
            bh: -0.2,
        }],
        "cyberpunk" => vec![shadows(0.2, -0.2, 0.3)],
        "warm" => vec![shadows(0.1, 0.1, -0.15)],
        "cool" => vec![shadows(-0.1, -0.05, 0.25)],
        "noir" => vec![
            FilterStage::HueSaturation { saturation: 0.0 },
            eq(0.0, 1.5, 1.0),
        ],
        "sepia" => vec![FilterStage::ColorChannelMixer {
            coefficients: vec![
                0.393, 0.769, 0.189, 0.0, 0.349, 0.686, 0.168, 0.0, 0.272, 0.534, 0.131,
            ],
        }],
        "pastel" => vec![eq(0.1, 0.8, 1.2)],
        other => generated_family(other),
    }
}

/// Expand the generated `{family}_{1..5}` presets.
fn generated_family(name: &str) -> Vec<FilterStage> {
    let Some((family, index)) = name.rsplit_once('_') else {
        return Vec::new();
    };
    let Ok(i) = index.parse::<u32>() else {
        return Vec::new();
    };
    if !(1..=5).contains(&i) {
        return Vec::new();
    }
    let i = i as f64;

    match family {
        "basic" => vec![eq(0.0, 1.0 + i * 0.05, 1.0 + i * 0.05)],
        "vintage" => vec![
            eq(0.0, 1.1, 0.7),
            shadows(0.1 + i * 0.02, 0.0, -(0.1 + i * 0.02)),
        ],
        "bw" => vec![eq(0.0, 1.0 + i * 0.1, 0.0)],
        "cine" => vec![
            eq(0.0, 1.2, 1.1),
            FilterStage::ColorBalance {
                rs: -0.05 * i,
                gs: 0.0,
                bs: 0.05 * i,
                rh: 0.05 * i,
                gh: 0.0,
                bh: -0.05 * i,
            },
        ],
        _ => Vec::new(),
    }
}

fn eq(brightness: f64, contrast: f64, saturation: f64) -> FilterStage {
    FilterStage::Eq {
        brightness,
        contrast,
        saturation,
    }
}

/// Shadow-band color balance shift.
fn shadows(rs: f64, gs: f64, bs: f64) -> FilterStage {
    FilterStage::ColorBalance {
        rs,
        gs,
        bs,
        rh: 0.0,
        gh: 0.0,
        bh: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_presets_expand_to_stages() {
        let punch = preset_stages("punch");
        assert_eq!(punch.len(), 1);
        assert_eq!(punch[0].render(), "eq=contrast=1.3:saturation=1.3");

        let golden = preset_stages("golden");
        assert_eq!(golden.len(), 2);
        assert_eq!(golden[1].render(), "colorbalance=rs=0.1:gs=0.05:bs=-0.15");
    }

    #[test]
    fn generated_family_scales_with_index() {
        let basic = preset_stages("basic_3");
        assert_eq!(basic.len(), 1);
        assert_eq!(basic[0].render(), "eq=contrast=1.15:saturation=1.15");

        let bw = preset_stages("bw_5");
        assert_eq!(bw[0].render(), "eq=contrast=1.5:saturation=0");
    }

    #[test]
    fn unknown_presets_are_noops() {
        assert!(preset_stages("none").is_empty());
        assert!(preset_stages("").is_empty());
        assert!(preset_stages("basic_9").is_empty());
        assert!(preset_stages("mystery_look").is_empty());
    }

    #[test]
    fn sepia_uses_channel_mixer() {
        let sepia = preset_stages("sepia");
        assert!(sepia[0].render().starts_with("colorchannelmixer=0.393:0.769:"));
    }

    #[test]
    fn noir_desaturates_then_boosts_contrast() {
        let noir = preset_stages("noir");
        assert_eq!(noir[0].render(), "hue=s=0");
        assert_eq!(noir[1].render(), "eq=contrast=1.5");
    }
}
