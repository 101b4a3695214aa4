//! Neural voice selection per language and gender.

use crate::models::VoiceGender;

/// (language code, male voice, female voice)
const VOICES: &[(&str, &str, &str)] = &[
    ("en", "en-US-ChristopherNeural", "en-US-JennyNeural"),
    ("hi", "hi-IN-MadhurNeural", "hi-IN-SwaraNeural"),
    ("es", "es-ES-AlvaroNeural", "es-ES-ElviraNeural"),
    ("fr", "fr-FR-HenriNeural", "fr-FR-DeniseNeural"),
    ("de", "de-DE-ConradNeural", "de-DE-KatjaNeural"),
    ("ja", "ja-JP-KeitaNeural", "ja-JP-NanamiNeural"),
    ("zh-CN", "zh-CN-YunxiNeural", "zh-CN-XiaoxiaoNeural"),
    ("pt", "pt-BR-AntonioNeural", "pt-BR-FranciscaNeural"),
    ("ru", "ru-RU-DmitryNeural", "ru-RU-SvetlanaNeural"),
    ("it", "it-IT-DiegoNeural", "it-IT-ElsaNeural"),
    ("ko", "ko-KR-InJoonNeural", "ko-KR-SunHiNeural"),
    ("tr", "tr-TR-AhmetNeural", "tr-TR-EmelNeural"),
    ("nl", "nl-NL-MaartenNeural", "nl-NL-ColetteNeural"),
    ("pl", "pl-PL-MarekNeural", "pl-PL-ZofiaNeural"),
    ("id", "id-ID-ArdiNeural", "id-ID-GadisNeural"),
    ("ar", "ar-SA-HamedNeural", "ar-SA-ZariyahNeural"),
    ("bn", "bn-IN-BashkarNeural", "bn-IN-TanishaaNeural"),
    ("vi", "vi-VN-NamMinhNeural", "vi-VN-HoaiMyNeural"),
    ("th", "th-TH-NiwatNeural", "th-TH-PremwadeeNeural"),
    ("uk", "uk-UA-OstapNeural", "uk-UA-PolinaNeural"),
    ("sv", "sv-SE-MattiasNeural", "sv-SE-SofieNeural"),
    ("ta", "ta-IN-ValluvarNeural", "ta-IN-PallaviNeural"),
    ("te", "te-IN-MohanNeural", "te-IN-ShrutiNeural"),
    ("mr", "mr-IN-ManoharNeural", "mr-IN-AarohiNeural"),
    ("ur", "ur-PK-AsadNeural", "ur-PK-UzmaNeural"),
];

/// Pick the voice for a language/gender pair.
///
/// Unknown languages fall back to English.
pub fn voice_for_language(lang: &str, gender: VoiceGender) -> &'static str {
    let row = VOICES
        .iter()
        .find(|(code, _, _)| *code == lang)
        .unwrap_or(&VOICES[0]);
    match gender {
        VoiceGender::Male => row.1,
        VoiceGender::Female => row.2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_language_resolves_both_genders() {
        assert_eq!(
            voice_for_language("es", VoiceGender::Male),
            "es-ES-AlvaroNeural"
        );
        assert_eq!(
            voice_for_language("es", VoiceGender::Female),
            "es-ES-ElviraNeural"
        );
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(
            voice_for_language("xx", VoiceGender::Male),
            "en-US-ChristopherNeural"
        );
    }
}
