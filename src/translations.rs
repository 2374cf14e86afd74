//! Static UI strings.

use serde::Serialize;

use crate::language::Language;

#[derive(Debug, Clone, Serialize)]
pub struct Translations {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub ask: &'static str,
    pub send: &'static str,
    pub trends: &'static str,
    pub rate_limit: &'static str,
    pub error: &'static str,
}

static EN: Translations = Translations {
    title: "StyleBot 👗",
    subtitle: "Your AI-Powered Personal Stylist",
    ask: "Describe your style, occasion, or ask anything...",
    send: "Send",
    trends: "Get Fashion Trends",
    rate_limit: "Rate limit exceeded. Please wait a moment.",
    error: "Error occurred. Please try again.",
};

static KN: Translations = Translations {
    title: "ಸ್ಟೈಲ್ಬಾಟ್ 👗",
    subtitle: "ನಿಮ್ಮ AI-ಚಾಲಿತ ವೈಯಕ್ತಿಕ ಸ್ಟೈಲಿಸ್ಟ್",
    ask: "ನಿಮ್ಮ ಶೈಲಿ, ಸಂದರ್ಭ ವಿವರಿಸಿ ಅಥವಾ ಏನನ್ನಾದರೂ ಕೇಳಿ...",
    send: "ಕಳುಹಿಸಿ",
    trends: "ಫ್ಯಾಶನ್ ಟ್ರೆಂಡ್‌ಗಳನ್ನು ಪಡೆಯಿರಿ",
    rate_limit: "ದರ ಮಿತಿ ಮೀರಿದೆ. ದಯವಿಟ್ಟು ಸ್ವಲ್ಪ ಕಾಯಿರಿ.",
    error: "ದೋಷ ಸಂಭವಿಸಿದೆ. ದಯವಿಟ್ಟು ಮತ್ತೆ ಪ್ರಯತ್ನಿಸಿ.",
};

static HI: Translations = Translations {
    title: "स्टाइलबॉट 👗",
    subtitle: "आपका AI-संचालित व्यक्तिगत स्टाइलिस्ट",
    ask: "अपनी शैली, अवसर का वर्णन करें या कुछ भी पूछें...",
    send: "भेजें",
    trends: "फैशन ट्रेंड्स प्राप्त करें",
    rate_limit: "दर सीमा पार हो गई। कृपया थोड़ी देर प्रतीक्षा करें।",
    error: "त्रुटि हुई। कृपया पुनः प्रयास करें।",
};

pub fn for_language(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Kn => &KN,
        Language::Hi => &HI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_all_keys() {
        for language in Language::ALL {
            let json = serde_json::to_value(for_language(language)).unwrap();
            let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
            assert_eq!(keys.len(), 7, "{}", language);
            assert!(json.as_object().unwrap().values().all(|v| !v.as_str().unwrap().is_empty()));
        }
    }

    #[test]
    fn test_unknown_code_gets_english() {
        assert_eq!(for_language(Language::from_code("de")).send, "Send");
        assert_eq!(for_language(Language::Hi).send, "भेजें");
    }
}
