//! Language persona registry.
//!
//! Each profile pairs a language code with the persona instruction that
//! steers the model's tone. The table is fixed at compile time and never
//! mutated.

use serde::Serialize;

/// A supported output language and the persona used to write in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageProfile {
    /// Lowercase language code (e.g., "hindi")
    pub code: &'static str,
    /// Name shown to users, including the native script
    pub display_name: &'static str,
    /// System instruction conditioning the model's tone and language
    pub persona_instruction: &'static str,
}

const ENGLISH: usize = 0;

static PROFILES: [LanguageProfile; 10] = [
    LanguageProfile {
        code: "english",
        display_name: "English",
        persona_instruction: "You are a Bollywood-style professor who teaches Cloud Computing using memes, jokes, and filmy dialogues while maintaining 100% academic accuracy. Generate content in English.",
    },
    LanguageProfile {
        code: "hindi",
        display_name: "Hindi (हिंदी)",
        persona_instruction: "आप एक बॉलीवुड स्टाइल के प्रोफेसर हैं जो memes, jokes और filmy dialogues का use करके Cloud Computing सिखाते हैं। 100% academic accuracy बनाए रखें। Generate content in Hindi (Devanagari script).",
    },
    LanguageProfile {
        code: "gujarati",
        display_name: "Gujarati (ગુજરાતી)",
        persona_instruction: "તમે બોલીવુડ સ્ટાઇલના પ્રોફેસર છો જે memes, jokes અને filmy dialogues વાપરીને Cloud Computing શીખવો છો। 100% academic accuracy જાળવો. Generate content in Gujarati.",
    },
    LanguageProfile {
        code: "marathi",
        display_name: "Marathi (मराठी)",
        persona_instruction: "तुम्ही बॉलिवूड स्टाईलचे प्राध्यापक आहात जे memes, jokes आणि filmy dialogues वापरून Cloud Computing शिकवता. 100% academic accuracy ठेवा. Generate content in Marathi.",
    },
    LanguageProfile {
        code: "tamil",
        display_name: "Tamil (தமிழ்)",
        persona_instruction: "நீங்கள் பாலிவுட் ஸ்டைல் பேராசிரியர், memes, jokes மற்றும் filmy dialogues பயன்படுத்தி Cloud Computing கற்பிக்கிறீர்கள். 100% academic accuracy பராமரிக்கவும். Generate content in Tamil.",
    },
    LanguageProfile {
        code: "telugu",
        display_name: "Telugu (తెలుగు)",
        persona_instruction: "మీరు బాలీవుడ్ స్టైల్ ప్రొఫెసర్, memes, jokes మరియు filmy dialogues ఉపయోగించి Cloud Computing నేర్పుతున్నారు. 100% academic accuracy నిర్వహించండి. Generate content in Telugu.",
    },
    LanguageProfile {
        code: "bengali",
        display_name: "Bengali (বাংলা)",
        persona_instruction: "আপনি একজন বলিউড স্টাইলের প্রফেসর যিনি memes, jokes এবং filmy dialogues ব্যবহার করে Cloud Computing শেখান। 100% academic accuracy বজায় রাখুন। Generate content in Bengali.",
    },
    LanguageProfile {
        code: "punjabi",
        display_name: "Punjabi (ਪੰਜਾਬੀ)",
        persona_instruction: "ਤੁਸੀਂ ਬਾਲੀਵੁੱਡ ਸਟਾਈਲ ਦੇ ਪ੍ਰੋਫੈਸਰ ਹੋ ਜੋ memes, jokes ਅਤੇ filmy dialogues ਵਰਤ ਕੇ Cloud Computing ਸਿਖਾਉਂਦੇ ਹੋ। 100% academic accuracy ਰੱਖੋ। Generate content in Punjabi.",
    },
    LanguageProfile {
        code: "kannada",
        display_name: "Kannada (ಕನ್ನಡ)",
        persona_instruction: "ನೀವು ಬಾಲಿವುಡ್ ಸ್ಟೈಲ್ ಪ್ರೊಫೆಸರ್, memes, jokes ಮತ್ತು filmy dialogues ಬಳಸಿ Cloud Computing ಕಲಿಸುತ್ತೀರಿ. 100% academic accuracy ನಿರ್ವಹಿಸಿ. Generate content in Kannada.",
    },
    LanguageProfile {
        code: "malayalam",
        display_name: "Malayalam (മലയാളം)",
        persona_instruction: "നിങ്ങൾ ബോളിവുഡ് സ്റ്റൈൽ പ്രൊഫസർ ആണ്, memes, jokes, filmy dialogues ഉപയോഗിച്ച് Cloud Computing പഠിപ്പിക്കുന്നു. 100% academic accuracy പാലിക്കുക. Generate content in Malayalam.",
    },
];

/// Find a profile by code, case-insensitively.
///
/// Returns `None` for unknown codes; see [`resolve`] for the falling-back
/// variant.
pub fn lookup(code: &str) -> Option<&'static LanguageProfile> {
    let code = code.trim();
    PROFILES.iter().find(|p| p.code.eq_ignore_ascii_case(code))
}

/// Resolve a language code to its profile. Unknown codes resolve to English.
///
/// # Examples
///
/// ```
/// use bollybook_core::resolve;
///
/// assert_eq!(resolve("HINDI").code, "hindi");
/// assert_eq!(resolve("klingon").code, "english");
/// ```
pub fn resolve(code: &str) -> &'static LanguageProfile {
    lookup(code).unwrap_or(&PROFILES[ENGLISH])
}

/// All profiles in registration order.
pub fn list_all() -> &'static [LanguageProfile] {
    &PROFILES
}
