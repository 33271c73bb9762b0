//! Lexicon for Hindi news-register transcripts.

use crate::lexical::LanguageProfile;

pub(crate) static PROFILE: LanguageProfile = LanguageProfile {
    language: "hi",
    sentence_endings: &[
        // copulas and auxiliaries
        "है", "हैं", "हूँ", "हो", "था", "थे", "थी", "थीं",
        // future forms
        "होगा", "होंगे", "होगी", "होगीं",
        // perfective forms
        "गया", "गए", "गई", "गईं", "गये", "दिया", "दिए", "दी", "दीं", "लिया", "लिए", "ली",
        "लीं", "किया", "किए", "की", "कीं", "हुआ", "हुए", "हुई", "हुईं",
        // participles
        "कर", "करके", "करने", "आकर",
    ],
    topic_transitions: &[
        "अब", "फिर", "इसके बाद", "उसके बाद", "वहीं", "दूसरी ओर", "इधर", "उधर", "यहाँ",
        "वहाँ", "इस बीच", "इस दौरान", "दूसरी खबर", "अगली खबर", "अब बात", "इस मामले में",
        "इस पर", "इससे", "लेकिन", "परंतु", "हालांकि",
    ],
    segment_starters: &[
        "देखिए", "जानिए", "समझिए", "सुनिए", "पहले", "दूसरे", "तीसरे", "मुख्य", "प्रमुख",
        "बड़ी", "अहम", "महत्वपूर्ण", "ख़ास", "विशेष", "रिपोर्ट", "समाचार", "न्यूज़", "ख़बर",
        "जानकारी", "सूत्र", "मामला",
    ],
    speech_indicators: &[
        "ने कहा", "बताया", "घोषणा की", "जानकारी दी", "स्पष्ट किया", "आरोप लगाया",
        "दावा किया", "मांग की", "निर्देश दिए",
    ],
    clause_conjunctions: &["और", "या"],
    politics_keywords: &["चुनाव", "सरकार", "विपक्ष", "नेता", "मंत्री", "संसद"],
    economy_keywords: &["बाजार", "सेंसेक्स", "निफ्टी", "अर्थव्यवस्था", "रुपया"],
    sports_keywords: &["खेल", "मैच", "टीम", "क्रिकेट", "फुटबॉल"],
    time_pattern: r"(आज|कल|परसों|[0-9]+\s*(जुलाई|अगस्त|सितंबर|अक्टूबर|नवंबर|दिसंबर))",
};
