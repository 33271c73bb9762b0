//! Lexicon for Gujarati news-register transcripts.

use crate::lexical::LanguageProfile;

pub(crate) static PROFILE: LanguageProfile = LanguageProfile {
    language: "gu",
    sentence_endings: &[
        // copulas and auxiliaries
        "છે", "છો", "છું", "છીએ", "હતો", "હતા", "હતી", "હતાં",
        // future forms
        "હશે", "હશો", "હશું", "હશીએ",
        // perfective forms
        "ગયો", "ગયા", "ગઈ", "ગયાં", "દીધો", "દીધા", "દીધી", "દીધાં", "લીધો", "લીધા",
        "લીધી", "લીધાં", "કર્યો", "કર્યા", "કરી", "કર્યાં", "થયો", "થયા", "થઈ", "થયાં",
        // participles
        "કરીને", "કરવા", "આવીને",
    ],
    topic_transitions: &[
        "હવે", "પછી", "એ પછી", "ત્યાર પછી", "ત્યાં", "બીજી બાજુ", "આ બાજુ", "ત્યા બાજુ",
        "અહીં", "ત્યાં", "એ દરમિયાન", "એ વખતે", "બીજા સમાચાર", "આગળના સમાચાર", "હવે વાત",
        "આ મામલામાં", "આ પર", "આમાંથી", "પરંતુ", "પણ", "તેમ છતાં",
    ],
    segment_starters: &[
        "જુઓ", "જાણો", "સમજો", "સાંભળો", "પહેલા", "બીજા", "ત્રીજા", "મુખ્ય", "પ્રમુખ",
        "મોટા", "મહત્વના", "મહત્વપૂર્ણ", "ખાસ", "વિશેષ", "રિપોર્ટ", "સમાચાર", "ન્યૂઝ",
        "ખબર", "માહિતી", "સૂત્ર", "મામલો",
    ],
    speech_indicators: &[
        "કહ્યું", "જણાવ્યું", "જાહેરાત કરી", "માહિતી આપી", "સ્પષ્ટ કર્યું", "આક્ષેપ કર્યો",
        "દાવો કર્યો", "માગ કરી", "સૂચના આપી",
    ],
    clause_conjunctions: &["અને", "કે"],
    politics_keywords: &["ચૂંટણી", "સરકાર", "વિપક્ષ", "નેતા", "મંત્રી", "વિધાનસભા"],
    economy_keywords: &["બજાર", "સેન્સેક્સ", "નિફ્ટી", "અર્થતંત્ર", "રૂપિયો"],
    sports_keywords: &["રમત", "મેચ", "ટીમ", "ક્રિકેટ", "ફૂટબોલ"],
    time_pattern: r"(આજે|કાલે|પરબા|[0-9]+\s*(જુલાઈ|ઓગસ્ટ|સપ્ટેમ્બર|ઓક્ટોબર|નવેમ્બર|ડિસેમ્બર))",
};
