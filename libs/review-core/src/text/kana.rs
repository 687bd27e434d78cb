//! Japanese script helpers: romaji/kana conversion and script detection.
//!
//! The conversion table is a deliberately small hard-coded lookup covering
//! the gojuon, voiced rows, and common digraphs. It is a coarse heuristic,
//! not a complete transliterator; validators depend on its exact behavior,
//! so extend it with care.

/// Romaji to hiragana, longest romaji key first so digraphs and long
/// syllables win over their prefixes.
static ROMAJI_TABLE: &[(&str, &str)] = &[
    // digraphs
    ("kya", "きゃ"),
    ("kyu", "きゅ"),
    ("kyo", "きょ"),
    ("sha", "しゃ"),
    ("shu", "しゅ"),
    ("sho", "しょ"),
    ("cha", "ちゃ"),
    ("chu", "ちゅ"),
    ("cho", "ちょ"),
    ("nya", "にゃ"),
    ("nyu", "にゅ"),
    ("nyo", "にょ"),
    ("hya", "ひゃ"),
    ("hyu", "ひゅ"),
    ("hyo", "ひょ"),
    ("mya", "みゃ"),
    ("myu", "みゅ"),
    ("myo", "みょ"),
    ("rya", "りゃ"),
    ("ryu", "りゅ"),
    ("ryo", "りょ"),
    ("gya", "ぎゃ"),
    ("gyu", "ぎゅ"),
    ("gyo", "ぎょ"),
    ("bya", "びゃ"),
    ("byu", "びゅ"),
    ("byo", "びょ"),
    ("pya", "ぴゃ"),
    ("pyu", "ぴゅ"),
    ("pyo", "ぴょ"),
    ("shi", "し"),
    ("chi", "ち"),
    ("tsu", "つ"),
    // voiced and semi-voiced rows
    ("ga", "が"),
    ("gi", "ぎ"),
    ("gu", "ぐ"),
    ("ge", "げ"),
    ("go", "ご"),
    ("za", "ざ"),
    ("ji", "じ"),
    ("zu", "ず"),
    ("ze", "ぜ"),
    ("zo", "ぞ"),
    ("ja", "じゃ"),
    ("ju", "じゅ"),
    ("jo", "じょ"),
    ("da", "だ"),
    ("de", "で"),
    ("do", "ど"),
    ("ba", "ば"),
    ("bi", "び"),
    ("bu", "ぶ"),
    ("be", "べ"),
    ("bo", "ぼ"),
    ("pa", "ぱ"),
    ("pi", "ぴ"),
    ("pu", "ぷ"),
    ("pe", "ぺ"),
    ("po", "ぽ"),
    // base rows
    ("ka", "か"),
    ("ki", "き"),
    ("ku", "く"),
    ("ke", "け"),
    ("ko", "こ"),
    ("sa", "さ"),
    ("su", "す"),
    ("se", "せ"),
    ("so", "そ"),
    ("ta", "た"),
    ("te", "て"),
    ("to", "と"),
    ("na", "な"),
    ("ni", "に"),
    ("nu", "ぬ"),
    ("ne", "ね"),
    ("no", "の"),
    ("ha", "は"),
    ("hi", "ひ"),
    ("fu", "ふ"),
    ("he", "へ"),
    ("ho", "ほ"),
    ("ma", "ま"),
    ("mi", "み"),
    ("mu", "む"),
    ("me", "め"),
    ("mo", "も"),
    ("ya", "や"),
    ("yu", "ゆ"),
    ("yo", "よ"),
    ("ra", "ら"),
    ("ri", "り"),
    ("ru", "る"),
    ("re", "れ"),
    ("ro", "ろ"),
    ("wa", "わ"),
    ("wo", "を"),
    ("a", "あ"),
    ("i", "い"),
    ("u", "う"),
    ("e", "え"),
    ("o", "お"),
    ("n", "ん"),
];

/// Convert romaji to hiragana with greedy longest-match lookup.
/// Unrecognized characters pass through unchanged.
pub fn romaji_to_hiragana(input: &str) -> String {
    let lower = input.to_lowercase();
    let bytes = lower.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        // Doubled consonant marks a sokuon, except "nn" which is ん.
        if i + 1 < bytes.len()
            && bytes[i] == bytes[i + 1]
            && bytes[i].is_ascii_alphabetic()
            && !matches!(bytes[i], b'a' | b'i' | b'u' | b'e' | b'o' | b'n')
        {
            out.push('っ');
            i += 1;
            continue;
        }

        let rest = &lower[i..];
        let hit = ROMAJI_TABLE
            .iter()
            .filter(|(r, _)| rest.starts_with(r))
            .max_by_key(|(r, _)| r.len());

        match hit {
            Some((r, kana)) => {
                out.push_str(kana);
                i += r.len();
            }
            None => {
                let c = rest.chars().next().unwrap_or_default();
                out.push(c);
                i += c.len_utf8();
            }
        }
    }

    out
}

/// Convert hiragana to romaji using the same table in reverse.
/// Unrecognized characters pass through unchanged.
pub fn hiragana_to_romaji(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == 'っ' {
            // Double the consonant of the following syllable.
            let rest: String = chars[i + 1..].iter().collect();
            let next = ROMAJI_TABLE
                .iter()
                .filter(|(_, k)| rest.starts_with(k))
                .max_by_key(|(_, k)| k.chars().count());
            if let Some((r, _)) = next {
                if let Some(c) = r.chars().next() {
                    out.push(c);
                }
            }
            i += 1;
            continue;
        }

        let rest: String = chars[i..].iter().collect();
        let hit = ROMAJI_TABLE
            .iter()
            .filter(|(_, k)| rest.starts_with(k))
            .max_by_key(|(_, k)| k.chars().count());

        match hit {
            Some((r, k)) => {
                out.push_str(r);
                i += k.chars().count();
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    out
}

/// Fold katakana (U+30A1..U+30F6) to hiragana by codepoint shift.
pub fn katakana_to_hiragana(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x30A1..=0x30F6).contains(&code) {
                char::from_u32(code - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c) || c == 'ー'
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// CJK unified ideograph check (BMP block only).
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// True when the string contains at least one kana character.
pub fn contains_kana(s: &str) -> bool {
    s.chars().any(is_kana)
}

/// True when the string contains at least one kanji character.
pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn romaji_basic_syllables() {
        assert_eq!(romaji_to_hiragana("ka"), "か");
        assert_eq!(romaji_to_hiragana("sushi"), "すし");
        assert_eq!(romaji_to_hiragana("nihon"), "にほん");
    }

    #[test]
    fn romaji_digraphs_win_over_prefixes() {
        assert_eq!(romaji_to_hiragana("kyoto"), "きょと");
        assert_eq!(romaji_to_hiragana("sha"), "しゃ");
    }

    #[test]
    fn romaji_sokuon() {
        assert_eq!(romaji_to_hiragana("kitte"), "きって");
        assert_eq!(romaji_to_hiragana("matte"), "まって");
    }

    #[test]
    fn romaji_passthrough_for_unknown() {
        assert_eq!(romaji_to_hiragana("ka-1"), "か-1");
    }

    #[test]
    fn hiragana_to_romaji_roundtrip() {
        assert_eq!(hiragana_to_romaji("すし"), "sushi");
        assert_eq!(hiragana_to_romaji("きょう"), "kyou");
        assert_eq!(hiragana_to_romaji("きって"), "kitte");
    }

    #[test]
    fn katakana_folds_to_hiragana() {
        assert_eq!(katakana_to_hiragana("カタカナ"), "かたかな");
        assert_eq!(katakana_to_hiragana("すでに ひらがな"), "すでに ひらがな");
    }

    #[test]
    fn script_detection() {
        assert!(is_hiragana('か'));
        assert!(is_katakana('カ'));
        assert!(is_kanji('日'));
        assert!(!is_kana('k'));
        assert!(contains_kanji("日本ご"));
        assert!(contains_kana("日本ご"));
    }
}
