//! Maps runes typed on non-Latin keyboard layouts back to the QWERTY key in
//! the same physical position, so shortcuts keep working after a layout
//! switch.

use crossterm::event::{KeyCode, KeyEvent};

/// Russian ЙЦУКЕН, alpha block plus the punctuation keys that carry letters.
#[rustfmt::skip]
const RUSSIAN: &[(char, char)] = &[
    ('й', 'q'), ('ц', 'w'), ('у', 'e'), ('к', 'r'), ('е', 't'), ('н', 'y'),
    ('г', 'u'), ('ш', 'i'), ('щ', 'o'), ('з', 'p'), ('х', '['), ('ъ', ']'),
    ('ф', 'a'), ('ы', 's'), ('в', 'd'), ('а', 'f'), ('п', 'g'), ('р', 'h'),
    ('о', 'j'), ('л', 'k'), ('д', 'l'), ('ж', ';'), ('э', '\''),
    ('я', 'z'), ('ч', 'x'), ('с', 'c'), ('м', 'v'), ('и', 'b'), ('т', 'n'),
    ('ь', 'm'), ('б', ','), ('ю', '.'), ('ё', '`'),
    ('Й', 'Q'), ('Ц', 'W'), ('У', 'E'), ('К', 'R'), ('Е', 'T'), ('Н', 'Y'),
    ('Г', 'U'), ('Ш', 'I'), ('Щ', 'O'), ('З', 'P'), ('Х', '{'), ('Ъ', '}'),
    ('Ф', 'A'), ('Ы', 'S'), ('В', 'D'), ('А', 'F'), ('П', 'G'), ('Р', 'H'),
    ('О', 'J'), ('Л', 'K'), ('Д', 'L'), ('Ж', ':'), ('Э', '"'),
    ('Я', 'Z'), ('Ч', 'X'), ('С', 'C'), ('М', 'V'), ('И', 'B'), ('Т', 'N'),
    ('Ь', 'M'), ('Б', '<'), ('Ю', '>'), ('Ё', '~'),
];

/// Keys where the Ukrainian layout differs from the Russian one.
#[rustfmt::skip]
const UKRAINIAN: &[(char, char)] = &[
    ('і', 's'), ('ї', ']'), ('є', '\''), ('ґ', '\\'),
    ('І', 'S'), ('Ї', '}'), ('Є', '"'), ('Ґ', '|'),
];

/// Hebrew SI-1452. The script has no case.
#[rustfmt::skip]
const HEBREW: &[(char, char)] = &[
    ('ק', 'e'), ('ר', 'r'), ('א', 't'), ('ט', 'y'), ('ו', 'u'), ('ן', 'i'),
    ('ם', 'o'), ('פ', 'p'),
    ('ש', 'a'), ('ד', 's'), ('ג', 'd'), ('כ', 'f'), ('ע', 'g'), ('י', 'h'),
    ('ח', 'j'), ('ל', 'k'), ('ך', 'l'), ('ף', ';'),
    ('ז', 'z'), ('ס', 'x'), ('ב', 'c'), ('ה', 'v'), ('נ', 'b'), ('מ', 'n'),
    ('צ', 'm'), ('ת', ','), ('ץ', '.'),
];

/// Arabic 101.
#[rustfmt::skip]
const ARABIC: &[(char, char)] = &[
    ('ض', 'q'), ('ص', 'w'), ('ث', 'e'), ('ق', 'r'), ('ف', 't'), ('غ', 'y'),
    ('ع', 'u'), ('ه', 'i'), ('خ', 'o'), ('ح', 'p'), ('ج', '['), ('د', ']'),
    ('ش', 'a'), ('س', 's'), ('ي', 'd'), ('ب', 'f'), ('ل', 'g'), ('ا', 'h'),
    ('ت', 'j'), ('ن', 'k'), ('م', 'l'), ('ك', ';'), ('ط', '\''),
    ('ئ', 'z'), ('ء', 'x'), ('ؤ', 'c'), ('ر', 'v'), ('ى', 'n'), ('ة', 'm'),
    ('و', ','), ('ز', '.'), ('ظ', '/'), ('ذ', '`'),
];

const LAYOUTS: [&[(char, char)]; 4] = [UKRAINIAN, RUSSIAN, HEBREW, ARABIC];

pub fn translate_char(ch: char) -> char {
    if ch.is_ascii() {
        return ch;
    }
    LAYOUTS
        .iter()
        .flat_map(|table| table.iter())
        .find(|(foreign, _)| *foreign == ch)
        .map(|(_, qwerty)| *qwerty)
        .unwrap_or(ch)
}

/// Rewrites the rune of a character key; named keys and modifiers pass through.
pub fn translate_key(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(ch) => KeyEvent {
            code: KeyCode::Char(translate_char(ch)),
            ..key
        },
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn ascii_is_left_alone() {
        for byte in 0u8..=127 {
            let ch = char::from(byte);
            assert_eq!(translate_char(ch), ch);
        }
    }

    #[test]
    fn every_table_rune_maps_to_its_key() {
        for table in LAYOUTS {
            for (foreign, qwerty) in table.iter() {
                assert_eq!(translate_char(*foreign), *qwerty, "rune {foreign}");
            }
        }
    }

    #[test]
    fn tables_do_not_contain_conflicting_runes() {
        let mut seen: Vec<char> = Vec::new();
        for table in LAYOUTS {
            for (foreign, _) in table.iter() {
                assert!(!seen.contains(foreign), "duplicate rune {foreign}");
                seen.push(*foreign);
            }
        }
    }

    #[test]
    fn menu_shortcuts_resolve_from_each_layout() {
        assert_eq!(translate_char('ы'), 's');
        assert_eq!(translate_char('і'), 's');
        assert_eq!(translate_char('ד'), 's');
        assert_eq!(translate_char('س'), 's');
        assert_eq!(translate_char('о'), 'j');
        assert_eq!(translate_char('Л'), 'K');
        assert_eq!(translate_char('ф'), 'a');
    }

    #[test]
    fn unmapped_runes_pass_through() {
        assert_eq!(translate_char('λ'), 'λ');
        assert_eq!(translate_char('ß'), 'ß');
    }

    #[test]
    fn translate_key_keeps_named_keys_and_modifiers() {
        let key = KeyEvent::new(KeyCode::Char('ы'), KeyModifiers::SHIFT);
        let translated = translate_key(key);
        assert_eq!(translated.code, KeyCode::Char('s'));
        assert_eq!(translated.modifiers, KeyModifiers::SHIFT);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(translate_key(enter), enter);
    }
}
