//! Unicode → HD44780 character code translation.
//!
//! The controller's character ROM is not Unicode: 0x20–0x7D are ASCII,
//! 0x7E/0x7F are arrows, 0xA1–0xDF hold the JIS X 0201 katakana block and
//! 0xE0–0xFD a handful of Greek/Latin extras. Codes 0x00–0x07 address the
//! user-defined CGRAM glyphs (mirrored at 0x08–0x0F).
//!
//! Translation happens in three steps: kana folding (hiragana and half-width
//! forms to full-width katakana), literal substitutions (precomposed voiced
//! kana into base + diacritic, plus a few punctuation look-alikes), and a
//! longest-match scan against the reverse table. Characters the ROM cannot
//! render fall through as their raw codepoint value.

use std::collections::HashMap;
use std::sync::LazyLock;

/// ROM code → glyph. Entries are 1 or 2 chars; `None` marks codes with no
/// assigned glyph, which are never produced when decoding.
#[rustfmt::skip]
static CHARSET: [Option<&str>; 256] = [
    Some("\u{00}"), Some("\u{01}"), Some("\u{02}"), Some("\u{03}"), Some("\u{04}"), Some("\u{05}"), Some("\u{06}"), Some("\u{07}"),
    Some("\u{08}"), Some("\u{09}"), Some("\u{0A}"), Some("\u{0B}"), Some("\u{0C}"), Some("\u{0D}"), Some("\u{0E}"), Some("\u{0F}"),
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None,
    Some(" "), Some("!"), Some("\""), Some("#"), Some("$"), Some("%"), Some("&"), Some("'"),
    Some("("), Some(")"), Some("*"), Some("+"), Some(","), Some("-"), Some("."), Some("/"),
    Some("0"), Some("1"), Some("2"), Some("3"), Some("4"), Some("5"), Some("6"), Some("7"),
    Some("8"), Some("9"), Some(":"), Some(";"), Some("<"), Some("="), Some(">"), Some("?"),
    Some("@"), Some("A"), Some("B"), Some("C"), Some("D"), Some("E"), Some("F"), Some("G"),
    Some("H"), Some("I"), Some("J"), Some("K"), Some("L"), Some("M"), Some("N"), Some("O"),
    Some("P"), Some("Q"), Some("R"), Some("S"), Some("T"), Some("U"), Some("V"), Some("W"),
    Some("X"), Some("Y"), Some("Z"), Some("["), Some("\\"), Some("]"), Some("^"), Some("_"),
    Some("`"), Some("a"), Some("b"), Some("c"), Some("d"), Some("e"), Some("f"), Some("g"),
    Some("h"), Some("i"), Some("j"), Some("k"), Some("l"), Some("m"), Some("n"), Some("o"),
    Some("p"), Some("q"), Some("r"), Some("s"), Some("t"), Some("u"), Some("v"), Some("w"),
    Some("x"), Some("y"), Some("z"), Some("{"), Some("|"), Some("}"), Some("→"), Some("←"),
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None,
    Some("\u{A0}"), Some("。"), Some("「"), Some("」"), Some("、"), Some("・"), Some("ヲ"), Some("ァ"),
    Some("ィ"), Some("ゥ"), Some("ェ"), Some("ォ"), Some("ャ"), Some("ュ"), Some("ョ"), Some("ッ"),
    Some("ー"), Some("ア"), Some("イ"), Some("ウ"), Some("エ"), Some("オ"), Some("カ"), Some("キ"),
    Some("ク"), Some("ケ"), Some("コ"), Some("サ"), Some("シ"), Some("ス"), Some("セ"), Some("ソ"),
    Some("タ"), Some("チ"), Some("ツ"), Some("テ"), Some("ト"), Some("ナ"), Some("ニ"), Some("ヌ"),
    Some("ネ"), Some("ノ"), Some("ハ"), Some("ヒ"), Some("フ"), Some("ヘ"), Some("ホ"), Some("マ"),
    Some("ミ"), Some("ム"), Some("メ"), Some("モ"), Some("ヤ"), Some("ユ"), Some("ヨ"), Some("ラ"),
    Some("リ"), Some("ル"), Some("レ"), Some("ロ"), Some("ワ"), Some("ン"), Some("゛"), Some("゜"),
    Some("α"), Some("ä"), Some("β"), Some("ε"), Some("μ"), Some("σ"), Some("ρ"), Some("ℊ"),
    Some("√"), Some("⁻¹"), Some("ｊ"), Some("×"), Some("￠"), Some("￡"), Some("ñ"), Some("ö"),
    Some("ｐ"), Some("ｑ"), Some("θ"), Some("∞"), Some("Ω"), Some("ü"), Some("Σ"), Some("π"),
    Some("ｘ"), Some("ｙ"), Some("千"), Some("万"), Some("円"), Some("÷"), Some("\u{FE}"), Some("\u{FF}"),
];

/// Character-for-character folding pairs: each `from` char maps to the `to`
/// char at the same position. Together these cover the full hiragana and
/// half-width-kana ranges; everything converges on full-width katakana, the
/// form the substitution rules and the ROM table work in.
#[rustfmt::skip]
const FOLD_PAIRS: &[(&str, &str)] = &[
    // Hiragana → katakana.
    ("をぁぃぅぇぉゃゅょっあいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわん",
     "ヲァィゥェォャュョッアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン"),
    ("がぎぐげござじずぜぞだぢづでどばびぶべぼぱぴぷぺぽゔ",
     "ガギグゲゴザジズゼゾダヂヅデドバビブベボパピプペポヴ"),
    ("ゎゐゑゕゖ",
     "ヮヰヱヵヶ"),
    // Half-width katakana → full-width.
    ("ｦｧｨｩｪｫｬｭｮｯｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝ",
     "ヲァィゥェォャュョッアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン"),
    ("ﾞﾟ｡｢｣､･ｰ",
     "゛゜。「」、・ー"),
];

/// Ordered literal replacements applied after folding. Precomposed voiced and
/// semi-voiced katakana decompose into base glyph + diacritic glyph; the rest
/// are punctuation the ROM has a close stand-in for.
#[rustfmt::skip]
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("ガ", "カ゛"), ("ギ", "キ゛"), ("グ", "ク゛"), ("ゲ", "ケ゛"), ("ゴ", "コ゛"),
    ("ザ", "サ゛"), ("ジ", "シ゛"), ("ズ", "ス゛"), ("ゼ", "セ゛"), ("ゾ", "ソ゛"),
    ("ダ", "タ゛"), ("ヂ", "チ゛"), ("ヅ", "ツ゛"), ("デ", "テ゛"), ("ド", "ト゛"),
    ("バ", "ハ゛"), ("ビ", "ヒ゛"), ("ブ", "フ゛"), ("ベ", "ヘ゛"), ("ボ", "ホ゛"),
    ("パ", "ハ゜"), ("ピ", "ヒ゜"), ("プ", "フ゜"), ("ペ", "ヘ゜"), ("ポ", "ホ゜"),
    ("ヴ", "ウ゛"),
    ("℃", "゜C"),
    ("°", "゜"),
    ("”", "\""),
    ("’", "'"),
    ("~", "-"),
    ("‘", "`"),
    ("¥", "\\"),
];

static FOLD: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (from, to) in FOLD_PAIRS {
        for (f, t) in from.chars().zip(to.chars()) {
            map.insert(f, t);
        }
    }
    map
});

static REVERSE_INDEX: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    CHARSET
        .iter()
        .enumerate()
        .filter_map(|(code, glyph)| glyph.map(|g| (g, code as u8)))
        .collect()
});

/// Replaces every hiragana and half-width-kana character with its full-width
/// katakana equivalent. Other characters are left untouched.
pub fn fold_kana(text: &str) -> String {
    text.chars()
        .map(|c| FOLD.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Translates a string into the controller's character codes.
///
/// Codes for renderable characters are in 0x00–0xFF. Characters with no ROM
/// representation come through as their raw codepoint value, which may exceed
/// a byte; it is up to the caller to mask or reject those before transmission.
pub fn encode(text: &str) -> Vec<u32> {
    let mut folded = fold_kana(text);
    for (from, to) in SUBSTITUTIONS {
        if folded.contains(from) {
            folded = folded.replace(from, to);
        }
    }

    let chars: Vec<char> = folded.chars().collect();
    let mut codes = Vec::with_capacity(chars.len());
    let mut key = String::new();

    let mut i = 0;
    while i < chars.len() {
        // A two-character table entry always wins over two single-character
        // matches at the same position.
        if i + 1 < chars.len() {
            key.clear();
            key.push(chars[i]);
            key.push(chars[i + 1]);
            if let Some(&code) = REVERSE_INDEX.get(key.as_str()) {
                codes.push(code as u32);
                i += 2;
                continue;
            }
        }

        key.clear();
        key.push(chars[i]);
        match REVERSE_INDEX.get(key.as_str()) {
            Some(&code) => codes.push(code as u32),
            None => codes.push(chars[i] as u32),
        }
        i += 1;
    }

    codes
}

/// The glyph displayed for a ROM code, if the code has one assigned.
pub fn glyph_for(code: u8) -> Option<&'static str> {
    CHARSET[code as usize]
}
