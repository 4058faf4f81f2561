//! Width metrics for the builtin Helvetica face, used to right/center align
//! text and to word-wrap paragraphs without embedding a font.

const PT_TO_MM: f32 = 0.352_778;

/// Advance widths in 1/1000 em for the printable ASCII range (0x20..=0x7E),
/// taken from the standard Helvetica AFM.
#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Accented Latin-1 letters share the advance width of their base letter in
/// Helvetica; anything else unknown falls back to an average width.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

fn char_width_millis(c: char) -> u16 {
    let folded = fold_accent(c);
    let code = folded as u32;
    if (0x20..=0x7E).contains(&code) {
        ASCII_WIDTHS[(code - 0x20) as usize]
    } else {
        556
    }
}

/// Width of `text` in mm when set in Helvetica at `font_size_pt`.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let millis: u32 = text.chars().map(|c| u32::from(char_width_millis(c))).sum();
    millis as f32 / 1000.0 * font_size_pt * PT_TO_MM
}

/// Word-wraps `text` so no line exceeds `max_width_mm`. Explicit newlines are
/// preserved; words wider than the limit are hard-split.
pub fn wrap_text(text: &str, font_size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, font_size_pt) <= max_width_mm {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width_mm(word, font_size_pt) <= max_width_mm {
                current = word.to_string();
            } else {
                current = hard_split(word, font_size_pt, max_width_mm, &mut lines);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Splits an overlong word into full lines, returning the trailing fragment.
fn hard_split(word: &str, font_size_pt: f32, max_width_mm: f32, lines: &mut Vec<String>) -> String {
    let mut fragment = String::new();
    for c in word.chars() {
        fragment.push(c);
        if text_width_mm(&fragment, font_size_pt) > max_width_mm && fragment.chars().count() > 1 {
            let last = fragment.pop().unwrap();
            lines.push(std::mem::take(&mut fragment));
            fragment.push(last);
        }
    }
    fragment
}
