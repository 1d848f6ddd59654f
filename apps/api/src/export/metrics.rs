//! Static font-metric table for the PDF renderer.
//!
//! Character widths are in thousandths of an em (the unit the AFM files
//! use), covering ASCII 0x20..=0x7E. Index = (char as usize) - 32. The PDF
//! path only needs widths to place right-aligned column text, so a static
//! table is enough; non-ASCII characters fall back to the average width.

/// Standard Helvetica advance widths, per mille of the font size.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, // space ! " # $ % & '
    333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
    556, 556, 556, 556, 556, 556, 556, 556, // 0 1 2 3 4 5 6 7
    556, 556, 278, 278, 584, 584, 584, 556, // 8 9 : ; < = > ?
    1015, 667, 667, 722, 722, 667, 611, 778, // @ A B C D E F G
    722, 278, 500, 667, 556, 833, 722, 778, // H I J K L M N O
    667, 778, 722, 667, 611, 722, 667, 944, // P Q R S T U V W
    667, 667, 611, 278, 278, 278, 469, 556, // X Y Z [ \ ] ^ _
    333, 556, 556, 500, 556, 556, 278, 556, // ` a b c d e f g
    556, 222, 222, 500, 222, 833, 556, 556, // h i j k l m n o
    556, 556, 333, 500, 278, 556, 500, 722, // p q r s t u v w
    500, 500, 500, 334, 260, 334, 584, // x y z { | } ~
];

const AVERAGE_WIDTH: f32 = 0.556;
/// Bold glyphs run a little wider; close enough for column placement.
const BOLD_FACTOR: f32 = 1.1;

/// Measures a string's rendered width in points at the given font size.
pub fn text_width_pt(text: &str, font_size_pt: f32, bold: bool) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[code - 32] as f32 / 1000.0
            } else {
                AVERAGE_WIDTH
            }
        })
        .sum();
    let em = if bold { em * BOLD_FACTOR } else { em };
    em * font_size_pt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_strings_are_wider() {
        let short = text_width_pt("Hong Kong", 9.5, false);
        let long = text_width_pt("Hong Kong SAR, China", 9.5, false);
        assert!(long > short);
    }

    #[test]
    fn width_scales_with_font_size() {
        let at_ten = text_width_pt("CUHK", 10.0, false);
        let at_twenty = text_width_pt("CUHK", 20.0, false);
        assert!((at_twenty - at_ten * 2.0).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        assert!(text_width_pt("CUHK", 10.0, true) > text_width_pt("CUHK", 10.0, false));
    }

    #[test]
    fn non_ascii_falls_back_to_average() {
        assert!(text_width_pt("香港", 10.0, false) > 0.0);
    }

    #[test]
    fn empty_string_has_zero_width() {
        assert_eq!(text_width_pt("", 12.0, false), 0.0);
    }
}
