use super::*;

#[test]
fn parses_six_digit_hex() {
    assert_eq!(hex_to_rgba("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
    assert_eq!(hex_to_rgba("0000FF"), Some([0.0, 0.0, 1.0, 1.0]));
}

#[test]
fn expands_shorthand_hex() {
    assert_eq!(hex_to_rgba("#0f0"), Some([0.0, 1.0, 0.0, 1.0]));
    let [r, g, b, a] = hex_to_rgba("abc").unwrap();
    assert!((r - f64::from(0xaa_u8) / 255.0).abs() < 1e-12);
    assert!((g - f64::from(0xbb_u8) / 255.0).abs() < 1e-12);
    assert!((b - f64::from(0xcc_u8) / 255.0).abs() < 1e-12);
    assert_eq!(a, 1.0);
}

#[test]
fn resolves_named_colors_case_insensitively() {
    assert_eq!(hex_to_rgba("red"), Some([1.0, 0.0, 0.0, 1.0]));
    assert_eq!(hex_to_rgba("White"), Some([1.0, 1.0, 1.0, 1.0]));
    assert_eq!(hex_to_rgba("green"), Some([0.0, 1.0, 0.0, 1.0]));
}

#[test]
fn rejects_unsupported_paints() {
    assert_eq!(hex_to_rgba("url(#grad)"), None);
    assert_eq!(hex_to_rgba("#12345"), None);
    assert_eq!(hex_to_rgba("#gg0000"), None);
    assert_eq!(hex_to_rgba("rebeccapurple"), None);
    assert_eq!(hex_to_rgba("#ééé"), None);
    assert_eq!(hex_to_rgba("#+f+f+f"), None);
}
