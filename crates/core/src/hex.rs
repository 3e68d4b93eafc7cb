//! Hex rendering of byte blocks for log output.

const HEX_ALPHABET: &[u8; 16] = b"0123456789ABCDEF";

/// Render bytes as space-separated uppercase hex pairs.
///
/// With `align = Some(n)` a line break followed by `new_line_prefix` is
/// inserted before every `n`th byte, so multi-line dumps line up under the
/// first one.
///
/// ```
/// use symbin_core::bytes_to_hex;
///
/// assert_eq!(bytes_to_hex(&[0x00, 0xAB, 0x10], None, ""), "00 AB 10");
/// assert_eq!(bytes_to_hex(&[1, 2, 3], Some(2), "> "), "01 02 \n> 03");
/// ```
pub fn bytes_to_hex(bytes: &[u8], align: Option<usize>, new_line_prefix: &str) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);

    for (i, &byte) in bytes.iter().enumerate() {
        if let Some(align) = align.filter(|&a| a > 0) {
            if i > 0 && i % align == 0 {
                out.push('\n');
                out.push_str(new_line_prefix);
            }
        }

        out.push(char::from(HEX_ALPHABET[usize::from(byte >> 4)]));
        out.push(char::from(HEX_ALPHABET[usize::from(byte & 0xF)]));

        if i + 1 < bytes.len() {
            out.push(' ');
        }
    }

    out
}
