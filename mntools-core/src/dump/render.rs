//! Row rendering in tuple notation
//!
//! Rows print as literal tuples: `(1, 'alice', None, 2.5, b'\x00')`.
//! NULL is `None`, text is quoted and escaped, blobs use `b'..'` byte
//! literals and reals use the shortest round-trip form.

use rusqlite::types::Value;

/// Render a row as a tuple: `(a, b)`, `(a,)` or `()`.
pub fn row(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(value).collect();
    match rendered.as_slice() {
        [single] => format!("({},)", single),
        _ => format!("({})", rendered.join(", ")),
    }
}

/// Render a single column value.
pub fn value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => float(*f),
        Value::Text(s) => text(s),
        Value::Blob(b) => bytes(b),
    }
}

/// Float literal: shortest round-trip digits, scientific notation when
/// the decimal exponent is below -4 or at least 16.
pub fn float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "-1.25e-7".
    let sci = format!("{:e}", f);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        return format!(
            "{}{}{}e{}{:02}",
            sign,
            first,
            fraction,
            exp_sign,
            exponent.unsigned_abs()
        );
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let padding = "0".repeat(int_len - digits.len());
        format!("{}{}{}.0", sign, digits, padding)
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}

/// Quoted text literal with quote selection and escaping.
pub fn text(s: &str) -> String {
    let quote = pick_quote(s.contains('\''), s.contains('"'));
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c => out.push_str(&escape_code_point(c as u32)),
        }
    }
    out.push(quote);
    out
}

/// Byte literal `b'..'` with printable ASCII kept as-is.
pub fn bytes(b: &[u8]) -> String {
    let quote = pick_quote(b.contains(&b'\''), b.contains(&b'"'));
    let mut out = String::with_capacity(b.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in b {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            byte if byte as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            byte => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote);
    out
}

/// Single quotes unless that would need escaping and double quotes would not.
fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    // Noncharacters end in FFFE or FFFF in every plane.
    if (c as u32) & 0xfffe == 0xfffe {
        return false;
    }
    !matches!(
        c,
        // Format characters
        '\u{00ad}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061c}'
            | '\u{06dd}'
            | '\u{070f}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08e2}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff0}'..='\u{fffb}'
            | '\u{110bd}'
            | '\u{110cd}'
            | '\u{13430}'..='\u{1343f}'
            | '\u{1bca0}'..='\u{1bca3}'
            | '\u{1d173}'..='\u{1d17a}'
            // Private use areas
            | '\u{e000}'..='\u{f8ff}'
            | '\u{f0000}'..='\u{10ffff}'
            // Unassigned blocks and tag characters
            | '\u{fdd0}'..='\u{fdef}'
            | '\u{40000}'..='\u{dffff}'
            | '\u{e0000}'..='\u{e00ff}'
            | '\u{e01f0}'..='\u{effff}'
    )
}

fn escape_code_point(cp: u32) -> String {
    if cp <= 0xff {
        format!("\\x{:02x}", cp)
    } else if cp <= 0xffff {
        format!("\\u{:04x}", cp)
    } else {
        format!("\\U{:08x}", cp)
    }
}
