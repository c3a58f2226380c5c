use std::fmt::{self, Write};

use crate::value::Value;

/// Formats a [`Value`] in its quoted form.
///
/// Strings are wrapped in quotes and escaped, floats are rendered in their
/// shortest round-trip form and containers render their items recursively
/// in quoted form.  The [`Display`](fmt::Display) implementation of
/// [`Value`] only differs from this for top level strings.
#[derive(Debug, Clone, Copy)]
pub struct Repr<'v> {
    value: &'v Value,
}

impl<'v> Repr<'v> {
    /// Creates a quoted formatter for a value.
    pub fn new(value: &'v Value) -> Repr<'v> {
        Repr { value }
    }
}

impl<'v> fmt::Display for Repr<'v> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value {
            Value::Null => f.write_str("None"),
            Value::Bool(b) => write_bool(f, *b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => write_quoted(f, s),
            Value::List(items) => {
                f.write_char('[')?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item.repr())?;
                }
                f.write_char(']')
            }
            Value::Map(map) => {
                f.write_char('{')?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key.repr(), value.repr())?;
                }
                f.write_char('}')
            }
        }
    }
}

pub(crate) fn write_bool(f: &mut fmt::Formatter, value: bool) -> fmt::Result {
    f.write_str(if value { "True" } else { "False" })
}

/// Writes a quoted and escaped string.
///
/// Single quotes are preferred unless the string contains a single quote
/// but no double quote.  Non printable characters are written as `\x`,
/// `\u` or `\U` escapes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if !is_printable(c) => match c as u32 {
                code @ 0..=0xff => write!(f, "\\x{:02x}", code)?,
                code @ 0x100..=0xffff => write!(f, "\\u{:04x}", code)?,
                code => write!(f, "\\U{:08x}", code)?,
            },
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Checks if a character is written as is inside a quoted string.
///
/// Control characters, format characters, line and paragraph separators,
/// spaces other than the ASCII space and private use characters are not
/// printable.  Unassigned code points are not detected and pass through.
fn is_printable(c: char) -> bool {
    !(c.is_control()
        || matches!(
            c,
            '\u{a0}'
                | '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{61c}'
                | '\u{6dd}'
                | '\u{70f}'
                | '\u{1680}'
                | '\u{180e}'
                | '\u{2000}'..='\u{200f}'
                | '\u{2028}'..='\u{202f}'
                | '\u{205f}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{3000}'
                | '\u{e000}'..='\u{f8ff}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{110bd}'
                | '\u{1bca0}'..='\u{1bca3}'
                | '\u{1d173}'..='\u{1d17a}'
                | '\u{e0001}'
                | '\u{e0020}'..='\u{e007f}'
                | '\u{f0000}'..='\u{10ffff}'
        ))
}

/// Writes a float in shortest round-trip form.
///
/// Decimal exponents in `-4..16` are written positionally and always carry
/// a fractional part (`1.0`, `0.0001`), everything else is written in
/// scientific notation with a signed exponent of at least two digits
/// (`1e+16`, `1.5e-07`).
pub(crate) fn write_float(f: &mut fmt::Formatter, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    } else if value.is_infinite() {
        return f.write_str(if value < 0.0 { "-inf" } else { "inf" });
    }

    // `{:e}` yields the shortest round-trip digits, eg: `-1.5e-7`
    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().map_err(|_| fmt::Error)?),
        None => return Err(fmt::Error),
    };

    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return write!(f, "{}e{}{:02}", mantissa, sign, exp.abs());
    }

    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if negative {
        f.write_char('-')?;
    }

    if exp < 0 {
        f.write_str("0.")?;
        for _ in 0..(-exp - 1) {
            f.write_char('0')?;
        }
        return f.write_str(&digits);
    }

    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        f.write_str(&digits)?;
        for _ in digits.len()..int_len {
            f.write_char('0')?;
        }
        f.write_str(".0")
    } else {
        write!(f, "{}.{}", &digits[..int_len], &digits[int_len..])
    }
}

#[test]
fn test_float_forms() {
    let render = |x: f64| Value::Float(x).to_string();
    assert_eq!(render(1.0), "1.0");
    assert_eq!(render(0.0), "0.0");
    assert_eq!(render(-0.0), "-0.0");
    assert_eq!(render(100.0), "100.0");
    assert_eq!(render(0.5), "0.5");
    assert_eq!(render(-2.25), "-2.25");
    assert_eq!(render(123456.789), "123456.789");
    assert_eq!(render(0.0001), "0.0001");
    assert_eq!(render(0.00001), "1e-05");
    assert_eq!(render(1.5e-7), "1.5e-07");
    assert_eq!(render(1e15), "1000000000000000.0");
    assert_eq!(render(1e16), "1e+16");
    assert_eq!(render(-1.25e22), "-1.25e+22");
    assert_eq!(render(f64::NAN), "nan");
    assert_eq!(render(f64::NEG_INFINITY), "-inf");
}

#[test]
fn test_quoted_strings() {
    let repr = |s: &str| Value::from(s).repr().to_string();
    assert_eq!(repr("simple"), "'simple'");
    assert_eq!(repr("it's"), "\"it's\"");
    assert_eq!(repr("both ' and \""), "'both \\' and \"'");
    assert_eq!(repr("a\\b"), "'a\\\\b'");
    assert_eq!(repr("line\nbreak\t"), "'line\\nbreak\\t'");
    assert_eq!(repr("\u{1}"), "'\\x01'");
    assert_eq!(repr("ünïcödé"), "'ünïcödé'");
    assert_eq!(repr("x\u{2028}y"), "'x\\u2028y'");
    assert_eq!(repr("para\u{2029}"), "'para\\u2029'");
    assert_eq!(repr("no\u{a0}break"), "'no\\xa0break'");
    assert_eq!(repr("\u{feff}bom"), "'\\ufeffbom'");
    assert_eq!(repr("zero\u{200b}width"), "'zero\\u200bwidth'");
    assert_eq!(repr("\u{f0000}"), "'\\U000f0000'");
    assert_eq!(repr("a b"), "'a b'");
}

#[test]
fn test_nested_containers() {
    let value = crate::list![1, 3, 4, crate::dict! { "simple" => "dictionaries" }];
    assert_eq!(value.to_string(), "[1, 3, 4, {'simple': 'dictionaries'}]");
    assert_eq!(crate::list![].to_string(), "[]");
    assert_eq!(crate::dict! {}.to_string(), "{}");
    assert_eq!(
        crate::dict! { 1 => true, "n" => () }.to_string(),
        "{1: True, 'n': None}"
    );
}
