//! Display utilities shared by games and analysis tables

use std::fmt::{self, Display, Write};

/// Write `xs` separated with `", "`
pub fn commas(w: &mut impl Write, xs: impl IntoIterator<Item = impl Display>) -> fmt::Result {
    for (idx, x) in xs.into_iter().enumerate() {
        if idx != 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}", x)?;
    }
    Ok(())
}

fn surround<W>(
    w: &mut W,
    open: char,
    close: char,
    middle: impl FnOnce(&mut W) -> fmt::Result,
) -> fmt::Result
where
    W: Write,
{
    w.write_char(open)?;
    middle(w)?;
    w.write_char(close)
}

pub fn parens<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    surround(w, '(', ')', middle)
}

pub fn braces<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    surround(w, '{', '}', middle)
}

#[test]
fn formats_separated_values() {
    let mut out = String::new();
    braces(&mut out, |w| commas(w, [1, 2, 3])).unwrap();
    assert_eq!(out, "{1, 2, 3}");

    let mut out = String::new();
    parens(&mut out, |w| commas(w, Vec::<u32>::new())).unwrap();
    assert_eq!(out, "()");
}
