use anyhow::Result;
use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    ops::RangeInclusive,
};

/// Player closed the input stream, e.g. with Ctrl-D
#[derive(Debug, Clone, Copy)]
pub struct InputClosed;

impl Display for InputClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "input closed")
    }
}

impl std::error::Error for InputClosed {}

/// Interactive prompts that repeat until the answer is acceptable
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_owned())
    }

    /// Ask until `parse` accepts the answer. `warning` is shown before repeating `message`.
    pub fn ask<T>(
        &mut self,
        message: &str,
        warning: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        loop {
            if let Some(answer) = parse(&self.read_line()?) {
                return Ok(answer);
            }
            writeln!(self.output, "{} {}", warning, message)?;
            self.output.flush()?;
        }
    }

    pub fn ask_yes_no(&mut self, message: &str) -> Result<bool> {
        self.ask(
            message,
            "\nThe answer is either 'Y' or 'N'.\nTry again:",
            |answer| match answer.to_lowercase().as_str() {
                "y" => Some(true),
                "n" => Some(false),
                _ => None,
            },
        )
    }

    pub fn ask_number(
        &mut self,
        message: &str,
        warning: &str,
        range: RangeInclusive<u32>,
    ) -> Result<u32> {
        self.ask(message, warning, |answer| {
            answer
                .parse::<u32>()
                .ok()
                .filter(|number| range.contains(number))
        })
    }
}

impl<R, W> Write for Console<R, W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn repeats_until_valid() {
        let mut console = Console::new(Cursor::new("x\n0\n7\n3\n"), Vec::new());
        let answer = console
            .ask_number("Pick [1..5]", "Wrong.", 1..=5)
            .unwrap();
        assert_eq!(answer, 3);
        assert_eq!(
            String::from_utf8(console.output).unwrap(),
            "Pick [1..5]\nWrong. Pick [1..5]\nWrong. Pick [1..5]\nWrong. Pick [1..5]\n"
        );
    }

    #[test]
    fn yes_no_is_case_insensitive() {
        let mut console = Console::new(Cursor::new("maybe\nY\nn\n"), Vec::new());
        assert!(console.ask_yes_no("Again?").unwrap());
        assert!(!console.ask_yes_no("Again?").unwrap());
    }

    #[test]
    fn closed_input() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        let err = console.ask_yes_no("Again?").unwrap_err();
        assert!(err.is::<InputClosed>());
    }
}
