use fpg::analyzer::Progress;
use std::io::Write;

const FILL: char = '█';
const EMPTY: char = '-';

/// Text progress bar redrawn in place with `\r`
pub struct ProgressBar<W> {
    out: W,
    width: u32,
    // Last drawn permille, to skip redraws that would not change anything
    drawn: Option<u64>,
}

impl<W> ProgressBar<W>
where
    W: Write,
{
    pub const fn new(out: W, width: u32) -> Self {
        Self {
            out,
            width,
            drawn: None,
        }
    }

    fn draw(&mut self, done: u32, total: u32) -> std::io::Result<()> {
        let total = total.max(1);
        let done = done.min(total);
        let permille = u64::from(done) * 1000 / u64::from(total);
        if self.drawn == Some(permille) {
            return Ok(());
        }
        self.drawn = Some(permille);

        let filled = (u64::from(self.width) * u64::from(done) / u64::from(total)) as usize;
        let bar = std::iter::repeat_n(FILL, filled)
            .chain(std::iter::repeat_n(EMPTY, self.width as usize - filled))
            .collect::<String>();
        write!(
            self.out,
            "\rProgress: |{}| {}.{}% Complete",
            bar,
            permille / 10,
            permille % 10
        )?;
        if done == total {
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

impl<W> Progress for ProgressBar<W>
where
    W: Write,
{
    fn report(&mut self, done: u32, total: u32) {
        // Output errors only affect the bar, not the analysis
        let _ = self.draw(done, total);
    }
}

#[test]
fn draws_full_bar_once() {
    let mut out = Vec::new();
    {
        let mut bar = ProgressBar::new(&mut out, 4);
        bar.report(0, 2);
        bar.report(1, 2);
        bar.report(2, 2);
        bar.report(2, 2);
    }
    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        out,
        "\rProgress: |----| 0.0% Complete\
         \rProgress: |██--| 50.0% Complete\
         \rProgress: |████| 100.0% Complete\n"
    );
}
