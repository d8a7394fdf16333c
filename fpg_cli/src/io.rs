use std::{
    fs::{self, File, OpenOptions},
    io::{self, Stdout, Write, stdout},
    path::Path,
};

#[derive(Debug, Clone)]
pub enum FileOrStdout {
    FilePath(String),
    Stdout,
}

impl ::core::fmt::Display for FileOrStdout {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            Self::Stdout => write!(f, "-"),
            Self::FilePath(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for FileOrStdout {
    fn from(value: String) -> Self {
        if &value == "-" {
            Self::Stdout
        } else {
            Self::FilePath(value)
        }
    }
}

impl FileOrStdout {
    pub fn create(&self) -> io::Result<FileOrStdoutWriter> {
        match self {
            Self::FilePath(fp) => Ok(FileOrStdoutWriter::File(File::create(fp)?)),
            Self::Stdout => Ok(FileOrStdoutWriter::Stdout(stdout())),
        }
    }
}

pub enum FileOrStdoutWriter {
    File(File),
    Stdout(Stdout),
}

impl Write for FileOrStdoutWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(f) => f.write(buf),
            Self::Stdout(fd) => fd.lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(f) => f.flush(),
            Self::Stdout(fd) => fd.lock().flush(),
        }
    }
}

/// Open `file_name` inside `dir` for appending, creating both if needed
pub fn append_to(dir: &Path, file_name: &str) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(file_name))
}

/// Writer that copies everything written to `primary` into `mirror`
pub struct Tee<Primary, Mirror> {
    primary: Primary,
    mirror: Mirror,
}

impl<Primary, Mirror> Tee<Primary, Mirror> {
    pub const fn new(primary: Primary, mirror: Mirror) -> Self {
        Self { primary, mirror }
    }
}

impl<Primary, Mirror> Write for Tee<Primary, Mirror>
where
    Primary: Write,
    Mirror: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.primary.write(buf)?;
        self.mirror.write_all(&buf[..written])?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        self.mirror.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_mirrors_writes() {
        let mut tee = Tee::new(Vec::new(), Vec::new());
        write!(tee, "Spoiler wins!").unwrap();
        tee.flush().unwrap();
        assert_eq!(tee.primary, b"Spoiler wins!");
        assert_eq!(tee.mirror, tee.primary);
    }

    #[test]
    fn dash_is_stdout() {
        assert!(matches!(
            FileOrStdout::from("-".to_owned()),
            FileOrStdout::Stdout
        ));
        assert_eq!(FileOrStdout::from("out.jsonl".to_owned()).to_string(), "out.jsonl");
    }
}
