use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<(), anyhow::Error> {
        writeln!(self.output, "{line}").context("Failed to write to console")?;
        self.output.flush().context("Failed to flush console")?;
        Ok(())
    }

    // End of input counts as a keypress.
    pub async fn pause(&mut self) -> Result<(), anyhow::Error> {
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .await
            .context("Failed to read from console")?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_say_writes_lines() {
        let mut console = Console::new(&b""[..], Vec::new());
        console.say("Bonjour").unwrap();
        console.say(42).unwrap();
        assert_eq!(console.into_output(), b"Bonjour\n42\n");
    }

    #[tokio::test]
    async fn test_pause_consumes_one_line() {
        let mut input = &b"\nrest\n"[..];
        let mut console = Console::new(&mut input, Vec::new());
        console.pause().await.unwrap();
        drop(console);
        assert_eq!(input, b"rest\n");
    }

    #[tokio::test]
    async fn test_pause_at_end_of_input() {
        let mut console = Console::new(&b""[..], Vec::new());
        console.pause().await.unwrap();
        console.pause().await.unwrap();
    }
}
