use std::collections::VecDeque;
use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Whitespace-separated token reader over the console input.
///
/// Several answers may be typed on one line; they are handed out one per
/// question, in order.
pub struct Prompt<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` once the input is exhausted.
    pub async fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .context("Failed to read from input")?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Print `question` and wait for the answer.
    pub async fn ask<W: Write>(&mut self, out: &mut W, question: &str) -> Result<String> {
        write!(out, "{}", question)?;
        out.flush()?;
        self.next_token()
            .await?
            .ok_or_else(|| anyhow!("Input closed while waiting for an answer"))
    }

    pub async fn ask_parsed<W, T>(&mut self, out: &mut W, question: &str) -> Result<T>
    where
        W: Write,
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let answer = self.ask(out, question).await?;
        answer
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid input '{}': {}", answer, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokens_span_lines() -> Result<()> {
        let input: &[u8] = b"1 BTC-PERPETUAL\n\n   10\n";
        let mut prompt = Prompt::new(input);

        assert_eq!(prompt.next_token().await?.as_deref(), Some("1"));
        assert_eq!(prompt.next_token().await?.as_deref(), Some("BTC-PERPETUAL"));
        assert_eq!(prompt.next_token().await?.as_deref(), Some("10"));
        assert_eq!(prompt.next_token().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_ask_writes_question_and_parses() -> Result<()> {
        let input: &[u8] = b"100.3\nabc\n";
        let mut prompt = Prompt::new(input);
        let mut out = Vec::new();

        let price: f64 = prompt.ask_parsed(&mut out, "Price: ").await?;
        assert_eq!(price, 100.3);
        assert_eq!(String::from_utf8(out.clone())?, "Price: ");

        let bad = prompt.ask_parsed::<_, f64>(&mut out, "Price: ").await;
        assert!(bad.is_err());

        let closed = prompt.ask(&mut out, "Anything? ").await;
        assert!(closed.is_err());
        Ok(())
    }
}
