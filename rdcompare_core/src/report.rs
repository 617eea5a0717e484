use rdcompare_common::MatchPair;
use std::io::{self, Write};

/// Placeholder printed when a pair has no side-A file
pub const MISSING_LABEL: &str = "(missing)";

/// Two-column line for a pair of paths
pub fn format_pair_line(left: &str, right: &str) -> String {
    format!("{:<40}\t\t\t{:<40}", left, right)
}

/// Writes one line per pair, flushing after each so the line appears before
/// any output of the diff program that follows it.
pub struct PairReporter<W: Write> {
    out: W,
}

impl<W: Write> PairReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn report(&mut self, pair: &MatchPair) -> io::Result<()> {
        let left = pair
            .left
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| MISSING_LABEL.to_string());
        let right = pair.right.display().to_string();

        writeln!(self.out, "{}", format_pair_line(&left, &right))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
