/// An incremental text sink that buffers partial writes, splits them on
/// newlines, and exposes the accumulated lines.
///
/// Every suggestor assembles its output through one of these.
#[derive(Debug, Default)]
pub struct LineWriter {
    has_leftover: bool,
    curr: String,
    lines: Vec<String>,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a whole line, bypassing the split buffer.
    pub fn write_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    /// Append a partial write, splitting it on newlines. Text after the last
    /// newline stays buffered until the next write or flush. A write ending
    /// in a newline leaves an empty buffered tail, so a later flush yields a
    /// trailing empty line.
    pub fn write_str(&mut self, mut s: &str) {
        self.has_leftover = false;
        loop {
            match s.find('\n') {
                None => {
                    self.has_leftover = true;
                    self.curr.push_str(s);
                    break;
                }
                Some(idx) => {
                    self.curr.push_str(&s[..idx]);
                    self.lines.push(std::mem::take(&mut self.curr));
                    s = &s[idx + 1..];
                }
            }
        }
    }

    /// Promote any buffered partial write to a full line.
    pub fn flush(&mut self) {
        if self.has_leftover {
            self.lines.push(std::mem::take(&mut self.curr));
            self.has_leftover = false;
        }
    }

    /// Flush and yield the accumulated lines.
    pub fn take_lines(&mut self) -> Vec<String> {
        self.flush();
        std::mem::take(&mut self.lines)
    }
}
