/// Append-only, indentation-aware text buffer for one output unit.
///
/// Scopes are strictly nested: every `open_scope` is matched by exactly one `close_scope` (or its
/// semicolon variant) before [`CodeBuilder::finish`].
#[derive(Clone, Debug)]
pub struct CodeBuilder {
    out: String,
    depth: usize,
    indent: &'static str,
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBuilder {
    /// Empty buffer indenting by four spaces.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
            indent: "    ",
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write one line at the current depth. Embedded newlines are indented too.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for l in text.as_ref().split('\n') {
            if l.is_empty() {
                self.out.push('\n');
                continue;
            }
            for _ in 0..self.depth {
                self.out.push_str(self.indent);
            }
            self.out.push_str(l);
            self.out.push('\n');
        }
    }

    /// Empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// `//` comment, one per line of `text`.
    ///
    /// Trailing backslashes are dropped so a comment never splices the following line into itself.
    pub fn comment(&mut self, text: &str) {
        for l in text.lines() {
            let l = l.trim_end_matches(|c: char| c == '\\' || c.is_whitespace());
            if l.is_empty() {
                self.line("//");
            } else {
                self.line(format!("// {l}"));
            }
        }
    }

    /// `{` then indent.
    pub fn open_scope(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// Dedent then `}`.
    pub fn close_scope(&mut self) {
        self.close_with("}");
    }

    /// Dedent then `};`.
    pub fn close_scope_with_semicolon(&mut self) {
        self.close_with("};");
    }

    fn close_with(&mut self, text: &str) {
        debug_assert!(self.depth > 0, "close_scope without open_scope");
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Append pre-rendered text verbatim, re-indented to the current depth.
    pub fn append(&mut self, text: &str) {
        self.line(text.strip_suffix('\n').unwrap_or(text));
    }

    /// The accumulated text.
    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced scopes");
        self.out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/builder.rs"]
mod tests;
