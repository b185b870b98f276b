//! Streaming HTML tag scanner
//!
//! A lazy iterator over tag-open events in arbitrary, possibly malformed
//! HTML. No well-formedness is required: attribute order, quoting style,
//! self-closing slashes, and tag/attribute case all vary in the wild, and
//! closing tags, comments, and declarations are skipped outright.

/// One opening tag with its attributes, names lowercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    attrs: Vec<(String, Option<String>)>,
}

impl Tag {
    /// Look up an attribute value by (case-insensitive) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether the attribute is present at all, valued or not
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(key, _)| key == name)
    }
}

/// Iterator yielding tag-open events from a document
pub struct TagScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    /// Advance past the next occurrence of `needle`, or to end of input
    fn skip_past(&mut self, needle: &str) {
        match self.input[self.pos..].find(needle) {
            Some(offset) => self.pos += offset + needle.len(),
            None => self.pos = self.input.len(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn read_name(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':')
        {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn read_attr_value(&mut self) -> &'a str {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b == quote {
                        break;
                    }
                    self.pos += 1;
                }
                let value = &self.input[start..self.pos];
                if self.peek().is_some() {
                    self.pos += 1; // closing quote
                }
                value
            }
            _ => {
                let start = self.pos;
                while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace() && b != b'>') {
                    self.pos += 1;
                }
                &self.input[start..self.pos]
            }
        }
    }

    /// Parse the attribute list following a tag name, up to `>` or EOF
    fn read_attrs(&mut self) -> Vec<(String, Option<String>)> {
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    // self-closing slash
                    self.pos += 1;
                    continue;
                }
                _ => {}
            }

            let name_start = self.pos;
            while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace() && b != b'=' && b != b'>' && b != b'/')
            {
                self.pos += 1;
            }
            if self.pos == name_start {
                // Stray byte that is none of the above; step over it
                self.pos += 1;
                continue;
            }
            let name = self.input[name_start..self.pos].to_lowercase();

            self.skip_whitespace();
            if self.peek() == Some(b'=') {
                self.pos += 1;
                self.skip_whitespace();
                let value = self.read_attr_value().to_string();
                attrs.push((name, Some(value)));
            } else {
                attrs.push((name, None));
            }
        }
        attrs
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        loop {
            let offset = self.input[self.pos..].find('<')?;
            self.pos += offset + 1;

            match self.peek()? {
                b'!' => {
                    if self.input[self.pos..].starts_with("!--") {
                        self.skip_past("-->");
                    } else {
                        // doctype or other declaration
                        self.skip_past(">");
                    }
                }
                b'?' | b'/' => self.skip_past(">"),
                b if b.is_ascii_alphabetic() => {
                    let name = self.read_name().to_lowercase();
                    let attrs = self.read_attrs();
                    return Some(Tag { name, attrs });
                }
                // Bare '<' in text content
                _ => {}
            }
        }
    }
}
