//! Drops HTML markup from crawled page text before tokenization.

const MAX_TAG_NAME: usize = 31;

#[derive(Default)]
struct MarkupState {
    inside_tag: bool,
    closing: bool,
    tag: String,
    name_done: bool,
    inside_script: bool,
    inside_style: bool,
}

impl MarkupState {
    /// Returns the character if it is visible text.
    fn filter(&mut self, c: char) -> Option<char> {
        if c == '<' {
            self.inside_tag = true;
            self.closing = false;
            self.tag.clear();
            self.name_done = false;
            return None;
        }
        if self.inside_tag {
            if c == '/' && self.tag.is_empty() {
                self.closing = true;
            } else if c.is_alphabetic() && !self.name_done {
                if self.tag.len() < MAX_TAG_NAME {
                    self.tag.extend(c.to_lowercase());
                }
            } else if !self.tag.is_empty() {
                // attributes follow the name
                self.name_done = true;
            }
            if c == '>' {
                self.inside_tag = false;
                match self.tag.as_str() {
                    "script" => self.inside_script = !self.closing,
                    "style" => self.inside_style = !self.closing,
                    _ => {}
                }
            }
            return None;
        }
        if self.inside_script || self.inside_style {
            return None;
        }
        Some(c)
    }
}

/// Replace tags and the bodies of `script`/`style` elements with whitespace.
///
/// Any dropped run collapses to a single space so that it still separates
/// the words on either side of it.
pub fn strip_markup(text: &str) -> String {
    let mut state = MarkupState::default();
    let mut out = String::with_capacity(text.len());
    let mut gap = false;
    for c in text.chars() {
        match state.filter(c) {
            Some(c) => {
                out.push(c);
                gap = false;
            }
            None if !gap => {
                out.push(' ');
                gap = true;
            }
            None => {}
        }
    }
    out
}
