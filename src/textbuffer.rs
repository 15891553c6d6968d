/*
 * textbuffer.rs
 *
 * wikitok - Speculative tokenizer for MediaWiki-style wikitext
 * Copyright (C) 2026 wikitok contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

/// The pending-plain-text accumulator for one [`crate::frame::Frame`].
///
/// The reference tokenizer backs this with a linked list of fixed-size
/// chunks, appended newest-first and rendered oldest-first, to avoid
/// reallocating a single growing buffer. `String::push` is already
/// amortized O(1) in Rust, so a single growable buffer gets the same
/// bound without the chunk bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Textbuffer {
    text: String,
}

impl Textbuffer {
    pub fn new() -> Self {
        Textbuffer::default()
    }

    /// Appends one code point to the buffer.
    pub fn append(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Whether any plain text is pending.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Renders, and clears, the buffer's contents.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn append_is_rendered_in_order() {
        let mut buf = Textbuffer::new();
        for ch in "hello".chars() {
            buf.append(ch);
        }
        assert_eq!(buf.take(), "hello");
    }

    #[test]
    fn take_clears_the_buffer() {
        let mut buf = Textbuffer::new();
        buf.append('x');
        assert!(!buf.is_empty());
        buf.take();
        assert!(buf.is_empty());
    }

}
