/*
 * frame.rs
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

use crate::context::Context;
use crate::textbuffer::Textbuffer;
use crate::token::Token;

/// One speculative parse in progress: an open token list, the
/// grammatical context it was pushed with, and the pending plain-text
/// run that logically follows everything already in `tokens`.
#[derive(Debug, Clone)]
pub struct Frame {
    tokens: Vec<Token>,
    pub context: Context,
    text: Textbuffer,
}

impl Frame {
    fn new(context: Context) -> Self {
        Frame {
            tokens: Vec::new(),
            context,
            text: Textbuffer::new(),
        }
    }

    /// Appends one code point to the pending text run.
    pub fn write_text(&mut self, ch: char) {
        self.text.append(ch);
    }

    /// Flushes the pending text run into `tokens` as a single
    /// [`Token::Text`], if any text is pending.
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(Token::text(self.text.take()));
        }
    }

    /// Appends a single non-text token, flushing pending text first.
    pub fn write(&mut self, token: Token) {
        self.flush_text();
        self.tokens.push(token);
    }

    /// Prepends a single non-text token, flushing pending text first.
    pub fn write_first(&mut self, token: Token) {
        self.flush_text();
        self.tokens.insert(0, token);
    }

    /// Appends a whole spliced-in token list at once.
    ///
    /// If the incoming list starts with [`Token::Text`] and there is
    /// pending plain text in this frame, the two are merged so the
    /// result never has two adjacent `Text` tokens.
    pub fn write_all(&mut self, mut tokens: Vec<Token>) {
        let merged_into_first = match tokens.first() {
            Some(Token::Text(incoming)) if !self.text.is_empty() => {
                let mut combined = self.text.take();
                combined.push_str(incoming);
                tokens[0] = Token::text(combined);
                true
            }
            _ => false,
        };

        if !merged_into_first {
            self.flush_text();
        }

        self.tokens.extend(tokens);
    }

    /// Consumes the frame, flushing pending text, and returns its
    /// token list.
    fn into_tokens(mut self) -> Vec<Token> {
        self.flush_text();
        self.tokens
    }
}

/// The route-stack: a strictly tree-shaped (in practice, linear)
/// sequence of [`Frame`]s, outermost first. Recursive calls to
/// `Tokenizer::parse` push one frame per speculative attempt; the
/// in-loop template-parameter handling pushes additional frames
/// without recursing.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    /// Allocates a new frame with the given context and makes it the
    /// new top of stack.
    pub fn push(&mut self, context: Context) {
        self.frames.push(Frame::new(context));
    }

    /// Frees the top frame and returns its token list; the frame
    /// beneath it (if any) becomes the new top.
    ///
    /// # Panics
    /// Panics if the stack is empty; callers never pop past the
    /// frame they pushed to start their own speculative parse.
    pub fn pop(&mut self) -> Vec<Token> {
        self.frames
            .pop()
            .expect("popped an empty route stack")
            .into_tokens()
    }

    /// Like [`Stack::pop`], but the *popped* frame's context
    /// overwrites the new top's context entirely (not merged).
    ///
    /// Used when a template-parameter sub-frame, pushed with a copy
    /// of its parent's context, has since toggled bits (e.g. setting
    /// `TEMPLATE_PARAM_VALUE`) that the parent needs to inherit.
    pub fn pop_keeping_context(&mut self) -> Vec<Token> {
        let popped = self.frames.pop().expect("popped an empty route stack");
        let context = popped.context;
        let tokens = popped.into_tokens();
        if let Some(parent) = self.frames.last_mut() {
            parent.context = context;
        }
        tokens
    }

    /// Discards the top frame without returning its tokens (used when
    /// end-of-input is hit mid-parameter-key and the key is abandoned).
    pub fn discard_top(&mut self) {
        self.frames.pop().expect("discarded an empty route stack");
    }

    #[inline]
    pub fn top(&self) -> &Frame {
        self.frames.last().expect("route stack is empty")
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("route stack is empty")
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_pop_round_trips_empty_frame() {
        let mut stack = Stack::new();
        stack.push(Context::TEMPLATE_NAME);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.pop(), Vec::new());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn write_all_merges_leading_text() {
        let mut stack = Stack::new();
        stack.push(Context::empty());
        stack.top_mut().write_text('a');
        stack
            .top_mut()
            .write_all(vec![Token::text("bc"), Token::TemplateClose]);
        assert_eq!(
            stack.pop(),
            vec![Token::text("abc"), Token::TemplateClose],
        );
    }

    #[test]
    fn write_all_does_not_merge_without_pending_text() {
        let mut stack = Stack::new();
        stack.push(Context::empty());
        stack.top_mut().write_all(vec![Token::text("bc")]);
        assert_eq!(stack.pop(), vec![Token::text("bc")]);
    }

    #[test]
    fn pop_keeping_context_overwrites_parent_context() {
        let mut stack = Stack::new();
        stack.push(Context::TEMPLATE_PARAM_KEY);
        stack.push(Context::TEMPLATE_PARAM_KEY | Context::TEMPLATE_PARAM_VALUE);
        stack.pop_keeping_context();
        assert_eq!(
            stack.top().context,
            Context::TEMPLATE_PARAM_KEY | Context::TEMPLATE_PARAM_VALUE,
        );
    }
}
