/*
 * tokenizer.rs
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

//! The recursive-descent dispatch loop: one [`Tokenizer`] walks the
//! input exactly once, attempting each bracketed construct as soon as
//! it sees a character that could start one, and falling back to
//! plain text whenever the attempt can't be completed.

use crate::context::{Context, GlobalFlags};
use crate::entity::is_named_entity;
use crate::error::RouteFailed;
use crate::frame::Stack;
use crate::reader::Reader;
use crate::token::Token;
use crate::verifier::{verify_safe, Verdict};

/// Caps how deeply speculative parses may nest, so pathological input
/// like an unbroken run of `{{{{{{{{...` can't blow the call stack.
const MAX_RECURSION_DEPTH: usize = 100;

/// Walks a wikitext source once, left to right, producing a flat
/// token stream.
///
/// Construct handling is organized as a family of `parse_*` methods,
/// one per bracketed construct, each of which pushes a stack frame via
/// [`Tokenizer::parse`], lets the shared dispatch loop populate it,
/// and then either wraps the result in its open/close tokens or
/// degrades the attempt to literal text. Template parameters are the
/// one construct that shares a single frame across multiple `|`-
/// separated chunks rather than recursing per chunk; see
/// [`Tokenizer::handle_template_param_bar`].
#[derive(Debug)]
pub struct Tokenizer {
    reader: Reader,
    stack: Stack,
    global: GlobalFlags,
    /// Set by [`Tokenizer::handle_heading_end`] just before its frame
    /// is popped, since the negotiated heading level (the minimum of
    /// the leading and trailing `=` run lengths) isn't known until
    /// the closing run is seen, by which point [`Tokenizer::parse`]
    /// has already returned the frame's tokens with no room for extra
    /// out-of-band data.
    scratch_heading_level: Option<u8>,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        Tokenizer {
            reader: Reader::new(text),
            stack: Stack::new(),
            global: GlobalFlags::empty(),
            scratch_heading_level: None,
        }
    }

    /// Runs the tokenizer to completion and returns the token stream.
    pub fn tokenize(&mut self) -> Vec<Token> {
        match self.parse(Context::empty()) {
            Ok(tokens) => tokens,
            Err(RouteFailed) => {
                error!("root-level parse failed its route; the empty context has no fail conditions, so this is a bug");
                Vec::new()
            }
        }
    }

    /// Pushes a fresh frame for `context`, runs the dispatch loop
    /// until that frame (and only that frame) is done, and returns
    /// its tokens.
    ///
    /// On success the frame this call pushed has already been popped.
    /// On failure it, and any stray frames pushed above it by constructs
    /// that share a frame across dispatch iterations (see
    /// [`Tokenizer::handle_template_param_bar`]), have been discarded.
    fn parse(&mut self, context: Context) -> Result<Vec<Token>, RouteFailed> {
        if self.stack.depth() >= MAX_RECURSION_DEPTH {
            trace!("maximum recursion depth {} reached, failing route", MAX_RECURSION_DEPTH);
            return Err(RouteFailed);
        }

        self.stack.push(context);
        let floor = self.stack.depth();
        trace!("pushed frame for {:?}, depth now {}", context, floor);

        loop {
            let Some(ch) = self.reader.at(0) else {
                while self.stack.depth() > floor {
                    self.stack.discard_top();
                }
                if self.stack.top().context.intersects(Context::FAIL_CONTEXTS) {
                    trace!("end of input inside {:?}, failing route", self.stack.top().context);
                    self.stack.discard_top();
                    return Err(RouteFailed);
                }
                return Ok(self.stack.pop());
            };

            match self.dispatch(ch) {
                Ok(true) => return Ok(self.stack.pop()),
                Ok(false) => {}
                Err(RouteFailed) => {
                    while self.stack.depth() > floor {
                        self.stack.discard_top();
                    }
                    return Err(RouteFailed);
                }
            }
        }
    }

    /// Handles the construct or character at the reader's current
    /// position. Returns `Ok(true)` if this closed the frame that the
    /// enclosing [`Tokenizer::parse`] call pushed.
    ///
    /// The safety verifier runs here, once per character, before any
    /// other handling — including for marker characters that go on to
    /// open a nested construct (e.g. a `{` inside a template name is
    /// itself checked before it is tried as the start of a nested
    /// template). A literal-text write path that skipped this would
    /// let exactly the unmatched-brace input the verifier exists to
    /// reject slip through.
    fn dispatch(&mut self, ch: char) -> Result<bool, RouteFailed> {
        let mut context = self.stack.top().context;
        if context.intersects(Context::UNSAFE_CONTEXTS) {
            if matches!(verify_safe(&mut context, ch), Verdict::Fail) {
                return Err(RouteFailed);
            }
            self.stack.top_mut().context = context;
        }

        if context.contains(Context::COMMENT) {
            if ch == '-' && self.reader.at(1) == Some('-') && self.reader.at(2) == Some('>') {
                return Ok(self.handle_comment_end());
            }
            self.reader.head += 1;
            self.stack.top_mut().write_text(ch);
            return Ok(false);
        }

        match ch {
            '{' => {
                self.parse_template_or_argument();
                Ok(false)
            }
            '}' if context.intersects(Context::ARGUMENT)
                && self.reader.at(1) == Some('}')
                && self.reader.at(2) == Some('}') =>
            {
                Ok(self.handle_argument_end())
            }
            '}' if context.intersects(Context::TEMPLATE) && self.reader.at(1) == Some('}') => {
                Ok(self.handle_template_end())
            }
            '|' if context.intersects(Context::TEMPLATE) => {
                self.handle_template_param_bar();
                Ok(false)
            }
            '=' if context.intersects(Context::TEMPLATE_PARAM_KEY) => {
                self.handle_template_param_equals();
                Ok(false)
            }
            '|' if context.intersects(Context::ARGUMENT_NAME) => {
                self.handle_argument_separator();
                Ok(false)
            }
            '[' if self.reader.at(1) == Some('[')
                && !context.intersects(Context::WIKILINK_TITLE) =>
            {
                self.parse_wikilink();
                Ok(false)
            }
            '|' if context.intersects(Context::WIKILINK_TITLE) => {
                self.handle_wikilink_separator();
                Ok(false)
            }
            ']' if context.intersects(Context::WIKILINK) && self.reader.at(1) == Some(']') => {
                Ok(self.handle_wikilink_end())
            }
            '=' if self.at_line_start() && !self.global.contains(GlobalFlags::HEADING) => {
                self.parse_heading();
                Ok(false)
            }
            '=' if context.intersects(Context::HEADING) => Ok(self.handle_heading_end()),
            '\n' if context.intersects(Context::HEADING) => {
                trace!("newline inside heading body before any closing \"=\", failing route");
                Err(RouteFailed)
            }
            '&' => {
                self.parse_entity();
                Ok(false)
            }
            '<' if self.reader.at(1) == Some('!')
                && self.reader.at(2) == Some('-')
                && self.reader.at(3) == Some('-') =>
            {
                self.parse_comment();
                Ok(false)
            }
            _ => {
                self.write_plain_char(ch);
                Ok(false)
            }
        }
    }

    fn at_line_start(&self) -> bool {
        self.reader.head == 0 || self.reader.at_back(1) == Some('\n')
    }

    /// Writes one ordinary character to the current frame's pending
    /// text. The safety verifier has already run on `ch` in
    /// [`Tokenizer::dispatch`] by the time this is called; this only
    /// ever runs on the same character dispatch just checked.
    fn write_plain_char(&mut self, ch: char) {
        self.reader.head += 1;
        self.stack.top_mut().write_text(ch);
    }

    // ---- templates and arguments -----------------------------------

    /// Handles a run of one or more `{`. Runs of two are templates,
    /// runs of three or more are tried as arguments first (the
    /// tokenizer's one deliberately ambiguity-resolving choice); any
    /// braces left over after the chosen construct are re-dispatched
    /// on the next loop iteration, so `{{{{x}}}}` resolves into an
    /// argument nested inside whatever the leftover brace becomes.
    fn parse_template_or_argument(&mut self) {
        let mut run = 0usize;
        while self.reader.at(run as isize) == Some('{') {
            run += 1;
        }

        if run == 1 {
            self.write_plain_char('{');
            return;
        }

        if run >= 3 {
            let start = self.reader.head;
            if self.parse_argument().is_err() {
                self.reader.head = start;
                self.parse_template();
            }
        } else {
            self.parse_template();
        }
    }

    fn parse_template(&mut self) {
        let start = self.reader.head;
        self.reader.head += 2;
        match self.parse(Context::TEMPLATE_NAME) {
            Ok(tokens) => {
                let mut out = Vec::with_capacity(tokens.len() + 2);
                out.push(Token::TemplateOpen);
                out.extend(tokens);
                self.stack.top_mut().write_all(out);
            }
            Err(RouteFailed) => {
                trace!("unterminated template, degrading \"{{{{\" to text");
                self.reader.head = start + 2;
                self.stack.top_mut().write_text('{');
                self.stack.top_mut().write_text('{');
            }
        }
    }

    /// Like [`Tokenizer::parse_template`], but propagates failure
    /// instead of degrading to text: the caller needs to know whether
    /// to retry the same braces as a template.
    fn parse_argument(&mut self) -> Result<(), RouteFailed> {
        let start = self.reader.head;
        self.reader.head += 3;
        match self.parse(Context::ARGUMENT_NAME) {
            Ok(tokens) => {
                let mut out = Vec::with_capacity(tokens.len() + 2);
                out.push(Token::ArgumentOpen);
                out.extend(tokens);
                self.stack.top_mut().write_all(out);
                Ok(())
            }
            Err(RouteFailed) => {
                self.reader.head = start;
                Err(RouteFailed)
            }
        }
    }

    fn handle_template_end(&mut self) -> bool {
        self.reader.head += 2;
        if self
            .stack
            .top()
            .context
            .intersects(Context::TEMPLATE_PARAM_KEY | Context::TEMPLATE_PARAM_VALUE)
        {
            let tokens = self.stack.pop_keeping_context();
            self.stack.top_mut().write_all(tokens);
        }
        self.stack.top_mut().write(Token::TemplateClose);
        true
    }

    fn handle_argument_end(&mut self) -> bool {
        self.reader.head += 3;
        self.stack.top_mut().write(Token::ArgumentClose);
        true
    }

    /// A `|` inside a template closes whichever parameter frame is
    /// currently open (if any) and opens a fresh one for the next
    /// parameter's key. Parameter frames are pushed without a
    /// recursive [`Tokenizer::parse`] call, since they share the
    /// dispatch loop of the enclosing template's own `parse` rather
    /// than needing their own.
    fn handle_template_param_bar(&mut self) {
        self.reader.head += 1;
        if self
            .stack
            .top()
            .context
            .intersects(Context::TEMPLATE_PARAM_KEY | Context::TEMPLATE_PARAM_VALUE)
        {
            let tokens = self.stack.pop_keeping_context();
            self.stack.top_mut().write_all(tokens);
        }
        let mut context = self.stack.top().context;
        context.remove(Context::TEMPLATE_NAME | Context::TEMPLATE_PARAM_VALUE);
        context.insert(Context::TEMPLATE_PARAM_KEY);
        self.stack.top_mut().context = context;
        self.stack.top_mut().write(Token::TemplateParamSeparator);
        self.stack.push(context);
    }

    /// The first `=` in a parameter key switches that frame over to
    /// parsing the value; later `=` are just literal characters,
    /// which falls out naturally since the key bit is gone by then.
    fn handle_template_param_equals(&mut self) {
        self.reader.head += 1;
        self.stack.top_mut().write(Token::TemplateParamEquals);
        let mut context = self.stack.top().context;
        context.remove(Context::TEMPLATE_PARAM_KEY);
        context.insert(Context::TEMPLATE_PARAM_VALUE);
        self.stack.top_mut().context = context;
    }

    fn handle_argument_separator(&mut self) {
        self.reader.head += 1;
        self.stack.top_mut().write(Token::ArgumentSeparator);
        let mut context = self.stack.top().context;
        context.remove(Context::ARGUMENT_NAME);
        context.insert(Context::ARGUMENT_DEFAULT);
        self.stack.top_mut().context = context;
    }

    // ---- wikilinks --------------------------------------------------

    fn parse_wikilink(&mut self) {
        let start = self.reader.head;
        self.reader.head += 2;
        match self.parse(Context::WIKILINK_TITLE) {
            Ok(tokens) => {
                let mut out = Vec::with_capacity(tokens.len() + 2);
                out.push(Token::WikilinkOpen);
                out.extend(tokens);
                self.stack.top_mut().write_all(out);
            }
            Err(RouteFailed) => {
                trace!("unterminated wikilink, degrading \"[[\" to text");
                self.reader.head = start + 2;
                self.stack.top_mut().write_text('[');
                self.stack.top_mut().write_text('[');
            }
        }
    }

    fn handle_wikilink_separator(&mut self) {
        self.reader.head += 1;
        self.stack.top_mut().write(Token::WikilinkSeparator);
        let mut context = self.stack.top().context;
        context.remove(Context::WIKILINK_TITLE);
        context.insert(Context::WIKILINK_TEXT);
        self.stack.top_mut().context = context;
    }

    fn handle_wikilink_end(&mut self) -> bool {
        self.reader.head += 2;
        self.stack.top_mut().write(Token::WikilinkClose);
        true
    }

    // ---- headings ----------------------------------------------------

    /// A heading's level is provisionally the length of its leading
    /// `=` run, capped at six; [`Tokenizer::handle_heading_end`] may
    /// lower it once the closing run is seen.
    fn parse_heading(&mut self) {
        let start = self.reader.head;
        let mut best = 0usize;
        while self.reader.at(best as isize) == Some('=') {
            best += 1;
        }
        self.reader.head += best;

        self.global.insert(GlobalFlags::HEADING);
        let result = self.parse(Context::heading_level(best));
        self.global.remove(GlobalFlags::HEADING);

        match result {
            Ok(tokens) => {
                let capped = best.clamp(1, 6) as u8;
                let level = self.scratch_heading_level.take().unwrap_or(capped);
                if best as u8 > level {
                    self.stack
                        .top_mut()
                        .write(Token::text("=".repeat(best - level as usize)));
                }
                let mut out = Vec::with_capacity(tokens.len() + 2);
                out.push(Token::HeadingStart(level));
                out.extend(tokens);
                self.stack.top_mut().write_all(out);
            }
            Err(RouteFailed) => {
                trace!("unterminated heading, degrading \"=\" run to text");
                self.reader.head = start;
                for _ in 0..best {
                    self.stack.top_mut().write_text('=');
                }
                self.reader.head = start + best;
            }
        }
    }

    /// A heading closes on its first unescaped `=`, which also starts
    /// the run whose length is compared against the leading run: the
    /// nominal level is the minimum of the two. Any run length beyond
    /// that minimum, on either side, is literal text rather than part
    /// of either marker (`== Foo ===` titles "Foo " at level two, with
    /// the extra trailing `=` kept as its own literal token rather
    /// than merged into the title, so an exact splice of the token
    /// stream still reproduces the original text).
    fn handle_heading_end(&mut self) -> bool {
        let mut trailing = 0usize;
        while self.reader.at(trailing as isize) == Some('=') {
            trailing += 1;
        }
        self.reader.head += trailing;

        let leading = self
            .stack
            .top()
            .context
            .current_heading_level()
            .unwrap_or(1) as usize;
        let level = leading.min(trailing);

        if trailing > level {
            self.stack
                .top_mut()
                .write(Token::text("=".repeat(trailing - level)));
        }
        self.scratch_heading_level = Some(level as u8);
        self.stack.top_mut().write(Token::HeadingEnd);
        true
    }

    // ---- comments ----------------------------------------------------

    fn parse_comment(&mut self) {
        let start = self.reader.head;
        self.reader.head += 4;
        match self.parse(Context::COMMENT) {
            Ok(tokens) => {
                let mut out = Vec::with_capacity(tokens.len() + 2);
                out.push(Token::CommentStart);
                out.extend(tokens);
                self.stack.top_mut().write_all(out);
            }
            Err(RouteFailed) => {
                trace!("unterminated comment, degrading \"<!--\" to text");
                self.reader.head = start + 4;
                for ch in "<!--".chars() {
                    self.stack.top_mut().write_text(ch);
                }
            }
        }
    }

    fn handle_comment_end(&mut self) -> bool {
        self.reader.head += 3;
        self.stack.top_mut().write(Token::CommentEnd);
        true
    }

    // ---- entities ------------------------------------------------------

    /// `&` starts an entity reference only if what follows is a valid
    /// named or numeric reference terminated by `;`; anything else is
    /// a literal ampersand.
    fn parse_entity(&mut self) {
        match self.scan_entity() {
            Some(len) => {
                let text: String = (0..len).filter_map(|i| self.reader.at(i as isize)).collect();
                self.reader.head += len;
                self.stack.top_mut().write(Token::Entity(text));
            }
            None => {
                self.reader.head += 1;
                self.stack.top_mut().write_text('&');
            }
        }
    }

    /// Length, in characters, of a recognized entity reference
    /// starting at the reader's current position (which must be
    /// `&`), or `None`.
    fn scan_entity(&self) -> Option<usize> {
        let mut i = 1usize;

        if self.reader.at(i as isize) == Some('#') {
            i += 1;
            let hex = matches!(self.reader.at(i as isize), Some('x') | Some('X'));
            if hex {
                i += 1;
            }
            let digits_start = i;
            while self.reader.at(i as isize).is_some_and(|c| {
                if hex {
                    c.is_ascii_hexdigit()
                } else {
                    c.is_ascii_digit()
                }
            }) {
                i += 1;
            }
            if i == digits_start || self.reader.at(i as isize) != Some(';') {
                return None;
            }
            return Some(i + 1);
        }

        let name_start = i;
        while self
            .reader
            .at(i as isize)
            .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            i += 1;
        }
        if i == name_start || self.reader.at(i as isize) != Some(';') {
            return None;
        }
        let name: String = (name_start..i)
            .filter_map(|pos| self.reader.at(pos as isize))
            .collect();
        if !is_named_entity(&name) {
            return None;
        }
        Some(i + 1)
    }
}


#[cfg(test)]
mod prop {
    use super::*;
    use proptest::prelude::*;

    /// Reconstructs the exact source text a token stream was produced
    /// from, given each construct's fixed literal representation.
    /// `HeadingEnd` has no level of its own; it closes whichever
    /// `HeadingStart` most recently opened, since headings never
    /// nest (`GL_HEADING` forbids it).
    fn literal(tokens: &[Token]) -> String {
        let mut out = String::new();
        let mut heading_level = None;
        for token in tokens {
            match token {
                Token::Text(s) | Token::Entity(s) => out.push_str(s),
                Token::TemplateOpen => out.push_str("{{"),
                Token::TemplateParamSeparator => out.push('|'),
                Token::TemplateParamEquals => out.push('='),
                Token::TemplateClose => out.push_str("}}"),
                Token::ArgumentOpen => out.push_str("{{{"),
                Token::ArgumentSeparator => out.push('|'),
                Token::ArgumentClose => out.push_str("}}}"),
                Token::WikilinkOpen => out.push_str("[["),
                Token::WikilinkSeparator => out.push('|'),
                Token::WikilinkClose => out.push_str("]]"),
                Token::HeadingStart(level) => {
                    heading_level = Some(*level);
                    out.push_str(&"=".repeat(*level as usize));
                }
                Token::HeadingEnd => {
                    let level = heading_level.take().expect("HeadingEnd without HeadingStart");
                    out.push_str(&"=".repeat(level as usize));
                }
                Token::CommentStart => out.push_str("<!--"),
                Token::CommentEnd => out.push_str("-->"),
            }
        }
        out
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2048))]

        #[test]
        fn text_faithfulness_holds_for_arbitrary_wikitext(
            s in "[-a-zA-Z0-9 \n{}\\[\\]<>|=&#*;:/!]{0,40}"
        ) {
            let tokens = Tokenizer::new(&s).tokenize();
            prop_assert_eq!(literal(&tokens), s);
        }

        #[test]
        fn no_empty_text_tokens(s in "[-a-zA-Z0-9 \n{}\\[\\]<>|=&#*;:/!]{0,40}") {
            let tokens = Tokenizer::new(&s).tokenize();
            for token in &tokens {
                if let Token::Text(t) = token {
                    prop_assert!(!t.is_empty());
                }
            }
        }

        #[test]
        fn heading_levels_are_in_bounds(s in "[-a-zA-Z0-9 \n=]{0,40}") {
            let tokens = Tokenizer::new(&s).tokenize();
            for token in &tokens {
                if let Token::HeadingStart(level) = token {
                    prop_assert!((1..=6).contains(level));
                }
            }
        }

        #[test]
        fn tokenizing_is_deterministic(s in "[-a-zA-Z0-9 \n{}\\[\\]<>|=&#*;:/!]{0,40}") {
            prop_assert_eq!(Tokenizer::new(&s).tokenize(), Tokenizer::new(&s).tokenize());
        }
    }
}
