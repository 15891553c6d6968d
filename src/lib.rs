/*
 * lib.rs
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

#![deny(missing_debug_implementations)]

//! A speculative, single-threaded recursive-descent tokenizer for
//! MediaWiki-style wikitext.
//!
//! Wikitext is a brace-delimited markup language with several nested,
//! mutually-recursive constructs: templates (`{{ }}`), arguments
//! (`{{{ }}}`), wikilinks (`[[ ]]`), section headings, HTML entities,
//! and HTML comments. The constructs overlap syntactically, so this
//! crate resolves ambiguity through speculative parsing with
//! explicit route-failure signaling rather than full input
//! backtracking: a candidate construct is attempted on a fresh stack
//! frame, and if it cannot be completed the frame is discarded and
//! the input is re-interpreted as plain text or as a different
//! construct.
//!
//! This crate only covers the tokenization stage: it produces a flat
//! [`Token`] stream, not a parse tree. Building a tree out of that
//! stream, validating template names, tokenizing HTML tags, and
//! probing source encodings are all out of scope here.

#[macro_use]
extern crate log;

mod context;
mod entity;
mod error;
mod frame;
mod reader;
mod textbuffer;
mod token;
mod tokenizer;
mod verifier;

pub use crate::context::Context;
pub use crate::token::Token;
pub use crate::tokenizer::Tokenizer;

/// Tokenizes a string of wikitext into a flat sequence of [`Token`]s.
///
/// This never fails: syntactically invalid markup degrades into plain
/// [`Token::Text`] rather than producing an error, matching the
/// "tolerant tokenizer" philosophy of the wikitext formats it reads.
///
/// ```
/// use wikitok::{tokenize, Token};
///
/// let tokens = tokenize("{{foo}}");
/// assert_eq!(
///     tokens,
///     vec![Token::TemplateOpen, Token::Text("foo".into()), Token::TemplateClose],
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    debug!("Starting tokenization of {} byte(s) of input", text.len());
    let mut tokenizer = Tokenizer::new(text);
    let tokens = tokenizer.tokenize();
    debug!("Finished tokenization, produced {} token(s)", tokens.len());
    tokens
}
