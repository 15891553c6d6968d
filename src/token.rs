/*
 * token.rs
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

use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

/// A single semantic unit produced by the tokenizer.
///
/// Tokens are opaque, value-typed records; downstream consumers (a
/// CST builder, in the full system) match on their kind and, for
/// [`Token::Text`] and [`Token::HeadingStart`], read the carried
/// value. The tokenizer itself only ever reads a [`Token::Text`]'s
/// `text` back out, in [`crate::frame::Frame::write_all`], to merge
/// adjacent runs of plain text.
#[derive(Serialize, Deserialize, IntoStaticStr, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Token {
    /// A run of plain, unmarked-up text.
    Text(String),

    /// A recognized HTML entity reference, e.g. `&amp;` or `&#x2014;`,
    /// carried verbatim (including the leading `&` and trailing `;`).
    Entity(String),

    TemplateOpen,
    TemplateParamSeparator,
    TemplateParamEquals,
    TemplateClose,

    ArgumentOpen,
    ArgumentSeparator,
    ArgumentClose,

    WikilinkOpen,
    WikilinkSeparator,
    WikilinkClose,

    /// The opening of a section heading, e.g. `==` for a level-2 heading.
    ///
    /// `level` is always in `1..=6`; runs of more than six `=` are
    /// capped at the maximum heading level.
    HeadingStart(u8),
    HeadingEnd,

    CommentStart,
    CommentEnd,
}

impl Token {
    /// Convenience constructor so call sites read like the other,
    /// argument-less variants (`Token::text("foo")` vs. matching on
    /// `String` directly).
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Token::Text(s.into())
    }

    /// The variant name, for logging and error messages.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Returns the carried text if this is a [`Token::Text`].
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(s) => Some(s),
            _ => None,
        }
    }
}
