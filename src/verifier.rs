/*
 * verifier.rs
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

//! Per-character validation inside the "unsafe" contexts: template
//! names, wikilink titles, template parameter keys, and argument
//! names may not contain unmatched braces or brackets, or span a
//! blank line once they have non-whitespace content.

use crate::context::Context;

/// Outcome of checking one character against the safety rules of the
/// frame's current context.
pub enum Verdict {
    Ok,
    Fail,
}

/// Checks `data` against `context`'s safety rules, returning the
/// updated context bits (scratch flags toggle as a side effect of
/// checking) and whether the route must now fail.
///
/// Mirrors the reference tokenizer's `verify_safe`: conservative
/// interpretation of interleaved `{`/`}` resets the matching
/// fail-on-brace flag as soon as a balancing brace is consumed,
/// rather than requiring strict alternation.
pub fn verify_safe(context: &mut Context, data: char) -> Verdict {
    if context.contains(Context::FAIL_NEXT) {
        return Verdict::Fail;
    }

    if context.intersects(Context::TEMPLATE_NAME | Context::WIKILINK_TITLE) {
        if matches!(data, '{' | '}' | '[' | ']') {
            context.insert(Context::FAIL_NEXT);
            return Verdict::Ok;
        }
    } else if context.intersects(Context::TEMPLATE_PARAM_KEY | Context::ARGUMENT_NAME) {
        if context.contains(Context::FAIL_ON_LBRACE) {
            if data == '{' {
                context.insert(Context::FAIL_NEXT);
                return Verdict::Ok;
            }
            context.remove(Context::FAIL_ON_LBRACE);
        } else if context.contains(Context::FAIL_ON_RBRACE) {
            if data == '}' {
                context.insert(Context::FAIL_NEXT);
                return Verdict::Ok;
            }
            context.remove(Context::FAIL_ON_RBRACE);
        } else if data == '{' {
            context.insert(Context::FAIL_ON_LBRACE);
        } else if data == '}' {
            context.insert(Context::FAIL_ON_RBRACE);
        }
    }

    if context.contains(Context::HAS_TEXT) {
        if context.contains(Context::FAIL_ON_TEXT) && !data.is_whitespace() {
            return Verdict::Fail;
        }
        if data == '\n' {
            context.insert(Context::FAIL_ON_TEXT);
        }
    } else if !data.is_whitespace() {
        context.insert(Context::HAS_TEXT);
    }

    Verdict::Ok
}
