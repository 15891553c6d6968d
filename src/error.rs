/*
 * error.rs
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

/// Signals that the innermost speculative parse could not be
/// completed and must be abandoned.
///
/// This is the Rust stand-in for the reference tokenizer's long-jump
/// "bad route" signal: instead of a non-local jump, it is an error
/// value threaded back through the `parse` call chain with `?`. By
/// the time this value exists, the failing frame has already been
/// popped (see [`crate::frame::Stack::pop`] callers in
/// [`crate::tokenizer`]), so there is nothing left to clean up at the
/// point a caller observes it.
///
/// This never escapes the crate: every public entry point ([`crate::tokenize`])
/// catches it at the outermost frame and degrades to plain text,
/// matching the "no parsing issue is fatal" contract the tokenizer
/// promises callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RouteFailed;
