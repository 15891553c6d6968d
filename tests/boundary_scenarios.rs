/*
 * tests/boundary_scenarios.rs
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

//! Exercises the tokenizer's boundary scenarios through its public
//! API only, as a black-box consumer would. The inline `#[cfg(test)]`
//! modules beside each `src/` file cover unit-level behavior; this
//! file covers the same boundary inputs the specification calls out
//! by name, end to end.

use wikitok::{tokenize, Token};

#[test]
fn template() {
    assert_eq!(
        tokenize("{{foo}}"),
        vec![Token::TemplateOpen, Token::text("foo"), Token::TemplateClose],
    );
}

#[test]
fn argument() {
    assert_eq!(
        tokenize("{{{x}}}"),
        vec![Token::ArgumentOpen, Token::text("x"), Token::ArgumentClose],
    );
}

#[test]
fn four_brace_run_resolves_as_argument_with_a_leftover_brace() {
    // See DESIGN.md's "Boundary scenario 3" section: the distilled
    // spec's own illustrative "argument containing a template" reading
    // of this input is inconsistent with both its own algorithm and
    // the text-faithfulness invariant. The algorithm-traced reading
    // (implemented here) is the one that reconstructs the input
    // exactly.
    assert_eq!(
        tokenize("{{{{x}}}}"),
        vec![
            Token::ArgumentOpen,
            Token::text("{x"),
            Token::ArgumentClose,
            Token::text("}"),
        ],
    );
}

#[test]
fn template_with_parameters() {
    assert_eq!(
        tokenize("{{a|b=c|d}}"),
        vec![
            Token::TemplateOpen,
            Token::text("a"),
            Token::TemplateParamSeparator,
            Token::text("b"),
            Token::TemplateParamEquals,
            Token::text("c"),
            Token::TemplateParamSeparator,
            Token::text("d"),
            Token::TemplateClose,
        ],
    );
}

#[test]
fn wikilink_with_display_text() {
    assert_eq!(
        tokenize("[[A|B]]"),
        vec![
            Token::WikilinkOpen,
            Token::text("A"),
            Token::WikilinkSeparator,
            Token::text("B"),
            Token::WikilinkClose,
        ],
    );
}

#[test]
fn heading_with_a_stray_trailing_equals() {
    assert_eq!(
        tokenize("\n== Foo ===\n"),
        vec![
            Token::text("\n"),
            Token::HeadingStart(2),
            Token::text(" Foo "),
            Token::text("="),
            Token::HeadingEnd,
            Token::text("\n"),
        ],
    );
}

#[test]
fn unterminated_template_degrades_to_literal_braces() {
    assert_eq!(tokenize("{{unterminated"), vec![Token::text("{{unterminated")]);
}

#[test]
fn html_comment() {
    assert_eq!(
        tokenize("<!-- c -->x"),
        vec![
            Token::CommentStart,
            Token::text(" c "),
            Token::CommentEnd,
            Token::text("x"),
        ],
    );
}

#[test]
fn tokenizing_the_same_input_twice_is_deterministic() {
    let input = "{{a|b={{c}}}}[[D|E]]\n== F ==\n<!--g-->&amp;";
    assert_eq!(tokenize(input), tokenize(input));
}

#[test]
fn tokens_round_trip_through_json() {
    let tokens = tokenize("{{a|b=c}}[[D]]== E ==\n<!--f-->&amp;");
    let json = serde_json::to_string(&tokens).expect("tokens should serialize");
    let decoded: Vec<Token> = serde_json::from_str(&json).expect("tokens should deserialize");
    assert_eq!(tokens, decoded);
}
