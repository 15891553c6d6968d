/*
 * context.rs
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

use bitflags::bitflags;

bitflags! {
    /// Per-frame grammatical position, plus the safety-verifier's
    /// scratch bits (`FAIL_NEXT`, `FAIL_ON_LBRACE`, `FAIL_ON_RBRACE`,
    /// `FAIL_ON_TEXT`, `HAS_TEXT`).
    ///
    /// Each [`crate::frame::Frame`] owns one `Context`; it is not
    /// merged with the parent frame's context when a new frame is
    /// pushed for a recursive parse (though several handlers
    /// deliberately seed the child with a copy of the parent's bits,
    /// e.g. template parameter sub-frames).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Context: u32 {
        const TEMPLATE_NAME        = 1 << 0;
        const TEMPLATE_PARAM_KEY   = 1 << 1;
        const TEMPLATE_PARAM_VALUE = 1 << 2;

        const ARGUMENT_NAME    = 1 << 3;
        const ARGUMENT_DEFAULT = 1 << 4;

        const WIKILINK_TITLE = 1 << 5;
        const WIKILINK_TEXT   = 1 << 6;

        const HEADING_LEVEL_1 = 1 << 7;
        const HEADING_LEVEL_2 = 1 << 8;
        const HEADING_LEVEL_3 = 1 << 9;
        const HEADING_LEVEL_4 = 1 << 10;
        const HEADING_LEVEL_5 = 1 << 11;
        const HEADING_LEVEL_6 = 1 << 12;

        const COMMENT = 1 << 13;

        const FAIL_NEXT      = 1 << 14;
        const FAIL_ON_LBRACE = 1 << 15;
        const FAIL_ON_RBRACE = 1 << 16;
        const FAIL_ON_TEXT   = 1 << 17;
        const HAS_TEXT       = 1 << 18;

        // Aggregate masks.
        const TEMPLATE = Self::TEMPLATE_NAME.bits()
            | Self::TEMPLATE_PARAM_KEY.bits()
            | Self::TEMPLATE_PARAM_VALUE.bits();

        const ARGUMENT = Self::ARGUMENT_NAME.bits() | Self::ARGUMENT_DEFAULT.bits();

        const WIKILINK = Self::WIKILINK_TITLE.bits() | Self::WIKILINK_TEXT.bits();

        const HEADING = Self::HEADING_LEVEL_1.bits()
            | Self::HEADING_LEVEL_2.bits()
            | Self::HEADING_LEVEL_3.bits()
            | Self::HEADING_LEVEL_4.bits()
            | Self::HEADING_LEVEL_5.bits()
            | Self::HEADING_LEVEL_6.bits();

        /// End-of-input while any of these bits are set fails the route.
        const FAIL_CONTEXTS = Self::TEMPLATE.bits()
            | Self::ARGUMENT.bits()
            | Self::WIKILINK.bits()
            | Self::HEADING.bits()
            | Self::COMMENT.bits();

        /// Frames with any of these bits set must run every character
        /// past the safety verifier before it can be written out.
        const UNSAFE_CONTEXTS = Self::TEMPLATE_NAME.bits()
            | Self::WIKILINK_TITLE.bits()
            | Self::TEMPLATE_PARAM_KEY.bits()
            | Self::ARGUMENT_NAME.bits();
    }
}

impl Context {
    /// Builds the `HEADING_LEVEL_k` context for a run of `k` (1..=6) `=`.
    ///
    /// `best` is the number of `=` seen; runs past 6 are capped.
    pub fn heading_level(best: usize) -> Context {
        let level = best.clamp(1, 6);
        Context::from_bits_truncate(Context::HEADING_LEVEL_1.bits() << (level - 1))
    }

    /// Recovers the numeric heading level (1..=6) from whichever
    /// `HEADING_LEVEL_k` bit is set, if any.
    pub fn current_heading_level(self) -> Option<u8> {
        for level in 1u8..=6 {
            let bit = Context::from_bits_truncate(Context::HEADING_LEVEL_1.bits() << (level - 1));
            if self.contains(bit) {
                return Some(level);
            }
        }
        None
    }
}

bitflags! {
    /// Tokenizer-wide flags, shared across all frames.
    ///
    /// Only `HEADING` is defined: it prevents a heading's own body
    /// from being re-interpreted as the start of a nested heading.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GlobalFlags: u32 {
        const HEADING = 1 << 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn heading_level_round_trips() {
        for level in 1..=6u8 {
            let ctx = Context::heading_level(level as usize);
            assert_eq!(ctx.current_heading_level(), Some(level));
        }
    }

    #[test]
    fn heading_level_caps_at_six() {
        assert_eq!(Context::heading_level(50), Context::heading_level(6));
    }

    #[test]
    fn aggregate_masks_subsume_subcontexts() {
        assert!(Context::TEMPLATE.contains(Context::TEMPLATE_NAME));
        assert!(Context::TEMPLATE.contains(Context::TEMPLATE_PARAM_KEY));
        assert!(Context::TEMPLATE.contains(Context::TEMPLATE_PARAM_VALUE));
        assert!(Context::FAIL_CONTEXTS.contains(Context::COMMENT));
        assert!(Context::UNSAFE_CONTEXTS.contains(Context::ARGUMENT_NAME));
    }
}
