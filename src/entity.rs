/*
 * entity.rs
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

//! Recognition of `&name;`, `&#NNN;`, and `&#xHEX;` HTML entity
//! references.
//!
//! The core specification leaves `really_parse_entity` stubbed,
//! deferring to "the downstream validator." The downstream validator
//! here is the [`entities`] crate's HTML5 named-entity table, the
//! same one already in use for entity decoding elsewhere in this
//! lineage of wikitext tools.

use entities::ENTITIES;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Maps a bare entity name (no leading `&` or trailing `;`) to its
/// canonical name as recognized by the HTML5 named character
/// reference table.
///
/// We only need membership, not the decoded value: the tokenizer
/// emits the entity as a span of tokens for a later stage to resolve,
/// rather than resolving it itself (see `Non-goals` in the core
/// specification).
fn named_entities() -> &'static HashMap<&'static str, ()> {
    static TABLE: OnceLock<HashMap<&'static str, ()>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ENTITIES
            .iter()
            .map(|entity| (entity.entity.trim_end_matches(';').trim_start_matches('&'), ()))
            .collect()
    })
}

/// Whether `name` (no `&`/`;`) is a recognized HTML5 entity name.
pub fn is_named_entity(name: &str) -> bool {
    named_entities().contains_key(name)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recognizes_common_named_entities() {
        assert!(is_named_entity("amp"));
        assert!(is_named_entity("lt"));
        assert!(is_named_entity("gt"));
        assert!(is_named_entity("nbsp"));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(!is_named_entity("notanentity"));
        assert!(!is_named_entity(""));
    }
}
