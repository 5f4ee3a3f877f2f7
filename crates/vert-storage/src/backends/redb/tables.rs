//! Physical layout of logical tables.
//!
//! redb table definitions are static, so all logical tables share one
//! physical table and each key carries its table name as a prefix:
//! `<table>\0<key>`.

use redb::TableDefinition;

/// The one physical table.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> = TableDefinition::new("vert_data");

/// Ends the table name inside a physical key.
pub const KEY_SEPARATOR: u8 = 0x00;

/// The physical key of `key` in `table`.
#[must_use]
pub fn encode_key(table: &str, key: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(table.len() + 1 + key.len());
    encoded.extend_from_slice(table.as_bytes());
    encoded.push(KEY_SEPARATOR);
    encoded.extend_from_slice(key);
    encoded
}

/// Split a physical key at the first separator. `None` if there is none.
#[must_use]
pub fn decode_key(encoded: &[u8]) -> Option<(&str, &[u8])> {
    let sep_pos = encoded.iter().position(|&b| b == KEY_SEPARATOR)?;
    let table = std::str::from_utf8(&encoded[..sep_pos]).ok()?;
    Some((table, &encoded[sep_pos + 1..]))
}

/// The smallest physical key of `table`.
#[must_use]
pub fn table_start_key(table: &str) -> Vec<u8> {
    encode_key(table, &[])
}

/// The smallest physical key past every key of `table`.
#[must_use]
pub fn table_end_key(table: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + 1);
    key.extend_from_slice(table.as_bytes());
    key.push(KEY_SEPARATOR + 1);
    key
}

/// The smallest key that sorts strictly after `key`.
#[must_use]
pub fn successor(mut key: Vec<u8>) -> Vec<u8> {
    key.push(0x00);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_key() {
        let encoded = encode_key("graph", b"v42");
        assert_eq!(encoded, b"graph\0v42");
        assert_eq!(decode_key(&encoded), Some(("graph", b"v42".as_slice())));
    }

    #[test]
    fn test_keys_with_separator_bytes() {
        let encoded = encode_key("graph", b"a\0b");
        assert_eq!(decode_key(&encoded), Some(("graph", b"a\0b".as_slice())));
    }

    #[test]
    fn test_decode_without_separator() {
        assert_eq!(decode_key(b"noseparator"), None);
    }

    #[test]
    fn test_table_range_contains_only_its_keys() {
        let start = table_start_key("graph");
        let end = table_end_key("graph");

        let inside = encode_key("graph", &[0xFF, 0xFF]);
        assert!(inside >= start && inside < end);

        // "graph2" shares the name as a prefix but is a different table
        let other = encode_key("graph2", b"v1");
        assert!(other >= end);
    }

    #[test]
    fn test_successor_is_tight() {
        let key = b"v1".to_vec();
        let next = successor(key.clone());
        assert!(next > key);
        assert!(next < b"v10".to_vec());
    }
}
