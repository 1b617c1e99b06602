use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Todo の識別子（ULID の正規表現形式）
///
/// 生成時刻がそのまま辞書順に反映されるため、`Ord` は作成順と一致します
/// （同一ミリ秒内の順序は不定）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// 外部入力（パスパラメータなど）から識別子を復元します。
    /// 大文字小文字は区別せず、大文字の正規形に揃えます。
    pub fn parse(s: &str) -> DomainResult<Self> {
        Ulid::from_string(s)
            .map(|ulid| Self(ulid.to_string()))
            .map_err(|_| DomainError::InvalidTodoId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_26_char_crockford_string() {
        let id = TodoId::new();
        assert_eq!(id.as_str().len(), 26);
        let valid_chars = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";
        for c in id.as_str().chars() {
            assert!(valid_chars.contains(c), "Invalid character: {c}");
        }
    }

    #[test]
    fn parse_accepts_generated_id() {
        let id = TodoId::new();
        assert_eq!(TodoId::parse(id.as_str()).unwrap(), id);
    }

    #[test]
    fn parse_canonicalizes_lower_case() {
        let id = TodoId::new();
        let lower = id.as_str().to_lowercase();
        assert_eq!(TodoId::parse(&lower).unwrap(), id);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in ["", "abc", "not-a-ulid", "0123456789ABCDEFGHJKMNPQRSTV", "../etc/passwd"] {
            assert_eq!(
                TodoId::parse(input).unwrap_err(),
                DomainError::InvalidTodoId(input.to_string()),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn later_ids_sort_after_earlier_ones() {
        let first = TodoId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TodoId::new();
        assert!(first < second);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TodoId::new();
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
