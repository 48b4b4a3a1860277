use serde::Serialize;

/// A module name with every casing variant pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub kebab_case: String,
    pub plural: String,
}

impl NormalizedName {
    /// Derive all forms from a raw identifier. The plural is taken from the
    /// lowercased identifier so `orderItem` pluralizes to `orderitems`.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            pascal_case: to_pascal_case(raw),
            camel_case: to_camel_case(raw),
            snake_case: to_snake_case(raw),
            kebab_case: to_kebab_case(raw),
            plural: pluralize(&raw.to_lowercase()),
        }
    }
}

/// Split an identifier into word fragments.
///
/// `-` is folded to `_`, the result is split on `_`, and each chunk is split
/// again before every uppercase letter that is not its first character.
/// Empty chunks are dropped and the original casing is kept.
///
/// - `"order_item"` → `["order", "item"]`
/// - `"pet-store"` → `["pet", "store"]`
/// - `"orderItem"` → `["order", "Item"]`
/// - `"HTTPServer"` → `["H", "T", "T", "P", "Server"]`
pub fn split_words(s: &str) -> Vec<String> {
    let folded = s.replace('-', "_");
    let mut words = Vec::new();

    for chunk in folded.split('_') {
        let mut current = String::new();
        for (i, ch) in chunk.chars().enumerate() {
            if ch.is_uppercase() && i > 0 {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(&w.to_lowercase())).collect()
}

pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_snake_case(s: &str) -> String {
    join_lower(s, "_")
}

pub fn to_kebab_case(s: &str) -> String {
    join_lower(s, "-")
}

/// Heuristic English plural. No irregular forms:
///
/// - ends in `s`, `x`, `ch`, `sh` → append `es` (`box` → `boxes`)
/// - ends in `y` after a non-vowel → `ies` (`category` → `categories`)
/// - otherwise append `s` (`day` → `days`)
///
/// Empty input stays empty.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if s.ends_with('s') || s.ends_with('x') || s.ends_with("ch") || s.ends_with("sh") {
        return format!("{s}es");
    }
    if let Some(stem) = s.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }
    format!("{s}s")
}

fn join_lower(s: &str, sep: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("order"), vec!["order"]);
        assert_eq!(split_words("order_item"), vec!["order", "item"]);
        assert_eq!(split_words("pet-store"), vec!["pet", "store"]);
        assert_eq!(split_words("orderItem"), vec!["order", "Item"]);
        assert_eq!(split_words("__a--b__"), vec!["a", "b"]);
        assert_eq!(split_words("HTTPServer"), vec!["H", "T", "T", "P", "Server"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_simple_name() {
        let n = NormalizedName::from_raw("order");
        assert_eq!(n.pascal_case, "Order");
        assert_eq!(n.camel_case, "order");
        assert_eq!(n.snake_case, "order");
        assert_eq!(n.kebab_case, "order");
        assert_eq!(n.plural, "orders");
    }

    #[test]
    fn test_compound_name() {
        let n = NormalizedName::from_raw("orderItem");
        assert_eq!(n.pascal_case, "OrderItem");
        assert_eq!(n.camel_case, "orderItem");
        assert_eq!(n.snake_case, "order_item");
        assert_eq!(n.kebab_case, "order-item");
        assert_eq!(n.plural, "orderitems");
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(to_pascal_case("user-login_log"), "UserLoginLog");
        assert_eq!(to_camel_case("user_role"), "userRole");
        assert_eq!(to_snake_case("Pet-Store"), "pet_store");
        assert_eq!(to_kebab_case("pet_storeOwner"), "pet-store-owner");
    }

    #[test]
    fn test_empty_input() {
        let n = NormalizedName::from_raw("");
        assert_eq!(n.pascal_case, "");
        assert_eq!(n.camel_case, "");
        assert_eq!(n.snake_case, "");
        assert_eq!(n.kebab_case, "");
        assert_eq!(n.plural, "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("order"), "orders");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("batch"), "batches");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("y"), "ys");
    }

    #[test]
    fn test_non_ascii_is_total() {
        let n = NormalizedName::from_raw("ärgerÜbel");
        assert_eq!(n.pascal_case, "ÄrgerÜbel");
        assert_eq!(n.snake_case, "ärger_übel");
    }
}
