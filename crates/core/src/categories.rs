use std::collections::BTreeMap;

use crate::model::{Category, CategoryId};

/// Category id to display name, ordered by id.
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// Build the id -> name mapping served to clients.
///
/// Duplicate ids are not expected from the store; if one shows up, the later
/// category wins.
#[must_use]
pub fn format_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> CategoryMap {
    categories
        .into_iter()
        .map(|c| (c.id(), c.name().to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: u64, name: &str) -> Category {
        Category::new(CategoryId::new(id), name).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let map = format_categories(&[]);
        assert!(map.is_empty());
    }

    #[test]
    fn maps_each_id_to_its_name() {
        let categories = vec![category(1, "Science"), category(2, "Art")];
        let map = format_categories(&categories);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&CategoryId::new(1)], "Science");
        assert_eq!(map[&CategoryId::new(2)], "Art");
    }

    #[test]
    fn later_duplicate_wins() {
        let categories = vec![category(1, "Science"), category(1, "Physics")];
        let map = format_categories(&categories);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&CategoryId::new(1)], "Physics");
    }

    #[test]
    fn serializes_with_string_keys() {
        let categories = vec![category(2, "Art"), category(1, "Science")];
        let json = serde_json::to_string(&format_categories(&categories)).unwrap();
        assert_eq!(json, r#"{"1":"Science","2":"Art"}"#);
    }
}
