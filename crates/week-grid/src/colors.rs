//! First-seen color assignment for activity names.

use std::collections::HashMap;

/// Maps each distinct activity name to a color, in the order names are first
/// seen. Each palette entry is used once; later names get the fallback.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    /// (name, color) in assignment order.
    assigned: Vec<(String, String)>,
    by_name: HashMap<String, usize>,
}

impl ColorMap {
    pub fn assign<'a>(
        names: impl IntoIterator<Item = &'a str>,
        palette: &[String],
        fallback: &str,
    ) -> Self {
        let mut map = ColorMap::default();
        for name in names {
            if map.by_name.contains_key(name) {
                continue;
            }
            let color = palette
                .get(map.assigned.len())
                .map_or(fallback, String::as_str)
                .to_string();
            map.by_name.insert(name.to_string(), map.assigned.len());
            map.assigned.push((name.to_string(), color));
        }
        map
    }

    pub fn color(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&i| self.assigned[i].1.as_str())
    }

    /// (name, color) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assigned
            .iter()
            .map(|(name, color)| (name.as_str(), color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        ["red", "green", "blue"].iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_first_seen_order() {
        let map = ColorMap::assign(["Swim", "Skate", "Swim", "Dive"], &palette(), "white");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(
            pairs,
            vec![("Swim", "red"), ("Skate", "green"), ("Dive", "blue")]
        );
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_fallback_after_palette_exhausted() {
        let map = ColorMap::assign(["a", "b", "c", "d", "e"], &palette(), "white");
        assert_eq!(map.color("c"), Some("blue"));
        assert_eq!(map.color("d"), Some("white"));
        assert_eq!(map.color("e"), Some("white"));
    }

    #[test]
    fn test_unknown_name() {
        let map = ColorMap::assign(["a"], &palette(), "white");
        assert_eq!(map.color("zzz"), None);
        assert!(ColorMap::assign(std::iter::empty::<&str>(), &palette(), "white").is_empty());
    }
}
