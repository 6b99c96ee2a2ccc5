//! Discovers which teleports the player can use by reading the portal's own
//! label rows.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MenuError;
use crate::host::{HostUi, WidgetHandle};

use super::layout::{self, LABELS_ALTERNATE, LABELS_PRIMARY};

/// `<col=ffffff>K</col> :  Name`, matched against the whole label text.
static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<col=ffffff>(\S)</col> :  (.+)$").expect("label pattern is valid")
});

/// Which of the two parallel label lists a teleport was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Primary,
    Alternate,
}

/// A teleport row as it appears in the label list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelRow {
    pub shortcut_key: char,
    pub name: String,
}

/// A teleport the player can currently use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Teleport {
    pub name: String,
    /// Row position in the source container; replayed to fire the teleport.
    pub child_index: usize,
    pub shortcut_key: char,
    pub variant: Variant,
}

/// Discovered teleports keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AvailableTeleports {
    by_name: HashMap<String, Teleport>,
}

impl AvailableTeleports {
    pub fn get(&self, name: &str) -> Option<&Teleport> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Insert, replacing any earlier teleport with the same name.
    pub fn insert(&mut self, teleport: Teleport) {
        self.by_name.insert(teleport.name.clone(), teleport);
    }

    /// Merge `other` over `self`; `other` wins on shared names.
    pub fn extend(&mut self, other: AvailableTeleports) {
        self.by_name.extend(other.by_name);
    }
}

/// Parse one label's text. `None` for headers and decorative rows.
pub fn parse_label(text: &str) -> Option<LabelRow> {
    let caps = LABEL_PATTERN.captures(text)?;
    let shortcut_key = caps.get(1)?.as_str().chars().next()?;
    let name = caps.get(2)?.as_str().to_string();
    Some(LabelRow { shortcut_key, name })
}

/// Collect the teleports listed in one label container.
pub fn scan_container(
    host: &dyn HostUi,
    container: WidgetHandle,
    variant: Variant,
) -> AvailableTeleports {
    let mut found = AvailableTeleports::default();
    for (position, child) in host.children(container).into_iter().enumerate() {
        let Some(row) = host.text(child).and_then(parse_label) else {
            continue;
        };
        found.insert(Teleport {
            name: row.name,
            child_index: host.child_index(child).unwrap_or(position),
            shortcut_key: row.shortcut_key,
            variant,
        });
    }
    found
}

/// Build a fresh availability map from both label lists, alternate over primary.
pub fn scan_available_teleports(host: &dyn HostUi) -> Result<AvailableTeleports, MenuError> {
    let primary = layout::require(host, LABELS_PRIMARY)?;
    let alternate = layout::require(host, LABELS_ALTERNATE)?;

    let mut available = scan_container(host, primary, Variant::Primary);
    available.extend(scan_container(host, alternate, Variant::Alternate));

    if available.is_empty() {
        log::warn!("no teleports found in either label list");
    } else {
        log::debug!("scanned {} available teleports", available.len());
    }
    Ok(available)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::host::sim::SimHost;
    use proptest::prelude::*;

    /// A label row: either a teleport (key, name) or a decorative line.
    fn row_strategy() -> impl Strategy<Value = Option<(char, String)>> {
        prop_oneof![
            1 => Just(None),
            3 => (
                proptest::char::range('0', 'Z').prop_filter("non-space", |c| !c.is_whitespace()),
                "[A-Z][a-z]{1,6}",
            )
                .prop_map(Some),
        ]
    }

    fn render(rows: &[Option<(char, String)>]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                Some((key, name)) => format!("<col=ffffff>{key}</col> :  {name}"),
                None => "<col=ff981f>Destinations</col>".to_string(),
            })
            .collect()
    }

    proptest! {
        #[test]
        fn every_matching_row_maps_to_its_position(
            primary in proptest::collection::vec(row_strategy(), 0..12),
            alternate in proptest::collection::vec(row_strategy(), 0..12),
        ) {
            let p = render(&primary);
            let a = render(&alternate);
            let p_refs: Vec<&str> = p.iter().map(String::as_str).collect();
            let a_refs: Vec<&str> = a.iter().map(String::as_str).collect();
            let host = SimHost::nexus_portal(&p_refs, &a_refs);

            let available = scan_available_teleports(&host).unwrap();

            // Expected map: last match wins inside a list, alternate over primary.
            let mut expected: HashMap<String, (usize, char, Variant)> = HashMap::new();
            for (rows, variant) in [(&primary, Variant::Primary), (&alternate, Variant::Alternate)] {
                for (i, row) in rows.iter().enumerate() {
                    if let Some((key, name)) = row {
                        expected.insert(name.clone(), (i, *key, variant));
                    }
                }
            }

            prop_assert_eq!(available.len(), expected.len());
            for (name, (index, key, variant)) in expected {
                let t = available.get(&name).unwrap();
                prop_assert_eq!(t.child_index, index);
                prop_assert_eq!(t.shortcut_key, key);
                prop_assert_eq!(t.variant, variant);
            }
        }
    }
}
