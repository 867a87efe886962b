use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One atomic unit of described work extracted from a task description.
pub type WorkItem = String;

/// A named group of work items, the externally visible summary unit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SummaryGroup {
    pub title: String,
    pub tasks: Vec<WorkItem>,
}

impl SummaryGroup {
    #[must_use]
    pub fn new(title: impl Into<String>, tasks: Vec<WorkItem>) -> Self {
        Self {
            title: title.into(),
            tasks,
        }
    }
}

/// Insertion-ordered map from group label to work items.
///
/// Labels are unique; extending an existing label appends to its items.
/// Group counts per run are small, so lookups are linear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGroups {
    entries: Vec<(String, Vec<WorkItem>)>,
}

impl TaskGroups {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `items` to the group `label`, creating it at the end if absent.
    pub fn extend<I>(&mut self, label: &str, items: I)
    where
        I: IntoIterator<Item = WorkItem>,
    {
        self.entry_mut(label).extend(items);
    }

    /// Replace the items of `label`, creating it at the end if absent.
    pub fn insert(&mut self, label: impl Into<String>, items: Vec<WorkItem>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = items,
            None => self.entries.push((label, items)),
        }
    }

    fn entry_mut(&mut self, label: &str) -> &mut Vec<WorkItem> {
        let index = match self.entries.iter().position(|(l, _)| l == label) {
            Some(index) => index,
            None => {
                self.entries.push((label.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[WorkItem]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, items)| items.as_slice())
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Drop groups that have no items.
    pub fn retain_non_empty(&mut self) {
        self.entries.retain(|(_, items)| !items.is_empty());
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[WorkItem])> {
        self.entries
            .iter()
            .map(|(l, items)| (l.as_str(), items.as_slice()))
    }

    /// Total number of work items across all groups.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TaskGroups {
    type Item = (String, Vec<WorkItem>);
    type IntoIter = std::vec::IntoIter<(String, Vec<WorkItem>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Vec<WorkItem>)> for TaskGroups {
    fn from_iter<T: IntoIterator<Item = (String, Vec<WorkItem>)>>(iter: T) -> Self {
        let mut groups = Self::new();
        for (label, items) in iter {
            groups.extend(&label, items);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(values: &[&str]) -> Vec<WorkItem> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn extend_appends_to_existing_label() {
        let mut groups = TaskGroups::new();
        groups.extend("Sprint 10", items(&["a"]));
        groups.extend("Meetings", items(&["standup"]));
        groups.extend("Sprint 10", items(&["b"]));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("Sprint 10").unwrap(), items(&["a", "b"]).as_slice());
        assert_eq!(groups.labels().collect::<Vec<_>>(), vec!["Sprint 10", "Meetings"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut groups = TaskGroups::new();
        groups.insert("x", items(&["1"]));
        groups.insert("y", items(&["2"]));
        groups.insert("x", items(&["3"]));

        assert_eq!(groups.labels().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(groups.get("x").unwrap(), items(&["3"]).as_slice());
    }

    #[test]
    fn retain_non_empty_drops_empty_groups() {
        let mut groups = TaskGroups::new();
        groups.insert("empty", Vec::new());
        groups.insert("full", items(&["x"]));
        groups.retain_non_empty();

        assert!(!groups.contains("empty"));
        assert_eq!(groups.item_count(), 1);
    }

    #[test]
    fn from_iter_merges_duplicate_labels() {
        let groups: TaskGroups = vec![
            ("a".to_string(), items(&["1"])),
            ("a".to_string(), items(&["2"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.get("a").unwrap(), items(&["1", "2"]).as_slice());
    }
}
