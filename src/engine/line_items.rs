use thiserror::Error;

pub const MIN_LINE_ITEMS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineItemError {
    #[error("You must have at least one line item.")]
    LastItem,
    #[error("line item {index} does not exist ({len} items)")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered deliverable descriptions. Never shorter than one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItems {
    items: Vec<String>,
}

/// One row of the line-item editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRow {
    pub index: usize,
    pub label: String,
    pub value: String,
}

impl LineItems {
    pub fn new(items: Vec<String>) -> Result<Self, LineItemError> {
        if items.len() < MIN_LINE_ITEMS {
            return Err(LineItemError::LastItem);
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Overwrite the item at `index`. Returns false if there is no such item.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove and return the item at `index`, refusing to drop the last one.
    pub fn remove(&mut self, index: usize) -> Result<String, LineItemError> {
        if self.items.len() <= MIN_LINE_ITEMS {
            return Err(LineItemError::LastItem);
        }
        if index >= self.items.len() {
            return Err(LineItemError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn replace_all(&mut self, items: Vec<String>) -> Result<(), LineItemError> {
        *self = Self::new(items)?;
        Ok(())
    }

    pub fn rows(&self) -> Vec<LineItemRow> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| LineItemRow {
                index: i,
                label: format!("Item {}", i + 1),
                value: item.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(v: &[&str]) -> LineItems {
        LineItems::new(v.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(LineItems::new(Vec::new()), Err(LineItemError::LastItem));
    }

    #[test]
    fn test_cannot_remove_last_item() {
        let mut li = items(&["Only"]);
        assert_eq!(li.remove(0), Err(LineItemError::LastItem));
        assert_eq!(li.as_slice(), &["Only".to_string()]);
    }

    #[test]
    fn test_remove_by_position() {
        let mut li = items(&["a", "b", "c"]);
        assert_eq!(li.remove(1), Ok("b".to_string()));
        assert_eq!(li.as_slice(), &["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut li = items(&["a", "b"]);
        assert_eq!(
            li.remove(5),
            Err(LineItemError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(li.len(), 2);
    }

    #[test]
    fn test_set_by_index() {
        let mut li = items(&["a", "b"]);
        assert!(li.set(1, "B"));
        assert!(!li.set(2, "C"));
        assert_eq!(li.get(1), Some("B"));
    }

    #[test]
    fn test_rows_are_one_based() {
        let li = items(&["first", "second"]);
        let rows = li.rows();
        assert_eq!(rows[0].label, "Item 1");
        assert_eq!(rows[1].label, "Item 2");
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].value, "second");
    }

    #[test]
    fn test_replace_all_keeps_invariant() {
        let mut li = items(&["a"]);
        assert!(li.replace_all(Vec::new()).is_err());
        assert_eq!(li.len(), 1);
        li.replace_all(vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(li.len(), 2);
    }

    #[test]
    fn test_last_item_message() {
        assert_eq!(
            LineItemError::LastItem.to_string(),
            "You must have at least one line item."
        );
    }
}
