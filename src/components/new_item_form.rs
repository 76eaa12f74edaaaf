//! New Item Form
//!
//! Echoes the two draft fields under the lists.

use std::fmt;

use todo_sync_lib::Draft;

pub struct NewItemForm<'a> {
    pub draft: &'a Draft,
}

impl fmt::Display for NewItemForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Add a New Todo!")?;
        writeln!(f, "  Name:        {}", self.draft.name)?;
        writeln!(f, "  Description: {}", self.draft.description)?;
        if self.draft.name.is_empty() {
            writeln!(f, "  (set a name before 'add')")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_hint_until_named() {
        let mut draft = Draft::default();
        let empty = NewItemForm { draft: &draft }.to_string();
        assert!(empty.starts_with("Add a New Todo!\n"));
        assert!(empty.contains("set a name"));

        draft.name = "C".to_string();
        draft.description = "desc".to_string();
        let filled = NewItemForm { draft: &draft }.to_string();
        assert!(filled.contains("Name:        C"));
        assert!(filled.contains("Description: desc"));
        assert!(!filled.contains("set a name"));
    }
}
