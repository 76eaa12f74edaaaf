//! List Panels
//!
//! The three lists of the screen, each numbered from 1.

use std::fmt;

use todo_sync_lib::Item;

/// Items created from this session
pub struct TodoListPanel<'a> {
    pub items: &'a [Item],
}

/// Last fetched page, with ids so they can be deleted
pub struct DbFetchPanel<'a> {
    pub items: &'a [Item],
}

/// Creations observed on the live feed
pub struct SubscriptionPanel<'a> {
    pub items: &'a [Item],
}

impl fmt::Display for TodoListPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Todo List Result")?;
        for (n, item) in self.items.iter().enumerate() {
            writeln!(f, "{} - {} - {}", n + 1, item.name, item.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for DbFetchPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DB Fetch Result")?;
        for (n, item) in self.items.iter().enumerate() {
            writeln!(f, "{} - {} - {} [{}]", n + 1, item.name, item.description, item.id)?;
        }
        Ok(())
    }
}

impl fmt::Display for SubscriptionPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subscription Results:")?;
        if self.items.is_empty() {
            return writeln!(f, "No new subscription data yet...");
        }
        for item in self.items {
            let description = if item.description.is_empty() {
                "No description"
            } else {
                item.description.as_str()
            };
            writeln!(f, "{} - {}", item.name, description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_list_numbering() {
        let items = vec![Item::new("3", "C", "desc"), Item::new("1", "A", "")];
        let text = TodoListPanel { items: &items }.to_string();
        assert_eq!(text, "Todo List Result\n1 - C - desc\n2 - A - \n");
    }

    #[test]
    fn test_db_fetch_shows_ids() {
        let items = vec![Item::new("2", "B", "b")];
        let text = DbFetchPanel { items: &items }.to_string();
        assert_eq!(text, "DB Fetch Result\n1 - B - b [2]\n");
    }

    #[test]
    fn test_subscription_placeholders() {
        let text = SubscriptionPanel { items: &[] }.to_string();
        assert_eq!(text, "Subscription Results:\nNo new subscription data yet...\n");

        let items = vec![Item::new("9", "E", "")];
        let text = SubscriptionPanel { items: &items }.to_string();
        assert_eq!(text, "Subscription Results:\nE - No description\n");
    }
}
