//! Shell Components
//!
//! Plain-text renderers for each part of the screen.

mod new_item_form;
mod panels;

pub use new_item_form::NewItemForm;
pub use panels::{DbFetchPanel, SubscriptionPanel, TodoListPanel};
