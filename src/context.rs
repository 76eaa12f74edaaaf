//! Session Context
//!
//! Who is signed in. Authentication itself happens before the shell starts;
//! all the shell keeps is the identity it greets.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    email: Option<String>,
}

impl UserContext {
    pub fn new(email: Option<String>) -> Self {
        Self {
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or("User")
    }

    pub fn welcome_line(&self) -> String {
        format!("Welcome, {}!", self.display_name())
    }
}
