//! Classifies a migration name and extracts the table it targets.
//!
//! `create_users_table` is a Create on `users`; `add_avatar_to_users_table`
//! is an Add on `users`; names that fit no pattern are Plain and pick the
//! empty stub.

use crate::core::naming;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationAction {
    Create,
    Add,
    Delete,
    Drop,
    Plain,
}

#[derive(Debug, Clone)]
pub struct NameParser {
    name: String,
    action: MigrationAction,
    table: Option<String>,
}

impl NameParser {
    pub fn parse(raw: &str) -> NameParser {
        let name = naming::snake(raw);
        let action = match name.split('_').next().unwrap_or("") {
            "create" | "make" => MigrationAction::Create,
            "add" | "append" | "update" | "insert" => MigrationAction::Add,
            "delete" | "remove" => MigrationAction::Delete,
            "drop" | "destroy" => MigrationAction::Drop,
            _ => MigrationAction::Plain,
        };
        let table = extract_table(&name, action);
        NameParser {
            name,
            action,
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> MigrationAction {
        self.action
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn is_create(&self) -> bool {
        self.action == MigrationAction::Create
    }

    pub fn is_add(&self) -> bool {
        self.action == MigrationAction::Add
    }

    pub fn is_delete(&self) -> bool {
        self.action == MigrationAction::Delete
    }

    pub fn is_drop(&self) -> bool {
        self.action == MigrationAction::Drop
    }
}

fn extract_table(name: &str, action: MigrationAction) -> Option<String> {
    let pattern = match action {
        MigrationAction::Create => r"^(?:create|make)_(.+?)_table$",
        MigrationAction::Add => r"^(?:add|append|update|insert)_.+_(?:to|in|on)_(.+?)_table$",
        MigrationAction::Delete => r"^(?:delete|remove)_.+_from_(.+?)_table$",
        MigrationAction::Drop => r"^(?:drop|destroy)_(.+?)_table$",
        MigrationAction::Plain => return None,
    };
    let re = Regex::new(pattern).expect("migration name pattern is valid");
    re.captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_names() {
        let parsed = NameParser::parse("create_users_table");
        assert!(parsed.is_create());
        assert_eq!(parsed.table(), Some("users"));

        let parsed = NameParser::parse("make_blog_posts_table");
        assert!(parsed.is_create());
        assert_eq!(parsed.table(), Some("blog_posts"));
    }

    #[test]
    fn add_names() {
        let parsed = NameParser::parse("add_avatar_to_users_table");
        assert!(parsed.is_add());
        assert_eq!(parsed.table(), Some("users"));

        let parsed = NameParser::parse("update_slug_in_posts_table");
        assert!(parsed.is_add());
        assert_eq!(parsed.table(), Some("posts"));
    }

    #[test]
    fn delete_and_drop_names() {
        let parsed = NameParser::parse("delete_avatar_from_users_table");
        assert!(parsed.is_delete());
        assert_eq!(parsed.table(), Some("users"));

        let parsed = NameParser::parse("drop_users_table");
        assert!(parsed.is_drop());
        assert_eq!(parsed.table(), Some("users"));
    }

    #[test]
    fn unrecognized_names_are_plain() {
        let parsed = NameParser::parse("tidy_things_up");
        assert_eq!(parsed.action(), MigrationAction::Plain);
        assert_eq!(parsed.table(), None);
    }

    #[test]
    fn action_word_without_table_suffix_has_no_table() {
        let parsed = NameParser::parse("create_search_index");
        assert!(parsed.is_create());
        assert_eq!(parsed.table(), None);
    }

    #[test]
    fn studly_input_is_normalized() {
        let parsed = NameParser::parse("CreateUsersTable");
        assert!(parsed.is_create());
        assert_eq!(parsed.table(), Some("users"));
    }
}
