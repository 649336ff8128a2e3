//! Centralized keybindings
//!
//! Single source of truth for the key hints shown in the footer.

/// Navigation command with keybinding and label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCommand {
    /// The keybinding string (e.g., "j/k", "Tab")
    pub key: &'static str,
    /// The human-readable label (e.g., "Navigate")
    pub label: &'static str,
}

impl NavigationCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Commands that mutate resources and are hidden in read-only mode
const MUTATING_KEYS: &[&str] = &["s", "r", "R"];

/// Footer commands in display order
pub fn get_navigation_commands(read_only: bool) -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("j/k", "Navigate"),
        NavigationCommand::new("g/G", "Top/Bottom"),
        NavigationCommand::new("Tab", "Kind"),
        NavigationCommand::new("a", "All NS"),
        NavigationCommand::new("s", "Suspend"),
        NavigationCommand::new("r", "Resume"),
        NavigationCommand::new("R", "Reconcile"),
        NavigationCommand::new("^R", "Refresh"),
        NavigationCommand::new("q", "Quit"),
    ]
    .into_iter()
    .filter(|cmd| !(read_only && MUTATING_KEYS.contains(&cmd.key)))
    .collect()
}
