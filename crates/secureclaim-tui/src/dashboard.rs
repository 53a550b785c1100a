//! Placeholder content for the dashboard screen.
//!
//! The figures and actions are fixed; nothing here is fetched from the API.

/// Colour hint for a stat tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Warning,
    Success,
    Primary,
}

#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct Action {
    pub title: &'static str,
    pub description: &'static str,
    pub featured: bool,
}

pub const STATS: [Stat; 4] = [
    Stat {
        label: "Active Policies",
        value: "3",
        tone: Tone::Accent,
    },
    Stat {
        label: "Pending Claims",
        value: "1",
        tone: Tone::Warning,
    },
    Stat {
        label: "Resolved Claims",
        value: "7",
        tone: Tone::Success,
    },
    Stat {
        label: "Total Coverage",
        value: "$250K",
        tone: Tone::Primary,
    },
];

pub const ACTIONS: [Action; 5] = [
    Action {
        title: "Submit a Claim",
        description: "File a new insurance claim quickly and securely",
        featured: true,
    },
    Action {
        title: "Purchase Policy",
        description: "Browse and purchase new insurance policies",
        featured: false,
    },
    Action {
        title: "My Policies",
        description: "View and manage your active insurance policies",
        featured: false,
    },
    Action {
        title: "Claims History",
        description: "Track the status of all your past claims",
        featured: false,
    },
    Action {
        title: "My Profile",
        description: "Update your personal information and preferences",
        featured: false,
    },
];

pub const WELCOME_SUBTITLE: &str = "Here's an overview of your insurance portfolio";

/// Greeting shown under the header. The name is everything before the
/// first '@' of the account email, which may be empty.
pub fn welcome_line(email: Option<&str>) -> String {
    match email {
        Some(email) if !email.is_empty() => {
            let name = email.split('@').next().unwrap_or_default();
            format!("Welcome back, {}", name)
        }
        _ => "Welcome back".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_featured_action() {
        assert_eq!(ACTIONS.iter().filter(|a| a.featured).count(), 1);
        assert_eq!(ACTIONS[0].title, "Submit a Claim");
    }

    #[test]
    fn test_welcome_line() {
        assert_eq!(welcome_line(Some("alice@example.com")), "Welcome back, alice");
        assert_eq!(welcome_line(Some("no-at-sign")), "Welcome back, no-at-sign");
        assert_eq!(welcome_line(Some("@example.com")), "Welcome back, ");
        assert_eq!(welcome_line(Some("")), "Welcome back");
        assert_eq!(welcome_line(None), "Welcome back");
    }
}
