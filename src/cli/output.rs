//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::auth::{Claims, RoleClaim, Session, ADMIN_ROLE};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a role name, highlighting the admin role
pub fn format_role(role: &str) -> String {
    if role == ADMIN_ROLE {
        role.red().bold().to_string()
    } else {
        role.to_string()
    }
}

/// Session as printed by `whoami --format json|yaml`
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    #[serde(flatten)]
    pub session: &'a Session,
    pub is_admin: bool,
}

impl<'a> From<&'a Session> for SessionReport<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            session,
            is_admin: session.is_admin(),
        }
    }
}

/// Print the session as a table
pub fn print_session_table(session: &Session) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Username").fg(Color::Cyan),
            Cell::new("Roles").fg(Color::Cyan),
            Cell::new("Admin").fg(Color::Cyan),
        ]);

    let (admin, admin_color) = if session.is_admin() {
        ("yes", Color::Green)
    } else {
        ("no", Color::Red)
    };

    table.add_row(vec![
        Cell::new(&session.username),
        Cell::new(session.roles.join(", ")),
        Cell::new(admin).fg(admin_color),
    ]);

    println!("{table}");
}

/// Print decoded token claims
pub fn print_claims(claims: &Claims) {
    println!("{}", "Token Claims (unverified)".bold().underline());
    println!();
    println!(
        "  {} {}",
        "Subject:".bold(),
        claims.sub.as_deref().unwrap_or("-")
    );

    match &claims.roles {
        Some(roles) => {
            println!("  {}", "Roles:".bold());
            for role in roles {
                match RoleClaim::authority_of(role) {
                    Some(authority) => println!("    - {}", format_role(authority)),
                    None => println!("    - {}", "(no authority)".yellow()),
                }
            }
        }
        None => println!("  {} -", "Roles:".bold()),
    }

    if let Some(iat) = claims.issued_at() {
        println!(
            "  {} {}",
            "Issued:".bold(),
            iat.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    if let Some(expires) = claims.expires_at() {
        let label = if expires < chrono::Utc::now() {
            " (expired)".red().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}{}",
            "Expires:".bold(),
            expires.format("%Y-%m-%d %H:%M:%S UTC"),
            label
        );
    }

    if !claims.extra.is_empty() {
        println!();
        println!("  {}", "Other claims:".bold());
        for (name, value) in &claims.extra {
            println!("    {}: {}", name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_report_includes_admin_flag() {
        let session = Session::new(
            "alice",
            vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()],
        );
        let json = serde_json::to_value(SessionReport::from(&session)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "alice",
                "roles": ["ROLE_ADMIN", "ROLE_USER"],
                "is_admin": true
            })
        );
    }

    #[test]
    fn test_session_report_yaml_for_regular_user() {
        let session = Session::new("bob", vec!["ROLE_USER".to_string()]);
        let yaml = serde_yaml::to_string(&SessionReport::from(&session)).unwrap();
        assert!(yaml.contains("username: bob"));
        assert!(yaml.contains("is_admin: false"));
    }
}
