//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::models::User;

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

/// Print detailed user information
pub fn print_user_detail(user: &User) {
    println!("{}", "Account Details".bold().underline());
    println!();
    println!("  {} {}", "Id:".bold(), user.id);
    println!("  {} {}", "Name:".bold(), user.full_name());
    println!("  {} {}", "Email:".bold(), user.email.cyan());
    println!("  {} {}", "Role:".bold(), user.role);

    if let Some(company) = &user.company_name {
        println!("  {} {}", "Company:".bold(), company);
    }

    if let Some(phone) = &user.phone_number {
        println!("  {} {}", "Phone:".bold(), phone);
    }

    println!(
        "  {} {}",
        "Member since:".bold(),
        user.created_at.format("%Y-%m-%d")
    );
}

/// Print the stored session as a table
pub fn print_session_table(
    token: Option<&str>,
    refresh_token: Option<&str>,
    user: Option<&User>,
) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Key").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        Cell::new("authToken"),
        token_cell(token),
    ]);
    table.add_row(vec![
        Cell::new("refreshToken"),
        token_cell(refresh_token),
    ]);
    table.add_row(vec![
        Cell::new("user"),
        match user {
            Some(user) => Cell::new(format!("{} ({})", user.email, user.role)),
            None => Cell::new("absent").fg(Color::Red),
        },
    ]);

    println!("{table}");
}

fn token_cell(token: Option<&str>) -> Cell {
    match token {
        Some(token) => Cell::new(truncate_token(token)).fg(Color::Green),
        None => Cell::new("absent").fg(Color::Red),
    }
}

/// Show enough of a token to recognize it, never the whole credential
fn truncate_token(token: &str) -> String {
    if token.len() <= 12 {
        "present".to_string()
    } else {
        format!("{}…", &token[..12])
    }
}

/// Confirm an action with the user
pub fn confirm(message: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N] ", message);
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
