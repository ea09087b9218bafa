//! User display formatting

use crate::models::User;

/// Format user details; the password is masked
pub fn format_user_details(user: &User) -> String {
    let mut output = String::new();
    output.push_str(&format!("Username:   {}\n", user.username()));
    output.push_str(&format!("Name:       {}\n", user.full_name()));
    output.push_str(&format!("Email:      {}\n", user.email()));
    output.push_str(&format!("Password:   {}\n", "*".repeat(user.password().chars().count())));
    output.push_str(&format!(
        "Created:    {}\n",
        user.created_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output
}
