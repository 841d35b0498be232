use anyhow::anyhow;
use colored::*;
use inquire::{Password, PasswordDisplayMode, Text};
use taskflow_client::AppContext;
use taskflow_core::User;

fn prompt_password() -> anyhow::Result<String> {
    Ok(Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?)
}

fn auth_error(ctx: &AppContext, fallback: &str) -> anyhow::Error {
    anyhow!(ctx.auth.error().unwrap_or_else(|| fallback.to_string()))
}

fn print_user(user: &User) {
    println!("  {} {}", "Name:".bold(), user.name);
    println!("  {} {}", "Email:".bold(), user.email);
    if let Some(avatar) = &user.avatar {
        println!("  {} {}", "Avatar:".bold(), avatar.dimmed());
    }
}

pub fn login(ctx: &AppContext, email: Option<String>, password: Option<String>) -> anyhow::Result<()> {
    let email = match email {
        Some(e) => e,
        None => Text::new("Email:").prompt()?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let user = ctx
        .auth
        .login(&email, &password)
        .ok_or_else(|| auth_error(ctx, "Invalid credentials"))?;

    println!("{}", format!("Signed in as {}", user.name).green());
    Ok(())
}

pub fn register(
    ctx: &AppContext,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(n) => n,
        None => Text::new("Name:").prompt()?,
    };
    let email = match email {
        Some(e) => e,
        None => Text::new("Email:").prompt()?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let user = ctx
        .auth
        .register(&name, &email, &password)
        .ok_or_else(|| auth_error(ctx, "Registration failed"))?;

    println!("{}", "Account created".green());
    print_user(&user);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.auth.logout();
    println!("{}", "Signed out".green());
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> anyhow::Result<()> {
    match ctx.auth.current_user() {
        Some(user) => print_user(&user),
        None => println!("{}", "Not signed in".yellow()),
    }
    Ok(())
}
