use clap::Subcommand;
use colored::*;
use inquire::{Confirm, Text};
use taskflow_client::AppContext;
use taskflow_core::{CategoryCreateInput, CategoryUpdateInput};

use super::{check_store, new_table, store_warning};

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// List categories
    List,
    /// Add a category
    Add {
        #[arg(short, long)]
        name: Option<String>,
        /// Hex color such as #0ea5e9
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Rename or recolor a category. Tasks keep the old name.
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category. Tasks in it are kept.
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_categories_command(
    ctx: &AppContext,
    command: CategoriesCommands,
) -> anyhow::Result<()> {
    match command {
        CategoriesCommands::List => list_categories(ctx).await,
        CategoriesCommands::Add { name, color } => {
            let name = match name {
                Some(n) => n,
                None => Text::new("Name:").prompt()?,
            };
            let color = match color {
                Some(c) => c,
                None => Text::new("Color:").with_default("#0ea5e9").prompt()?,
            };
            add_category(ctx, CategoryCreateInput { name, color, user_id: None }).await
        }
        CategoriesCommands::Update { id, name, color } => {
            update_category(ctx, &id, CategoryUpdateInput { name, color }).await
        }
        CategoriesCommands::Delete { id, yes } => delete_category(ctx, &id, yes).await,
    }
}

async fn list_categories(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.refresh().await;
    check_store(&ctx.categories)?;

    let categories = ctx.categories.items();
    if categories.is_empty() {
        println!("{}", "No categories found".yellow());
        return Ok(());
    }

    // Task counts are best effort; a failed task fetch leaves them at zero
    if let Some(warning) = store_warning(&ctx.tasks) {
        println!("{}", warning.dimmed());
    }
    let tasks = ctx.tasks.items();

    let mut table = new_table(vec!["ID", "Name", "Color", "Tasks"]);
    for category in &categories {
        let count = tasks.iter().filter(|t| t.category == category.name).count();
        table.add_row(vec![
            category.id.clone(),
            category.name.clone(),
            category.color.clone(),
            count.to_string(),
        ]);
    }

    println!("{}", table);
    println!("Total: {} categories", categories.len().to_string().cyan());

    Ok(())
}

async fn add_category(ctx: &AppContext, input: CategoryCreateInput) -> anyhow::Result<()> {
    match ctx.categories.add(input).await {
        Some(category) => {
            println!("{}", format!("Category '{}' created", category.name).green());
            println!("ID: {}", category.id.cyan());
            Ok(())
        }
        None => check_store(&ctx.categories),
    }
}

async fn update_category(
    ctx: &AppContext,
    id: &str,
    input: CategoryUpdateInput,
) -> anyhow::Result<()> {
    match ctx.categories.update(id, input).await {
        Some(category) => {
            println!(
                "{}",
                format!("Category '{}' updated ({})", category.name, category.color).green()
            );
            Ok(())
        }
        None => check_store(&ctx.categories),
    }
}

async fn delete_category(ctx: &AppContext, id: &str, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new(&format!("Delete category {}?", id))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    if ctx.categories.remove(id).await {
        println!("{}", format!("Category {} deleted", id).green());
        Ok(())
    } else {
        check_store(&ctx.categories)
    }
}
