use chrono::Utc;
use colored::*;
use taskflow_client::{AppContext, DashboardSummary};
use taskflow_core::Task;

use super::{check_store, format_date, new_table, truncate};

pub async fn show_dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.tasks.fetch_all().await;
    check_store(&ctx.tasks)?;

    let summary = DashboardSummary::build(&ctx.tasks.items(), Utc::now());
    let name = ctx
        .auth
        .current_user()
        .map(|u| u.name)
        .unwrap_or_else(|| "User".to_string());

    println!("{}", format!("Welcome back, {}", name).blue().bold());
    println!();
    println!(
        "Total: {}  To Do: {}  In Progress: {}  Done: {}",
        summary.total.to_string().cyan(),
        summary.todo.to_string().cyan(),
        summary.in_progress.to_string().yellow(),
        summary.done.to_string().green()
    );

    print_section("Due Soon", &summary.due_soon, "No tasks due in the next 3 days");
    print_section(
        "High Priority",
        &summary.high_priority,
        "No open high priority tasks",
    );
    print_section(
        "Recently Completed",
        &summary.recently_completed,
        "No completed tasks yet",
    );

    if !summary.by_category.is_empty() {
        println!();
        println!("{}", "By Category".bold());
        for (category, count) in &summary.by_category {
            let label = if category.is_empty() {
                "(none)"
            } else {
                category.as_str()
            };
            println!("  {}: {}", label, count);
        }
    }

    Ok(())
}

fn print_section(title: &str, tasks: &[Task], empty: &str) {
    println!();
    println!("{}", title.bold());

    if tasks.is_empty() {
        println!("  {}", empty.dimmed());
        return;
    }

    let mut table = new_table(vec!["ID", "Title", "Status", "Priority", "Due"]);
    for task in tasks {
        table.add_row(vec![
            task.id.clone(),
            truncate(&task.title, 30),
            task.status.label().to_string(),
            task.priority.as_str().to_string(),
            format_date(&task.due_date),
        ]);
    }
    println!("{}", table);
}
