use clap::Subcommand;
use colored::*;
use inquire::{Confirm, Text};
use taskflow_client::{apply, AppContext, Selection, SortKey, TaskFilter};
use taskflow_core::{parse_due_date, Task, TaskCreateInput, TaskPriority, TaskStatus, TaskUpdateInput};

use super::{check_store, format_date, new_table, truncate};

#[derive(Subcommand)]
pub enum TasksCommands {
    /// List tasks
    List {
        /// Case-insensitive text matched against title and description
        #[arg(short, long, default_value = "")]
        search: String,
        /// todo, in-progress, done or all
        #[arg(long, default_value = "all")]
        status: Selection<TaskStatus>,
        /// Category name or all
        #[arg(long, default_value = "all")]
        category: Selection<String>,
        /// high, medium, low or all
        #[arg(long, default_value = "all")]
        priority: Selection<TaskPriority>,
        /// dueDate, priority or title
        #[arg(long, default_value = "dueDate")]
        sort: SortKey,
    },
    /// Add a task
    Add {
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Category name
        #[arg(short, long, default_value = "")]
        category: String,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },
    /// Update fields of a task
    Update {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete a task
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_tasks_command(ctx: &AppContext, command: TasksCommands) -> anyhow::Result<()> {
    match command {
        TasksCommands::List {
            search,
            status,
            category,
            priority,
            sort,
        } => {
            let filter = TaskFilter {
                search,
                status,
                category,
                priority,
            };
            list_tasks(ctx, &filter, sort).await
        }
        TasksCommands::Add {
            title,
            description,
            status,
            priority,
            category,
            due,
        } => {
            let title = match title {
                Some(t) => t,
                None => Text::new("Title:").prompt()?,
            };
            let due = match due {
                Some(d) => d,
                None => Text::new("Due date (YYYY-MM-DD):")
                    .with_default(&chrono::Utc::now().format("%Y-%m-%d").to_string())
                    .prompt()?,
            };

            let input = TaskCreateInput {
                title,
                description,
                status,
                priority,
                category,
                due_date: Some(parse_due_date(&due)?),
                user_id: None,
            };
            add_task(ctx, input).await
        }
        TasksCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            category,
            due,
        } => {
            let due_date = due.as_deref().map(parse_due_date).transpose()?;
            let input = TaskUpdateInput {
                title,
                description,
                status,
                priority,
                category,
                due_date,
            };
            update_task(ctx, &id, input).await
        }
        TasksCommands::Delete { id, yes } => delete_task(ctx, &id, yes).await,
    }
}

async fn list_tasks(ctx: &AppContext, filter: &TaskFilter, sort: SortKey) -> anyhow::Result<()> {
    ctx.tasks.fetch_all().await;
    check_store(&ctx.tasks)?;

    let all = ctx.tasks.items();
    let tasks = apply(&all, filter, sort);

    if tasks.is_empty() {
        println!("{}", "No tasks found".yellow());
        if all.is_empty() {
            println!("{}", "Use 'taskflow tasks add' to create your first task".dimmed());
        }
        return Ok(());
    }

    let mut table = new_table(vec!["ID", "Title", "Status", "Priority", "Category", "Due"]);
    for task in &tasks {
        table.add_row(vec![
            task.id.clone(),
            truncate(&task.title, 30),
            task.status.label().to_string(),
            task.priority.as_str().to_string(),
            task.category.clone(),
            format_date(&task.due_date),
        ]);
    }

    println!("{}", table);
    println!(
        "Showing {} of {} tasks",
        tasks.len().to_string().cyan(),
        all.len()
    );

    Ok(())
}

async fn add_task(ctx: &AppContext, input: TaskCreateInput) -> anyhow::Result<()> {
    match ctx.tasks.add(input).await {
        Some(task) => {
            println!("{}", format!("Task '{}' created", task.title).green());
            println!("ID: {}", task.id.cyan());
            Ok(())
        }
        None => check_store(&ctx.tasks),
    }
}

async fn update_task(ctx: &AppContext, id: &str, input: TaskUpdateInput) -> anyhow::Result<()> {
    match ctx.tasks.update(id, input).await {
        Some(task) => {
            println!("{}", format!("Task '{}' updated", task.title).green());
            print_task(&task);
            Ok(())
        }
        None => check_store(&ctx.tasks),
    }
}

async fn delete_task(ctx: &AppContext, id: &str, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new(&format!("Delete task {}?", id))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    if ctx.tasks.remove(id).await {
        println!("{}", format!("Task {} deleted", id).green());
        Ok(())
    } else {
        check_store(&ctx.tasks)
    }
}

fn print_task(task: &Task) {
    println!("  {} {}", "Title:".bold(), task.title);
    if !task.description.is_empty() {
        println!("  {} {}", "Description:".bold(), task.description);
    }
    println!("  {} {}", "Status:".bold(), task.status.label());
    println!("  {} {}", "Priority:".bold(), task.priority);
    println!("  {} {}", "Category:".bold(), task.category);
    println!("  {} {}", "Due:".bold(), format_date(&task.due_date));
    println!("  {} {}", "Updated:".bold(), task.updated_at.to_rfc3339());
}
