use clap::{Parser, Subcommand};

use secretary_lib::{
    config::AppConfig, error::SecretaryError, spending::SpendingReport, summary::SummaryWindow,
    tasks::{TaskBoard, TaskDraft, TaskListEntry},
    Secretary,
};

#[derive(Parser)]
#[command(name = "secretary", version, about = "Tasks, notes, AI summaries and spending from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "AI summary of pending tasks")]
    Summary {
        user: String,
        #[arg(long, help = "Summarize the current Monday..Sunday week instead of today")]
        week: bool,
    },
    #[command(about = "List a user's tasks grouped by date")]
    Tasks { user: String },
    #[command(about = "Add a task dated today and show the updated list")]
    AddTask {
        user: String,
        description: String,
        #[arg(long)]
        location: Option<String>,
    },
    #[command(about = "List a user's notes")]
    Notes { user: String },
    #[command(about = "Sandbox spending report with AI advice")]
    Spending,
    #[command(about = "Today's weather summary at a location")]
    Weather {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
}

fn print_entries(entries: &[TaskListEntry]) {
    for entry in entries {
        match entry {
            TaskListEntry::SectionHeader { date } => println!("{date}"),
            TaskListEntry::TaskRow { task } => {
                let mark = if task.done { "x" } else { " " };
                match task.location_label() {
                    Some(location) => println!("  [{mark}] {} ({location})", task.description),
                    None => println!("  [{mark}] {}", task.description),
                }
            }
        }
    }
}

fn print_report(report: &SpendingReport) {
    println!("Weekly total: ${:.2}", report.weekly_total);
    println!("Monthly total: ${:.2}", report.monthly_total);
    for (category, amount) in &report.category_totals {
        println!("{category}: ${amount:.2}");
    }
    println!("Transactions ({}):", report.transactions.len());
    for t in &report.transactions {
        println!("  {}  {}  {}  ${:.2}", t.date, t.display_name(), t.category_label(), t.amount);
    }
}

async fn run(cli: Cli) -> Result<(), SecretaryError> {
    let secretary = Secretary::new(AppConfig::from_env()?)?;

    match cli.command {
        Commands::Summary { user, week } => {
            let window = if week { SummaryWindow::Week } else { SummaryWindow::Day };
            println!("{}", secretary.summary_text(&user, window).await);
        }
        Commands::Tasks { user } => {
            let board = TaskBoard::new(secretary.tasks().list(&user).await?);
            print_entries(&board.entries());
        }
        Commands::AddTask {
            user,
            description,
            location,
        } => {
            let mut board = TaskBoard::new(secretary.tasks().list(&user).await?);
            let mut draft = TaskDraft::new(&user, &description);
            if let Some(location) = location.as_deref() {
                draft = draft.with_location(location);
            }
            let provisional = board.insert_provisional(draft.clone());
            let created = secretary.tasks().create(&user, draft).await?;
            board.replace(&provisional, created);
            print_entries(&board.entries());
        }
        Commands::Notes { user } => {
            for note in secretary.notes().list(&user).await? {
                println!("{}  {}\n    {}", note.date, note.title, note.description);
            }
        }
        Commands::Spending => {
            let spending = secretary.spending()?;
            let report = spending.load_report().await?;
            print_report(&report);
            println!("\n{}", spending.advice(&report).await);
        }
        Commands::Weather { lat, lon } => {
            println!("{}", secretary.weather_text(lat, lon).await);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    secretary_lib::init_tracing();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
