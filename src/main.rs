use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use roster::client::ApiClient;
use roster::db::Database;
use roster::filter::{Filters, filter};
use roster::models::{EmployeeUpdate, NewEmployee, Role};
use roster::paginate::Pager;
use roster::sort::{Direction, SortConfig, SortKey, sort};
use roster::stats;
use roster::{server, tui};

const DEFAULT_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Employee records - serve, browse and manage a single-table roster")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: String,

        /// Database file (defaults to the XDG data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Insert demo data unless the table already has rows
    Seed {
        /// Database file (defaults to the XDG data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Browse employees interactively
    Browse {
        /// Base URL of a running server
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// List employees with client-side filter, sort and pagination
    List {
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,

        /// Search term matched against name and email
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by role (Manager, Developer, HR, Sales, Intern)
        #[arg(short, long)]
        role: Option<Role>,

        #[arg(long)]
        min_salary: Option<f64>,

        #[arg(long)]
        max_salary: Option<f64>,

        #[arg(long)]
        min_age: Option<i64>,

        #[arg(long)]
        max_age: Option<i64>,

        /// Sort column (id, name, email, age, role, salary)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Page to show (1-based, clamped)
        #[arg(short, long, default_value = "1")]
        page: usize,

        #[arg(long, default_value = "10")]
        page_size: usize,
    },

    /// Show one employee
    Show {
        id: i64,

        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Add an employee
    Add {
        name: String,
        email: String,
        age: i64,
        salary: f64,

        /// Role (defaults to Intern server-side)
        #[arg(short, long)]
        role: Option<Role>,

        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Update fields of an employee; omitted fields keep their values
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        age: Option<i64>,

        #[arg(long)]
        salary: Option<f64>,

        #[arg(long)]
        role: Option<Role>,

        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Delete one or more employees by id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,

        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Show summary statistics
    Stats {
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, db } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "roster=info,tower_http=info".into()),
                )
                .init();
            let db = Database::open(db.as_deref())?;
            tracing::info!("using database at {}", db.path().display());
            tokio::runtime::Runtime::new()?.block_on(server::run(&bind, db))?;
        }

        Commands::Seed { db } => {
            let db = Database::open(db.as_deref())?;
            let added = db.seed()?;
            if added == 0 {
                println!("Database already has data. Skipping seed.");
            } else {
                println!("Seeded {} employees into {}", added, db.path().display());
            }
        }

        Commands::Browse { url } => {
            let client = ApiClient::new(&url)?;
            tui::run_browse(&client)?;
        }

        Commands::List {
            url,
            search,
            role,
            min_salary,
            max_salary,
            min_age,
            max_age,
            sort: sort_key,
            desc,
            page,
            page_size,
        } => {
            let client = ApiClient::new(&url)?;
            let all = client.list()?;

            let filters = Filters {
                search: search.unwrap_or_default(),
                role,
                salary_min: min_salary,
                salary_max: max_salary,
                age_min: min_age,
                age_max: max_age,
            };
            let config = SortConfig {
                key: sort_key,
                direction: if desc {
                    Direction::Descending
                } else {
                    Direction::Ascending
                },
            };

            let filtered = filter(&all, &filters);
            let sorted = sort(&filtered, &config);
            let mut pager = Pager::new(page_size);
            pager.go_to(page, sorted.len());
            let page = pager.page(&sorted);

            if page.items.is_empty() {
                println!("No employees found.");
            } else {
                println!(
                    "{:<6} {:<20} {:<28} {:>4} {:<10} {:>12}",
                    "ID", "NAME", "EMAIL", "AGE", "ROLE", "SALARY"
                );
                println!("{}", "-".repeat(86));
                for emp in &page.items {
                    println!(
                        "{:<6} {:<20} {:<28} {:>4} {:<10} {:>12.2}",
                        emp.id,
                        truncate(&emp.name, 18),
                        truncate(&emp.email, 26),
                        emp.age,
                        emp.role.map(|r| r.as_str()).unwrap_or("-"),
                        emp.salary
                    );
                }
                println!(
                    "\nPage {}/{} ({} matching)",
                    page.page, page.total_pages, page.total_items
                );
            }
        }

        Commands::Show { id, url } => {
            let client = ApiClient::new(&url)?;
            let emp = client.get(id)?;
            println!("Employee #{}", emp.id);
            println!("Name:   {}", emp.name);
            println!("Email:  {}", emp.email);
            println!("Age:    {}", emp.age);
            println!("Role:   {}", emp.role.map(|r| r.as_str()).unwrap_or("-"));
            println!("Salary: {:.2}", emp.salary);
        }

        Commands::Add {
            name,
            email,
            age,
            salary,
            role,
            url,
        } => {
            let client = ApiClient::new(&url)?;
            let emp = client.create(&NewEmployee {
                name,
                email,
                age,
                role,
                salary,
            })?;
            println!(
                "Added employee #{} ({}, {})",
                emp.id,
                emp.name,
                emp.role.map(|r| r.as_str()).unwrap_or("-")
            );
        }

        Commands::Update {
            id,
            name,
            email,
            age,
            salary,
            role,
            url,
        } => {
            let update = EmployeeUpdate {
                name,
                email,
                age,
                role,
                salary,
            };
            if update.is_empty() {
                println!("Nothing to update. Pass at least one of --name, --email, --age, --salary, --role.");
                return Ok(());
            }
            let client = ApiClient::new(&url)?;
            let emp = client.update(id, &update)?;
            println!("Updated employee #{} ({})", emp.id, emp.name);
        }

        Commands::Delete { ids, url } => {
            let client = ApiClient::new(&url)?;
            if ids.len() == 1 {
                client.delete(ids[0])?;
                println!("Deleted employee #{}", ids[0]);
            } else {
                let n = client.delete_many(&ids)?;
                println!("Deleted {} employees", n);
            }
        }

        Commands::Stats { url } => {
            let client = ApiClient::new(&url)?;
            let all = client.list()?;
            let stats = stats::calculate(&all);
            println!("Total employees: {}", stats.total_employees);
            println!("Average salary:  {}", stats.average_salary);
            println!("Average age:     {}", stats.average_age);
            println!(
                "Salary range:    {:.0} - {:.0}",
                stats.salary_range.min, stats.salary_range.max
            );
            println!(
                "Age range:       {:.0} - {:.0}",
                stats.age_range.min, stats.age_range.max
            );
            println!("Roles:");
            for (role, share) in stats.role_percentages() {
                println!("  {:<10} {:>3} ({:>3}%)", role, share.count, share.percentage);
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
