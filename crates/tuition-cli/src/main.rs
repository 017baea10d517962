use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use tuition_cli::admin::create_admin;
use tuition_cli::seeder::{self, SeedConfig};

#[derive(Parser)]
#[command(name = "tuition-cli")]
#[command(about = "Tuition Manager CLI - Administrative tools for the institute backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a confirmed administrator account
    CreateAdmin {
        /// Full name shown in the sidebar footer
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed lookups, teachers, students, a class schedule and fee payments
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "200")]
        students: usize,

        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "12")]
        teachers: usize,

        /// Days of classes to schedule after today
        #[arg(long, default_value = "14")]
        days: u64,

        /// Classes per day
        #[arg(long, default_value = "4")]
        classes_per_day: usize,

        /// Fee payments per student
        #[arg(long, default_value = "2")]
        payments: usize,
    },
    /// Seed only standards, subjects, batches and fees plans
    SeedLookups,
    /// Clear all seeded rows (keeps lookups and user accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = tuition_db::init_db_pool().await?;

    let outcome = match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
        } => handle_create_admin(&pool, full_name, email, password).await,
        Commands::Seed {
            students,
            teachers,
            days,
            classes_per_day,
            payments,
        } => {
            let config = SeedConfig::new(students)
                .with_teachers(teachers)
                .with_schedule(days, classes_per_day)
                .with_payments(payments);
            seeder::seed_all(&pool, config).await
        }
        Commands::SeedLookups => seeder::seed_lookups(&pool).await.map(|lookups| {
            println!(
                "✅ Lookups ready: {} batches, {} subjects, {} fees plans",
                lookups.batches.len(),
                lookups.subjects.len(),
                lookups.fees_plans.len()
            );
        }),
        Commands::ClearSeed => seeder::clear_all(&pool).await.map(|_| ()),
    };

    if let Err(e) = outcome {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn handle_create_admin(
    pool: &PgPool,
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let full_name = match full_name {
        Some(name) => name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    if password.chars().count() < tuition_core::MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password should be at least {} characters",
            tuition_core::MIN_PASSWORD_LENGTH
        )
        .into());
    }

    let user_id = create_admin(pool, &full_name, &email, &password).await?;
    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", user_id);
    println!("   Email: {}", email.trim().to_lowercase());
    println!("   Name: {}", full_name);
    Ok(())
}
