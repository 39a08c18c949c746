use clap::{Parser, Subcommand};
use frontdesk_core::{config, store, CoreConfig, PatientRegistry};

#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(about = "Hospital front-desk administration CLI")]
struct Cli {
    /// SQLite database URL (defaults to sqlite://hospital.db)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the store schema (idempotent)
    Migrate,
    /// Insert the fixed staff accounts (idempotent)
    Seed {
        /// Also insert the two sample patient records
        #[arg(long)]
        with_sample_patients: bool,
    },
    /// List all patients
    ListPatients,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = CoreConfig::new(config::database_url_from_env_value(cli.database_url))?;
    let pool = store::connect(cfg.database_url()).await?;

    match cli.command {
        Commands::Migrate => {
            store::run_migrations(&pool).await?;
            println!("schema applied");
        }
        Commands::Seed {
            with_sample_patients,
        } => {
            store::run_migrations(&pool).await?;
            let users = store::seed_users(&pool).await?;
            println!("inserted {users} staff accounts");
            if with_sample_patients {
                let patients = store::seed_sample_patients(&pool).await?;
                println!("inserted {patients} sample patients");
            }
        }
        Commands::ListPatients => {
            let registry = PatientRegistry::new(pool);
            let patients = registry.list().await?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, SSN: {}, Name: {}, Age: {}, Joined: {}, Type: {}",
                        patient.patient_id,
                        patient.ssn,
                        patient.name,
                        patient.age,
                        patient.date_of_joining,
                        patient.registration_type,
                    );
                }
            }
        }
    }

    Ok(())
}
