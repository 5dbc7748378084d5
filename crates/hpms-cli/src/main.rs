//! Command-line front end for the hospital patient management system.
//!
//! A thin presentation adapter: collects input, calls the store
//! synchronously, renders results. All business rules live in `hpms-core`.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use hpms_core::{Patient, PatientDraft, PatientStore, StoreError};

#[derive(Parser)]
#[command(name = "hpms")]
#[command(about = "Hospital patient management system")]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, default_value = "hospital_management.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new patient
    Register {
        #[command(flatten)]
        fields: PatientFieldArgs,
    },
    /// Show a single patient record
    Get {
        patient_id: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Update an existing patient record
    Update {
        patient_id: String,
        #[command(flatten)]
        fields: PatientFieldArgs,
    },
    /// Delete a patient record
    Delete {
        patient_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List all patients, most recently registered first
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search patients by name, patient ID, or contact
    Search {
        term: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show dashboard statistics and recent activity
    Dashboard {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Patient form fields as collected from the command line.
///
/// Everything defaults to blank so the store's own validation decides what
/// is missing, exactly as it would for an empty form field.
#[derive(Args)]
struct PatientFieldArgs {
    /// Full name
    #[arg(long, default_value = "")]
    name: String,
    /// Age in years
    #[arg(long, default_value = "")]
    age: String,
    /// Male, Female, or Other
    #[arg(long, default_value = "")]
    gender: String,
    /// Contact number
    #[arg(long, default_value = "")]
    contact: String,
    /// Home address
    #[arg(long, default_value = "")]
    address: String,
    /// Blood type (A+, A-, B+, B-, AB+, AB-, O+, O-, Unknown)
    #[arg(long, default_value = "")]
    blood_type: String,
    /// Free-text medical history
    #[arg(long, default_value = "")]
    medical_history: String,
}

impl From<&PatientFieldArgs> for PatientDraft {
    fn from(args: &PatientFieldArgs) -> Self {
        PatientDraft {
            name: args.name.clone(),
            age: args.age.clone(),
            gender: args.gender.clone(),
            contact: args.contact.clone(),
            address: args.address.clone(),
            blood_type: args.blood_type.clone(),
            medical_history: args.medical_history.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut store = match PatientStore::open(&cli.db) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Database error: could not open {}: {}", cli.db, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = dispatch(cli.command, &mut store) {
        // Store failures are user-facing messages, never panics; phrasing
        // follows the error taxonomy
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::Validation(rule)) => eprintln!("Error: {rule}"),
            Some(StoreError::NotFound(_)) => eprintln!("Warning: {err}"),
            Some(StoreError::Storage(cause)) => eprintln!("Database error: {cause}"),
            None => eprintln!("Error: {err}"),
        }
        std::process::exit(1);
    }
    Ok(())
}

fn dispatch(command: Commands, store: &mut PatientStore) -> anyhow::Result<()> {
    match command {
        Commands::Register { fields } => {
            let patient = store.register(&PatientDraft::from(&fields))?;
            println!(
                "Patient registered successfully! Patient ID: {}",
                patient.patient_id
            );
        }
        Commands::Get { patient_id, json } => {
            let patient = store.get(&patient_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&patient)?);
            } else {
                print_patient_details(&patient);
            }
        }
        Commands::Update { patient_id, fields } => {
            store.update(&patient_id, &PatientDraft::from(&fields))?;
            println!("Patient record updated successfully!");
        }
        Commands::Delete { patient_id, yes } => {
            let patient = store.get(&patient_id)?;
            let prompt = format!(
                "Are you sure you want to delete patient {} (ID: {})?",
                patient.name, patient.patient_id
            );
            if !yes && !confirm(&prompt)? {
                println!("Delete cancelled.");
                return Ok(());
            }
            store.delete(&patient_id)?;
            println!("Patient record deleted successfully!");
        }
        Commands::List { json } => {
            let patients = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&patients)?);
            } else {
                print_patient_table(&patients);
            }
        }
        Commands::Search { term, json } => {
            let patients = store.search(&term)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&patients)?);
            } else {
                print_patient_table(&patients);
            }
        }
        Commands::Dashboard { json } => {
            let stats = store.dashboard()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Hospital Management Dashboard");
                println!("  Total Patients:     {}", stats.total_patients);
                println!("  Total Appointments: {}", stats.total_appointments);
                println!("  Pending Bills:      {}", stats.unpaid_bills);
                println!("  Revenue ($):        {:.2}", stats.revenue_collected);
                println!();
                println!("Recent Activity:");
                if store.activity().is_empty() {
                    println!("  (none this session)");
                } else {
                    for entry in store.activity().recent() {
                        println!("  {entry}");
                    }
                }
            }
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn print_patient_table(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No patients found.");
        return;
    }

    println!(
        "{:<24} {:<20} {:>3}  {:<6} {:<15} {:<10}",
        "Patient ID", "Name", "Age", "Gender", "Contact", "Registered"
    );
    for patient in patients {
        println!(
            "{:<24} {:<20} {:>3}  {:<6} {:<15} {:<10}",
            patient.patient_id,
            patient.name,
            patient.age,
            patient.gender.map(|g| g.as_str()).unwrap_or(""),
            patient.contact,
            patient.registered_date,
        );
    }
    println!("{} record(s)", patients.len());
}

fn print_patient_details(patient: &Patient) {
    println!("Patient ID:      {}", patient.patient_id);
    println!("Name:            {}", patient.name);
    println!("Age:             {}", patient.age);
    println!(
        "Gender:          {}",
        patient.gender.map(|g| g.as_str()).unwrap_or("-")
    );
    println!("Contact:         {}", patient.contact);
    println!(
        "Address:         {}",
        patient.address.as_deref().unwrap_or("-")
    );
    println!(
        "Blood Type:      {}",
        patient.blood_type.map(|b| b.as_str()).unwrap_or("-")
    );
    println!(
        "Medical History: {}",
        patient.medical_history.as_deref().unwrap_or("-")
    );
    println!("Registered:      {}", patient.registered_date);
}
