use clap::{Parser, Subcommand};
use patientor_calculator::{calculate_bmi, calculate_exercises};
use patientor_core::{build_entry, DiagnosisRegistry, InMemoryPatientRepository, PatientRepository};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient record and calculator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a body mass index
    Bmi {
        /// Height in centimetres
        height: f64,
        /// Weight in kilograms
        weight: f64,
    },
    /// Rate daily exercise hours against a target
    Exercises {
        /// Target hours per day
        target: f64,
        /// Hours exercised on each day
        #[arg(required = true)]
        hours: Vec<f64>,
    },
    /// List known diagnoses
    Diagnoses {
        /// Diagnoses JSON file (defaults to the bundled set)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List patients
    Patients {
        /// Patients JSON file (defaults to the bundled seed data)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Validate an entry JSON file and print the entry it would create
    CheckEntry {
        /// Path to a JSON file holding one entry
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Bmi { height, weight }) => match calculate_bmi(height, weight) {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) => eprintln!("Something went wrong, error message: {}", e),
        },
        Some(Commands::Exercises { target, hours }) => {
            match calculate_exercises(&hours, target) {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(e) => eprintln!("Something went wrong, error message: {}", e),
            }
        }
        Some(Commands::Diagnoses { file }) => {
            let registry = match file {
                Some(path) => DiagnosisRegistry::load(&path)?,
                None => DiagnosisRegistry::bundled()?,
            };
            for diagnosis in registry.all() {
                match &diagnosis.latin {
                    Some(latin) => println!("{}: {} ({})", diagnosis.code, diagnosis.name, latin),
                    None => println!("{}: {}", diagnosis.code, diagnosis.name),
                }
            }
        }
        Some(Commands::Patients { file }) => {
            let repo = match file {
                Some(path) => InMemoryPatientRepository::load(&path)?,
                None => InMemoryPatientRepository::bundled()?,
            };
            let patients = repo.list()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {}, Born: {}, Entries: {}",
                        patient.id,
                        patient.name,
                        patient.date_of_birth,
                        patient.entries.len()
                    );
                }
            }
        }
        Some(Commands::CheckEntry { path }) => {
            let text = std::fs::read_to_string(&path)?;
            let input: serde_json::Value = serde_json::from_str(&text)?;
            match build_entry(&input) {
                Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                Err(e) => {
                    eprintln!("Entry rejected: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(())
}
