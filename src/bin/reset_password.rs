//! A command line tool for resetting the application user's password.
//!
//! Useful when the password has been forgotten, since the web app has no
//! password recovery flow.

use std::path::PathBuf;

use clap::Parser;
use rusqlite::Connection;

use salestrack_rs::{Error, PasswordHash, ValidatedPassword, update_sole_user_password};

#[derive(Parser)]
#[command(version, about = "Reset the password of the application user.")]
struct Args {
    /// The path to the SQLite database file.
    #[arg(long, default_value = "sales.db")]
    db_path: PathBuf,
}

fn main() {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path).unwrap_or_else(|error| {
        panic!(
            "could not open the database at {}: {error}",
            args.db_path.display()
        )
    });

    let password = rpassword::prompt_password("New password: ")
        .expect("could not read the password from stdin");
    let confirm_password = rpassword::prompt_password("Confirm new password: ")
        .expect("could not read the password from stdin");

    if password != confirm_password {
        eprintln!("The passwords do not match.");
        std::process::exit(1);
    }

    let validated_password = match ValidatedPassword::new(&password) {
        Ok(validated_password) => validated_password,
        Err(Error::TooWeak(feedback)) => {
            eprintln!("The password is too weak: {feedback}");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("Could not validate the password: {error}");
            std::process::exit(1);
        }
    };

    let password_hash =
        PasswordHash::new(validated_password, salestrack_rs::DEFAULT_COST)
            .expect("could not hash the password");

    match update_sole_user_password(password_hash, &connection) {
        Ok(()) => println!("The password has been updated."),
        Err(Error::NotFound) => {
            eprintln!("No user is registered yet. Register through the web app first.");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("Could not update the password: {error}");
            std::process::exit(1);
        }
    }
}
