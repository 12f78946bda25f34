use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::cli::args::ProfileArgs;
use crate::cli::prompt::prompt_with_default;
use crate::db::repository::UserRepo;
use crate::models::{Gender, User, ValidationError};

/// Fill a profile from flags, asking for whatever is missing.
fn collect_profile(args: &ProfileArgs, existing: Option<&User>) -> Result<User> {
    let name = match &args.name {
        Some(n) => n.clone(),
        None => prompt_with_default("Name", existing.map(|u| u.name.as_str()))?,
    };
    let surname = match &args.surname {
        Some(s) => s.clone(),
        None => prompt_with_default("Surname", existing.map(|u| u.surname.as_str()))?,
    };
    let age = match args.age {
        Some(a) => a,
        None => {
            let current = existing.map(|u| u.age.to_string());
            prompt_with_default("Age", current.as_deref())?
                .parse::<i32>()
                .map_err(|_| ValidationError::InvalidAge)?
        }
    };
    let gender = match &args.gender {
        Some(g) => g.parse::<Gender>()?,
        None => prompt_with_default(
            "Gender (Male/Female/Other)",
            Some(existing.map(|u| u.gender.as_str()).unwrap_or("Other")),
        )?
        .parse::<Gender>()?,
    };
    Ok(User {
        name,
        surname,
        age,
        gender,
    })
}

/// Merge flags onto the stored profile without prompting.
fn merge_profile(args: &ProfileArgs, mut user: User) -> Result<User, ValidationError> {
    if let Some(n) = &args.name {
        user.name = n.clone();
    }
    if let Some(s) = &args.surname {
        user.surname = s.clone();
    }
    if let Some(a) = args.age {
        user.age = a;
    }
    if let Some(g) = &args.gender {
        user.gender = g.parse()?;
    }
    Ok(user)
}

fn print_profile(user: &User) {
    println!();
    println!("  Name:    {} {}", user.name, user.surname);
    println!("  Age:     {}", user.age);
    println!("  Gender:  {}", user.gender.as_str());
    println!();
}

pub fn handle_setup(conn: &Connection, reset: bool, args: &ProfileArgs) -> Result<()> {
    let existing = UserRepo::get(conn)?;
    if existing.is_some() && !reset {
        println!("Your profile is already set up. Use --reset to replace it.");
        return Ok(());
    }

    println!();
    println!("  Welcome to habita! Tell us a little about yourself.");
    println!();
    let user = collect_profile(args, existing.as_ref())?;
    user.validate()?;
    UserRepo::save(conn, &user).context("Failed to save user data")?;
    log::info!("Profile saved for {}", user.name);
    println!("  ✓ Profile saved");
    Ok(())
}

pub fn handle_profile(conn: &Connection, args: &ProfileArgs) -> Result<()> {
    let Some(user) = UserRepo::get(conn)? else {
        return handle_setup(conn, false, args);
    };
    if args.is_empty() {
        print_profile(&user);
        return Ok(());
    }
    let updated = merge_profile(args, user)?;
    updated.validate()?;
    UserRepo::save(conn, &updated).context("Failed to save changes")?;
    println!("  ✓ Changes saved successfully");
    print_profile(&updated);
    Ok(())
}

/// Run setup when no profile exists yet.
pub fn ensure_profile(conn: &Connection) -> Result<()> {
    if !UserRepo::exists(conn)? {
        eprintln!("No profile found. Running setup...");
        handle_setup(conn, false, &ProfileArgs::default())?;
    }
    Ok(())
}
