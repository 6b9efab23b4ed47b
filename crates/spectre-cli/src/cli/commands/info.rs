//! Read-only commands: `whoami`, `settings`, `configuration`, `about`.

use anyhow::Result;
use spectre_core::api::GhostApi;

use super::blocking;

pub async fn run_whoami(api: GhostApi, auth: String) -> Result<()> {
    let users = blocking(move || api.get_current_user(&auth, "")).await?;
    match users.body.users.first() {
        Some(user) => {
            let roles: Vec<&str> = user.roles.iter().map(|r| r.name.as_str()).collect();
            println!("{} <{}> [{}]", user.name, user.email, roles.join(", "));
        }
        None => println!("No user returned."),
    }
    Ok(())
}

pub async fn run_settings(api: GhostApi, auth: String) -> Result<()> {
    let settings = blocking(move || api.get_settings(&auth, "")).await?;
    for s in &settings.body.settings {
        println!("{:<24} {}", s.key, s.value.as_deref().unwrap_or("-"));
    }
    Ok(())
}

pub async fn run_configuration(api: GhostApi) -> Result<()> {
    let config = blocking(move || api.get_configuration()).await?;
    for p in &config.body.configuration {
        println!("{:<24} {}", p.key, p.value.as_deref().unwrap_or("-"));
    }
    Ok(())
}

pub async fn run_about(api: GhostApi, auth: String) -> Result<()> {
    let about = blocking(move || api.get_version(&auth)).await?;
    match about.body.configuration.first() {
        Some(a) => println!("Ghost {}", a.version),
        None => println!("Server did not report a version."),
    }
    Ok(())
}
