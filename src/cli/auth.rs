//! CLI auth command handlers.

use std::io::Write;

use crate::client::LobbyClient;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Handle `lobby auth login <email>`.
pub async fn handle_login(client: &LobbyClient, email: &str, password: Option<String>) -> CliResult {
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };
    let session = client.login(email, &password).await?;
    println!("✅ Signed in as {email}");
    if let Some(expires) = session.expires_at {
        println!("   Access token expires {}", expires.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

/// Handle `lobby auth status`.
pub async fn handle_status(client: &LobbyClient) -> CliResult {
    println!("🔐 Session Status\n");
    if !client.is_authenticated() {
        println!("  ❌ Not signed in");
        return Ok(());
    }
    let profile = match client.stored_profile()? {
        Some(profile) => Some(profile),
        None => client.refresh_profile().await.ok(),
    };
    match profile {
        Some(profile) => {
            let confirmed = if profile.is_email_confirmed {
                "confirmed"
            } else {
                "unconfirmed"
            };
            println!("  ✅ Signed in as {} ({confirmed})", profile.email);
        }
        None => println!("  ✅ Signed in"),
    }
    println!("\n📌 Services:");
    println!("  API: {}", client.config().api_base_url);
    println!("  Identity: {}", client.config().identity_base_url);
    Ok(())
}

/// Handle `lobby auth logout`.
pub async fn handle_logout(client: &LobbyClient) -> CliResult {
    client.logout()?;
    println!("✅ Signed out");
    Ok(())
}

pub async fn handle_register(client: &LobbyClient, email: &str, password: Option<String>) -> CliResult {
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };
    client.register(email, &password).await?;
    println!("✅ Account created for {email}; check your inbox to confirm it");
    Ok(())
}

pub async fn handle_forgot_password(client: &LobbyClient, email: &str) -> CliResult {
    client.forgot_password(email).await?;
    println!("📧 If {email} has an account, a reset code is on its way");
    Ok(())
}

pub async fn handle_reset_password(
    client: &LobbyClient,
    email: &str,
    code: &str,
    password: Option<String>,
) -> CliResult {
    let password = match password {
        Some(p) => p,
        None => prompt("New password")?,
    };
    client.reset_password(email, code, &password).await?;
    println!("✅ Password updated");
    Ok(())
}

fn prompt(label: &str) -> Result<String, std::io::Error> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
