//! Lobby CLI binary entry point.

use clap::Parser;
use lobby::auth::SessionStatus;
use lobby::cli::{AuthCommands, Cli, Commands};
use lobby::client::LobbyClient;
use lobby::error::LobbyError;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let client = match LobbyClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let status = client.session_status();

    let result = match cli.command {
        Commands::Auth(auth_args) => match auth_args.command {
            AuthCommands::Login(args) => {
                lobby::cli::auth::handle_login(&client, &args.email, args.password).await
            }
            AuthCommands::Status => lobby::cli::auth::handle_status(&client).await,
            AuthCommands::Logout => lobby::cli::auth::handle_logout(&client).await,
            AuthCommands::Register(args) => {
                lobby::cli::auth::handle_register(&client, &args.email, args.password).await
            }
            AuthCommands::ForgotPassword(args) => {
                lobby::cli::auth::handle_forgot_password(&client, &args.email).await
            }
            AuthCommands::ResetPassword(args) => {
                lobby::cli::auth::handle_reset_password(&client, &args.email, &args.code, args.password)
                    .await
            }
        },
        Commands::Activities(args) => {
            lobby::cli::resources::handle_activities(&client, args.command).await
        }
        Commands::ActivityBookings(args) => {
            lobby::cli::resources::handle_activity_bookings(&client, args.command).await
        }
        Commands::RoomBookings(args) => {
            lobby::cli::resources::handle_room_bookings(&client, args.command).await
        }
        Commands::Dashboard => lobby::cli::resources::handle_dashboard(&client).await,
    };

    if let Err(e) = result {
        let signed_out = *status.borrow() == SessionStatus::SignedOut;
        let needs_sign_in = e
            .downcast_ref::<LobbyError>()
            .is_some_and(LobbyError::requires_sign_in);
        if signed_out && needs_sign_in {
            eprintln!("❌ Your session has ended. Run `lobby auth login <email>` to sign in again.");
        } else {
            eprintln!("Error: operation failed: {e}");
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("LOBBY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
