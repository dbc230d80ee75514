//! CLI entry point for Lobby.

pub mod auth;
pub mod resources;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lobby hotel back-office CLI
#[derive(Parser, Debug)]
#[command(name = "lobby", version, about = "Lobby: hotel back-office CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    Auth(AuthArgs),
    /// Recreational activities
    Activities(ResourceArgs),
    /// Activity bookings
    ActivityBookings(ResourceArgs),
    /// Room bookings
    RoomBookings(RoomBookingArgs),
    /// Counts and estimated revenue across all collections
    Dashboard,
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login(LoginArgs),
    /// Show session status
    Status,
    /// Sign out and clear the stored session
    Logout,
    /// Create an account
    Register(LoginArgs),
    /// Request a password reset code
    ForgotPassword(EmailArgs),
    /// Set a new password with a reset code
    ResetPassword(ResetPasswordArgs),
}

/// Arguments for `lobby auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub email: String,
    /// Password (read from stdin when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Parser, Debug)]
pub struct EmailArgs {
    pub email: String,
}

#[derive(Parser, Debug)]
pub struct ResetPasswordArgs {
    pub email: String,
    #[arg(long)]
    pub code: String,
    /// New password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments shared by the resource subcommand groups.
#[derive(Parser, Debug)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommands,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List all records
    List,
    /// Show one record
    Get { id: i64 },
    /// Create a record from JSON
    Create(BodyArgs),
    /// Replace a record from JSON (the body carries the id)
    Update(BodyArgs),
    /// Delete one record
    Delete { id: i64 },
}

/// Where to read a JSON record body from.
#[derive(Parser, Debug)]
pub struct BodyArgs {
    /// JSON file; reads stdin when omitted or `-`
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct RoomBookingArgs {
    #[command(subcommand)]
    pub command: RoomBookingCommands,
}

#[derive(Subcommand, Debug)]
pub enum RoomBookingCommands {
    /// List all room bookings
    List,
    /// Show one room booking
    Get { id: i64 },
    /// List the bookings of one guest
    ByGuest { guest_id: i64 },
    /// Create a room booking from JSON
    Create(BodyArgs),
    /// Replace a room booking from JSON (the body carries the id)
    Update(BodyArgs),
    /// Delete one room booking
    Delete { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_with_password_flag() {
        let cli = Cli::try_parse_from(["lobby", "auth", "login", "desk@hotel.test", "-p", "pw"])
            .unwrap();
        match cli.command {
            Commands::Auth(AuthArgs {
                command: AuthCommands::Login(args),
            }) => {
                assert_eq!(args.email, "desk@hotel.test");
                assert_eq!(args.password.as_deref(), Some("pw"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_create_with_body_file() {
        let cli = Cli::try_parse_from(["lobby", "activities", "create", "-f", "kayak.json"]).unwrap();
        match cli.command {
            Commands::Activities(ResourceArgs {
                command: ResourceCommands::Create(body),
            }) => assert_eq!(body.file, Some(PathBuf::from("kayak.json"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_update_from_stdin_and_dashboard() {
        let cli = Cli::try_parse_from(["lobby", "room-bookings", "update"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::RoomBookings(RoomBookingArgs {
                command: RoomBookingCommands::Update(BodyArgs { file: None })
            })
        ));
        let cli = Cli::try_parse_from(["lobby", "dashboard"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn parses_room_bookings_by_guest() {
        let cli = Cli::try_parse_from(["lobby", "room-bookings", "by-guest", "42"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::RoomBookings(RoomBookingArgs {
                command: RoomBookingCommands::ByGuest { guest_id: 42 }
            })
        ));
    }
}
