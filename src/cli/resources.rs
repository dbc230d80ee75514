//! CLI handlers for the resource API.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{BodyArgs, ResourceCommands, RoomBookingCommands};
use crate::client::LobbyClient;
use crate::resources::{
    CreateActivity, CreateActivityBooking, CreateRoomBooking, UpdateActivity,
    UpdateActivityBooking, UpdateRoomBooking,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub async fn handle_activities(client: &LobbyClient, command: ResourceCommands) -> CliResult {
    let service = client.activities();
    match command {
        ResourceCommands::List => print_json(&service.list().await?),
        ResourceCommands::Get { id } => print_json(&service.get(id).await?),
        ResourceCommands::Create(body) => {
            let command: CreateActivity = read_body(&body)?;
            print_json(&service.create(&command).await?)
        }
        ResourceCommands::Update(body) => {
            let command: UpdateActivity = read_body(&body)?;
            service.update(&command).await?;
            println!("✅ Updated activity {}", command.id);
            Ok(())
        }
        ResourceCommands::Delete { id } => {
            service.delete(id).await?;
            println!("🗑️  Deleted activity {id}");
            Ok(())
        }
    }
}

pub async fn handle_activity_bookings(client: &LobbyClient, command: ResourceCommands) -> CliResult {
    let service = client.activity_bookings();
    match command {
        ResourceCommands::List => print_json(&service.list().await?),
        ResourceCommands::Get { id } => print_json(&service.get(id).await?),
        ResourceCommands::Create(body) => {
            let command: CreateActivityBooking = read_body(&body)?;
            print_json(&service.create(&command).await?)
        }
        ResourceCommands::Update(body) => {
            let command: UpdateActivityBooking = read_body(&body)?;
            service.update(&command).await?;
            println!("✅ Updated activity booking {}", command.id);
            Ok(())
        }
        ResourceCommands::Delete { id } => {
            service.delete(id).await?;
            println!("🗑️  Deleted activity booking {id}");
            Ok(())
        }
    }
}

pub async fn handle_room_bookings(client: &LobbyClient, command: RoomBookingCommands) -> CliResult {
    let service = client.room_bookings();
    match command {
        RoomBookingCommands::List => print_json(&service.list().await?),
        RoomBookingCommands::Get { id } => print_json(&service.get(id).await?),
        RoomBookingCommands::ByGuest { guest_id } => print_json(&service.by_guest(guest_id).await?),
        RoomBookingCommands::Create(body) => {
            let command: CreateRoomBooking = read_body(&body)?;
            print_json(&service.create(&command).await?)
        }
        RoomBookingCommands::Update(body) => {
            let command: UpdateRoomBooking = read_body(&body)?;
            service.update(&command).await?;
            println!("✅ Updated room booking {}", command.id);
            Ok(())
        }
        RoomBookingCommands::Delete { id } => {
            service.delete(id).await?;
            println!("🗑️  Deleted room booking {id}");
            Ok(())
        }
    }
}

/// Handle `lobby dashboard`.
pub async fn handle_dashboard(client: &LobbyClient) -> CliResult {
    let stats = client.dashboard().await?;
    println!("📊 Dashboard\n");
    println!("  Activities:         {}", stats.activities);
    println!("  Activity bookings:  {}", stats.activity_bookings);
    println!("  Room bookings:      {}", stats.room_bookings);
    println!("  Estimated revenue:  ${:.2}", stats.estimated_revenue);
    Ok(())
}

fn read_body<T: DeserializeOwned>(args: &BodyArgs) -> Result<T, Box<dyn std::error::Error>> {
    let raw = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
