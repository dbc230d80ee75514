//! Room reservations.

use serde::{Deserialize, Serialize};

use crate::client::Dispatcher;
use crate::error::Result;

const PATH: &str = "/Reservas";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomBooking {
    #[serde(rename = "reservaId")]
    pub id: i64,
    #[serde(rename = "huespedId")]
    pub guest_id: i64,
    #[serde(rename = "habitacionId")]
    pub room_id: i64,
    #[serde(rename = "fechaCheckIn")]
    pub check_in: String,
    #[serde(rename = "fechaCheckOut")]
    pub check_out: String,
    #[serde(rename = "numeroHuespedes")]
    pub guests: i32,
    #[serde(rename = "numeroNinos")]
    pub children: i32,
    #[serde(rename = "montoTotal")]
    pub total_amount: f64,
    #[serde(rename = "montoPagado")]
    pub amount_paid: f64,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "checkInRealizado", default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<String>,
    #[serde(rename = "checkOutRealizado", default, skip_serializing_if = "Option::is_none")]
    pub checked_out_at: Option<String>,
    #[serde(rename = "creadoPor", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RoomBooking {
    /// Amount still owed on the booking.
    pub fn balance_due(&self) -> f64 {
        (self.total_amount - self.amount_paid).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomBooking {
    #[serde(rename = "huespedId")]
    pub guest_id: i64,
    #[serde(rename = "habitacionId")]
    pub room_id: i64,
    #[serde(rename = "fechaCheckIn")]
    pub check_in: String,
    #[serde(rename = "fechaCheckOut")]
    pub check_out: String,
    #[serde(rename = "numeroHuespedes")]
    pub guests: i32,
    #[serde(rename = "numeroNinos")]
    pub children: i32,
    #[serde(rename = "montoTotal")]
    pub total_amount: f64,
    #[serde(rename = "montoPagado")]
    pub amount_paid: f64,
    #[serde(rename = "creadoPor", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRoomBooking {
    #[serde(rename = "reservaId")]
    pub id: i64,
    #[serde(rename = "habitacionId")]
    pub room_id: i64,
    #[serde(rename = "fechaCheckIn")]
    pub check_in: String,
    #[serde(rename = "fechaCheckOut")]
    pub check_out: String,
    #[serde(rename = "numeroHuespedes")]
    pub guests: i32,
    #[serde(rename = "numeroNinos")]
    pub children: i32,
    #[serde(rename = "montoTotal")]
    pub total_amount: f64,
    #[serde(rename = "montoPagado")]
    pub amount_paid: f64,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "checkInRealizado", default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<String>,
    #[serde(rename = "checkOutRealizado", default, skip_serializing_if = "Option::is_none")]
    pub checked_out_at: Option<String>,
    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `/Reservas` endpoints.
pub struct RoomBookings<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> RoomBookings<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self) -> Result<Vec<RoomBooking>> {
        self.dispatcher.get_json(PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<RoomBooking> {
        self.dispatcher.get_json(&format!("{PATH}/{id}")).await
    }

    pub async fn by_guest(&self, guest_id: i64) -> Result<Vec<RoomBooking>> {
        self.dispatcher
            .get_json(&format!("{PATH}/huesped/{guest_id}"))
            .await
    }

    pub async fn create(&self, command: &CreateRoomBooking) -> Result<RoomBooking> {
        self.dispatcher.post_json(PATH, command).await
    }

    pub async fn update(&self, command: &UpdateRoomBooking) -> Result<()> {
        self.dispatcher.put(&format!("{PATH}/{}", command.id), command).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.dispatcher.delete(&format!("{PATH}/{id}")).await
    }
}
