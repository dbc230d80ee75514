//! Guest bookings for recreational activities.

use serde::{Deserialize, Serialize};

use crate::client::Dispatcher;
use crate::error::Result;

const PATH: &str = "/ReservasActividades";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityBooking {
    #[serde(rename = "reservaActividadId")]
    pub id: i64,
    #[serde(rename = "actividadId")]
    pub activity_id: i64,
    #[serde(rename = "huespedId")]
    pub guest_id: i64,
    #[serde(rename = "fechaReserva")]
    pub date: String,
    #[serde(rename = "horaReserva")]
    pub time: String,
    #[serde(rename = "numeroPersonas")]
    pub party_size: i32,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "montoTotal")]
    pub total_amount: f64,
    #[serde(rename = "notasEspeciales", default, skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    #[serde(rename = "recordatorioEnviado")]
    pub reminder_sent: bool,
    #[serde(rename = "fechaRecordatorio", default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityBooking {
    #[serde(rename = "actividadId")]
    pub activity_id: i64,
    #[serde(rename = "huespedId")]
    pub guest_id: i64,
    #[serde(rename = "fechaReserva")]
    pub date: String,
    #[serde(rename = "horaReserva")]
    pub time: String,
    #[serde(rename = "numeroPersonas")]
    pub party_size: i32,
    #[serde(rename = "montoTotal")]
    pub total_amount: f64,
    #[serde(rename = "notasEspeciales", default, skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateActivityBooking {
    #[serde(rename = "reservaActividadId")]
    pub id: i64,
    #[serde(rename = "fechaReserva")]
    pub date: String,
    #[serde(rename = "horaReserva")]
    pub time: String,
    #[serde(rename = "numeroPersonas")]
    pub party_size: i32,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "montoTotal")]
    pub total_amount: f64,
    #[serde(rename = "notasEspeciales", default, skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    #[serde(rename = "recordatorioEnviado")]
    pub reminder_sent: bool,
    #[serde(rename = "fechaRecordatorio", default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
}

/// `/ReservasActividades` endpoints.
pub struct ActivityBookings<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ActivityBookings<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self) -> Result<Vec<ActivityBooking>> {
        self.dispatcher.get_json(PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<ActivityBooking> {
        self.dispatcher.get_json(&format!("{PATH}/{id}")).await
    }

    pub async fn create(&self, command: &CreateActivityBooking) -> Result<ActivityBooking> {
        self.dispatcher.post_json(PATH, command).await
    }

    pub async fn update(&self, command: &UpdateActivityBooking) -> Result<()> {
        self.dispatcher.put(&format!("{PATH}/{}", command.id), command).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.dispatcher.delete(&format!("{PATH}/{id}")).await
    }
}
