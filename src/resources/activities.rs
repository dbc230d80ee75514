//! Recreational activities offered by a hotel.

use serde::{Deserialize, Serialize};

use crate::client::Dispatcher;
use crate::error::Result;

const PATH: &str = "/ActividadesRecreativas";

/// A recreational activity as returned by the resource API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "actividadId")]
    pub id: i64,
    #[serde(rename = "hotelId")]
    pub hotel_id: i64,
    #[serde(rename = "nombreActividad")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "horaApertura")]
    pub opens_at: String,
    #[serde(rename = "horaCierre")]
    pub closes_at: String,
    #[serde(rename = "capacidadMaxima")]
    pub max_capacity: i32,
    #[serde(rename = "precioPorPersona")]
    pub price_per_person: f64,
    #[serde(rename = "requiereReserva")]
    pub requires_booking: bool,
    #[serde(rename = "duracionMinutos", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(rename = "estaActiva")]
    pub active: bool,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivity {
    #[serde(rename = "hotelId")]
    pub hotel_id: i64,
    #[serde(rename = "nombreActividad")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "horaApertura")]
    pub opens_at: String,
    #[serde(rename = "horaCierre")]
    pub closes_at: String,
    #[serde(rename = "capacidadMaxima")]
    pub max_capacity: i32,
    #[serde(rename = "precioPorPersona")]
    pub price_per_person: f64,
    #[serde(rename = "requiereReserva")]
    pub requires_booking: bool,
    #[serde(rename = "duracionMinutos", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateActivity {
    #[serde(rename = "actividadId")]
    pub id: i64,
    #[serde(rename = "nombreActividad")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "horaApertura")]
    pub opens_at: String,
    #[serde(rename = "horaCierre")]
    pub closes_at: String,
    #[serde(rename = "capacidadMaxima")]
    pub max_capacity: i32,
    #[serde(rename = "precioPorPersona")]
    pub price_per_person: f64,
    #[serde(rename = "requiereReserva")]
    pub requires_booking: bool,
    #[serde(rename = "duracionMinutos", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(rename = "estaActiva")]
    pub active: bool,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Activity> for UpdateActivity {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            description: activity.description,
            category: activity.category,
            location: activity.location,
            opens_at: activity.opens_at,
            closes_at: activity.closes_at,
            max_capacity: activity.max_capacity,
            price_per_person: activity.price_per_person,
            requires_booking: activity.requires_booking,
            duration_minutes: activity.duration_minutes,
            active: activity.active,
            image_url: activity.image_url,
        }
    }
}

/// `/ActividadesRecreativas` endpoints.
pub struct Activities<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Activities<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self) -> Result<Vec<Activity>> {
        self.dispatcher.get_json(PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<Activity> {
        self.dispatcher.get_json(&format!("{PATH}/{id}")).await
    }

    pub async fn create(&self, command: &CreateActivity) -> Result<Activity> {
        self.dispatcher.post_json(PATH, command).await
    }

    pub async fn update(&self, command: &UpdateActivity) -> Result<()> {
        self.dispatcher.put(&format!("{PATH}/{}", command.id), command).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.dispatcher.delete(&format!("{PATH}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn activity_uses_resource_api_field_names() {
        let activity: Activity = serde_json::from_value(json!({
            "actividadId": 3,
            "hotelId": 1,
            "nombreActividad": "Kayak",
            "categoria": "Acuática",
            "ubicacion": "Playa",
            "horaApertura": "09:00:00",
            "horaCierre": "18:00:00",
            "capacidadMaxima": 12,
            "precioPorPersona": 25.5,
            "requiereReserva": true,
            "estaActiva": true
        }))
        .unwrap();

        assert_eq!(activity.name, "Kayak");
        assert_eq!(activity.duration_minutes, None);

        let update = serde_json::to_value(UpdateActivity::from(activity)).unwrap();
        assert_eq!(update["actividadId"], 3);
        assert!(update.get("imagenUrl").is_none());
    }
}
