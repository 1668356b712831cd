use chrono::NaiveDate;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::parse_amenities;

pub type RoomId = String;
pub type ClientId = String;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Booking of a room for one client, embedded in the room record
pub struct Reservation {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub client_id: ClientId,
}

impl Reservation {
    /// Formats stay as `dd/mm/yyyy - dd/mm/yyyy` for display
    pub fn display_period(&self) -> String {
        format!(
            "{} - {}",
            self.check_in.format("%d/%m/%Y"),
            self.check_out.format("%d/%m/%Y")
        )
    }
}

/// Amenities arrive either as a list or as the comma separated text typed into the room form
#[derive(Deserialize)]
#[serde(untagged)]
enum AmenitiesInput {
    List(Vec<String>),
    Text(String),
}

impl From<AmenitiesInput> for Vec<String> {
    fn from(input: AmenitiesInput) -> Self {
        match input {
            AmenitiesInput::List(items) => items,
            AmenitiesInput::Text(text) => parse_amenities(&text),
        }
    }
}

fn amenities_from_input<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(AmenitiesInput::deserialize(deserializer)?.into())
}

fn optional_amenities_from_input<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<AmenitiesInput>::deserialize(deserializer)?.map(Vec::from))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
/// Struct representing details of the room as stored in `rooms` collection
pub struct RoomDetails {
    pub name: String,
    pub description: String,
    pub max_occupancy: u32,
    pub nightly_price: f64,
    /// Advisory only, set to false by every reservation, editable by staff
    pub availability: bool,
    #[serde(deserialize_with = "amenities_from_input")]
    pub amenities: Vec<String>,
    pub image_url: String,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
/// Room details together with the identifier assigned by the store
pub struct Room {
    pub room_id: RoomId,
    pub details: RoomDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Apiv2Schema)]
/// Patch to room details. Reservations are only changed through [`AppendReservation`]
pub struct RoomDetailsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nightly_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_amenities_from_input"
    )]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Appends a reservation to the room and marks it unavailable in a single update.
/// When `expected_reservations` is set the update is applied only if the room
/// still holds exactly that many reservations.
pub struct AppendReservation {
    pub reservation: Reservation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_reservations: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ClientDetails {
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct Client {
    pub client_id: ClientId,
    pub details: ClientDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ClientDetailsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct GetAllRoomsResponse {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GetAllClientsResponse {
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ClientsReport {
    /// Up to five client names in alphabetical order
    pub latest_clients: Vec<String>,
    /// Registrations growth of the current month compared to the previous one, in percent
    pub monthly_growth_percentage: f64,
}
