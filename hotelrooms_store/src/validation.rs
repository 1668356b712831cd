use crate::api::{ClientDetails, ClientDetailsPatch, RoomDetails, RoomDetailsPatch};

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum RecordValidationError {
    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Max occupancy must be at least 1")]
    InvalidOccupancy,

    #[error("Nightly price must be a non-negative number")]
    InvalidPrice,

    #[error("Invalid email {0}")]
    InvalidEmail(String),

    #[error("Reservations can only be added through the reservations endpoint")]
    ReservationsNotAllowed,
}

/// Splits comma separated amenities typed by staff into trimmed items
pub fn parse_amenities(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn non_empty(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        Err(RecordValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

fn valid_occupancy(max_occupancy: u32) -> Result<(), RecordValidationError> {
    if max_occupancy < 1 {
        Err(RecordValidationError::InvalidOccupancy)
    } else {
        Ok(())
    }
}

fn valid_price(nightly_price: f64) -> Result<(), RecordValidationError> {
    if !nightly_price.is_finite() || nightly_price < 0.0 {
        Err(RecordValidationError::InvalidPrice)
    } else {
        Ok(())
    }
}

fn valid_email(email: &str) -> Result<(), RecordValidationError> {
    non_empty("email", email)?;
    if email.contains('@') {
        Ok(())
    } else {
        Err(RecordValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_room(details: &RoomDetails) -> Result<(), RecordValidationError> {
    non_empty("name", &details.name)?;
    non_empty("description", &details.description)?;
    valid_occupancy(details.max_occupancy)?;
    valid_price(details.nightly_price)?;
    if details.reservations.is_empty() {
        Ok(())
    } else {
        Err(RecordValidationError::ReservationsNotAllowed)
    }
}

pub fn validate_room_patch(patch: &RoomDetailsPatch) -> Result<(), RecordValidationError> {
    if let Some(name) = &patch.name {
        non_empty("name", name)?;
    }
    if let Some(description) = &patch.description {
        non_empty("description", description)?;
    }
    if let Some(max_occupancy) = patch.max_occupancy {
        valid_occupancy(max_occupancy)?;
    }
    if let Some(nightly_price) = patch.nightly_price {
        valid_price(nightly_price)?;
    }
    Ok(())
}

pub fn validate_client(details: &ClientDetails) -> Result<(), RecordValidationError> {
    non_empty("name", &details.name)?;
    non_empty("cpf", &details.cpf)?;
    valid_email(&details.email)
}

pub fn validate_client_patch(patch: &ClientDetailsPatch) -> Result<(), RecordValidationError> {
    if let Some(name) = &patch.name {
        non_empty("name", name)?;
    }
    if let Some(cpf) = &patch.cpf {
        non_empty("cpf", cpf)?;
    }
    if let Some(email) = &patch.email {
        valid_email(email)?;
    }
    Ok(())
}
