use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use rand::prelude::SliceRandom;
use rand::{thread_rng, Rng};

use hotelrooms_reservations::api::{ProposalRequest, SearchRequest};
use hotelrooms_reservations::availability::{overlaps, DateRange};
use hotelrooms_reservations::client::{ConfirmOutcome, HotelRoomsReservationsClient};
use hotelrooms_store::api::{ClientDetails, RoomDetails, RoomId};
use hotelrooms_store::client::HotelRoomsStoreClient;

#[tokio::test]
async fn generate_rooms_clients_and_stays() {
    const NO_OF_ROOMS_TO_GENERATE: usize = 20;
    const NO_OF_CLIENTS_TO_GENERATE: usize = 30;
    const NO_OF_STAYS: usize = 200;

    let mut rng = thread_rng();
    let store_client =
        HotelRoomsStoreClient::new("http://127.0.0.1:8001").expect("Failed to create client");
    let reservations_client = HotelRoomsReservationsClient::new("http://127.0.0.1:8002")
        .expect("Failed to create reservations client");

    let mut room_ids = vec![];
    for room in generate_rooms(&mut rng, NO_OF_ROOMS_TO_GENERATE) {
        let room_id = store_client.add_room(room).await.expect("Failed to add room");
        println!("Added room {}", room_id);
        room_ids.push(room_id);
    }

    let mut client_ids = vec![];
    for client in generate_clients(&mut rng, NO_OF_CLIENTS_TO_GENERATE) {
        let client_id = store_client
            .add_client(client)
            .await
            .expect("Failed to add client");
        println!("Added client {}", client_id);
        client_ids.push(client_id);
    }

    let mut booked: HashMap<RoomId, Vec<DateRange>> = HashMap::default();

    for _ in 0..NO_OF_STAYS {
        let client_id = client_ids.choose(&mut rng).unwrap().clone();
        let check_in = days_from_today(rng.gen_range(1..365));
        let check_out = check_in
            .checked_add_days(Days::new(rng.gen_range(1..10)))
            .unwrap();

        let free_rooms = reservations_client
            .search(&SearchRequest {
                start: Some(check_in),
                end: Some(check_out),
                client_id: Some(client_id.clone()),
            })
            .await
            .expect("Failed to search");
        let Some(room) = free_rooms
            .iter()
            .filter(|room| room_ids.contains(&room.room_id))
            .collect::<Vec<_>>()
            .choose(&mut rng)
            .cloned()
        else {
            println!("No room free from {} to {}", check_in, check_out);
            continue;
        };

        let proposal = reservations_client
            .propose(&ProposalRequest {
                room_id: room.room_id.clone(),
                check_in,
                check_out,
                client_id: client_id.clone(),
            })
            .await
            .expect("Failed to propose");

        match reservations_client
            .confirm(&proposal)
            .await
            .expect("Failed to confirm")
        {
            ConfirmOutcome::Confirmed(reservation) => {
                let stay = DateRange::from(&reservation);
                let stays = booked.entry(room.room_id.clone()).or_default();
                assert!(
                    !stays.iter().any(|existing| overlaps(*existing, stay)),
                    "Search offered an occupied room"
                );
                stays.push(stay);
                println!(
                    "Reserved room {} for client {} {}",
                    room.room_id,
                    client_id,
                    reservation.display_period()
                );
            }
            ConfirmOutcome::Conflict(message) => println!("Conflict {}", message),
        }
    }
}

fn days_from_today(days: u64) -> NaiveDate {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .unwrap()
}

fn generate_rooms(rng: &mut impl Rng, no_of_rooms: usize) -> Vec<RoomDetails> {
    (0..no_of_rooms)
        .map(|no| {
            let no_of_amenities = rng.gen_range(0..AMENITIES.len());
            RoomDetails {
                name: format!("{} {}", ROOM_KINDS.choose(rng).unwrap(), 100 + no),
                description: "Generated room".to_string(),
                max_occupancy: rng.gen_range(1..5),
                nightly_price: rng.gen_range(80..600) as f64,
                availability: true,
                amenities: AMENITIES
                    .choose_multiple(rng, no_of_amenities)
                    .map(|amenity| amenity.to_string())
                    .collect(),
                image_url: "".to_string(),
                reservations: vec![],
            }
        })
        .collect()
}

fn generate_clients(rng: &mut impl Rng, no_of_clients: usize) -> Vec<ClientDetails> {
    (0..no_of_clients)
        .map(|no| {
            let first = FIRST_NAMES.choose(rng).unwrap();
            let last = LAST_NAMES.choose(rng).unwrap();
            ClientDetails {
                name: format!("{} {}", first, last),
                cpf: format!("{:011}", rng.gen_range(0..99_999_999_999u64)),
                email: format!(
                    "{}.{}.{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    no
                ),
                registered_on: None,
            }
        })
        .collect()
}

const ROOM_KINDS: [&str; 5] = ["Standard", "Superior", "Deluxe", "Junior Suite", "Suite"];

const AMENITIES: [&str; 6] = ["wifi", "minibar", "balcony", "bathtub", "safe", "air conditioning"];

const FIRST_NAMES: [&str; 16] = [
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Fabio", "Gabriela", "Heitor", "Isabel", "Joao",
    "Larissa", "Mateus", "Natalia", "Otavio", "Paula", "Rafael",
];

const LAST_NAMES: [&str; 12] = [
    "Silva", "Santos", "Oliveira", "Souza", "Lima", "Pereira", "Costa", "Rodrigues", "Almeida",
    "Nascimento", "Ferreira", "Carvalho",
];
