use hotelrooms_store::api::Client;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercased name without accents, so "Álvaro" sorts next to "alvaro"
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Alphabetical order ignoring case and accents, ties keep the exact spelling order
pub fn sort_clients_by_name(mut clients: Vec<Client>) -> Vec<Client> {
    clients.sort_by_cached_key(|client| {
        (
            collation_key(&client.details.name),
            client.details.name.clone(),
        )
    });
    clients
}

/// Substring match on the client name ignoring case and accents, empty filter keeps everything
pub fn filter_clients_by_name(clients: Vec<Client>, filter: &str) -> Vec<Client> {
    let filter = collation_key(filter.trim());
    if filter.is_empty() {
        return clients;
    }
    clients
        .into_iter()
        .filter(|client| collation_key(&client.details.name).contains(&filter))
        .collect()
}
