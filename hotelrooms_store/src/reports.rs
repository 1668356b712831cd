use chrono::{Datelike, NaiveDate};

use crate::api::{Client, ClientsReport};

const LATEST_CLIENTS_SHOWN: usize = 5;

/// First `LATEST_CLIENTS_SHOWN` client names in alphabetical order
pub fn latest_clients(clients: &[Client]) -> Vec<String> {
    let mut names: Vec<String> = clients
        .iter()
        .map(|client| client.details.name.clone())
        .collect();
    names.sort();
    names.truncate(LATEST_CLIENTS_SHOWN);
    names
}

fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

fn registered_in(clients: &[Client], (year, month): (i32, u32)) -> usize {
    clients
        .iter()
        .filter_map(|client| client.details.registered_on)
        .filter(|date| date.year() == year && date.month() == month)
        .count()
}

/// Growth of registrations in the month of `today` relative to the month before, in percent,
/// rounded to two decimals. An empty previous month counts as 100% growth.
pub fn monthly_growth_percentage(clients: &[Client], today: NaiveDate) -> f64 {
    let current_count = registered_in(clients, (today.year(), today.month())) as f64;
    let last_count = registered_in(clients, previous_month(today)) as f64;

    if last_count == 0.0 {
        return 100.0;
    }
    let percentage = (current_count - last_count) / last_count * 100.0;
    (percentage * 100.0).round() / 100.0
}

pub fn clients_report(clients: &[Client], today: NaiveDate) -> ClientsReport {
    ClientsReport {
        latest_clients: latest_clients(clients),
        monthly_growth_percentage: monthly_growth_percentage(clients, today),
    }
}

#[cfg(test)]
mod reports_tests {
    use crate::api::ClientDetails;

    use super::*;

    fn client(name: &str, registered_on: Option<NaiveDate>) -> Client {
        Client {
            client_id: name.to_string(),
            details: ClientDetails {
                name: name.to_string(),
                cpf: "000".to_string(),
                email: "x@example.com".to_string(),
                registered_on,
            },
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn latest_clients_are_first_five_by_name() {
        let clients: Vec<Client> = ["Fabio", "Ana", "Eva", "Caio", "Bia", "Davi"]
            .into_iter()
            .map(|name| client(name, None))
            .collect();
        assert_eq!(
            latest_clients(&clients),
            vec!["Ana", "Bia", "Caio", "Davi", "Eva"]
        );
    }

    #[test]
    fn growth_without_previous_registrations_is_hundred() {
        let clients = vec![client("Ana", Some(date(2024, 5, 3)))];
        assert_eq!(monthly_growth_percentage(&clients, date(2024, 5, 20)), 100.0);
        assert_eq!(monthly_growth_percentage(&[], date(2024, 5, 20)), 100.0);
    }

    #[test]
    fn growth_is_relative_to_previous_month() {
        let clients = vec![
            client("A", Some(date(2024, 4, 1))),
            client("B", Some(date(2024, 4, 2))),
            client("C", Some(date(2024, 4, 30))),
            client("D", Some(date(2024, 5, 1))),
            client("E", None),
        ];
        // 1 now vs 3 before
        assert_eq!(monthly_growth_percentage(&clients, date(2024, 5, 10)), -66.67);
    }

    #[test]
    fn january_compares_with_previous_december() {
        let clients = vec![
            client("A", Some(date(2023, 12, 24))),
            client("B", Some(date(2024, 1, 2))),
            client("C", Some(date(2024, 1, 3))),
            // same month a year earlier does not count
            client("D", Some(date(2022, 12, 1))),
        ];
        assert_eq!(monthly_growth_percentage(&clients, date(2024, 1, 15)), 100.0);

        let report = clients_report(&clients, date(2024, 1, 15));
        assert_eq!(report.latest_clients.len(), 4);
    }
}
