//! Fixed-width text rendering for record listings and deletion summaries.
//! Everything here is a pure function of its input; the shell decides where
//! the text goes. Records are rendered in the order received.

use std::fmt::Write as _;

use crate::models::{Client, Shoot};

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M";

pub const NO_CLIENTS: &str = "No clients found";
pub const NO_SHOOTS: &str = "No shoots found";

/// Render clients as a table, or the "no records" notice for an empty slice.
pub fn clients_table(clients: &[Client]) -> String {
    if clients.is_empty() {
        return format!("{NO_CLIENTS}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<15} {:<15} {:<20} {:<25} {:<12}",
        "ID", "First Name", "Last Name", "Phone", "Social Network", "Created"
    );
    let _ = writeln!(out, "{}", "-".repeat(95));

    for client in clients {
        let _ = writeln!(
            out,
            "{:<4} {:<15} {:<15} {:<20} {:<25} {:<12}",
            client.id,
            client.first_name,
            client.last_name,
            client.phone,
            client.social_network_url,
            client.created_at.format(DATE_FORMAT).to_string(),
        );
    }
    out
}

/// Render shoots as a table, or the "no records" notice for an empty slice.
pub fn shoots_table(shoots: &[Shoot]) -> String {
    if shoots.is_empty() {
        return format!("{NO_SHOOTS}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<3} {:<9} {:<10} {:<8} {:<8} {:<6} {:<25} {:<12} {:<12} {:<10} {:<25} {:<10}",
        "ID",
        "Client ID",
        "Date",
        "Start",
        "End",
        "Price",
        "Location",
        "First name",
        "Last name",
        "Type",
        "Notes",
        "Created"
    );
    let _ = writeln!(out, "{}", "-".repeat(148));

    for shoot in shoots {
        let _ = writeln!(
            out,
            "{:<3} {:<9} {:<10} {:<8} {:<8} {:<6} {:<25} {:<12} {:<12} {:<10} {:<25} {:<10}",
            shoot.id,
            shoot.client_id,
            shoot.shoot_date.format(DATE_FORMAT).to_string(),
            shoot.start_time.format(TIME_FORMAT).to_string(),
            shoot.end_time.format(TIME_FORMAT).to_string(),
            shoot.price,
            shoot.location,
            shoot.client_first_name,
            shoot.client_last_name,
            shoot.shoot_type,
            shoot.notes,
            shoot.created_at.format(DATE_FORMAT).to_string(),
        );
    }
    out
}

/// Details shown before the operator confirms deleting a client.
pub fn client_summary(client: &Client) -> String {
    let mut out = format!("Deleting client: {client}\nPhone number: {}\n", client.phone);
    if !client.social_network_url.is_empty() {
        let _ = writeln!(out, "Social network url: {}", client.social_network_url);
    }
    out
}

/// Confirmation line printed once a shoot is gone.
pub fn shoot_deleted(shoot: &Shoot) -> String {
    format!(
        "Shoot {} {} with {} deleted",
        shoot.shoot_date.format(DATE_FORMAT),
        shoot.start_time.format(TIME_FORMAT),
        shoot.client_name()
    )
}

/// Details shown before the operator confirms deleting a shoot.
pub fn shoot_summary(shoot: &Shoot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Deleting shoot: {} start: {} end: {}",
        shoot.shoot_date.format(DATE_FORMAT),
        shoot.start_time.format(TIME_FORMAT),
        shoot.end_time.format(TIME_FORMAT)
    );
    let _ = writeln!(
        out,
        "Location: {}. ShootType: {}. Price: {}",
        shoot.location, shoot.shoot_type, shoot.price
    );
    let _ = writeln!(
        out,
        "Client id: {} name: {}",
        shoot.client_id,
        shoot.client_name()
    );
    if !shoot.notes.is_empty() {
        let _ = writeln!(out, "Notes: {}", shoot.notes);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn client(id: i64, first: &str, url: &str) -> Client {
        Client {
            id,
            first_name: first.to_string(),
            last_name: "Ivanov".to_string(),
            phone: "+7(900)000-00-00".to_string(),
            social_network_url: url.to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 20)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    fn shoot(id: i64, notes: &str) -> Shoot {
        Shoot {
            id,
            client_id: 7,
            shoot_date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            price: 1000,
            location: "Pushkin blvd".to_string(),
            client_first_name: "Ivan".to_string(),
            client_last_name: "Ivanov".to_string(),
            shoot_type: "love story".to_string(),
            notes: notes.to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 21)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn empty_inputs_render_a_notice_instead_of_a_table() {
        assert_eq!(clients_table(&[]), "No clients found\n");
        assert_eq!(shoots_table(&[]), "No shoots found\n");
    }

    #[test]
    fn client_table_has_header_rule_and_fixed_columns() {
        let rendered = clients_table(&[client(1, "Ivan", "@ivan"), client(22, "Anna", "")]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID   First Name      Last Name       Phone"));
        assert_eq!(lines[1], "-".repeat(95));
        assert!(lines[2].starts_with("1    Ivan            Ivanov          +7(900)000-00-00     @ivan"));
        assert!(lines[2].contains("20.01.2025"));
        assert!(lines[3].starts_with("22   Anna"));
    }

    #[test]
    fn client_rows_keep_input_order() {
        let rendered = clients_table(&[client(9, "Zoya", ""), client(2, "Anna", "")]);
        let zoya = rendered.find("Zoya").unwrap();
        let anna = rendered.find("Anna").unwrap();
        assert!(zoya < anna);
    }

    #[test]
    fn shoot_table_formats_dates_and_times() {
        let rendered = shoots_table(&[shoot(3, "umbrella")]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Client ID Date       Start    End      Price"));
        assert_eq!(lines[1], "-".repeat(148));
        assert!(lines[2].starts_with("3   7         14.02.2025 15:00    16:30    1000   Pushkin blvd"));
        assert!(lines[2].contains("love story"));
        assert!(lines[2].contains("21.01.2025"));
    }

    #[test]
    fn summaries_skip_empty_optional_fields() {
        let with_url = client_summary(&client(1, "Ivan", "@ivan"));
        assert!(with_url.contains("Deleting client: Ivan Ivanov"));
        assert!(with_url.contains("Social network url: @ivan"));
        assert!(!client_summary(&client(1, "Ivan", "")).contains("Social network"));

        let with_notes = shoot_summary(&shoot(1, "take an umbrella"));
        assert!(with_notes.contains("Deleting shoot: 14.02.2025 start: 15:00 end: 16:30"));
        assert!(with_notes.contains("Client id: 7 name: Ivan Ivanov"));
        assert!(with_notes.contains("Notes: take an umbrella"));
        assert!(!shoot_summary(&shoot(1, "")).contains("Notes:"));
    }

    #[test]
    fn deleted_shoot_line_uses_operator_formats() {
        assert_eq!(
            shoot_deleted(&shoot(4, "")),
            "Shoot 14.02.2025 15:00 with Ivan Ivanov deleted"
        );
    }
}
