#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{Days, Local, NaiveTime};
use tempfile::TempDir;

use photoshoot_manager::config::DatabaseSettings;
use photoshoot_manager::{Database, Error, ErrorKind, Interaction, NewClient, Result, ShootDetails};

/// A database file living in its own temporary directory. Dropping the
/// fixture closes the connection and removes the directory.
pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let settings = DatabaseSettings {
            path: dir.path().join("photoshoots_test.sqlite"),
            connect_timeout: Duration::from_secs(5),
            query_timeout: Duration::from_secs(5),
        };
        let db = Database::open(&settings).expect("open test database");
        Self { db, _dir: dir }
    }
}

pub fn sample_client() -> NewClient {
    NewClient {
        first_name: "Ivan".to_string(),
        last_name: "Ivanov".to_string(),
        phone: "+7(900)000-00-00".to_string(),
        social_network_url: String::new(),
    }
}

pub fn sample_client_with(option: impl FnOnce(&mut NewClient)) -> NewClient {
    let mut client = sample_client();
    option(&mut client);
    client
}

pub fn sample_details() -> ShootDetails {
    ShootDetails {
        shoot_date: Local::now()
            .date_naive()
            .checked_add_days(Days::new(30))
            .expect("date in range"),
        start_time: NaiveTime::from_hms_opt(15, 0, 0).expect("valid time"),
        end_time: NaiveTime::from_hms_opt(16, 0, 0).expect("valid time"),
        price: 1000,
        location: "Pushkin blvd".to_string(),
        shoot_type: "love story".to_string(),
        notes: "take an umbrella".to_string(),
    }
}

pub fn sample_details_with(option: impl FnOnce(&mut ShootDetails)) -> ShootDetails {
    let mut details = sample_details();
    option(&mut details);
    details
}

/// Canned operator answers. Running out of answers behaves like a closed
/// terminal.
pub struct ScriptedIo {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedIo {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Interaction for ScriptedIo {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "input closed"))
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.notices.push(message.to_string());
        Ok(())
    }
}
