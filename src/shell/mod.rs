//! Menu-driven terminal front end. One command runs to completion before the
//! next menu is shown, and a failing command never ends the loop.

mod input;

pub use input::Prompter;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use tracing::{info, warn};

use crate::db::{ClientStore, ShootStore};
use crate::error;
use crate::format;
use crate::models::{NewClient, ShootDetails};
use crate::service::{ClientService, Interaction, ShootService};

const MENU: [&str; 7] = [
    "1. Add client",
    "2. Delete client",
    "3. Add shoot",
    "4. Delete shoot",
    "5. Show list of clients",
    "6. Show list of shoots",
    "7. Exit",
];

/// Interactive loop wired to the client and shoot services.
pub struct Shell<R, W, C, S> {
    prompter: Prompter<R, W>,
    clients: ClientService<C>,
    shoots: ShootService<S, C>,
}

impl<R, W, C, S> Shell<R, W, C, S>
where
    R: BufRead,
    W: Write,
    C: ClientStore,
    S: ShootStore,
{
    pub fn new(prompter: Prompter<R, W>, clients: ClientService<C>, shoots: ShootService<S, C>) -> Self {
        Self {
            prompter,
            clients,
            shoots,
        }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run until the operator picks Exit or the input closes. Only terminal
    /// write failures escape as errors.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let choice = match self.prompter.ask("Select a menu item") {
                Ok(choice) => choice,
                Err(_) if self.prompter.is_closed() => break,
                Err(err) if input::is_unreadable_line(&err) => {
                    warn!(error = %err.report(), "unreadable menu choice");
                    self.prompter
                        .error(format_args!("Invalid choice: {}", err.report()))
                        .context("failed to report unreadable input")?;
                    self.prompter.println("")?;
                    continue;
                }
                Err(err) => return Err(err).context("failed to read menu choice"),
            };

            let (label, outcome) = match choice.as_str() {
                "1" => ("Error creating client", self.add_client()),
                "2" => ("Error deleting client", self.delete_client()),
                "3" => ("Error creating shoot", self.add_shoot()),
                "4" => ("Error deleting shoot", self.delete_shoot()),
                "5" => ("Error getting clients", self.list_clients()),
                "6" => ("Error getting shoots", self.list_shoots()),
                "7" => {
                    self.prompter.println("Goodbye!")?;
                    return Ok(());
                }
                _ => ("", self.prompter.notify("Invalid choice")),
            };

            if let Err(err) = outcome {
                if self.prompter.is_closed() {
                    break;
                }
                warn!(kind = %err.kind(), error = %err.report(), "command failed");
                self.prompter
                    .error(format_args!("{label}: {}", err.report()))
                    .context("failed to report command error")?;
            }
            self.prompter.println("")?;
        }

        info!("input closed, leaving menu");
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        for item in MENU {
            self.prompter.println(item.bold())?;
        }
        Ok(())
    }

    fn add_client(&mut self) -> error::Result<()> {
        let client = NewClient {
            first_name: self.prompter.required("First name")?,
            last_name: self.prompter.required("Last name")?,
            phone: self.prompter.required("Phone number")?,
            social_network_url: self.prompter.optional("Social network url")?,
        };
        let created = self.clients.create(&client)?;
        self.prompter.println(format_args!(
            "Client added with ID: {}",
            created.id.to_string().green()
        ))
    }

    fn delete_client(&mut self) -> error::Result<()> {
        let client = self.clients.resolve(&mut self.prompter, "ID of the client")?;
        self.prompter.print(format::client_summary(&client))?;
        self.clients.delete(client.id, &mut self.prompter)?;
        self.prompter
            .println(format_args!("Client {client} with ID: {} deleted", client.id))
    }

    fn add_shoot(&mut self) -> error::Result<()> {
        let client = self.shoots.resolve_client(&mut self.prompter, "Client ID")?;
        self.prompter.println(format_args!("Booking for {client}"))?;

        let details = ShootDetails {
            shoot_date: self.prompter.date("Shoot date")?,
            start_time: self.prompter.time("Start time")?,
            end_time: self.prompter.time("End time")?,
            price: self.prompter.price("Shoot price")?,
            location: self.prompter.required("Location")?,
            shoot_type: self.prompter.required("Shoot type")?,
            notes: self.prompter.optional("Notes")?,
        };
        let shoot = self.shoots.create(client.id, details)?;
        self.prompter.println(format_args!(
            "Shoot added with ID: {}",
            shoot.id.to_string().green()
        ))
    }

    fn delete_shoot(&mut self) -> error::Result<()> {
        let shoot = self.shoots.resolve(&mut self.prompter, "ID of the shoot")?;
        self.prompter.print(format::shoot_summary(&shoot))?;
        self.shoots.delete(shoot.id, &mut self.prompter)?;
        self.prompter.println(format::shoot_deleted(&shoot))
    }

    fn list_clients(&mut self) -> error::Result<()> {
        let table = self.clients.list()?;
        self.prompter.print(table)
    }

    fn list_shoots(&mut self) -> error::Result<()> {
        let table = self.shoots.list()?;
        self.prompter.print(table)
    }
}
