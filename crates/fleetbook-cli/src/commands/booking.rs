//! `fleetbook booking`: create, change and cancel bookings.
//!
//! Every write goes through the booking service, so the admission checks run
//! in the same order here as for any other caller.

use tracing::{info, instrument};

use fleetbook_adapters::Fleet;
use fleetbook_core::domain::{Booking, EntityKind};

use crate::{
    cli::{BookingCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    cmd: BookingCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let fleet = super::open_fleet(&global, &config)?;
    dispatch(cmd, &fleet, &global, &output)
}

pub(crate) fn dispatch(
    cmd: BookingCommands,
    fleet: &Fleet,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let bookings = &fleet.bookings;

    match cmd {
        BookingCommands::Create {
            customer,
            taxi,
            date,
        } => {
            let created = bookings.create(Booking::draft(customer, taxi, date))?;
            info!(id = ?created.id, "Booking admitted");
            output.success(&format!("Booking {} confirmed", describe(&created)))?;
            output.record(&created)?;
        }

        BookingCommands::List => {
            output.records(&bookings.find_all_ordered_by_date()?)?;
        }

        BookingCommands::Show { id } => {
            let booking = bookings
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Booking, id))?;
            output.record(&booking)?;
        }

        BookingCommands::Update {
            id,
            customer,
            taxi,
            date,
        } => {
            if customer.is_none() && taxi.is_none() && date.is_none() {
                return Err(CliError::InvalidInput {
                    message: "nothing to change; pass --customer, --taxi or --date".into(),
                });
            }
            let mut booking = bookings
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Booking, id))?;
            if customer.is_some() {
                booking.customer_id = customer;
            }
            if taxi.is_some() {
                booking.taxi_id = taxi;
            }
            if date.is_some() {
                booking.date = date;
            }

            let updated = bookings.update(id, booking)?;
            output.success(&format!("Booking {} updated", describe(&updated)))?;
            output.record(&updated)?;
        }

        BookingCommands::Delete { id, yes } => {
            let booking = bookings
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Booking, id))?;

            if !super::confirm(&format!("Cancel booking {}?", describe(&booking)), yes, global)? {
                return Err(CliError::Cancelled);
            }

            let removed = bookings.delete_record(booking)?;
            output.success(&format!("Booking {} cancelled", describe(&removed)))?;
            output.record(&removed)?;
        }

        BookingCommands::ByCustomer { customer } => {
            output.records(&bookings.find_by_customer(customer)?)?;
        }

        BookingCommands::ByTaxi { taxi } => {
            output.records(&bookings.find_by_taxi(taxi)?)?;
        }
    }

    Ok(())
}

fn describe(booking: &Booking) -> String {
    let id = booking
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "(new)".into());
    match (booking.taxi_id, booking.date) {
        (Some(taxi), Some(date)) => format!("{id} (taxi {taxi} on {date})"),
        _ => id,
    }
}
