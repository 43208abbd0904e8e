//! `fleetbook customer`: register and look up customers.

use tracing::instrument;

use fleetbook_adapters::Fleet;
use fleetbook_core::domain::{Customer, EntityKind};

use crate::{
    cli::{CustomerCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    cmd: CustomerCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let fleet = super::open_fleet(&global, &config)?;
    dispatch(cmd, &fleet, &output)
}

pub(crate) fn dispatch(cmd: CustomerCommands, fleet: &Fleet, output: &OutputManager) -> CliResult<()> {
    let customers = &fleet.customers;

    match cmd {
        CustomerCommands::Add { name, email, phone } => {
            let created = customers.create(Customer::new(name, email, phone))?;
            output.success(&format!("Customer {} registered", describe(&created)))?;
            output.record(&created)?;
        }

        CustomerCommands::List => {
            output.records(&customers.find_all_ordered_by_name()?)?;
        }

        CustomerCommands::Show { id } => {
            let customer = customers
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Customer, id))?;
            output.record(&customer)?;
        }

        CustomerCommands::Update {
            id,
            name,
            email,
            phone,
        } => {
            if name.is_none() && email.is_none() && phone.is_none() {
                return Err(CliError::InvalidInput {
                    message: "nothing to change; pass --name, --email or --phone".into(),
                });
            }
            let mut customer = customers
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Customer, id))?;
            if let Some(name) = name {
                customer.name = name;
            }
            if let Some(email) = email {
                customer.email = email;
            }
            if let Some(phone) = phone {
                customer.phone = phone;
            }

            let updated = customers.update(id, customer)?;
            output.success(&format!("Customer {} updated", describe(&updated)))?;
            output.record(&updated)?;
        }

        CustomerCommands::Delete { id } => {
            let kept = customers.delete(id)?;
            output.warning(&format!(
                "Customers are kept for their booking history; {} was not removed",
                describe(&kept)
            ))?;
            output.record(&kept)?;
        }

        CustomerCommands::FindEmail { email } => {
            let found: Vec<Customer> = customers.find_by_email(&email)?.into_iter().collect();
            output.records(&found)?;
        }
    }

    Ok(())
}

fn describe(customer: &Customer) -> String {
    match customer.id {
        Some(id) => format!("#{id} ({})", customer.name),
        None => customer.name.clone(),
    }
}
