//! `fleetbook taxi`: register and look up taxis.

use tracing::instrument;

use fleetbook_adapters::Fleet;
use fleetbook_core::domain::{EntityKind, Taxi};

use crate::{
    cli::{GlobalArgs, TaxiCommands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    cmd: TaxiCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let fleet = super::open_fleet(&global, &config)?;
    dispatch(cmd, &fleet, &global, &output)
}

pub(crate) fn dispatch(
    cmd: TaxiCommands,
    fleet: &Fleet,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let taxis = &fleet.taxis;

    match cmd {
        TaxiCommands::Add { seats, reg } => {
            let created = taxis.create(Taxi::new(seats, reg))?;
            output.success(&format!("Taxi {} registered", describe(&created)))?;
            output.record(&created)?;
        }

        TaxiCommands::List => {
            output.records(&taxis.find_all_ordered_by_reg()?)?;
        }

        TaxiCommands::Show { id } => {
            let taxi = taxis
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Taxi, id))?;
            output.record(&taxi)?;
        }

        TaxiCommands::Update { id, seats, reg } => {
            if seats.is_none() && reg.is_none() {
                return Err(CliError::InvalidInput {
                    message: "nothing to change; pass --seats or --reg".into(),
                });
            }
            let mut taxi = taxis
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Taxi, id))?;
            if let Some(seats) = seats {
                taxi.seats = seats;
            }
            if let Some(reg) = reg {
                taxi.reg = reg;
            }

            let updated = taxis.update(id, taxi)?;
            output.success(&format!("Taxi {} updated", describe(&updated)))?;
            output.record(&updated)?;
        }

        TaxiCommands::Delete { id, yes } => {
            let taxi = taxis
                .find_by_id(id)?
                .ok_or_else(|| CliError::not_found(EntityKind::Taxi, id))?;

            let booked = fleet.bookings.find_by_taxi(id)?.len();
            if booked > 0 {
                output.warning(&format!(
                    "{booked} booking(s) still refer to taxi {}; they are kept",
                    describe(&taxi)
                ))?;
            }

            if !super::confirm(&format!("Delete taxi {}?", describe(&taxi)), yes, global)? {
                return Err(CliError::Cancelled);
            }

            let removed = taxis.delete(id)?;
            output.success(&format!("Taxi {} deleted", describe(&removed)))?;
            output.record(&removed)?;
        }

        TaxiCommands::FindReg { reg } => {
            let found: Vec<Taxi> = taxis.find_by_reg(&reg)?.into_iter().collect();
            output.records(&found)?;
        }
    }

    Ok(())
}

fn describe(taxi: &Taxi) -> String {
    match taxi.id {
        Some(id) => format!("#{id} ({})", taxi.reg),
        None => taxi.reg.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetbook_core::domain::TaxiId;

    fn quiet() -> (GlobalArgs, OutputManager) {
        let args = GlobalArgs {
            quiet: true,
            ..GlobalArgs::plain()
        };
        let output = OutputManager::new(&args, &AppConfig::default());
        (args, output)
    }

    #[test]
    fn add_then_delete() {
        let fleet = Fleet::in_memory();
        let (global, output) = quiet();

        dispatch(
            TaxiCommands::Add {
                seats: 4,
                reg: "AB12CDE".into(),
            },
            &fleet,
            &global,
            &output,
        )
        .unwrap();
        dispatch(
            TaxiCommands::Delete {
                id: TaxiId::new(1),
                yes: true,
            },
            &fleet,
            &global,
            &output,
        )
        .unwrap();

        assert!(fleet.taxis.find_by_id(TaxiId::new(1)).unwrap().is_none());
    }

    #[test]
    fn update_overlays_seats_only() {
        let fleet = Fleet::in_memory();
        let (global, output) = quiet();
        fleet.taxis.create(Taxi::new(4, "AB12CDE")).unwrap();

        dispatch(
            TaxiCommands::Update {
                id: TaxiId::new(1),
                seats: Some(6),
                reg: None,
            },
            &fleet,
            &global,
            &output,
        )
        .unwrap();

        let taxi = fleet.taxis.find_by_id(TaxiId::new(1)).unwrap().unwrap();
        assert_eq!((taxi.seats, taxi.reg.as_str()), (6, "AB12CDE"));
    }

    #[test]
    fn too_few_seats_is_a_user_error() {
        let fleet = Fleet::in_memory();
        let (global, output) = quiet();
        let err = dispatch(
            TaxiCommands::Add {
                seats: 1,
                reg: "AB12CDE".into(),
            },
            &fleet,
            &global,
            &output,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn deleting_unknown_taxi_is_not_found() {
        let fleet = Fleet::in_memory();
        let (global, output) = quiet();
        let err = dispatch(
            TaxiCommands::Delete {
                id: TaxiId::new(3),
                yes: true,
            },
            &fleet,
            &global,
            &output,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn update_without_fields_is_rejected_before_lookup() {
        let fleet = Fleet::in_memory();
        let (global, output) = quiet();
        let err = dispatch(
            TaxiCommands::Update {
                id: TaxiId::new(3),
                seats: None,
                reg: None,
            },
            &fleet,
            &global,
            &output,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
