// Parking Facility Simulator - Main Entry Point
//
// Runs a deterministic demo scenario against an in-memory facility and
// prints the operational reports:
//
// ```console
// $ cargo build --release
// $ ./target/release/parklot --seed 42
// ```

use anyhow::Context;
use clap::Parser;
use parklot::facility::{reporting, Clock, ParkingFacility};
use parklot::notifications::SimulatedGateway;
use parklot::payments::PaymentMethod;
use parklot::types::config::CliArgs;
use parklot::types::{
    ChargerType, FacilityConfig, IncidentKind, TicketKind, VehicleCategory, WashPackageKind,
};
use parklot::vehicle::Vehicle;
use parklot::LoggingConfig;
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Special flags that skip full initialization
    if args.print_config {
        match FacilityConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };
    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting parking facility simulator");

    let config = match FacilityConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - the demo scenario will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_demo(config) {
        error!("Demo scenario failed: {:#}", e);
        process::exit(1);
    }

    info!("Parking facility simulator completed successfully");
}

/// Drive one deterministic demo scenario across every workflow
fn run_demo(config: FacilityConfig) -> anyhow::Result<()> {
    let gateway = Box::new(SimulatedGateway::new(config.seed));
    let start = "2026-03-01T08:00:00Z".parse().expect("valid timestamp literal");
    let mut facility =
        ParkingFacility::new(config, gateway)?.with_clock(Clock::fixed(start));

    // A morning's worth of admissions across every category
    eprintln!("Admitting vehicles...");
    let car = Vehicle::new("34ABC123", VehicleCategory::Car, "Toyota", "Corolla", "Blue")?;
    let car_ticket = facility.admit(car, TicketKind::Hourly)?;

    let motorcycle =
        Vehicle::new("34MOT077", VehicleCategory::Motorcycle, "Honda", "CB500", "Black")?;
    let motorcycle_ticket = facility.admit(motorcycle, TicketKind::Hourly)?;

    let van = Vehicle::new("34VAN500", VehicleCategory::Van, "Ford", "Transit", "White")?;
    let van_ticket = facility.admit(van, TicketKind::Daily)?;

    let truck = Vehicle::new("06TRK900", VehicleCategory::Truck, "Volvo", "FH16", "Gray")?;
    facility.admit(truck, TicketKind::Hourly)?;

    let ev = Vehicle::electric("34EV0042", "Tesla", "Model 3", "Red", 75)?.with_needs_charging();
    let ev_ticket = facility.admit(ev, TicketKind::Monthly)?;

    eprintln!("{} vehicles parked.", facility.active_ticket_count());

    // Wash queue: three orders, served strictly in arrival order
    eprintln!("Queueing wash orders...");
    facility.order_wash(car_ticket, WashPackageKind::Basic)?;
    facility.order_wash(van_ticket, WashPackageKind::Full)?;
    facility.order_wash(motorcycle_ticket, WashPackageKind::Interior)?;
    let washed = facility.process_all_washes();
    eprintln!("{} wash orders completed.", washed);

    // Charging: the subscription EV tops up explicitly
    eprintln!("Charging the electric vehicle...");
    facility
        .start_charging(ev_ticket, None)
        .context("charging session for the demo EV")?;

    // A reservation for the evening and one incident report
    let evening = start + chrono::Duration::hours(10);
    facility.reserve_charging("34EV0042", evening, 45, Some(ChargerType::Ccs))?;
    facility.report_incident(
        IncidentKind::Suspicious,
        "Person loitering near the elevator",
        "Center Area",
        1,
        "Guard on duty",
    );

    // The afternoon passes; hourly and daily fees now have real durations
    facility.clock_mut().advance_by(chrono::Duration::hours(2) + chrono::Duration::minutes(30));

    eprintln!("Releasing vehicles...");
    let fee = facility.release(car_ticket, Some(PaymentMethod::Cash { received: 1000.0 }))?;
    eprintln!("Car released, fee {:.2}", fee);

    let fee = release_with_retry(
        &mut facility,
        motorcycle_ticket,
        PaymentMethod::CreditCard { last4: "4242".to_string() },
    )?;
    eprintln!("Motorcycle released, fee {:.2}", fee);

    let fee = release_with_retry(
        &mut facility,
        van_ticket,
        PaymentMethod::Mobile { provider: "ApplePay".to_string() },
    )?;
    eprintln!("Van released, fee {:.2}", fee);

    eprintln!();
    eprintln!("{}", reporting::comprehensive_report(&facility));
    Ok(())
}

/// Release with the given method, falling back to cash at the gate when the
/// simulated card or wallet transaction is declined
fn release_with_retry(
    facility: &mut ParkingFacility,
    ticket_id: parklot::TicketId,
    method: PaymentMethod,
) -> anyhow::Result<f64> {
    match facility.release(ticket_id, Some(method)) {
        Ok(fee) => Ok(fee),
        Err(parklot::FacilityError::PaymentFailed { amount, method }) => {
            eprintln!("{} payment of {:.2} declined, paying cash instead", method, amount);
            Ok(facility.release(ticket_id, Some(PaymentMethod::Cash { received: 100_000.0 }))?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &FacilityConfig) {
    eprintln!("Parking Facility Simulator");
    eprintln!("==========================");
    eprintln!();
    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &FacilityConfig) {
    eprintln!("Configuration:");
    eprintln!("  Facility: {}", config.name);
    eprintln!("  Floors: {}", config.floors);
    eprintln!("  Spots per Floor: {}", config.spots_per_floor);
    eprintln!("  Total Capacity: {}", config.total_capacity());
    eprintln!("  Wash Workers: {}", config.wash_workers);
    eprintln!("  Default Charge Target: {}%", config.default_charge_target);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
