mod args;
mod config;
mod dirs;

use std::process::ExitCode;

use chrono::Utc;

use args::Command;
use billing_app::{AppPaths, AppState, ensure_app_data_dir, load_seed_defaults};
use billing_core::{BillResult, Contract, MeterReading};

fn main() -> ExitCode {
    let cli = match args::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            args::print_help();
            return ExitCode::FAILURE;
        }
    };

    let data_dir = match cli.data_dir.map(Ok).unwrap_or_else(dirs::resolve_data_dir) {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match config::load_or_create(&data_dir) {
        Ok(load) => {
            if load.created {
                println!("Created config at {}.", load.file.display());
            }
            load.config
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let paths = AppPaths::new(data_dir);
    if let Err(err) = ensure_app_data_dir(&paths) {
        eprintln!("failed to create data dir: {err}");
        return ExitCode::FAILURE;
    }
    let app = AppState::new(paths.db_path, paths.seed_defaults_path, config.tax_rate);
    if let Err(err) = app.initialize() {
        eprintln!("failed to initialize database: {err}");
        return ExitCode::FAILURE;
    }

    match run(&app, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(app: &AppState, command: Command) -> billing_app::Result<()> {
    match command {
        Command::Record {
            device_id,
            color_count,
            bw_count,
        } => {
            let bill =
                app.services
                    .billing
                    .record_and_bill(&device_id, color_count, bw_count, Utc::now())?;
            print_bill(&device_id, &bill);
        }
        Command::Preview {
            device_id,
            color_count,
            bw_count,
        } => {
            let bill = app
                .services
                .billing
                .preview(&device_id, color_count, bw_count)?;
            println!("(preview only, reading not saved)");
            print_bill(&device_id, &bill);
        }
        Command::Show { device_id } => {
            let contract = app.services.contracts.get(&device_id)?;
            print_contract(&contract);
            if let Some(customer) = app.services.customers.find(&device_id)? {
                println!(
                    "Customer:     {} ({}, {})",
                    customer.customer_name, customer.machine_model, customer.install_address
                );
                println!(
                    "Contract no.: {} ({} - {})",
                    customer.contract_number, customer.contract_start, customer.contract_end
                );
            }
            match app.services.billing.latest_reading(&device_id)? {
                Some(reading) => print_reading(&reading),
                None => println!("No meter readings recorded yet."),
            }
        }
        Command::History { device_id } => {
            let readings = app.services.billing.history(&device_id)?;
            if readings.is_empty() {
                println!("No meter readings recorded for {device_id}.");
            }
            for reading in readings {
                print_reading(&reading);
            }
        }
        Command::Search { keyword } => {
            let matches = app.services.customers.search(&keyword)?;
            if matches.is_empty() {
                println!("No customers matching {keyword:?}.");
            }
            for customer in matches {
                println!("{}  {}", customer.device_id, customer.customer_name);
            }
        }
        Command::Contracts => {
            for contract in app.services.contracts.list()? {
                print_contract(&contract);
                println!();
            }
        }
        Command::Import { path } => {
            let seed = load_seed_defaults(&path)?;
            let mut contracts = 0usize;
            let mut customers = 0usize;
            for contract in &seed.contracts {
                app.services.contracts.upsert(contract)?;
                contracts += 1;
            }
            for customer in &seed.customers {
                app.services.customers.upsert(customer)?;
                customers += 1;
            }
            println!("Imported {contracts} contracts and {customers} customers.");
        }
    }
    Ok(())
}

fn print_bill(device_id: &str, bill: &BillResult) {
    println!("Bill for {device_id}");
    if bill.counter_regressed {
        println!("WARNING: meter counter went backwards; clamped usage to 0.");
    }
    println!(
        "  color: used {:>6}  billed {:>6}  amount {:>10.2}",
        bill.color.used_pages, bill.color.billed_pages, bill.color.amount
    );
    println!(
        "  b/w:   used {:>6}  billed {:>6}  amount {:>10.2}",
        bill.bw.used_pages, bill.bw.billed_pages, bill.bw.amount
    );
    println!("  rent:     {:>10.2}", bill.monthly_rent);
    println!("  subtotal: {:>10.2}", bill.subtotal);
    println!("  untaxed:  {:>10}", bill.untaxed);
    println!("  tax:      {:>10}", bill.tax);
    println!("  total:    {:>10}", bill.total);
}

fn print_contract(contract: &Contract) {
    println!(
        "{}  rent {:.2}  color {:.2}/page  b/w {:.2}/page  tax {}",
        contract.device_id,
        contract.monthly_rent,
        contract.color_unit_price,
        contract.bw_unit_price,
        contract.tax_type.as_str()
    );
    println!(
        "  giveaway {}/{}  error rate {}/{}  basic {}/{}",
        contract.color_giveaway,
        contract.bw_giveaway,
        contract.color_error_rate,
        contract.bw_error_rate,
        contract.color_basic,
        contract.bw_basic
    );
    if !contract.notes.is_empty() {
        println!("  notes: {}", contract.notes);
    }
}

fn print_reading(reading: &MeterReading) {
    println!(
        "{}  {}  color {:>8}  b/w {:>8}",
        reading.period, reading.recorded_at, reading.color_count, reading.bw_count
    );
}
