use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Command {
    Record {
        device_id: String,
        color_count: i64,
        bw_count: i64,
    },
    Preview {
        device_id: String,
        color_count: i64,
        bw_count: i64,
    },
    Show {
        device_id: String,
    },
    History {
        device_id: String,
    },
    Search {
        keyword: String,
    },
    Contracts,
    Import {
        path: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliArgs {
    pub data_dir: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args() -> Result<CliArgs, String> {
    let mut args = env::args().skip(1);
    let mut data_dir = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data-dir".to_string())?;
                data_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("unknown argument: {arg}"));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = positional
        .next()
        .ok_or_else(|| "missing command".to_string())?;
    let command = match command.as_str() {
        "record" => {
            let (device_id, color_count, bw_count) = reading_args(&mut positional)?;
            Command::Record {
                device_id,
                color_count,
                bw_count,
            }
        }
        "preview" => {
            let (device_id, color_count, bw_count) = reading_args(&mut positional)?;
            Command::Preview {
                device_id,
                color_count,
                bw_count,
            }
        }
        "show" => Command::Show {
            device_id: required(&mut positional, "device id")?,
        },
        "history" => Command::History {
            device_id: required(&mut positional, "device id")?,
        },
        "search" => Command::Search {
            keyword: required(&mut positional, "keyword")?,
        },
        "contracts" => Command::Contracts,
        "import" => Command::Import {
            path: PathBuf::from(required(&mut positional, "file path")?),
        },
        other => return Err(format!("unknown command: {other}")),
    };

    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument: {extra}"));
    }

    Ok(CliArgs { data_dir, command })
}

fn required(args: &mut impl Iterator<Item = String>, what: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("missing {what}"))
}

fn reading_args(
    args: &mut impl Iterator<Item = String>,
) -> Result<(String, i64, i64), String> {
    let device_id = required(args, "device id")?;
    let color = required(args, "color count")?;
    let bw = required(args, "black/white count")?;
    let color_count = color
        .parse::<i64>()
        .map_err(|_| format!("invalid color count: {color}"))?;
    let bw_count = bw
        .parse::<i64>()
        .map_err(|_| format!("invalid black/white count: {bw}"))?;
    Ok((device_id, color_count, bw_count))
}

pub fn print_help() {
    println!(
        "Copier Billing CLI\n\n\
Usage:\n  copier-billing [--data-dir <dir>] <command>\n\n\
Commands:\n  record <device> <color> <bw>   Record a meter reading and print the bill\n  preview <device> <color> <bw>  Print the bill a reading would produce, without saving\n  show <device>                  Show contract, customer and last reading for a device\n  history <device>               List recorded meter readings for a device\n  search <keyword>               Find customers by name\n  contracts                      List all contracts\n  import <file.json>             Load contracts and customers from a JSON file\n\n\
Options:\n  --data-dir <dir>  Override the data directory for this run\n  -h, --help        Show this help message\n"
    );
}
