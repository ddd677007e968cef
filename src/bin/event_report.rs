//! Prints the events stored in a data folder, or the report of one of them
//!
//! The data folder defaults to the `EVENT_LEDGER_DATA` environment variable, or to `./event_data`.

use std::path::PathBuf;

use clap::Parser;

use event_ledger::backend::json_folder::JsonFolder;
use event_ledger::utils;
use event_ledger::{EventId, RecordStore};

#[derive(Parser)]
#[command(name = "event-report")]
#[command(about = "Prints the events of a data folder, or the report of one event")]
struct Cli {
    /// Folder that contains the collection files
    #[arg(long)]
    data: Option<PathBuf>,

    /// Event to report on (lists every event when omitted)
    event_id: Option<EventId>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let backend = match cli.data {
        Some(path) => JsonFolder::new(&path),
        None => JsonFolder::from_config(),
    };
    log::info!("Reading data from {:?}", backend.folder());
    let store = RecordStore::new(backend);

    match cli.event_id {
        None => {
            println!("Events:");
            utils::print_event_list(&store.list_events());
        },
        Some(id) => {
            match store.event_report(id) {
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                },
                Ok(report) => print!("{}", report),
            }

            println!("\nTasks:");
            utils::print_tasks(&store.list_tasks(Some(id)));

            if let Ok(timeline) = store.event_timeline(id) {
                println!("\nTimeline:");
                utils::print_timeline(&timeline);
            }
        },
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["event-report", "--data", "/tmp/ledger", "3"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/ledger")));
        assert_eq!(cli.event_id, Some(EventId::new(3)));

        let cli = Cli::try_parse_from(["event-report"]).unwrap();
        assert!(cli.data.is_none() && cli.event_id.is_none());

        assert!(Cli::try_parse_from(["event-report", "three"]).is_err());
        assert!(Cli::try_parse_from(["event-report", "--data"]).is_err());
    }
}
