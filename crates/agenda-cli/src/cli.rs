//! Command-line surface

use agenda_core::{MonthView, StatusFilter};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CESFAM agenda block request tracker
#[derive(Debug, Parser)]
#[command(name = "agenda", version, about = "Track agenda block requests for clinic staff")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory from the configuration
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a new block request
    Submit(SubmitArgs),

    /// List requests, newest first
    List {
        /// Status to show: todos, pendiente, autorizado, rechazado
        #[arg(long, default_value = "todos")]
        status: StatusFilter,
    },

    /// Show one request
    Show {
        /// Request id
        id: String,
    },

    /// Mark a request authorized
    Authorize {
        /// Request id
        id: String,
    },

    /// Mark a request rejected
    Reject {
        /// Request id
        id: String,
    },

    /// Put a request back to pending
    Reopen {
        /// Request id
        id: String,
    },

    /// Month grid of authorized blocks
    Calendar {
        /// Month as YYYY-MM; current month if omitted
        #[arg(long)]
        month: Option<MonthView>,
    },

    /// Export every request as CSV
    Export {
        /// Destination file; dated name in the working directory if omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Executive summary from the language model
    Report,

    /// Show the directory catalog
    Catalog {
        /// Only this profession's roster
        #[arg(long)]
        profession: Option<String>,
    },
}

/// Request form fields
///
/// Omitted fields take the catalog defaults; the professional follows the
/// chosen profession.
#[derive(Debug, Clone, Default, Args)]
pub struct SubmitArgs {
    /// Coordinator filing the request
    #[arg(long)]
    pub solicitante: Option<String>,

    /// Profession of the staff member
    #[arg(long)]
    pub profession: Option<String>,

    /// Staff member; first on the profession's roster if omitted
    #[arg(long)]
    pub professional: Option<String>,

    /// Block type
    #[arg(long)]
    pub block_type: Option<String>,

    /// First blocked day (YYYY-MM-DD); today if omitted
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last blocked day (YYYY-MM-DD); same as start if omitted
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Start of the daily window (HH:MM)
    #[arg(long, value_parser = parse_clock)]
    pub start_time: Option<NaiveTime>,

    /// End of the daily window (HH:MM)
    #[arg(long, value_parser = parse_clock)]
    pub end_time: Option<NaiveTime>,

    /// Free-text notes
    #[arg(long)]
    pub comments: Option<String>,
}

fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("expected HH:MM, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::RequestStatus;

    #[test]
    fn list_defaults_to_all() {
        let cli = Cli::try_parse_from(["agenda", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                status: StatusFilter::All
            }
        ));
    }

    #[test]
    fn list_accepts_spanish_status() {
        let cli = Cli::try_parse_from(["agenda", "list", "--status", "autorizado"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                status: StatusFilter::Only(RequestStatus::Authorized)
            }
        ));
    }

    #[test]
    fn submit_parses_form_fields() {
        let cli = Cli::try_parse_from([
            "agenda",
            "--data-dir",
            "/tmp/agenda",
            "submit",
            "--profession",
            "Kinesiólogo/a",
            "--start",
            "2024-03-04",
            "--start-time",
            "09:30",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/agenda")));
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.profession.as_deref(), Some("Kinesiólogo/a"));
        assert_eq!(args.start, "2024-03-04".parse().ok());
        assert_eq!(args.start_time, NaiveTime::from_hms_opt(9, 30, 0));
        assert!(args.professional.is_none());
    }

    #[test]
    fn calendar_rejects_bad_month() {
        assert!(Cli::try_parse_from(["agenda", "calendar", "--month", "2024-13"]).is_err());
        assert!(Cli::try_parse_from(["agenda", "calendar", "--month", "2024-02"]).is_ok());
    }

    #[test]
    fn clock_parser_accepts_seconds() {
        assert_eq!(parse_clock("17:00:00"), Ok(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
        assert!(parse_clock("5pm").is_err());
    }
}
