//! Subcommand execution
//!
//! Each command reads or mutates through [`Agenda`] and writes its view to
//! `out`. Unknown ids are errors so the process exits non-zero; everything
//! else degrades the way the service does.

use crate::cli::{Command, SubmitArgs};
use crate::config::{AgendaConfig, ReportConfig};
use crate::render;
use agenda_core::csv::{export_filename, to_csv};
use agenda_core::{BlockDraft, Directory, MonthView, RequestId, RequestStatus};
use agenda_report::{GeminiModel, ReportGenerator, SummaryModel};
use agenda_store::{Agenda, FileStore, KeyValueStore};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Open the file-backed agenda described by `config`
///
/// # Errors
/// Fails if a replacement catalog is configured and cannot be loaded.
pub fn open_agenda(config: &AgendaConfig) -> Result<Agenda<FileStore>> {
    let store = FileStore::new(&config.data_dir);
    let directory = match &config.directory_path {
        Some(path) => Directory::from_path(path)
            .with_context(|| format!("failed to load directory catalog {}", path.display()))?,
        None => Directory::cesfam(),
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "agenda opened");
    Ok(Agenda::with_directory(store, directory))
}

/// Summary generator for the configured model
///
/// Without an API key the generator is disabled and reports the missing
/// credential instead of failing.
#[must_use]
pub fn report_generator(config: &ReportConfig) -> ReportGenerator {
    let model = config.api_key().and_then(|key| {
        GeminiModel::new(config.gemini(key))
            .map_err(|e| tracing::warn!(error = %e, "summary model unavailable"))
            .ok()
    });
    ReportGenerator::new(model.map(|m| Arc::new(m) as Arc<dyn SummaryModel>))
        .with_sample_limit(config.sample_limit)
}

/// Fill omitted form fields from the catalog
///
/// The professional is derived from the profession unless one was chosen.
#[must_use]
pub fn draft_from_args(args: SubmitArgs, directory: &Directory, today: NaiveDate) -> BlockDraft {
    let solicitante = args
        .solicitante
        .or_else(|| directory.default_coordinator().map(str::to_string))
        .unwrap_or_default();
    let profession = args
        .profession
        .or_else(|| directory.default_profession().map(str::to_string))
        .unwrap_or_default();
    let professional_name = directory
        .resolve_professional(&profession, args.professional.as_deref())
        .unwrap_or_default()
        .to_string();
    let block_type = args
        .block_type
        .or_else(|| directory.default_block_type().map(str::to_string))
        .unwrap_or_default();
    let start_date = args.start.unwrap_or(today);

    BlockDraft {
        solicitante,
        professional_name,
        profession,
        block_type,
        start_date,
        end_date: args.end.unwrap_or(start_date),
        start_time: args.start_time.unwrap_or_else(BlockDraft::default_start_time),
        end_time: args.end_time.unwrap_or_else(BlockDraft::default_end_time),
        comments: args.comments.filter(|c| !c.trim().is_empty()),
    }
}

/// Run one subcommand
///
/// # Errors
/// Unknown ids, rejected drafts, unknown catalog professions, write
/// failures, and IO errors on `out`.
pub async fn execute<S, W>(
    agenda: &Agenda<S>,
    generator: &ReportGenerator,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::Submit(args) => {
            let draft = draft_from_args(args, agenda.directory(), Local::now().date_naive());
            let created = agenda.submit(draft).context("request not submitted")?;
            writeln!(out, "Solicitud creada: {}", created.id)?;
            write!(out, "{}", render::request_detail(&created))?;
        }
        Command::List { status } => {
            let rows = agenda.filtered(status);
            let counts = agenda.status_counts();
            write!(out, "{}", render::request_grid(&rows, &counts))?;
        }
        Command::Show { id } => {
            let id = RequestId::from(id);
            let Some(request) = agenda.get(&id) else {
                bail!("request not found: {id}");
            };
            write!(out, "{}", render::request_detail(&request))?;
        }
        Command::Authorize { id } => change_status(agenda, &id, RequestStatus::Authorized, out)?,
        Command::Reject { id } => change_status(agenda, &id, RequestStatus::Rejected, out)?,
        Command::Reopen { id } => change_status(agenda, &id, RequestStatus::Pending, out)?,
        Command::Calendar { month } => {
            let month = month.unwrap_or_else(|| MonthView::containing(Local::now().date_naive()));
            write!(out, "{}", render::calendar(&agenda.calendar(month)))?;
        }
        Command::Export { output } => {
            let snapshot = agenda.snapshot();
            let path = output
                .unwrap_or_else(|| PathBuf::from(export_filename(Utc::now().date_naive())));
            std::fs::write(&path, to_csv(&snapshot, &Local))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = snapshot.len(), "csv exported");
            writeln!(
                out,
                "{} solicitudes exportadas a {}",
                snapshot.len(),
                path.display()
            )?;
        }
        Command::Report => {
            let outcome = generator.generate(&agenda.snapshot()).await;
            writeln!(out, "{}", outcome.text())?;
        }
        Command::Catalog { profession } => {
            let directory = agenda.directory();
            if let Some(profession) = profession.as_deref() {
                if !directory.has_profession(profession) {
                    bail!("unknown profession: {profession}");
                }
            }
            write!(out, "{}", render::catalog(directory, profession.as_deref()))?;
        }
    }
    Ok(())
}

fn change_status<S, W>(
    agenda: &Agenda<S>,
    id: &str,
    status: RequestStatus,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    let id = RequestId::from(id);
    match agenda.set_status(&id, status) {
        Ok(_) => {
            writeln!(out, "{id}: {status}")?;
            Ok(())
        }
        Err(e) if e.is_not_found() => bail!("request not found: {id}"),
        Err(e) => Err(e).with_context(|| format!("failed to update {id}")),
    }
}
