use tracing::debug;

use crate::files::{FilePurpose, FileStore};
use crate::import::{ImportOptions, ImportRun, StepResult};
use crate::locale::LocalizedString;
use crate::models::Galley;
use crate::store::Backend;

/// Creates the PDF galley and attaches the copied file. The entry point
/// accepts several PDF paths (locale-tagged exports), but a single galley
/// with the first file is created; see DESIGN.md.
pub(super) fn attach_galley(
    store: &dyn Backend,
    files: &dyn FileStore,
    run: &ImportRun<'_>,
    options: &ImportOptions,
    publication_id: i64,
    submission_id: i64,
) -> StepResult<Galley> {
    let pdf_path = &run.request.pdf_paths[0];
    if run.request.pdf_paths.len() > 1 {
        debug!(
            skipped = run.request.pdf_paths.len() - 1,
            "multiple PDFs supplied; attaching the first"
        );
    }

    let filename = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fulltext.pdf".to_string());

    let mut galley = Galley {
        id: 0,
        publication_id,
        label: "PDF".to_string(),
        locale: run.primary_locale.to_string(),
        name: LocalizedString::with(run.primary_locale, &filename),
        seq: 1,
        submission_file_id: None,
    };
    galley.id = store.insert_galley(&galley)?;

    let file = files.copy_submission_file(
        pdf_path,
        run.request.journal.id,
        submission_id,
        FilePurpose::Proof,
        run.request.editor.id,
        &options.genre_key,
        galley.id,
    )?;
    galley.submission_file_id = Some(file.id);
    store.update_galley(&galley)?;
    debug!(galley = galley.id, file = file.id, name = %filename, "attached PDF galley");

    Ok(galley)
}
