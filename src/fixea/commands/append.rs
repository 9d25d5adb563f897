use crate::commands::helpers::dump_record;
use crate::commands::{Event, ObjectContext};
use crate::config::AppendMode;
use crate::error::{FixEaError, Result};
use crate::model::{AttributeRecord, AttributeSet, Outcome, SelectionView, TERMINATOR};
use crate::store::AttrHandle;
use tracing::warn;

/// Pick the records that get a terminator appended.
///
/// `Named` stops at the first match; no match is an empty selection.
pub fn select(set: &AttributeSet, mode: &AppendMode) -> SelectionView {
    let mut view = SelectionView::new("to-append");
    match mode {
        AppendMode::All => {
            for index in 0..set.len() {
                view.select(index);
            }
        }
        AppendMode::Named(name) => {
            if let Some(index) = set.iter().position(|r| r.name == *name) {
                view.select(index);
            }
        }
    }
    view
}

/// Grow `record` by one terminator byte.
///
/// The new buffer is reserved fallibly; the old one is released when it is
/// replaced.
pub fn append_terminator(record: &mut AttributeRecord) -> Result<()> {
    let requested = record.value.len() + 1;
    let mut grown = Vec::new();
    grown
        .try_reserve_exact(requested)
        .map_err(|_| FixEaError::AppendFailure {
            name: record.name.clone(),
            requested,
        })?;
    grown.extend_from_slice(&record.value);
    grown.push(TERMINATOR);
    record.value = grown;
    Ok(())
}

/// Append one terminator byte to every record in `view` and write it back.
///
/// A failed write adds [`Outcome::WRITE_FAILED`] and moves on. A failed
/// allocation adds [`Outcome::APPEND_FAILED`] and abandons the rest of the
/// selection.
pub fn run<A: AttrHandle>(
    handle: &A,
    set: &mut AttributeSet,
    view: &SelectionView,
    ctx: &mut ObjectContext<'_>,
) -> Outcome {
    run_with(handle, set, view, ctx, append_terminator)
}

/// Grows a record in place.
type Grow = fn(&mut AttributeRecord) -> Result<()>;

fn run_with<A: AttrHandle>(
    handle: &A,
    set: &mut AttributeSet,
    view: &SelectionView,
    ctx: &mut ObjectContext<'_>,
    grow: Grow,
) -> Outcome {
    let mut outcome = Outcome::OK;

    for &index in view.indices() {
        let Some(record) = set.get_mut(index) else {
            continue;
        };

        dump_record(ctx, record);

        if !ctx.options.dry_run {
            if let Err(err) = grow(record) {
                warn!(path = %ctx.path.display(), "{err}");
                outcome |= Outcome::APPEND_FAILED;
                break;
            }

            if let Err(err) = handle.set_value(&record.name, &record.value) {
                warn!(
                    path = %ctx.path.display(),
                    name = %record.name.to_string_lossy(),
                    error = %err,
                    "cannot write appended attribute"
                );
                outcome |= Outcome::WRITE_FAILED;
                continue;
            }
        }

        ctx.verbose(Event::Appended {
            name: record.name.clone(),
        });
    }

    outcome
}
