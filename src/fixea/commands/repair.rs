use crate::commands::helpers::dump_record;
use crate::commands::{Event, ObjectContext};
use crate::model::{AttributeSet, Outcome, SelectionView, AFP_REPAIR_BYTE};
use crate::store::AttrHandle;
use tracing::warn;

/// Report and/or fix the records in `view`.
///
/// In check mode every selected record adds [`Outcome::CORRUPTED`]. In fix
/// mode the first header byte is rewritten to `'A'` and the whole value is
/// written back, one write per record; a failed write adds
/// [`Outcome::WRITE_FAILED`] and leaves the record as it was read. Dry-run
/// fixes report what they would do and touch nothing.
pub fn run<A: AttrHandle>(
    handle: &A,
    set: &mut AttributeSet,
    view: &SelectionView,
    ctx: &mut ObjectContext<'_>,
) -> Outcome {
    let mut outcome = Outcome::OK;

    for &index in view.indices() {
        let Some(record) = set.get_mut(index) else {
            continue;
        };

        dump_record(ctx, record);

        if ctx.options.check {
            outcome |= Outcome::CORRUPTED;
            ctx.verbose(Event::Corrupted {
                name: record.name.clone(),
            });
        }

        if !ctx.options.fix {
            continue;
        }

        if !ctx.options.dry_run {
            let original = record.value[0];
            record.value[0] = AFP_REPAIR_BYTE;
            if let Err(err) = handle.set_value(&record.name, &record.value) {
                record.value[0] = original;
                warn!(
                    path = %ctx.path.display(),
                    name = %record.name.to_string_lossy(),
                    error = %err,
                    "cannot write repaired attribute"
                );
                outcome |= Outcome::WRITE_FAILED;
                continue;
            }
        }

        ctx.verbose(Event::Fixed {
            name: record.name.clone(),
        });
    }

    outcome
}
