use crate::model::{AttributeSet, SelectionView};

/// Select the records carrying the damaged `\0FP` header.
pub fn run(set: &AttributeSet) -> SelectionView {
    let mut view = SelectionView::new("corrupted");
    for (index, record) in set.iter().enumerate() {
        if record.is_corrupted() {
            view.select(index);
        }
    }
    view
}
