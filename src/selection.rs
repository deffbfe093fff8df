use anyhow::{Result, anyhow};
use inquire::{InquireError, MultiSelect, Select};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::PickerStyle;
use crate::error::GwtError;
use crate::traits::WorktreeSource;
use crate::worktree::WorktreeRecord;

/// Preview text for the item at an index. Must not fail; return an empty
/// string instead.
pub type PreviewFn = dyn Fn(usize) -> String + Send + Sync;

/// Trait for providing interactive selection functionality
/// This allows us to abstract away the interactive prompts for testing
pub trait Picker {
    /// Lets the user choose one of `items`; `None` when they cancel.
    ///
    /// # Errors
    /// Returns an error if the picker itself fails (e.g. no terminal).
    fn pick_one(
        &self,
        prompt: &str,
        items: &[String],
        preview: Option<Arc<PreviewFn>>,
    ) -> Result<Option<usize>>;

    /// Lets the user choose any number of `items`; empty when they cancel.
    ///
    /// # Errors
    /// Returns an error if the picker itself fails (e.g. no terminal).
    fn pick_many(
        &self,
        prompt: &str,
        items: &[String],
        preview: Option<Arc<PreviewFn>>,
    ) -> Result<Vec<usize>>;
}

/// Builds the picker for the configured style.
#[must_use]
pub fn picker_for(style: PickerStyle) -> Box<dyn Picker> {
    match style {
        #[cfg(unix)]
        PickerStyle::Fuzzy => Box::new(SkimPicker),
        #[cfg(not(unix))]
        PickerStyle::Fuzzy => {
            log::warn!("fuzzy picker is unavailable on this platform, using the list picker");
            Box::new(ListPicker)
        }
        PickerStyle::List => Box::new(ListPicker),
    }
}

/// Preview callback showing `git status --short` of each record's worktree.
#[must_use]
pub fn status_preview(
    source: Arc<dyn WorktreeSource>,
    records: &[WorktreeRecord],
) -> Arc<PreviewFn> {
    let paths: Vec<String> = records.iter().map(|r| r.path.clone()).collect();
    Arc::new(move |index: usize| {
        paths
            .get(index)
            .and_then(|path| source.status_short(Path::new(path)).ok())
            .unwrap_or_default()
    })
}

/// First record, in ranked order, whose branch is exactly `branch`.
///
/// # Errors
/// Returns `GwtError::BranchNotFound` when nothing matches.
pub fn find_by_branch<'a>(records: &'a [WorktreeRecord], branch: &str) -> Result<&'a WorktreeRecord> {
    records
        .iter()
        .find(|record| !record.branch.is_empty() && record.branch == branch)
        .ok_or_else(|| {
            GwtError::BranchNotFound {
                branch: branch.to_string(),
            }
            .into()
        })
}

/// First record matching any of `candidates`, trying candidates in order.
#[must_use]
pub fn find_default<'a>(
    records: &'a [WorktreeRecord],
    candidates: &[String],
) -> Option<&'a WorktreeRecord> {
    candidates
        .iter()
        .find_map(|branch| find_by_branch(records, branch).ok())
}

/// Asks `picker` for exactly one record.
///
/// # Errors
/// Returns `GwtError::SelectionCancelled` if the user backs out, or an error if
/// there is nothing to choose from or the picker fails.
pub fn select_one<'a>(
    picker: &dyn Picker,
    prompt: &str,
    records: &'a [WorktreeRecord],
    preview: Option<Arc<PreviewFn>>,
) -> Result<&'a WorktreeRecord> {
    if records.is_empty() {
        anyhow::bail!("No worktrees found");
    }

    let labels = labels(records);
    let index = picker
        .pick_one(prompt, &labels, preview)?
        .ok_or(GwtError::SelectionCancelled)?;

    records
        .get(index)
        .ok_or_else(|| anyhow!("Picker returned out-of-range index {index}"))
}

/// Asks `picker` for one or more records, in the order they were chosen.
///
/// # Errors
/// Returns `GwtError::SelectionCancelled` if nothing was chosen, or an error if
/// there is nothing to choose from or the picker fails.
pub fn select_many<'a>(
    picker: &dyn Picker,
    prompt: &str,
    records: &'a [WorktreeRecord],
    preview: Option<Arc<PreviewFn>>,
) -> Result<Vec<&'a WorktreeRecord>> {
    if records.is_empty() {
        anyhow::bail!("No worktrees found");
    }

    let labels = labels(records);
    let mut indices = picker.pick_many(prompt, &labels, preview)?;
    if indices.is_empty() {
        return Err(GwtError::SelectionCancelled.into());
    }

    let mut seen = Vec::with_capacity(indices.len());
    indices.retain(|index| {
        let fresh = !seen.contains(index);
        seen.push(*index);
        fresh
    });

    indices
        .into_iter()
        .map(|index| {
            records
                .get(index)
                .ok_or_else(|| anyhow!("Picker returned out-of-range index {index}"))
        })
        .collect()
}

fn labels(records: &[WorktreeRecord]) -> Vec<String> {
    records.iter().map(|r| r.label.clone()).collect()
}

/// Fuzzy finder with a live preview pane, built on skim.
#[cfg(unix)]
pub struct SkimPicker;

#[cfg(unix)]
mod skim_picker {
    use super::{PreviewFn, SkimPicker};
    use anyhow::{Result, anyhow};
    use skim::prelude::*;
    use std::borrow::Cow;
    use std::sync::Arc;

    struct PickerItem {
        index: usize,
        text: String,
        preview: Option<Arc<PreviewFn>>,
    }

    impl SkimItem for PickerItem {
        fn text(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.text)
        }

        fn output(&self) -> Cow<'_, str> {
            Cow::Owned(self.index.to_string())
        }

        fn preview(&self, _context: PreviewContext<'_>) -> ItemPreview {
            let text = self
                .preview
                .as_ref()
                .map(|preview| preview(self.index))
                .unwrap_or_default();
            ItemPreview::Text(text)
        }
    }

    impl SkimPicker {
        pub(super) fn run(
            prompt: &str,
            items: &[String],
            preview: Option<Arc<PreviewFn>>,
            multi: bool,
        ) -> Result<Vec<usize>> {
            let options = SkimOptionsBuilder::default()
                .height("50%".to_string())
                .layout("reverse".to_string())
                .multi(multi)
                .header(Some(prompt.to_string()))
                // Empty command: skim asks SkimItem::preview() instead
                .preview(preview.as_ref().map(|_| String::new()))
                .preview_window("right:50%".to_string())
                .build()
                .map_err(|e| anyhow!("Failed to build picker options: {e}"))?;

            let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
            for (index, text) in items.iter().enumerate() {
                let item = PickerItem {
                    index,
                    text: text.clone(),
                    preview: preview.as_ref().map(Arc::clone),
                };
                tx.send(Arc::new(item) as Arc<dyn SkimItem>)
                    .map_err(|e| anyhow!("Failed to send item to picker: {e}"))?;
            }
            drop(tx);

            let Some(output) = Skim::run_with(&options, Some(rx)) else {
                return Ok(Vec::new());
            };
            if output.is_abort {
                return Ok(Vec::new());
            }

            Ok(output
                .selected_items
                .iter()
                .filter_map(|item| item.output().parse::<usize>().ok())
                .collect())
        }
    }
}

#[cfg(unix)]
impl Picker for SkimPicker {
    fn pick_one(
        &self,
        prompt: &str,
        items: &[String],
        preview: Option<Arc<PreviewFn>>,
    ) -> Result<Option<usize>> {
        Ok(Self::run(prompt, items, preview, false)?.first().copied())
    }

    fn pick_many(
        &self,
        prompt: &str,
        items: &[String],
        preview: Option<Arc<PreviewFn>>,
    ) -> Result<Vec<usize>> {
        Self::run(prompt, items, preview, true)
    }
}

/// Plain select list using inquire; filters as you type but has no preview.
pub struct ListPicker;

fn cancelled<T>(result: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Picker for ListPicker {
    fn pick_one(
        &self,
        prompt: &str,
        items: &[String],
        _preview: Option<Arc<PreviewFn>>,
    ) -> Result<Option<usize>> {
        let choice = cancelled(
            Select::new(prompt, items.to_vec())
                .with_page_size(10)
                .raw_prompt()
                .map(Some),
        )?;
        Ok(choice.map(|option| option.index))
    }

    fn pick_many(
        &self,
        prompt: &str,
        items: &[String],
        _preview: Option<Arc<PreviewFn>>,
    ) -> Result<Vec<usize>> {
        let choices = cancelled(
            MultiSelect::new(prompt, items.to_vec())
                .with_page_size(10)
                .raw_prompt_skippable(),
        )?;
        Ok(choices
            .unwrap_or_default()
            .into_iter()
            .map(|option| option.index)
            .collect())
    }
}

/// Mock implementation for testing that returns predetermined indices
///
/// Records every label list it is shown and the preview text of each index it
/// picks, so tests can assert on both.
pub struct MockPicker {
    choices: Vec<usize>,
    pub shown: Mutex<Vec<Vec<String>>>,
    pub previews: Mutex<Vec<String>>,
}

impl MockPicker {
    #[must_use]
    pub fn choosing(choices: Vec<usize>) -> Self {
        Self {
            choices,
            shown: Mutex::new(Vec::new()),
            previews: Mutex::new(Vec::new()),
        }
    }

    /// A picker the user escapes out of.
    #[must_use]
    pub fn cancelling() -> Self {
        Self::choosing(Vec::new())
    }

    fn pick(&self, items: &[String], preview: Option<&Arc<PreviewFn>>) -> Result<Vec<usize>> {
        if let Some(&bad) = self.choices.iter().find(|&&index| index >= items.len()) {
            anyhow::bail!("Mock choice {bad} not among {} options", items.len());
        }
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(items.to_vec());
        }
        if let (Some(preview), Ok(mut previews)) = (preview, self.previews.lock()) {
            previews.extend(self.choices.iter().map(|&index| preview(index)));
        }
        Ok(self.choices.clone())
    }
}

impl Picker for MockPicker {
    fn pick_one(
        &self,
        _prompt: &str,
        items: &[String],
        preview: Option<Arc<PreviewFn>>,
    ) -> Result<Option<usize>> {
        Ok(self.pick(items, preview.as_ref())?.first().copied())
    }

    fn pick_many(
        &self,
        _prompt: &str,
        items: &[String],
        preview: Option<Arc<PreviewFn>>,
    ) -> Result<Vec<usize>> {
        self.pick(items, preview.as_ref())
    }
}
