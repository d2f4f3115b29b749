use serde_json::Value;

use crate::{
    DocumentStore, StoreError, WORDS, WriteBatch,
    models::{FlagUpdate, WordRecord},
    store::{from_document, to_document},
};

pub fn get_word<S>(store: &S, word_id: &str) -> Result<Option<WordRecord>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    store
        .get(WORDS, word_id)?
        .map(from_document)
        .transpose()
}

/// Every word currently in `book_id`, ordered by day then English form.
///
/// Documents of other books are never deserialized.
pub fn list_book_words<S>(store: &S, book_id: &str) -> Result<Vec<WordRecord>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let mut words = store
        .list(WORDS)?
        .into_iter()
        .filter(|doc| doc.get("bookId").and_then(Value::as_str) == Some(book_id))
        .map(from_document::<WordRecord>)
        .collect::<Result<Vec<_>, _>>()?;

    // Ungrouped words (day = None) sort first
    words.sort_by(|a, b| {
        a.day
            .cmp(&b.day)
            .then_with(|| a.english.to_lowercase().cmp(&b.english.to_lowercase()))
    });

    Ok(words)
}

/// Add a `set` for every word to `batch`.
pub(crate) fn stage_words(batch: &mut WriteBatch, words: &[WordRecord]) -> Result<(), StoreError> {
    for word in words {
        batch.set(WORDS, &word.id, to_document(word)?);
    }
    Ok(())
}

/// Replace the stored word with `word`.
pub fn save_word<S>(store: &S, word: &WordRecord) -> Result<(), StoreError>
where
    S: DocumentStore + ?Sized,
{
    store.set(WORDS, &word.id, to_document(word)?)
}

/// Apply learner flag changes and return the updated word.
pub fn update_flags<S>(
    store: &S,
    word_id: &str,
    flags: &FlagUpdate,
    mastered_book_id: &str,
) -> Result<WordRecord, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let word = get_word(store, word_id)?.ok_or_else(|| StoreError::NotFound {
        collection: WORDS.to_string(),
        id: word_id.to_string(),
    })?;

    let updated = word.with_flags(flags, mastered_book_id);
    save_word(store, &updated)?;

    Ok(updated)
}

/// Remove a word. Returns whether it existed.
pub fn delete_word<S>(store: &S, word_id: &str) -> Result<bool, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let existed = store.get(WORDS, word_id)?.is_some();
    store.delete(WORDS, word_id)?;
    Ok(existed)
}
