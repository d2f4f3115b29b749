use chrono::{DateTime, Utc};

use crate::{
    BOOKS, DocumentStore, StoreError, WriteBatch,
    models::{Book, WordRecord},
    repositories::words::stage_words,
    store::{from_document, to_document},
};

pub fn get_book<S>(store: &S, book_id: &str) -> Result<Option<Book>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    store
        .get(BOOKS, book_id)?
        .map(from_document)
        .transpose()
}

/// Store imported words and create or rename their book in one commit.
///
/// A renamed book keeps its creation time.
pub fn import_into_book<S>(
    store: &S,
    book_id: &str,
    name: &str,
    words: &[WordRecord],
    now: DateTime<Utc>,
) -> Result<Book, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let book = next_book(store, book_id, name, now)?;

    let mut batch = WriteBatch::new();
    stage_words(&mut batch, words)?;
    batch.set(BOOKS, book_id, to_document(&book)?);
    store.commit(batch)?;

    Ok(book)
}

fn next_book<S>(
    store: &S,
    book_id: &str,
    name: &str,
    now: DateTime<Utc>,
) -> Result<Book, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let created_at = get_book(store, book_id)?.map_or(now, |book| book.created_at);

    Ok(Book {
        id: book_id.to_string(),
        name: name.to_string(),
        created_at,
        updated_at: now,
    })
}
