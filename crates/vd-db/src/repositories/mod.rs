// All repository functions are generic over `S: DocumentStore + ?Sized`
// so they accept both a concrete store and an `Arc<dyn DocumentStore>`.

pub mod books;
pub mod words;
