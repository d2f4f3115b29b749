mod common;

mod book_tests;
