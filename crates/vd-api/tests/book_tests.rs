use crate::common::{TestClient, TestStateBuilder, import_rows};
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_import_with_header_and_day_column() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    let import = import_rows(
        &client,
        "toeic",
        json!([
            ["Day", "English", "Korean"],
            [1, "apple", "사과"],
            [1, "banana", "바나나"],
            [2, "cherry", "체리"],
        ]),
    )
    .await;

    let report = &import["report"];
    assert_eq!(report["headerDetected"], true);
    assert_eq!(report["dayColumnDetected"], true);
    assert_eq!(report["totalRows"], 3);
    assert_eq!(report["accepted"], 3);

    let words = import["words"].as_array().unwrap();
    let cherry = words.iter().find(|w| w["english"] == "cherry").unwrap();
    assert_eq!(cherry["day"], 2);
    assert_eq!(cherry["bookId"], "toeic");
}

#[tokio::test]
async fn test_import_from_pasted_text() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    let response = client
        .post_json(
            "/books/pasted/import",
            &json!({
                "bookName": "pasted words",
                "text": "apple\t사과\nbanana\t바나나\n"
            }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);

    let import: Value = response.json();
    assert_eq!(import["report"]["accepted"], 2);
    assert_eq!(import["report"]["dayColumnDetected"], false);

    let book: Value = client.get("/books/pasted").await.json();
    assert_eq!(book["name"], "pasted words");
}

#[tokio::test]
async fn test_reimport_rejects_duplicates() {
    let client = TestClient::with_state(TestStateBuilder::new().build());
    let rows = json!([["apple", "사과"], ["banana", "바나나"]]);

    import_rows(&client, "fruits", rows).await;
    let second = import_rows(
        &client,
        "fruits",
        json!([["Apple", "사과"], ["cherry", "체리"], ["", "빈칸"]]),
    )
    .await;

    let report = &second["report"];
    assert_eq!(report["accepted"], 1);

    let rejected = report["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert!(rejected.iter().any(|r| r["reason"] == "duplicate"));
    assert!(rejected.iter().any(|r| r["reason"] == "missingRequiredField"));

    let words: Vec<Value> = client.get("/books/fruits/words").await.json();
    assert_eq!(words.len(), 3);
}

#[tokio::test]
async fn test_list_words_by_day() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    import_rows(
        &client,
        "daily",
        json!([
            [1, "apple", "사과"],
            [1, "banana", "바나나"],
            [2, "cherry", "체리"],
        ]),
    )
    .await;

    let response = client.get("/books/daily/words?day=1").await;
    response.assert_status(StatusCode::OK);

    let words: Vec<Value> = response.json();
    let english: Vec<&str> = words.iter().map(|w| w["english"].as_str().unwrap()).collect();
    assert_eq!(english, vec!["apple", "banana"]);
}

#[tokio::test]
async fn test_list_due_words_excludes_future_reviews() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    let import = import_rows(&client, "due", json!([["apple", "사과"], ["pear", "배"]])).await;
    let apple = crate::common::word_id(&import, "apple");

    client
        .post_json(&format!("/words/{apple}/review"), &json!({ "correct": true }))
        .await
        .assert_status(StatusCode::OK);

    let words: Vec<Value> = client.get("/books/due/words?due=true").await.json();
    let english: Vec<&str> = words.iter().map(|w| w["english"].as_str().unwrap()).collect();
    assert_eq!(english, vec!["pear"]);
}

#[tokio::test]
async fn test_import_validation() {
    let client = TestClient::with_state(TestStateBuilder::new().max_import_rows(2).build());

    // Invalid book id
    client
        .post_json(
            "/books/bad%20id/import",
            &json!({ "bookName": "x", "rows": [["apple", "사과"]] }),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Empty book name
    client
        .post_json(
            "/books/ok/import",
            &json!({ "bookName": "", "rows": [["apple", "사과"]] }),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // No source
    client
        .post_json("/books/ok/import", &json!({ "bookName": "x" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Over the row limit
    let response = client
        .post_json(
            "/books/ok/import",
            &json!({
                "bookName": "x",
                "rows": [["a", "가"], ["b", "나"], ["c", "다"]]
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("at most 2"));
}

#[tokio::test]
async fn test_get_missing_book() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    client
        .get("/books/nowhere")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
