mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{names, TestApp};
use toy_corner_api::database::Collection;

#[tokio::test]
async fn orders_are_recorded_and_listed() -> Result<()> {
    let app = TestApp::new();
    let order = json!({
        "name": "Foo Car",
        "price": 20,
        "color": "red",
        "customer": { "name": "Ann", "email": "ann@x.y", "phone": "555-0100" },
    });

    let res = app.post("/orders", order).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["insertedId"].is_string());

    let res = app.get("/orders").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.body), ["Foo Car"]);
    assert_eq!(res.body[0]["customer"]["email"], "ann@x.y");
    Ok(())
}

#[tokio::test]
async fn order_body_is_stored_as_posted() -> Result<()> {
    let app = TestApp::new();
    let order = json!({
        "name": "Kite",
        "quantity": 3,
        "customer": { "name": "Ann", "email": "a@x.y", "address": "1 Main" },
    });

    let res = app.post("/orders", order).await?;
    assert_eq!(res.status, StatusCode::OK);

    let stored = &app.get("/orders").await?.body[0];
    assert_eq!(stored["quantity"], 3);
    assert_eq!(stored["customer"]["address"], "1 Main");
    Ok(())
}

#[tokio::test]
async fn order_needs_only_an_object_body() -> Result<()> {
    let app = TestApp::new();

    let res = app.post("/orders", json!({ "customer": { "name": "Ann" } })).await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.post("/orders", json!(["not", "an", "object"])).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.count(Collection::Orders).await, 1);
    Ok(())
}

#[tokio::test]
async fn wishlist_is_keyed_by_customer_email() -> Result<()> {
    let app = TestApp::new();
    for (name, email) in [("Kite", "c@x.y"), ("Bear Plush", "d@x.y"), ("Anchor Boat", "c@x.y")] {
        let res = app
            .post("/wishlist", json!({ "name": name, "customerEmail": email, "customer": { "name": "Cy" } }))
            .await?;
        assert_eq!(res.status, StatusCode::OK);
    }

    let res = app.get("/wishlist/c@x.y").await?;
    assert_eq!(names(&res.body), ["Kite", "Anchor Boat"]);

    let res = app.get("/wishlist/c@x.y?sort=ascending&limit=1").await?;
    assert_eq!(names(&res.body), ["Anchor Boat"]);

    let res = app.get("/wishlist/nobody@x.y").await?;
    assert_eq!(res.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn blog_lists_and_fetches_as_list() -> Result<()> {
    let app = TestApp::new();
    let first = app.seed(Collection::Blog, json!({ "name": "Choosing toys", "body": "..." })).await?;
    app.seed(Collection::Blog, json!({ "name": "Safety first", "body": "..." })).await?;

    let res = app.get("/blog").await?;
    assert_eq!(names(&res.body), ["Choosing toys", "Safety first"]);

    let res = app.get(&format!("/blog/{}", first)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.body), ["Choosing toys"]);

    let res = app.get("/blog/0123456789abcdef01234567").await?;
    assert_eq!(res.body, json!([]));

    let res = app.get("/blog/bad-id").await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}
