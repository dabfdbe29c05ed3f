mod common;

use common::{bearer, recipe_json, sample_recipe, token, TestEnvironment};
use pretty_assertions::assert_eq;
use recipe_client::client::types::Measurement;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test_log::test(tokio::test)]
async fn test_get_all_recipes() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([recipe_json("64b7f0c2a1"), recipe_json("64b7f0c2a2")])),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let recipes = env
        .client()
        .get_all_recipes()
        .await
        .expect("listing recipes should not hit a transport error")
        .expect("server returned recipes");

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id.as_deref(), Some("64b7f0c2a1"));
    assert_eq!(recipes[1].id.as_deref(), Some("64b7f0c2a2"));
    assert_eq!(recipes[0].ingredients[0].quantity.unit, Measurement::Decilitre);

    let mut expected = sample_recipe();
    expected.id = Some("64b7f0c2a1".to_string());
    assert_eq!(recipes[0], expected);
}

#[test_log::test(tokio::test)]
async fn test_get_all_recipes_sends_no_authorization() {
    let env = TestEnvironment::logged_in().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&env.server)
        .await;

    let recipes = env.client().get_all_recipes().await.unwrap();
    assert_eq!(recipes, Some(vec![]));

    let requests = env.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        !requests[0].headers.contains_key("authorization"),
        "Listing recipes is unauthenticated"
    );
}

#[test_log::test(tokio::test)]
async fn test_get_all_recipes_empty_object_is_absent() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&env.server)
        .await;

    let recipes = env.client().get_all_recipes().await.unwrap();

    assert_eq!(recipes, None);
    assert_eq!(env.banner(), None, "No data is not an error");
}

#[test_log::test(tokio::test)]
async fn test_get_all_recipes_malformed_body_is_absent() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&env.server)
        .await;

    let recipes = env.client().get_all_recipes().await.unwrap();

    assert_eq!(recipes, None);
}

#[test_log::test(tokio::test)]
async fn test_get_all_recipes_not_found() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&env.server)
        .await;

    let recipes = env.client().get_all_recipes().await.unwrap();

    assert_eq!(recipes, None);
    assert_eq!(env.banner().as_deref(), Some("not found"));
}

#[test_log::test(tokio::test)]
async fn test_create_recipe() {
    let env = TestEnvironment::new().await;
    let recipe = sample_recipe();

    let mut expected_body = recipe_json("unused");
    expected_body.as_object_mut().unwrap().remove("_id");

    Mock::given(method("POST"))
        .and(path("/recipes"))
        .and(header("authorization", bearer().as_str()))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&env.server)
        .await;

    let created = env
        .client()
        .create_recipe(&token(), &recipe)
        .await
        .expect("creating a recipe should not hit a transport error");

    assert!(created, "201 should count as success");
    assert_eq!(env.banner(), None, "No error should be reported");
}

#[test_log::test(tokio::test)]
async fn test_create_recipe_unauthorized_redirects_to_login() {
    let env = TestEnvironment::new().await;

    Mock::given(method("POST"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;

    env.app.navigation().navigate("/recipes/new");
    let created = env.client().create_recipe(&token(), &sample_recipe()).await.unwrap();

    assert!(!created);
    assert_eq!(env.banner().as_deref(), Some("unauthorized"));

    let location = env.app.navigation().current();
    assert_eq!(location.path, "/login");
    assert_eq!(location.return_to.as_deref(), Some("/recipes/new"));
}

#[test_log::test(tokio::test)]
async fn test_get_recipe_by_id() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/recipes/64b7f0c2a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipe_json("64b7f0c2a1")))
        .mount(&env.server)
        .await;

    let recipe = env.client().get_recipe("64b7f0c2a1").await.unwrap();

    assert_eq!(recipe.and_then(|r| r.id).as_deref(), Some("64b7f0c2a1"));
}

#[test_log::test(tokio::test)]
async fn test_get_missing_recipe_is_absent() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/recipes/64b7f0c2ff"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&env.server)
        .await;

    let recipe = env.client().get_recipe("64b7f0c2ff").await.unwrap();

    assert_eq!(recipe, None);
    assert_eq!(env.banner(), None);
}

#[test_log::test(tokio::test)]
async fn test_update_recipe() {
    let env = TestEnvironment::new().await;
    let mut recipe = sample_recipe();
    recipe.cook_time = 25;

    Mock::given(method("PATCH"))
        .and(path("/recipes/64b7f0c2a1"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matchedCount": 1 })))
        .expect(1)
        .mount(&env.server)
        .await;

    let updated = env
        .client()
        .update_recipe(&token(), "64b7f0c2a1", &recipe)
        .await
        .unwrap();

    assert!(updated);
}

#[test_log::test(tokio::test)]
async fn test_delete_recipe_failure() {
    let env = TestEnvironment::new().await;

    Mock::given(method("DELETE"))
        .and(path("/recipes/64b7f0c2a1"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(500).set_body_string("MongoDB encountered an error"))
        .expect(1)
        .mount(&env.server)
        .await;

    let deleted = env.client().delete_recipe(&token(), "64b7f0c2a1").await.unwrap();

    assert!(!deleted);
    assert_eq!(env.banner().as_deref(), Some("MongoDB encountered an error"));
}
