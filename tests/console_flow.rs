use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use member_console::console::{Console, FormKind, LoginField, StateCommand};
use member_console::constants::{DELETE_DENIED_MESSAGE, LOGIN_FAILED_MESSAGE};
use member_console::models::MemberField;
use member_console::MemberClient;

fn member_json(server: &MockServer, id: u32, email: &str) -> Value {
    json!({
        "url": format!("{}/api/users/{}/", server.uri(), id),
        "username": email,
        "email": email,
        "first_name": "First",
        "last_name": format!("Last{}", id),
        "phone_number": "555-0100",
        "can_delete_user": false
    })
}

async fn mount_session(server: &MockServer, authenticated: bool) {
    Mock::given(method("GET"))
        .and(path("/session/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isAuthenticated": authenticated })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/csrf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-CSRFToken", "tok-1")
                .set_body_json(json!({ "detail": "CSRF cookie set" })),
        )
        .mount(server)
        .await;
}

async fn mount_members(server: &MockServer, members: Value) {
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(members))
        .mount(server)
        .await;
}

fn console_for(server: &MockServer) -> Console {
    Console::new(MemberClient::new(server.uri()).unwrap())
}

#[tokio::test]
async fn test_anonymous_bootstrap_then_login_loads_members() {
    let server = MockServer::start().await;
    mount_session(&server, false).await;
    mount_members(&server, json!([member_json(&server, 1, "a@x.io")])).await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(header("X-CSRFToken", "tok-1"))
        .and(body_json(json!({ "username": "ann", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "Successfully logged in." })))
        .expect(1)
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    let state = console.run(StateCommand::Mount).await;
    assert!(!state.is_authenticated());
    assert_eq!(state.csrf_token.as_deref(), Some("tok-1"));

    console.dispatch(StateCommand::SetLoginField(LoginField::Username, "ann".to_string()));
    console.dispatch(StateCommand::SetLoginField(LoginField::Password, "secret".to_string()));
    let state = console.run(StateCommand::SubmitLogin).await;

    assert!(state.is_authenticated());
    assert_eq!(state.members().len(), 1);
    assert_eq!(state.members()[0].email, "a@x.io");
    assert_eq!(state.pending, None);
}

#[tokio::test]
async fn test_rejected_login_stays_on_login_form() {
    let server = MockServer::start().await;
    mount_session(&server, false).await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid credentials." })))
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    console.run(StateCommand::Mount).await;
    console.dispatch(StateCommand::SetLoginField(LoginField::Username, "ann".to_string()));
    console.dispatch(StateCommand::SetLoginField(LoginField::Password, "wrong".to_string()));
    let state = console.run(StateCommand::SubmitLogin).await;

    assert!(!state.is_authenticated());
    assert_eq!(state.login_form().unwrap().message.as_deref(), Some(LOGIN_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_create_posts_draft_with_token_and_appends() {
    let server = MockServer::start().await;
    mount_session(&server, true).await;
    mount_members(&server, json!([member_json(&server, 1, "a@x.io")])).await;
    Mock::given(method("POST"))
        .and(path("/api/users/"))
        .and(header("X-CSRFToken", "tok-1"))
        .and(body_json(json!({
            "username": "n@x.io",
            "email": "n@x.io",
            "first_name": "New",
            "last_name": "Person",
            "phone_number": "555-0199",
            "can_delete_user": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(member_json(&server, 2, "n@x.io")))
        .expect(1)
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    console.run(StateCommand::Mount).await;

    console.dispatch(StateCommand::OpenCreate);
    for (field, value) in [
        (MemberField::FirstName, "New"),
        (MemberField::LastName, "Person"),
        (MemberField::Email, "n@x.io"),
        (MemberField::PhoneNumber, "555-0199"),
    ] {
        console.dispatch(StateCommand::SetMemberField(FormKind::Create, field, value.to_string()));
    }
    console.dispatch(StateCommand::SetAdmin(FormKind::Create, true));
    let state = console.run(StateCommand::SubmitCreate).await;

    let board = state.board().unwrap();
    assert_eq!(board.members.len(), 2);
    assert_eq!(board.members[1].email, "n@x.io");
    assert!(!board.create_open);
}

#[tokio::test]
async fn test_update_validation_errors_land_on_edit_form() {
    let server = MockServer::start().await;
    mount_session(&server, true).await;
    mount_members(&server, json!([member_json(&server, 1, "a@x.io")])).await;
    Mock::given(method("PUT"))
        .and(path("/api/users/1/"))
        .and(header("X-CSRFToken", "tok-1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "email": ["user with this email already exists."] })),
        )
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    let url = console.run(StateCommand::Mount).await.members()[0].url.clone();

    console.dispatch(StateCommand::SelectMember(url));
    console.dispatch(StateCommand::SetMemberField(FormKind::Edit, MemberField::Email, "b@x.io".to_string()));
    let state = console.run(StateCommand::SubmitEdit).await;

    let edit = state.board().unwrap().edit.as_ref().unwrap();
    assert_eq!(edit.form.errors.get("email"), Some("user with this email already exists."));
    assert_eq!(state.members()[0].email, "a@x.io");
}

#[tokio::test]
async fn test_forbidden_delete_keeps_member_and_alerts() {
    let server = MockServer::start().await;
    mount_session(&server, true).await;
    mount_members(&server, json!([member_json(&server, 1, "a@x.io")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1/"))
        .and(header("X-CSRFToken", "tok-1"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "detail": "You do not have permission to perform this action." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    let url = console.run(StateCommand::Mount).await.members()[0].url.clone();

    console.dispatch(StateCommand::RequestDelete(url));
    let state = console.run(StateCommand::ConfirmDelete).await;

    assert_eq!(state.members().len(), 1);
    assert_eq!(state.alert.as_deref(), Some(DELETE_DENIED_MESSAGE));
}

#[tokio::test]
async fn test_delete_removes_member() {
    let server = MockServer::start().await;
    mount_session(&server, true).await;
    mount_members(
        &server,
        json!([member_json(&server, 1, "a@x.io"), member_json(&server, 2, "b@x.io")]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    let url = console.run(StateCommand::Mount).await.members()[1].url.clone();

    console.dispatch(StateCommand::RequestDelete(url));
    let state = console.run(StateCommand::ConfirmDelete).await;

    assert_eq!(state.members().len(), 1);
    assert_eq!(state.members()[0].email, "a@x.io");
    assert_eq!(state.alert, None);
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let server = MockServer::start().await;
    mount_session(&server, true).await;
    mount_members(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/logout/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "Successfully logged out." })))
        .expect(1)
        .mount(&server)
        .await;

    let mut console = console_for(&server);
    assert!(console.run(StateCommand::Mount).await.is_authenticated());

    let state = console.run(StateCommand::Logout).await;
    assert!(!state.is_authenticated());
    assert_eq!(state.csrf_token.as_deref(), Some("tok-1"));
}
