use crate::cli_context::CliContextBuilder;

#[test]
fn test_builder_uses_given_origin() {
    let context = CliContextBuilder::new()
        .with_base_url("http://members.test/")
        .build()
        .unwrap();

    assert_eq!(context.base_url(), "http://members.test");
    assert_eq!(context.default_username(), None);
}

#[test]
fn test_builder_username_becomes_default() {
    let context = CliContextBuilder::new()
        .with_base_url("http://members.test")
        .with_username("admin@example.com")
        .build()
        .unwrap();

    assert_eq!(context.default_username(), Some("admin@example.com"));
}

#[test]
fn test_client_targets_context_origin() {
    let context = CliContextBuilder::new()
        .with_base_url("http://members.test")
        .build()
        .unwrap();

    let client = context.client().unwrap();
    assert_eq!(client.base_url(), "http://members.test");
}
