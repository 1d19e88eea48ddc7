mod common;

use common::MemoryStore;
use serde_json::{Value, json};
use shared::{
    abstract_trait::{
        agent::{AgentClientTrait, DynAgentClient},
        member::{repository::DynUserRepository, service::MemberAgentServiceTrait},
    },
    client::AgentClient,
    config::AgentConfig,
    domain::requests::MemberAgentRequest,
    errors::ServiceError,
    service::MemberAgentService,
    utils::create_sign,
};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

fn config(server: &MockServer) -> AgentConfig {
    AgentConfig {
        api_endpoint: server.uri(),
        agent_name: "ufa".into(),
        start_number: 1000,
        secret_key: "agent-secret".into(),
        timeout_secs: 5,
    }
}

async fn only_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests[0].body_json::<Value>().unwrap()
}

#[tokio::test]
async fn register_sends_signed_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credit-auth/xregister"))
        .and(body_partial_json(json!({
            "agentName": "ufa",
            "username": "ufa1007",
            "password": "secret99"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentClient::new(&config(&server)).unwrap();
    client.register("ufa1007", "secret99").await.unwrap();

    let body = only_body(&server).await;
    let timestamp = body["timestamp"].as_i64().unwrap();
    let expected = create_sign("agent-secret", "ufaufa1007secret99", timestamp);
    assert_eq!(body["sign"], expected.as_str());
    assert_eq!(expected.len(), 64);
}

#[tokio::test]
async fn rejected_register_carries_agent_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credit-auth/xregister"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "username taken"
        })))
        .mount(&server)
        .await;

    let client = AgentClient::new(&config(&server)).unwrap();
    let err = client.register("ufa1007", "secret99").await.unwrap_err();

    assert!(matches!(err, ServiceError::ExternalApi(reason) if reason == "username taken"));
}

#[tokio::test]
async fn login_tolerates_unsuccessful_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credit-auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "wrong password"
        })))
        .mount(&server)
        .await;

    let client = AgentClient::new(&config(&server)).unwrap();
    let resp = client.login("ufa1007", "secret99").await.unwrap();

    assert!(!resp.success);
    assert_eq!(resp.message.as_deref(), Some("wrong password"));
}

#[tokio::test]
async fn credit_transfer_signs_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credit-transfer/deposit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "balance": 350.5
        })))
        .mount(&server)
        .await;

    let client = AgentClient::new(&config(&server)).unwrap();
    let resp = client.deposit("ufa1007", 150.5).await.unwrap();
    assert_eq!(resp.balance, Some(350.5));

    let body = only_body(&server).await;
    assert_eq!(body["amount"], 150.5);
    let timestamp = body["timestamp"].as_i64().unwrap();
    assert_eq!(
        body["sign"],
        create_sign("agent-secret", "ufaufa1007150.5", timestamp).as_str()
    );
}

#[tokio::test]
async fn server_error_is_external() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credit-transfer/withdraw"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "success": false,
            "message": "upstream down"
        })))
        .mount(&server)
        .await;

    let client = AgentClient::new(&config(&server)).unwrap();
    let err = client.withdraw("ufa1007", 10.0).await.unwrap_err();

    assert!(matches!(err, ServiceError::ExternalApi(reason) if reason == "upstream down"));
}

#[tokio::test]
async fn member_register_assigns_code_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credit-auth/xregister"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/credit-auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "welcome"
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let member = store.add_member("", "bay", "0001234567", 0.0);
    let config = config(&server);
    let agent: DynAgentClient = Arc::new(AgentClient::new(&config).unwrap());
    let service = MemberAgentService::new(store.clone() as DynUserRepository, agent, &config).await;

    let req = MemberAgentRequest {
        password: "secret99".into(),
    };
    let code = service.register(member.id, &req).await.unwrap().data.unwrap();

    assert_eq!(code, format!("ufa{}", 1000 + member.id));
    assert_eq!(store.user(member.id).member_code.as_deref(), Some(code.as_str()));

    let login = service.login(member.id, &req).await.unwrap();
    assert_eq!(login.message, "welcome");
    assert_eq!(login.data.as_deref(), Some(code.as_str()));
}

#[tokio::test]
async fn member_request_is_validated_before_calling_agent() {
    let server = MockServer::start().await;
    let store = MemoryStore::new();
    let member = store.add_member("", "bay", "0001234567", 0.0);
    let config = config(&server);
    let agent: DynAgentClient = Arc::new(AgentClient::new(&config).unwrap());
    let service = MemberAgentService::new(store.clone() as DynUserRepository, agent, &config).await;

    let err = service
        .change_password(
            member.id,
            &MemberAgentRequest {
                password: "123".into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(store.user(member.id).member_code, None);

    let err = service.register(4242, &MemberAgentRequest { password: "secret99".into() }).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
