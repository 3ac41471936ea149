use crate::helpers::*;
use oandata::{FetchRequest, OandataError};

#[tokio::test]
async fn reversed_range_fails_before_any_call() {
    let (oandata, controller) = scripted(3);
    let req = FetchRequest::new("EUR_USD", d(2020, 2, 1), d(2020, 1, 1)).unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(err, OandataError::InvalidArg(_)));
    assert_eq!(controller.call_count().await, 0);
}

#[tokio::test]
async fn future_end_fails_before_any_call() {
    let (oandata, controller) = scripted(3);
    let req = FetchRequest::new("EUR_USD", d(2024, 6, 1), d(2024, 7, 1)).unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(controller.call_count().await, 0);
}

#[tokio::test]
async fn deserialized_invalid_request_is_rejected() {
    let (oandata, controller) = scripted(3);
    let json = r#"{"instrument":"","from":"2020-01-01","to":"2020-01-02","granularity":"D","price":"M","split":null,"retry_bound":null}"#;
    let req: FetchRequest = serde_json::from_str(json).unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(err, OandataError::InvalidArg(_)));
    assert_eq!(controller.call_count().await, 0);
}

#[test]
fn zero_retry_bound_is_rejected_by_builders() {
    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 2))
        .retry_bound(0)
        .build();
    assert!(matches!(req, Err(OandataError::InvalidArg(_))));

    let built = oandata::Oandata::builder()
        .with_provider(std::sync::Arc::new(oandata_mock::MockProvider::new()))
        .retry_bound(0)
        .build();
    assert!(matches!(built, Err(OandataError::InvalidArg(_))));
}

#[test]
fn zero_split_is_rejected() {
    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 2))
        .split(0)
        .build();
    assert!(matches!(req, Err(OandataError::InvalidArg(_))));
}
